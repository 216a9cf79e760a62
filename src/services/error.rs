use thiserror::Error;

/// Failures of the candle-fetching collaborator.
#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("exchange returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("no candles returned for {symbol}")]
    Empty { symbol: String },
}

impl MarketDataError {
    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            MarketDataError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            MarketDataError::Status { status, .. } => *status == 429 || *status >= 500,
            MarketDataError::Malformed(_) | MarketDataError::Empty { .. } => false,
        }
    }
}

/// Failures of the signal delivery collaborator.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("telegram request failed: {0}")]
    Telegram(#[from] teloxide::RequestError),
}
