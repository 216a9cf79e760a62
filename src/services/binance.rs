//! Binance spot klines provider (public REST, no authentication).

use async_trait::async_trait;
use chrono::DateTime;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::config::DEFAULT_EXCHANGE_BASE_URL;
use crate::models::indicators::Candle;
use crate::services::error::MarketDataError;
use crate::services::market_data::MarketDataProvider;

/// Largest `limit` the klines endpoint accepts.
pub const MAX_KLINES_LIMIT: usize = 1000;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct BinanceMarketDataProvider {
    base_url: String,
    client: reqwest::Client,
}

impl BinanceMarketDataProvider {
    pub fn new() -> Result<Self, MarketDataError> {
        Self::with_base_url(DEFAULT_EXCHANGE_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, MarketDataError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// `BTC/USDT` (or `btc-usdt`) -> `BTCUSDT`.
pub fn exchange_symbol(symbol: &str) -> String {
    symbol
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_uppercase()
}

#[async_trait]
impl MarketDataProvider for BinanceMarketDataProvider {
    /// GET /api/v3/klines
    ///
    /// Rows are `[openTime, open, high, low, close, volume, closeTime, ...]`
    /// with prices as strings. The candle timestamp is the open time.
    #[instrument(skip(self), name = "binance::get_candles")]
    async fn get_candles(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError> {
        let limit = limit.clamp(1, MAX_KLINES_LIMIT);
        let pair = exchange_symbol(symbol);
        let limit_param = limit.to_string();
        let url = format!("{}/api/v3/klines", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", pair.as_str()),
                ("interval", timeframe),
                ("limit", limit_param.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MarketDataError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await?;
        let rows = body
            .as_array()
            .ok_or_else(|| MarketDataError::Malformed("klines response is not an array".into()))?;

        let mut candles = Vec::with_capacity(rows.len());
        for row in rows {
            match parse_kline(row) {
                Ok(candle) => candles.push(candle),
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "skipping malformed kline");
                }
            }
        }

        if candles.is_empty() {
            return Err(MarketDataError::Empty {
                symbol: symbol.to_string(),
            });
        }

        candles.sort_by_key(|c| c.timestamp);
        debug!(symbol = %symbol, timeframe, count = candles.len(), "klines fetched");
        Ok(candles)
    }
}

fn parse_kline(row: &Value) -> Result<Candle, MarketDataError> {
    let fields = row
        .as_array()
        .ok_or_else(|| MarketDataError::Malformed("kline entry is not an array".into()))?;
    if fields.len() < 6 {
        return Err(MarketDataError::Malformed(format!(
            "kline entry has {} fields",
            fields.len()
        )));
    }

    let open_time = fields[0]
        .as_i64()
        .ok_or_else(|| MarketDataError::Malformed("open time is not an integer".into()))?;
    let timestamp = DateTime::from_timestamp_millis(open_time)
        .ok_or_else(|| MarketDataError::Malformed(format!("open time {open_time} out of range")))?;

    Ok(Candle::new(
        parse_price(&fields[1], "open")?,
        parse_price(&fields[2], "high")?,
        parse_price(&fields[3], "low")?,
        parse_price(&fields[4], "close")?,
        parse_price(&fields[5], "volume")?,
        timestamp,
    ))
}

fn parse_price(value: &Value, field: &str) -> Result<f64, MarketDataError> {
    let parsed = match value {
        Value::String(s) => s.parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    };
    parsed.ok_or_else(|| MarketDataError::Malformed(format!("invalid {field}: {value}")))
}
