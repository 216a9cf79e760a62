use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single OHLCV bar. Sequences of candles are ordered ascending by timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub timestamp: DateTime<Utc>,
}

impl Candle {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume,
            timestamp,
        }
    }
}

/// ATR and RSI values aligned index-for-index with the candles they were
/// computed from. `None` marks the warm-up window (and any non-finite value).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSeries {
    pub atr: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
    pub atr_period: usize,
    pub rsi_period: usize,
}

impl IndicatorSeries {
    pub fn len(&self) -> usize {
        self.atr.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atr.is_empty()
    }

    pub fn atr_at(&self, index: usize) -> Option<f64> {
        self.atr.get(index).copied().flatten()
    }

    pub fn rsi_at(&self, index: usize) -> Option<f64> {
        self.rsi.get(index).copied().flatten()
    }

    /// ATR at the last index, `None` while still warming up.
    pub fn latest_atr(&self) -> Option<f64> {
        self.atr.last().copied().flatten()
    }

    /// RSI at the last index, `None` while still warming up.
    pub fn latest_rsi(&self) -> Option<f64> {
        self.rsi.last().copied().flatten()
    }
}
