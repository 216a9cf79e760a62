//! Signal output records produced by the decision engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalDirection {
    Long,
    Short,
}

impl fmt::Display for SignalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalDirection::Long => write!(f, "LONG"),
            SignalDirection::Short => write!(f, "SHORT"),
        }
    }
}

/// Directional trade suggestion with its price ladder.
///
/// Only [`crate::signals::SignalEngine`] constructs these, so the ordering
/// invariants between stop-loss, entry and take-profits always hold:
/// LONG has `stop_loss < entry < tp[0] < tp[1] < ...`, SHORT the mirror image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalResult {
    symbol: String,
    direction: SignalDirection,
    entry: f64,
    stop_loss: f64,
    take_profits: Vec<f64>,
    atr: f64,
    rsi: f64,
    timestamp: DateTime<Utc>,
}

impl SignalResult {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        symbol: String,
        direction: SignalDirection,
        entry: f64,
        stop_loss: f64,
        take_profits: Vec<f64>,
        atr: f64,
        rsi: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            symbol,
            direction,
            entry,
            stop_loss,
            take_profits,
            atr,
            rsi,
            timestamp,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn direction(&self) -> SignalDirection {
        self.direction
    }

    pub fn entry(&self) -> f64 {
        self.entry
    }

    pub fn stop_loss(&self) -> f64 {
        self.stop_loss
    }

    /// Take-profit levels ordered by increasing distance from the entry.
    pub fn take_profits(&self) -> &[f64] {
        &self.take_profits
    }

    pub fn atr(&self) -> f64 {
        self.atr
    }

    pub fn rsi(&self) -> f64 {
        self.rsi
    }

    /// Timestamp of the candle the signal was computed on.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Result of a single `decide` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SignalOutcome {
    Signal(SignalResult),
    /// Indicators are defined but RSI stayed inside the neutral band.
    NoSignal { rsi: f64, atr: f64 },
    /// Not enough candles for the indicators to be defined at the last index.
    InsufficientData { required: usize, available: usize },
}

impl SignalOutcome {
    pub fn signal(&self) -> Option<&SignalResult> {
        match self {
            SignalOutcome::Signal(signal) => Some(signal),
            _ => None,
        }
    }

    pub fn into_signal(self) -> Option<SignalResult> {
        match self {
            SignalOutcome::Signal(signal) => Some(signal),
            _ => None,
        }
    }

    pub fn is_signal(&self) -> bool {
        matches!(self, SignalOutcome::Signal(_))
    }
}
