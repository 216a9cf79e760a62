//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod signal;

pub use indicators::{Candle, IndicatorSeries};
pub use signal::{SignalDirection, SignalOutcome, SignalResult};
