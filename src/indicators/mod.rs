//! Technical indicators used by the signal engine.

pub mod calculator;
pub mod momentum;
pub mod volatility;

pub use calculator::{compute, required_candles};
