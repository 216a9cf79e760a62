//! Historical replay of the signal rule.

pub mod engine;
pub mod report;

pub use engine::{BacktestConfig, Backtester};
pub use report::{BacktestReport, BacktestTrade, TradeOutcome};
