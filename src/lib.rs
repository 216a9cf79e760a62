//! RSI threshold trade signals with ATR-derived stop-loss and take-profit
//! levels, plus the scanner, chat bot, HTTP API and back-test harness around
//! the engine.

pub mod backtest;
pub mod bot;
pub mod common;
pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod services;
pub mod signals;

pub use models::{Candle, IndicatorSeries, SignalDirection, SignalOutcome, SignalResult};
pub use signals::{SignalConfig, SignalConfigError, SignalEngine};
