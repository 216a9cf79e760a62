//! External collaborators: market data in, notifications out.

pub mod binance;
pub mod error;
pub mod market_data;
pub mod notifier;

pub use binance::BinanceMarketDataProvider;
pub use error::{MarketDataError, NotifyError};
pub use market_data::MarketDataProvider;
pub use notifier::{LogNotifier, SignalNotifier, TelegramNotifier};
