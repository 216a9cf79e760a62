//! Market data provider interface.

use async_trait::async_trait;

use crate::models::indicators::Candle;
use crate::services::error::MarketDataError;

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Get the most recent `limit` candles for a symbol, ascending by timestamp.
    async fn get_candles(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError>;
}
