//! Aligned ATR/RSI computation over a candle sequence.

use crate::indicators::momentum::calculate_rsi_series;
use crate::indicators::volatility::calculate_atr_series;
use crate::models::indicators::{Candle, IndicatorSeries};

/// Compute ATR and RSI for every candle.
///
/// Pure function of its inputs. Never fails: indices inside the warm-up window
/// (or poisoned by non-finite prices) are `None`, and it is up to the caller
/// to check the index it cares about.
pub fn compute(candles: &[Candle], atr_period: usize, rsi_period: usize) -> IndicatorSeries {
    IndicatorSeries {
        atr: calculate_atr_series(candles, atr_period),
        rsi: calculate_rsi_series(candles, rsi_period),
        atr_period,
        rsi_period,
    }
}

/// Number of candles needed for both indicators to be defined at the last index.
pub fn required_candles(atr_period: usize, rsi_period: usize) -> usize {
    atr_period.max(rsi_period) + 1
}
