//! ATR (Average True Range) indicator

use crate::common::math;
use crate::models::indicators::Candle;

/// True range for every candle. The first candle has no previous close, so
/// its true range is simply `high - low`.
pub fn true_range_series(candles: &[Candle]) -> Vec<f64> {
    candles
        .iter()
        .enumerate()
        .map(|(i, candle)| match i {
            0 => candle.high - candle.low,
            _ => math::true_range(candle.high, candle.low, candles[i - 1].close),
        })
        .collect()
}

/// Calculate the ATR series using Wilder's smoothing.
///
/// The first defined value sits at index `period` and is the mean of the
/// `period` true ranges that have a previous close (`TR[1..=period]`).
/// From there `ATR[i] = ATR[i-1] + (TR[i] - ATR[i-1]) / period`.
pub fn calculate_atr_series(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    let tr = true_range_series(candles);
    math::wilder_smooth(&tr, period, 1)
}

/// ATR at the last candle, `None` when fewer than `period + 1` candles are given.
pub fn calculate_atr(candles: &[Candle], period: usize) -> Option<f64> {
    calculate_atr_series(candles, period).last().copied().flatten()
}

/// Calculate ATR with default period (14)
pub fn calculate_atr_default(candles: &[Candle]) -> Option<f64> {
    calculate_atr(candles, 14)
}
