//! RSI (Relative Strength Index) indicator

use crate::common::math;
use crate::models::indicators::Candle;

/// Calculate the RSI series using Wilder's smoothing.
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
///
/// Gains and losses are smoothed separately, seeded at index `period` with
/// the mean of the first `period` close-to-close changes.
pub fn calculate_rsi_series(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    let mut gains = Vec::with_capacity(candles.len());
    let mut losses = Vec::with_capacity(candles.len());

    for (i, candle) in candles.iter().enumerate() {
        if i == 0 {
            gains.push(0.0);
            losses.push(0.0);
            continue;
        }
        let change = candle.close - candles[i - 1].close;
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    let avg_gains = math::wilder_smooth(&gains, period, 1);
    let avg_losses = math::wilder_smooth(&losses, period, 1);

    avg_gains
        .into_iter()
        .zip(avg_losses)
        .map(|(gain, loss)| rsi_from_averages(gain?, loss?))
        .collect()
}

/// RSI at the last candle, `None` when fewer than `period + 1` candles are given.
pub fn calculate_rsi(candles: &[Candle], period: usize) -> Option<f64> {
    calculate_rsi_series(candles, period).last().copied().flatten()
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(candles: &[Candle]) -> Option<f64> {
    calculate_rsi(candles, 14)
}

/// Convert smoothed gain/loss into RSI.
///
/// No movement at all reads as neutral (50). Gains without any loss read as 100.
pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    let rsi = if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0
    } else if avg_loss == 0.0 {
        100.0
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - (100.0 / (1.0 + rs))
    };

    rsi.is_finite().then_some(rsi)
}
