//! RSI threshold decision rule with an ATR-derived price ladder.

use tracing::{debug, trace};

use crate::indicators;
use crate::models::indicators::Candle;
use crate::models::signal::{SignalDirection, SignalOutcome, SignalResult};
use crate::signals::config::SignalConfig;
use crate::signals::error::SignalConfigError;

pub struct SignalEngine;

impl SignalEngine {
    /// Decide on a trade suggestion from the latest candle of `candles`.
    ///
    /// Deterministic and free of I/O, safe to call concurrently on
    /// independent inputs. Only an invalid `config` is an error; missing
    /// history and a neutral RSI are ordinary outcomes.
    pub fn decide(
        symbol: &str,
        candles: &[Candle],
        config: &SignalConfig,
    ) -> Result<SignalOutcome, SignalConfigError> {
        config.validate()?;

        let required = config.required_candles();
        let Some(last) = candles.last() else {
            return Ok(SignalOutcome::InsufficientData {
                required,
                available: 0,
            });
        };

        let series = indicators::compute(candles, config.atr_period, config.rsi_period);
        let (Some(atr), Some(rsi)) = (series.latest_atr(), series.latest_rsi()) else {
            debug!(
                symbol = %symbol,
                available = candles.len(),
                required,
                "indicators undefined at the last candle"
            );
            return Ok(SignalOutcome::InsufficientData {
                required,
                available: candles.len(),
            });
        };

        trace!(symbol = %symbol, atr, rsi, "latest indicator values");

        let direction = if rsi < config.oversold_threshold {
            SignalDirection::Long
        } else if rsi > config.overbought_threshold {
            SignalDirection::Short
        } else {
            return Ok(SignalOutcome::NoSignal { rsi, atr });
        };

        let entry = last.close;
        let (stop_loss, take_profits) = price_levels(direction, entry, atr, config);

        // A vanishing ATR rounds the ladder back onto the entry.
        if !levels_ordered(direction, stop_loss, entry, &take_profits) {
            debug!(
                symbol = %symbol,
                rsi,
                atr,
                "threshold crossed but price levels collapse, skipping"
            );
            return Ok(SignalOutcome::NoSignal { rsi, atr });
        }

        debug!(
            symbol = %symbol,
            direction = %direction,
            entry,
            stop_loss,
            atr,
            rsi,
            "signal generated"
        );

        Ok(SignalOutcome::Signal(SignalResult::new(
            symbol.to_string(),
            direction,
            entry,
            stop_loss,
            take_profits,
            atr,
            rsi,
            last.timestamp,
        )))
    }
}

/// Stop-loss and take-profit ladder around `entry`.
fn price_levels(
    direction: SignalDirection,
    entry: f64,
    atr: f64,
    config: &SignalConfig,
) -> (f64, Vec<f64>) {
    let stop_distance = atr * config.atr_multiplier_for_stop_loss;
    let sign = match direction {
        SignalDirection::Long => 1.0,
        SignalDirection::Short => -1.0,
    };

    let stop_loss = entry - sign * stop_distance;
    let take_profits = config
        .risk_reward_ratios
        .iter()
        .map(|ratio| entry + sign * atr * ratio)
        .collect();

    (stop_loss, take_profits)
}

/// LONG: `stop_loss < entry < tp[0] < tp[1] < ...`, SHORT the mirror image.
fn levels_ordered(
    direction: SignalDirection,
    stop_loss: f64,
    entry: f64,
    take_profits: &[f64],
) -> bool {
    let ladder = std::iter::once(stop_loss)
        .chain(std::iter::once(entry))
        .chain(take_profits.iter().copied());
    let ladder: Vec<f64> = match direction {
        SignalDirection::Long => ladder.collect(),
        SignalDirection::Short => ladder.map(|level| -level).collect(),
    };
    ladder.windows(2).all(|pair| pair[0] < pair[1])
}
