//! Tunables of the RSI threshold rule and the ATR price ladder.

use serde::{Deserialize, Serialize};

use crate::signals::error::SignalConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    pub atr_period: usize,
    pub rsi_period: usize,
    pub atr_multiplier_for_stop_loss: f64,
    pub risk_reward_ratios: Vec<f64>,
    pub oversold_threshold: f64,
    pub overbought_threshold: f64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            atr_period: 14,
            rsi_period: 14,
            atr_multiplier_for_stop_loss: 1.5,
            risk_reward_ratios: vec![1.0, 2.0, 3.0],
            oversold_threshold: 30.0,
            overbought_threshold: 70.0,
        }
    }
}

impl SignalConfig {
    /// Check every invariant the engine relies on.
    pub fn validate(&self) -> Result<(), SignalConfigError> {
        if self.atr_period == 0 {
            return Err(SignalConfigError::ZeroPeriod { name: "ATR" });
        }
        if self.rsi_period == 0 {
            return Err(SignalConfigError::ZeroPeriod { name: "RSI" });
        }

        if self.risk_reward_ratios.is_empty() {
            return Err(SignalConfigError::EmptyRiskRewardRatios);
        }
        for (index, &ratio) in self.risk_reward_ratios.iter().enumerate() {
            if !ratio.is_finite() || ratio <= 0.0 {
                return Err(SignalConfigError::NonPositiveRatio { index, ratio });
            }
        }
        for pair in self.risk_reward_ratios.windows(2) {
            if pair[1] <= pair[0] {
                return Err(SignalConfigError::NonIncreasingRatios {
                    previous: pair[0],
                    next: pair[1],
                });
            }
        }

        let multiplier = self.atr_multiplier_for_stop_loss;
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(SignalConfigError::InvalidStopLossMultiplier(multiplier));
        }

        for (name, value) in [
            ("oversold", self.oversold_threshold),
            ("overbought", self.overbought_threshold),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(SignalConfigError::ThresholdOutOfRange { name, value });
            }
        }
        if self.oversold_threshold >= self.overbought_threshold {
            return Err(SignalConfigError::InvertedThresholds {
                oversold: self.oversold_threshold,
                overbought: self.overbought_threshold,
            });
        }

        Ok(())
    }

    /// Candles needed for both indicators to be defined at the last index.
    pub fn required_candles(&self) -> usize {
        crate::indicators::required_candles(self.atr_period, self.rsi_period)
    }
}
