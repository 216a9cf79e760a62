use thiserror::Error;

/// Rejected signal configuration. Raised before any computation happens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SignalConfigError {
    #[error("{name} period must be greater than zero")]
    ZeroPeriod { name: &'static str },
    #[error("risk-reward ratio list is empty")]
    EmptyRiskRewardRatios,
    #[error("risk-reward ratio {ratio} at position {index} must be finite and positive")]
    NonPositiveRatio { index: usize, ratio: f64 },
    #[error("risk-reward ratios must be strictly increasing ({previous} followed by {next})")]
    NonIncreasingRatios { previous: f64, next: f64 },
    #[error("stop-loss ATR multiplier {0} must be finite and positive")]
    InvalidStopLossMultiplier(f64),
    #[error("{name} threshold {value} must lie within [0, 100]")]
    ThresholdOutOfRange { name: &'static str, value: f64 },
    #[error("oversold threshold {oversold} must be below overbought threshold {overbought}")]
    InvertedThresholds { oversold: f64, overbought: f64 },
}
