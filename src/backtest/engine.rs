//! Backtesting engine

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::backtest::report::{BacktestReport, BacktestTrade, TradeOutcome};
use crate::models::indicators::Candle;
use crate::models::signal::{SignalDirection, SignalOutcome, SignalResult};
use crate::signals::{SignalConfig, SignalConfigError, SignalEngine};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestConfig {
    pub initial_balance: f64,
    /// Amount lost when a trade hits its stop-loss.
    pub risk_per_trade: f64,
    /// Index of the first candle a signal may be generated on.
    pub warmup: usize,
    pub signal: SignalConfig,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            initial_balance: 1000.0,
            risk_per_trade: 10.0,
            warmup: 50,
            signal: SignalConfig::default(),
        }
    }
}

/// Replays candles one at a time, asking the engine for a signal on every
/// prefix and resolving each signal against the candles that follow it.
///
/// Every signal is evaluated on its own; overlapping trades are not merged.
pub struct Backtester {
    config: BacktestConfig,
}

impl Backtester {
    pub fn new(config: BacktestConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BacktestConfig {
        &self.config
    }

    pub fn run(&self, symbol: &str, candles: &[Candle]) -> Result<BacktestReport, SignalConfigError> {
        self.config.signal.validate()?;

        let reward_ratio = self.config.signal.risk_reward_ratios[0];
        let mut balance = self.config.initial_balance;
        let mut trades = Vec::new();
        let mut unresolved = 0;

        info!(symbol = %symbol, candles = candles.len(), "backtest started");

        let last_entry_index = candles.len().saturating_sub(1);
        for i in self.config.warmup..last_entry_index {
            let outcome = SignalEngine::decide(symbol, &candles[..=i], &self.config.signal)?;
            let SignalOutcome::Signal(signal) = outcome else {
                continue;
            };

            match resolve(&signal, &candles[i + 1..]) {
                Some((exit_index, result)) => {
                    let pnl = match result {
                        TradeOutcome::Win => self.config.risk_per_trade * reward_ratio,
                        TradeOutcome::Loss => -self.config.risk_per_trade,
                    };
                    balance += pnl;
                    debug!(
                        symbol = %symbol,
                        direction = %signal.direction(),
                        outcome = ?result,
                        pnl,
                        "trade resolved"
                    );
                    trades.push(BacktestTrade {
                        timestamp: signal.timestamp(),
                        exit_timestamp: candles[i + 1 + exit_index].timestamp,
                        direction: signal.direction(),
                        entry: signal.entry(),
                        stop_loss: signal.stop_loss(),
                        take_profit: signal.take_profits()[0],
                        outcome: result,
                        pnl,
                    });
                }
                None => unresolved += 1,
            }
        }

        let report = BacktestReport::new(
            symbol.to_string(),
            candles.len(),
            self.config.initial_balance,
            balance,
            trades,
            unresolved,
        );
        info!(
            symbol = %symbol,
            trades = report.trades.len(),
            wins = report.wins,
            losses = report.losses,
            unresolved = report.unresolved,
            final_balance = report.final_balance,
            "backtest finished"
        );
        Ok(report)
    }
}

/// Walk forward until the stop-loss or the first take-profit is touched.
///
/// The stop-loss is checked first on every candle, so a candle spanning both
/// levels counts as a loss.
fn resolve(signal: &SignalResult, future: &[Candle]) -> Option<(usize, TradeOutcome)> {
    let stop_loss = signal.stop_loss();
    let take_profit = signal.take_profits()[0];

    future.iter().enumerate().find_map(|(j, candle)| {
        let (stopped, targeted) = match signal.direction() {
            SignalDirection::Long => (candle.low <= stop_loss, candle.high >= take_profit),
            SignalDirection::Short => (candle.high >= stop_loss, candle.low <= take_profit),
        };
        if stopped {
            Some((j, TradeOutcome::Loss))
        } else if targeted {
            Some((j, TradeOutcome::Win))
        } else {
            None
        }
    })
}
