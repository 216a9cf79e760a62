//! Backtest results

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::models::signal::SignalDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeOutcome {
    Win,
    Loss,
}

impl fmt::Display for TradeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeOutcome::Win => write!(f, "WIN"),
            TradeOutcome::Loss => write!(f, "LOSS"),
        }
    }
}

/// A signal that reached either its stop-loss or its first take-profit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestTrade {
    pub timestamp: DateTime<Utc>,
    pub exit_timestamp: DateTime<Utc>,
    pub direction: SignalDirection,
    pub entry: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub outcome: TradeOutcome,
    pub pnl: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestReport {
    pub symbol: String,
    pub candles: usize,
    pub initial_balance: f64,
    pub final_balance: f64,
    pub trades: Vec<BacktestTrade>,
    pub wins: usize,
    pub losses: usize,
    /// Signals whose trade never touched either level before the data ran out.
    pub unresolved: usize,
    /// Percentage of winning trades, `None` without trades.
    pub win_rate: Option<f64>,
}

impl BacktestReport {
    pub fn new(
        symbol: String,
        candles: usize,
        initial_balance: f64,
        final_balance: f64,
        trades: Vec<BacktestTrade>,
        unresolved: usize,
    ) -> Self {
        let wins = trades
            .iter()
            .filter(|t| t.outcome == TradeOutcome::Win)
            .count();
        let losses = trades.len() - wins;
        let win_rate = (!trades.is_empty()).then(|| wins as f64 / trades.len() as f64 * 100.0);

        Self {
            symbol,
            candles,
            initial_balance,
            final_balance,
            trades,
            wins,
            losses,
            unresolved,
            win_rate,
        }
    }

    pub fn total_trades(&self) -> usize {
        self.trades.len()
    }
}

impl fmt::Display for BacktestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(30);
        writeln!(f, "{rule}")?;
        writeln!(f, "BACKTEST RESULTS")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Symbol:          {}", self.symbol)?;
        writeln!(f, "Period:          last {} candles", self.candles)?;
        writeln!(f, "Initial Balance: ${:.2}", self.initial_balance)?;
        writeln!(f, "Final Balance:   ${:.2}", self.final_balance)?;
        writeln!(f, "Total Trades:    {}", self.total_trades())?;
        writeln!(f, "Wins:            {}", self.wins)?;
        writeln!(f, "Losses:          {}", self.losses)?;
        writeln!(f, "Unresolved:      {}", self.unresolved)?;
        if let Some(rate) = self.win_rate {
            writeln!(f, "Win Rate:        {:.2}%", rate)?;
        }
        write!(f, "{rule}")?;

        let skip = self.trades.len().saturating_sub(5);
        if skip < self.trades.len() {
            writeln!(f)?;
            writeln!(f)?;
            write!(f, "Last {} Trades:", self.trades.len() - skip)?;
            for trade in &self.trades[skip..] {
                write!(
                    f,
                    "\n{} | {} | {} | ${:.2}",
                    trade.timestamp.format("%Y-%m-%d %H:%M"),
                    trade.direction,
                    trade.outcome,
                    trade.pnl
                )?;
            }
        }
        Ok(())
    }
}
