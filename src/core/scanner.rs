//! Periodic multi-symbol scanning: fetch, decide, deliver.

use backon::Retryable;
use futures_util::stream::{self, StreamExt};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::config::AppConfig;
use crate::core::retry::RetryPolicy;
use crate::models::indicators::Candle;
use crate::models::signal::SignalOutcome;
use crate::services::error::MarketDataError;
use crate::services::market_data::MarketDataProvider;
use crate::services::notifier::SignalNotifier;
use crate::signals::{SignalConfig, SignalConfigError, SignalEngine};

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("market data for {symbol} unavailable: {source}")]
    MarketData {
        symbol: String,
        #[source]
        source: MarketDataError,
    },
    #[error(transparent)]
    Config(#[from] SignalConfigError),
}

#[derive(Debug, Clone)]
pub struct ScannerConfig {
    pub symbols: Vec<String>,
    pub timeframe: String,
    pub candle_limit: usize,
    /// Symbols analysed in parallel.
    pub concurrency: usize,
    pub retry: RetryPolicy,
    pub signal: SignalConfig,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self::from_app_config(&AppConfig::default())
    }
}

impl ScannerConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            symbols: config.symbols.clone(),
            timeframe: config.timeframe.clone(),
            candle_limit: config.candle_limit,
            concurrency: config.scan_concurrency,
            retry: config.retry.clone(),
            signal: config.signal.clone(),
        }
    }
}

/// Per-cycle counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub signals: usize,
    pub no_signal: usize,
    pub insufficient_data: usize,
    pub failed: usize,
    pub delivery_failures: usize,
}

impl ScanSummary {
    pub fn scanned(&self) -> usize {
        self.signals + self.no_signal + self.insufficient_data + self.failed
    }
}

enum SymbolReport {
    Signal { delivered: bool },
    NoSignal,
    InsufficientData,
    Failed,
}

pub struct Scanner {
    provider: Arc<dyn MarketDataProvider>,
    notifier: Arc<dyn SignalNotifier>,
    config: ScannerConfig,
}

impl Scanner {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        notifier: Arc<dyn SignalNotifier>,
        config: ScannerConfig,
    ) -> Self {
        Self {
            provider,
            notifier,
            config,
        }
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Fetch candles, retrying transient failures under the configured policy.
    pub async fn fetch_candles(&self, symbol: &str) -> Result<Vec<Candle>, MarketDataError> {
        let fetch = || async {
            self.provider
                .get_candles(symbol, &self.config.timeframe, self.config.candle_limit)
                .await
        };

        fetch
            .retry(self.config.retry.backoff())
            .when(MarketDataError::is_transient)
            .notify(|e: &MarketDataError, delay| {
                warn!(
                    symbol = %symbol,
                    error = %e,
                    delay_ms = delay.as_millis() as u64,
                    "candle fetch failed, retrying"
                );
            })
            .await
    }

    /// Analyse one symbol without delivering anything.
    pub async fn scan_symbol(&self, symbol: &str) -> Result<SignalOutcome, ScanError> {
        let candles = self
            .fetch_candles(symbol)
            .await
            .map_err(|source| ScanError::MarketData {
                symbol: symbol.to_string(),
                source,
            })?;

        Ok(SignalEngine::decide(symbol, &candles, &self.config.signal)?)
    }

    /// One full cycle over every configured symbol.
    ///
    /// A failing symbol is logged and counted; it never aborts the cycle.
    pub async fn scan_all(&self) -> ScanSummary {
        let concurrency = self.config.concurrency.max(1);
        info!(
            symbol_count = self.config.symbols.len(),
            concurrency, "scan cycle started"
        );

        let scans: Vec<_> = self
            .config
            .symbols
            .iter()
            .map(|symbol| self.process_symbol(symbol))
            .collect();
        let reports: Vec<SymbolReport> = stream::iter(scans)
            .buffer_unordered(concurrency)
            .collect()
            .await;

        let mut summary = ScanSummary::default();
        for report in reports {
            match report {
                SymbolReport::Signal { delivered } => {
                    summary.signals += 1;
                    if !delivered {
                        summary.delivery_failures += 1;
                    }
                }
                SymbolReport::NoSignal => summary.no_signal += 1,
                SymbolReport::InsufficientData => summary.insufficient_data += 1,
                SymbolReport::Failed => summary.failed += 1,
            }
        }

        info!(
            signals = summary.signals,
            no_signal = summary.no_signal,
            insufficient_data = summary.insufficient_data,
            failed = summary.failed,
            delivery_failures = summary.delivery_failures,
            "scan cycle finished"
        );
        summary
    }

    async fn process_symbol(&self, symbol: &str) -> SymbolReport {
        debug!(symbol = %symbol, "scanning");

        let outcome = match self.scan_symbol(symbol).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(symbol = %symbol, error = %e, "scan failed");
                return SymbolReport::Failed;
            }
        };

        match outcome {
            SignalOutcome::Signal(signal) => {
                info!(
                    symbol = %symbol,
                    direction = %signal.direction(),
                    rsi = signal.rsi(),
                    "signal found"
                );
                let delivered = match self.notifier.deliver(&signal).await {
                    Ok(()) => true,
                    Err(e) => {
                        error!(symbol = %symbol, error = %e, "failed to deliver signal");
                        false
                    }
                };
                SymbolReport::Signal { delivered }
            }
            SignalOutcome::NoSignal { rsi, .. } => {
                info!(symbol = %symbol, rsi, "no signal");
                SymbolReport::NoSignal
            }
            SignalOutcome::InsufficientData {
                required,
                available,
            } => {
                warn!(symbol = %symbol, required, available, "not enough candles for indicators");
                SymbolReport::InsufficientData
            }
        }
    }
}
