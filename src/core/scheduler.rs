//! Cron-based scheduler driving the scanner

use cron::Schedule;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

use crate::core::scanner::Scanner;

#[derive(Debug, Error, PartialEq)]
pub enum SchedulerError {
    #[error("scheduler disabled: interval_seconds is 0")]
    Disabled,
    #[error("interval of {0}s cannot be expressed as an even cron schedule")]
    UnsupportedInterval(u64),
    #[error("invalid cron expression '{expr}': {reason}")]
    InvalidCron { expr: String, reason: String },
}

/// Convert an interval to a cron expression (second minute hour day month weekday).
///
/// The interval has to divide its unit evenly (e.g. 15s, 5m, 4h) so ticks stay
/// equally spaced across minute/hour/day boundaries.
pub fn cron_expression(interval_seconds: u64) -> Result<String, SchedulerError> {
    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;

    match interval_seconds {
        0 => Err(SchedulerError::Disabled),
        s if s < MINUTE && MINUTE % s == 0 => Ok(format!("*/{} * * * * *", s)),
        s if (MINUTE..HOUR).contains(&s) && s % MINUTE == 0 && HOUR % s == 0 => {
            Ok(format!("0 */{} * * * *", s / MINUTE))
        }
        s if (HOUR..DAY).contains(&s) && s % HOUR == 0 && DAY % s == 0 => {
            Ok(format!("0 0 */{} * * *", s / HOUR))
        }
        DAY => Ok("0 0 0 * * *".to_string()),
        s => Err(SchedulerError::UnsupportedInterval(s)),
    }
}

/// Runs a scan cycle right away and then on every cron tick.
pub struct ScanScheduler {
    scanner: Arc<Scanner>,
    schedule: Schedule,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl ScanScheduler {
    /// Create a new scheduler
    ///
    /// # Arguments
    /// * `scanner` - Scanner invoked on every tick
    /// * `interval_seconds` - Scan interval in seconds (0 = disabled)
    pub fn new(scanner: Arc<Scanner>, interval_seconds: u64) -> Result<Self, SchedulerError> {
        let cron_expr = cron_expression(interval_seconds)?;
        let schedule =
            Schedule::from_str(&cron_expr).map_err(|e| SchedulerError::InvalidCron {
                expr: cron_expr.clone(),
                reason: e.to_string(),
            })?;

        info!(
            interval = interval_seconds,
            cron = %cron_expr,
            symbols = ?scanner.config().symbols,
            "ScanScheduler: created with interval {}s (cron: {})",
            interval_seconds,
            cron_expr
        );

        Ok(Self {
            scanner,
            schedule,
            handle: Arc::new(RwLock::new(None)),
        })
    }

    /// Start the scheduler
    pub async fn start(&self) {
        let scanner = self.scanner.clone();
        let schedule = self.schedule.clone();

        let handle = tokio::spawn(async move {
            info!("ScanScheduler: started, running initial scan");
            scanner.scan_all().await;

            loop {
                let mut upcoming = schedule.upcoming(chrono::Utc);
                if let Some(next_tick) = upcoming.next() {
                    let now = chrono::Utc::now();
                    if next_tick > now {
                        let duration = (next_tick - now).to_std().unwrap_or_default();
                        info!(next_tick = %next_tick, "ScanScheduler: sleeping until next tick");
                        tokio::time::sleep(duration).await;
                    }
                } else {
                    tokio::time::sleep(tokio::time::Duration::from_secs(60)).await;
                    continue;
                }

                scanner.scan_all().await;
            }
        });

        let mut h = self.handle.write().await;
        if let Some(previous) = h.replace(handle) {
            previous.abort();
        }
        info!("ScanScheduler: started successfully");
    }

    /// Stop the scheduler
    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(h) = handle.take() {
            h.abort();
            info!("ScanScheduler: stopped");
        }
    }

    /// Check if the scheduler is running
    pub async fn is_running(&self) -> bool {
        let handle = self.handle.read().await;
        handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}
