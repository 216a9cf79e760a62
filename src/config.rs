//! Environment-driven application configuration.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::core::retry::RetryPolicy;
use crate::signals::{SignalConfig, SignalConfigError};

pub const DEFAULT_EXCHANGE_BASE_URL: &str = "https://api.binance.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("{0} is required")]
    Missing(&'static str),
    #[error(transparent)]
    Signal(#[from] SignalConfigError),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub bot_token: Option<String>,
    pub admin_chat_id: Option<i64>,
    pub exchange_base_url: String,
    pub timeframe: String,
    pub candle_limit: usize,
    pub symbols: Vec<String>,
    pub scan_interval_seconds: u64,
    pub scan_concurrency: usize,
    pub retry: RetryPolicy,
    pub signal: SignalConfig,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "sandbox".to_string(),
            bot_token: None,
            admin_chat_id: None,
            exchange_base_url: DEFAULT_EXCHANGE_BASE_URL.to_string(),
            timeframe: "1h".to_string(),
            candle_limit: 100,
            symbols: vec![
                "BTC/USDT".to_string(),
                "ETH/USDT".to_string(),
                "SOL/USDT".to_string(),
            ],
            scan_interval_seconds: 3600,
            scan_concurrency: 1,
            retry: RetryPolicy::default(),
            signal: SignalConfig::default(),
            port: 8080,
        }
    }
}

impl AppConfig {
    /// Build the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup, falling back to
    /// defaults for absent keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let signal_defaults = SignalConfig::default();
        let signal = SignalConfig {
            atr_period: parse_or(&get, "ATR_PERIOD", signal_defaults.atr_period)?,
            rsi_period: parse_or(&get, "RSI_PERIOD", signal_defaults.rsi_period)?,
            atr_multiplier_for_stop_loss: parse_or(
                &get,
                "ATR_MULTIPLIER_SL",
                signal_defaults.atr_multiplier_for_stop_loss,
            )?,
            risk_reward_ratios: match get("RISK_REWARD_RATIOS") {
                Some(raw) => parse_list(&raw, "RISK_REWARD_RATIOS")?,
                None => signal_defaults.risk_reward_ratios,
            },
            oversold_threshold: parse_or(&get, "RSI_OVERSOLD", signal_defaults.oversold_threshold)?,
            overbought_threshold: parse_or(
                &get,
                "RSI_OVERBOUGHT",
                signal_defaults.overbought_threshold,
            )?,
        };
        signal.validate()?;

        let retry = RetryPolicy {
            max_attempts: parse_or(&get, "RETRY_MAX_ATTEMPTS", defaults.retry.max_attempts)?,
            min_delay: Duration::from_millis(parse_or(
                &get,
                "RETRY_MIN_DELAY_MS",
                defaults.retry.min_delay.as_millis() as u64,
            )?),
            max_delay: Duration::from_millis(parse_or(
                &get,
                "RETRY_MAX_DELAY_MS",
                defaults.retry.max_delay.as_millis() as u64,
            )?),
        };

        let symbols = match get("SYMBOLS_TO_SCAN") {
            Some(raw) => raw
                .split(',')
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty())
                .collect(),
            None => defaults.symbols,
        };

        let scan_concurrency: usize = parse_or(&get, "SCAN_CONCURRENCY", defaults.scan_concurrency)?;
        if scan_concurrency == 0 {
            return Err(ConfigError::Invalid {
                key: "SCAN_CONCURRENCY",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            environment: get("APP_ENV").unwrap_or(defaults.environment),
            bot_token: get("BOT_TOKEN"),
            admin_chat_id: get("ADMIN_CHAT_ID")
                .map(|raw| parse_value(&raw, "ADMIN_CHAT_ID"))
                .transpose()?,
            exchange_base_url: get("EXCHANGE_BASE_URL").unwrap_or(defaults.exchange_base_url),
            timeframe: get("DEFAULT_TIMEFRAME").unwrap_or(defaults.timeframe),
            candle_limit: parse_or(&get, "DEFAULT_LIMIT", defaults.candle_limit)?,
            symbols,
            scan_interval_seconds: parse_or(
                &get,
                "SCAN_INTERVAL_SECONDS",
                defaults.scan_interval_seconds,
            )?,
            scan_concurrency,
            retry,
            signal,
            port: parse_or(&get, "PORT", defaults.port)?,
        })
    }

    /// Bot token, required by the chat bot binary.
    pub fn require_bot_token(&self) -> Result<&str, ConfigError> {
        self.bot_token.as_deref().ok_or(ConfigError::Missing("BOT_TOKEN"))
    }
}

fn parse_or<T, F>(get: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => parse_value(&raw, key),
        None => Ok(default),
    }
}

fn parse_value<T: FromStr>(raw: &str, key: &'static str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: raw.to_string(),
    })
}

fn parse_list(raw: &str, key: &'static str) -> Result<Vec<f64>, ConfigError> {
    raw.split(',').map(|item| parse_value(item, key)).collect()
}
