//! Unit tests for environment configuration

use std::collections::HashMap;
use std::time::Duration;

use rsi_signals::config::{AppConfig, ConfigError};
use rsi_signals::signals::{SignalConfig, SignalConfigError};

fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    AppConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn empty_environment_uses_defaults() {
    let config = load(&[]).unwrap();

    assert_eq!(config.environment, "sandbox");
    assert_eq!(config.timeframe, "1h");
    assert_eq!(config.candle_limit, 100);
    assert_eq!(config.symbols, vec!["BTC/USDT", "ETH/USDT", "SOL/USDT"]);
    assert_eq!(config.scan_interval_seconds, 3600);
    assert_eq!(config.scan_concurrency, 1);
    assert_eq!(config.port, 8080);
    assert_eq!(config.exchange_base_url, "https://api.binance.com");
    assert_eq!(config.admin_chat_id, None);
    assert_eq!(config.retry.max_attempts, 3);
    assert_eq!(config.signal, SignalConfig::default());
}

#[test]
fn overrides_are_parsed() {
    let config = load(&[
        ("APP_ENV", "production"),
        ("ADMIN_CHAT_ID", "-100123"),
        ("DEFAULT_TIMEFRAME", "4h"),
        ("DEFAULT_LIMIT", "250"),
        ("SYMBOLS_TO_SCAN", " btc/usdt, eth/usdt ,,"),
        ("SCAN_CONCURRENCY", "4"),
        ("RETRY_MIN_DELAY_MS", "100"),
        ("RSI_PERIOD", "7"),
        ("RISK_REWARD_RATIOS", "1.5, 2.5"),
        ("RSI_OVERSOLD", "25"),
    ])
    .unwrap();

    assert_eq!(config.environment, "production");
    assert_eq!(config.admin_chat_id, Some(-100123));
    assert_eq!(config.timeframe, "4h");
    assert_eq!(config.candle_limit, 250);
    assert_eq!(config.symbols, vec!["BTC/USDT", "ETH/USDT"]);
    assert_eq!(config.scan_concurrency, 4);
    assert_eq!(config.retry.min_delay, Duration::from_millis(100));
    assert_eq!(config.signal.rsi_period, 7);
    assert_eq!(config.signal.risk_reward_ratios, vec![1.5, 2.5]);
    assert_eq!(config.signal.oversold_threshold, 25.0);
}

#[test]
fn blank_values_are_treated_as_unset() {
    let config = load(&[("PORT", ""), ("BOT_TOKEN", "  ")]).unwrap();
    assert_eq!(config.port, 8080);
    assert!(config.bot_token.is_none());
}

#[test]
fn unparsable_value_names_the_key() {
    let err = load(&[("DEFAULT_LIMIT", "lots")]).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Invalid {
            key: "DEFAULT_LIMIT",
            ..
        }
    ));
}

#[test]
fn signal_settings_are_validated() {
    let err = load(&[("RSI_OVERSOLD", "80")]).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Signal(SignalConfigError::InvertedThresholds { .. })
    ));
}

#[test]
fn zero_concurrency_is_rejected() {
    assert!(matches!(
        load(&[("SCAN_CONCURRENCY", "0")]),
        Err(ConfigError::Invalid {
            key: "SCAN_CONCURRENCY",
            ..
        })
    ));
}

#[test]
fn bot_token_is_required_on_demand() {
    assert!(matches!(
        load(&[]).unwrap().require_bot_token(),
        Err(ConfigError::Missing("BOT_TOKEN"))
    ));
    assert_eq!(
        load(&[("BOT_TOKEN", "123:abc")]).unwrap().require_bot_token().unwrap(),
        "123:abc"
    );
}
