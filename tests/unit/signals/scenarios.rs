//! Market scenarios exercising threshold boundaries and degenerate inputs

use rsi_signals::models::indicators::Candle;
use rsi_signals::models::signal::{SignalDirection, SignalOutcome};
use rsi_signals::signals::{SignalConfig, SignalEngine};

use crate::test_utils::{candles_from_closes, declining_candles, flat_candles, rising_candles, ts};

fn thresholds(oversold: f64, overbought: f64) -> SignalConfig {
    SignalConfig {
        oversold_threshold: oversold,
        overbought_threshold: overbought,
        ..SignalConfig::default()
    }
}

// Thresholds are moved onto the flat market's exact RSI of 50, so these cover
// "RSI exactly at 30 / 70 yields no signal" for any threshold value.
#[test]
fn rsi_equal_to_oversold_threshold_is_not_a_signal() {
    // flat market reads RSI 50 exactly
    let outcome =
        SignalEngine::decide("BTC/USDT", &flat_candles(50), &thresholds(50.0, 60.0)).unwrap();
    assert!(matches!(outcome, SignalOutcome::NoSignal { rsi, .. } if rsi == 50.0));
}

#[test]
fn rsi_equal_to_overbought_threshold_is_not_a_signal() {
    let outcome =
        SignalEngine::decide("BTC/USDT", &flat_candles(50), &thresholds(40.0, 50.0)).unwrap();
    assert!(!outcome.is_signal());
}

#[test]
fn extreme_thresholds_never_fire() {
    let outcome =
        SignalEngine::decide("BTC/USDT", &rising_candles(50), &thresholds(0.0, 100.0)).unwrap();
    assert!(!outcome.is_signal());

    let outcome =
        SignalEngine::decide("BTC/USDT", &declining_candles(50), &thresholds(0.0, 100.0))
            .unwrap();
    assert!(!outcome.is_signal());
}

#[test]
fn rsi_just_below_oversold_fires_long() {
    let outcome =
        SignalEngine::decide("BTC/USDT", &flat_candles(50), &thresholds(50.5, 60.0)).unwrap();
    let signal = outcome.signal().expect("expected a signal");
    assert_eq!(signal.direction(), SignalDirection::Long);
    assert_eq!(signal.entry(), 100.0);
}

#[test]
fn zero_volatility_suppresses_signal() {
    // high == low == close: ATR 0, RSI 50
    let candles: Vec<Candle> = (0..50)
        .map(|i| Candle::new(100.0, 100.0, 100.0, 100.0, 10.0, ts(i)))
        .collect();
    let outcome = SignalEngine::decide("BTC/USDT", &candles, &thresholds(55.0, 60.0)).unwrap();

    assert_eq!(outcome, SignalOutcome::NoSignal { rsi: 50.0, atr: 0.0 });
}

#[test]
fn sell_off_after_rally_turns_oversold() {
    let mut closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
    closes.extend((1..=30).map(|i| 139.0 - 2.0 * i as f64));
    let candles = candles_from_closes(&closes, 0.5);

    let outcome = SignalEngine::decide("SOL/USDT", &candles, &SignalConfig::default()).unwrap();
    let signal = outcome.signal().expect("expected a signal");
    assert_eq!(signal.direction(), SignalDirection::Long);
    assert!(signal.rsi() < 30.0);
    assert!(signal.stop_loss() < signal.entry());
}

#[test]
fn same_input_gives_same_outcome() {
    let candles = declining_candles(100);
    let config = SignalConfig::default();

    let first = SignalEngine::decide("BTC/USDT", &candles, &config).unwrap();
    let second = SignalEngine::decide("BTC/USDT", &candles, &config).unwrap();
    assert_eq!(first, second);
    assert_eq!(candles, declining_candles(100));
}

#[test]
fn non_finite_bar_leaves_indicators_undefined() {
    let mut candles = declining_candles(50);
    candles[45].high = f64::NAN;
    candles[45].low = f64::NAN;
    candles[45].close = f64::NAN;
    let outcome = SignalEngine::decide("BTC/USDT", &candles, &SignalConfig::default()).unwrap();
    assert!(matches!(outcome, SignalOutcome::InsufficientData { available: 50, .. }));
}

#[test]
fn collapsed_price_ladder_is_not_a_signal() {
    // sell-off, then zero-trade bars: RSI pinned at 0 while ATR decays to ~1e-19
    let mut candles = declining_candles(30);
    candles.extend((30..630).map(|i| Candle::new(171.0, 171.0, 171.0, 171.0, 0.0, ts(i))));

    let outcome = SignalEngine::decide("BTC/USDT", &candles, &SignalConfig::default()).unwrap();

    match outcome {
        SignalOutcome::NoSignal { rsi, atr } => {
            assert_eq!(rsi, 0.0);
            assert!(atr > 0.0 && 171.0 + atr == 171.0, "atr {atr} should vanish next to the entry");
        }
        other => panic!("expected NoSignal, got {other:?}"),
    }
}

#[test]
fn tiny_but_representable_atr_still_signals() {
    // a shorter flat stretch leaves enough ATR for distinct levels
    let mut candles = declining_candles(30);
    candles.extend((30..130).map(|i| Candle::new(171.0, 171.0, 171.0, 171.0, 0.0, ts(i))));

    let outcome = SignalEngine::decide("BTC/USDT", &candles, &SignalConfig::default()).unwrap();
    let signal = outcome.signal().expect("expected a signal");

    assert_eq!(signal.direction(), SignalDirection::Long);
    assert!(signal.stop_loss() < signal.entry());
    assert!(signal.entry() < signal.take_profits()[0]);
    assert!(signal.take_profits()[0] < signal.take_profits()[1]);
    assert!(signal.take_profits()[1] < signal.take_profits()[2]);
}
