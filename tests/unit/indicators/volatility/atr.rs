//! Unit tests for the ATR indicator

use rsi_signals::indicators::volatility::{
    calculate_atr, calculate_atr_default, calculate_atr_series, true_range_series,
};
use rsi_signals::models::indicators::Candle;

use crate::test_utils::{assert_close, flat_candles, ts};

fn bar(index: usize, high: f64, low: f64, close: f64) -> Candle {
    Candle::new(close, high, low, close, 1000.0, ts(index))
}

fn hand_computed_bars() -> Vec<Candle> {
    vec![
        bar(0, 10.0, 8.0, 9.0),
        bar(1, 11.0, 9.0, 10.0),
        bar(2, 14.0, 10.0, 13.0),
        bar(3, 13.0, 12.0, 12.5),
        bar(4, 20.0, 19.0, 19.5),
    ]
}

#[test]
fn first_true_range_is_high_minus_low() {
    let tr = true_range_series(&hand_computed_bars());
    assert_eq!(tr, vec![2.0, 2.0, 4.0, 1.0, 7.5]);
}

#[test]
fn atr_matches_hand_computed_wilder_values() {
    let atr = calculate_atr_series(&hand_computed_bars(), 2);

    assert_eq!(atr[0], None);
    assert_eq!(atr[1], None);
    // seed: mean of TR[1..=2] = (2 + 4) / 2
    assert_close(atr[2].unwrap(), 3.0);
    assert_close(atr[3].unwrap(), 2.0);
    assert_close(atr[4].unwrap(), 4.75);
}

#[test]
fn atr_of_constant_range_equals_that_range() {
    let atr = calculate_atr_series(&flat_candles(30), 14);
    for (i, value) in atr.iter().enumerate() {
        if i < 14 {
            assert_eq!(*value, None, "index {i} should be warming up");
        } else {
            assert_close(value.unwrap(), 2.0);
        }
    }
}

#[test]
fn atr_needs_period_plus_one_candles() {
    assert_eq!(calculate_atr(&flat_candles(14), 14), None);
    assert!(calculate_atr(&flat_candles(15), 14).is_some());
    assert_eq!(calculate_atr_default(&flat_candles(15)), Some(2.0));
}

#[test]
fn atr_of_empty_input_is_empty() {
    assert!(calculate_atr_series(&[], 14).is_empty());
    assert_eq!(calculate_atr(&[], 14), None);
}
