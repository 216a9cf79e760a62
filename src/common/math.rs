//! Small numeric building blocks: true range and Wilder smoothing.

/// True range of a bar against the previous close:
/// `max(high - low, |high - prev_close|, |low - prev_close|)`.
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    let hl = high - low;
    let hc = (high - prev_close).abs();
    let lc = (low - prev_close).abs();
    hl.max(hc).max(lc)
}

/// One step of Wilder smoothing (EMA with alpha = 1/period).
pub fn wilder_step(previous: f64, value: f64, period: usize) -> f64 {
    previous + (value - previous) / period as f64
}

/// Wilder-smoothed series aligned with `values`.
///
/// Smoothing starts at `start`: the value at `start + period - 1` is the
/// arithmetic mean of `values[start..start + period]`, every later index
/// applies [`wilder_step`]. Earlier indices are `None`, as is any index whose
/// value is not finite (a NaN input poisons the remainder of the series).
pub fn wilder_smooth(values: &[f64], period: usize, start: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 {
        return out;
    }
    let seed_index = start + period - 1;
    if seed_index >= values.len() {
        return out;
    }

    let mut current = values[start..=seed_index].iter().sum::<f64>() / period as f64;
    out[seed_index] = finite(current);

    for i in seed_index + 1..values.len() {
        current = wilder_step(current, values[i], period);
        out[i] = finite(current);
    }

    out
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
