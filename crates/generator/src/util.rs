use crate::error::GeneratorError;
use ta::Next;
use ta::indicators::SimpleMovingAverage as Sma;

/// `n` evenly spaced samples over `[start, stop]`, both ends included.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n).map(|i| start + i as f64 * step).collect()
        }
    }
}

/// Rounds to `decimals` places, sending exact halves to the even neighbour.
pub fn round_half_even(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// Shifts `values` back by `lag` positions. The leading `lag` slots have no
/// source and take the first lagged value, i.e. `values[0]`.
pub fn lag_backfill(values: &[f64], lag: usize) -> Vec<f64> {
    (0..values.len())
        .map(|i| values[i.saturating_sub(lag)])
        .collect()
}

/// Trailing simple moving average over `window` points.
///
/// Positions without a full window are defined as 0, not skipped.
pub fn rolling_mean_or_zero(values: &[f64], window: usize) -> Result<Vec<f64>, GeneratorError> {
    let mut sma = Sma::new(window)
        .map_err(|e| GeneratorError::InvalidProfile(format!("rolling window {}: {:?}", window, e)))?;

    Ok(values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let mean = sma.next(value);
            if i + 1 >= window { mean } else { 0.0 }
        })
        .collect())
}
