//! Rolling pivot levels and Williams fractals

use crate::indicators::series::{opt, rolling_max, rolling_min, shift};

/// Classic floor-trader pivot columns computed over a rolling prior
/// window.
#[derive(Debug, Clone)]
pub struct Pivots {
    pub pp: Vec<Option<f64>>,
    pub r1: Vec<Option<f64>>,
    pub s1: Vec<Option<f64>>,
}

/// Pivot, first resistance and first support from the previous
/// `lookback`-bar window (shifted one bar: the current bar never feeds
/// its own levels). Defined from index `lookback`.
pub fn rolling_pivots(high: &[f64], low: &[f64], close: &[f64], lookback: usize) -> Pivots {
    let hh = shift(&rolling_max(high, lookback), 1);
    let ll = shift(&rolling_min(low, lookback), 1);
    let pc = shift(&opt(close), 1);

    let n = high.len();
    let mut pp = vec![None; n];
    let mut r1 = vec![None; n];
    let mut s1 = vec![None; n];
    for i in 0..n {
        if let (Some(h), Some(l), Some(c)) = (hh[i], ll[i], pc[i]) {
            let pivot = (h + l + c) / 3.0;
            pp[i] = Some(pivot);
            r1[i] = Some(2.0 * pivot - l);
            s1[i] = Some(2.0 * pivot - h);
        }
    }
    Pivots { pp, r1, s1 }
}

/// Most recent confirmed Williams fractal high, carried forward. A bar is
/// a fractal high when its high strictly exceeds the `wing` bars on each
/// side; it is only visible (confirmed) `wing` bars later, so the column
/// is lookahead-free.
pub fn fractal_high_levels(high: &[f64], wing: usize) -> Vec<Option<f64>> {
    fractal_levels(high, wing, |a, b| a > b)
}

/// Most recent confirmed Williams fractal low, carried forward.
pub fn fractal_low_levels(low: &[f64], wing: usize) -> Vec<Option<f64>> {
    fractal_levels(low, wing, |a, b| a < b)
}

fn fractal_levels(values: &[f64], wing: usize, beats: fn(f64, f64) -> bool) -> Vec<Option<f64>> {
    let n = values.len();
    let mut out = vec![None; n];
    if wing == 0 || n < 2 * wing + 1 {
        return out;
    }
    let mut level = None;
    let mut confirmations: Vec<Option<f64>> = vec![None; n];
    for j in wing..(n - wing) {
        let is_fractal = (1..=wing)
            .all(|k| beats(values[j], values[j - k]) && beats(values[j], values[j + k]));
        if is_fractal {
            confirmations[j + wing] = Some(values[j]);
        }
    }
    for i in 0..n {
        if confirmations[i].is_some() {
            level = confirmations[i];
        }
        out[i] = level;
    }
    out
}
