//! Bollinger Bands

use crate::indicators::ma::sma;

/// Band columns aligned to the input.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    pub upper: Vec<Option<f64>>,
    pub middle: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// SMA middle line ± `k` sample standard deviations over the same
/// window. A zero-variance (flat) window collapses all three lines onto
/// the middle; no division or NaN involved. Requires `period >= 2` for
/// the bands; the middle line follows the plain SMA rule.
pub fn bollinger(values: &[f64], period: usize, k: f64) -> BollingerBands {
    let middle = sma(values, period);
    let n = values.len();
    let mut upper = vec![None; n];
    let mut lower = vec![None; n];

    if period >= 2 && period <= n {
        for i in (period - 1)..n {
            let mean = match middle[i] {
                Some(m) => m,
                None => continue,
            };
            let window = &values[i + 1 - period..=i];
            let var: f64 = window.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>()
                / (period as f64 - 1.0);
            let sd = var.max(0.0).sqrt();
            upper[i] = Some(mean + k * sd);
            lower[i] = Some(mean - k * sd);
        }
    }

    BollingerBands { upper, middle, lower }
}
