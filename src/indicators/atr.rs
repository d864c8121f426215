//! True range and ATR (Average True Range)

use crate::indicators::ma::wilder_smooth;

/// True range: `max(h − l, |h − prev close|, |l − prev close|)`.
/// Undefined at index 0 (no previous close).
pub fn true_range(high: &[f64], low: &[f64], close: &[f64]) -> Vec<Option<f64>> {
    (0..high.len())
        .map(|i| {
            if i == 0 {
                return None;
            }
            let hl = high[i] - low[i];
            let hc = (high[i] - close[i - 1]).abs();
            let lc = (low[i] - close[i - 1]).abs();
            Some(hl.max(hc).max(lc))
        })
        .collect()
}

/// ATR: Wilder-smoothed true range; defined from index `period`.
pub fn atr(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Vec<Option<f64>> {
    wilder_smooth(&true_range(high, low, close), period)
}
