//! VWAP (volume-weighted average price)

/// Cumulative VWAP from the start of the series:
/// `Σ(typical · volume) / Σ(volume)`. Undefined while the cumulative
/// volume is still zero.
pub fn vwap(high: &[f64], low: &[f64], close: &[f64], volume: &[f64]) -> Vec<Option<f64>> {
    let mut cum_pv = 0.0;
    let mut cum_v = 0.0;
    (0..high.len())
        .map(|i| {
            let typical = (high[i] + low[i] + close[i]) / 3.0;
            cum_pv += typical * volume[i];
            cum_v += volume[i];
            if cum_v == 0.0 {
                None
            } else {
                Some(cum_pv / cum_v)
            }
        })
        .collect()
}
