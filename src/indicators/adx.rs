//! ADX (Average Directional Index) with directional indicators
//!
//! Wilder's method end to end: ±DM → Wilder smoothing → DI → DX → ADX.
//! Flat markets produce 0 (zero true range ⇒ DI 0; DI sum zero ⇒ DX 0)
//! rather than dividing by zero.

use crate::indicators::atr::true_range;
use crate::indicators::ma::wilder_smooth;

/// ADX output columns.
#[derive(Debug, Clone)]
pub struct Adx {
    pub plus_di: Vec<Option<f64>>,
    pub minus_di: Vec<Option<f64>>,
    pub adx: Vec<Option<f64>>,
}

/// Directional movement system over `period`. `plus_di`/`minus_di` are
/// defined from index `period`, `adx` from index `2·period − 1`.
pub fn adx(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Adx {
    let n = high.len();
    let mut plus_dm = vec![None; n];
    let mut minus_dm = vec![None; n];
    for i in 1..n {
        let up = high[i] - high[i - 1];
        let down = low[i - 1] - low[i];
        plus_dm[i] = Some(if up > down && up > 0.0 { up } else { 0.0 });
        minus_dm[i] = Some(if down > up && down > 0.0 { down } else { 0.0 });
    }

    let smoothed_tr = wilder_smooth(&true_range(high, low, close), period);
    let smoothed_plus = wilder_smooth(&plus_dm, period);
    let smoothed_minus = wilder_smooth(&minus_dm, period);

    let di = |dm: &[Option<f64>]| -> Vec<Option<f64>> {
        dm.iter()
            .zip(smoothed_tr.iter())
            .map(|(dm, tr)| match (dm, tr) {
                (Some(dm), Some(tr)) => {
                    if *tr == 0.0 {
                        Some(0.0)
                    } else {
                        Some(100.0 * dm / tr)
                    }
                }
                _ => None,
            })
            .collect()
    };
    let plus_di = di(&smoothed_plus);
    let minus_di = di(&smoothed_minus);

    let dx: Vec<Option<f64>> = plus_di
        .iter()
        .zip(minus_di.iter())
        .map(|(p, m)| match (p, m) {
            (Some(p), Some(m)) => {
                let sum = p + m;
                if sum == 0.0 {
                    Some(0.0)
                } else {
                    Some(100.0 * (p - m).abs() / sum)
                }
            }
            _ => None,
        })
        .collect();

    Adx {
        plus_di,
        minus_di,
        adx: wilder_smooth(&dx, period),
    }
}
