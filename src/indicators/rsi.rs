//! RSI (Relative Strength Index)
//!
//! Rolling-mean variant: average gain and loss are plain window means of
//! the clipped one-bar differences, not Wilder-smoothed. Output lies in
//! [0, 100] and a window with zero average loss reads 100.

use crate::indicators::ma::sma_opt;
use crate::indicators::series::diff;

/// RSI over `period` differences; defined from index `period` (one bar is
/// consumed by the difference).
pub fn rsi(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let deltas = diff(values);
    let gains: Vec<Option<f64>> = deltas
        .iter()
        .map(|d| d.map(|x| if x > 0.0 { x } else { 0.0 }))
        .collect();
    let losses: Vec<Option<f64>> = deltas
        .iter()
        .map(|d| d.map(|x| if x < 0.0 { -x } else { 0.0 }))
        .collect();

    let avg_gain = sma_opt(&gains, period);
    let avg_loss = sma_opt(&losses, period);

    avg_gain
        .iter()
        .zip(avg_loss.iter())
        .map(|(g, l)| match (g, l) {
            (Some(gain), Some(loss)) => {
                if *loss == 0.0 {
                    // no losses in the window (flat windows included)
                    Some(100.0)
                } else {
                    Some(100.0 - 100.0 / (1.0 + gain / loss))
                }
            }
            _ => None,
        })
        .collect()
}
