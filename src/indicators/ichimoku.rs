//! Ichimoku Kinko Hyo lines

use crate::indicators::series::{rolling_max, rolling_min, shift};

/// Ichimoku columns aligned to the input. Senkou A/B are displaced
/// forward by the base period, as plotted; the chikou relationship is
/// expressed by comparing close against its own value `base` bars back
/// (see [`close_lag`]).
#[derive(Debug, Clone)]
pub struct Ichimoku {
    pub tenkan: Vec<Option<f64>>,
    pub kijun: Vec<Option<f64>>,
    pub senkou_a: Vec<Option<f64>>,
    pub senkou_b: Vec<Option<f64>>,
}

fn midpoint(high: &[f64], low: &[f64], period: usize) -> Vec<Option<f64>> {
    rolling_max(high, period)
        .iter()
        .zip(rolling_min(low, period).iter())
        .map(|(h, l)| match (h, l) {
            (Some(h), Some(l)) => Some((h + l) / 2.0),
            _ => None,
        })
        .collect()
}

/// Standard parameterization is (9, 26, 52).
pub fn ichimoku(
    high: &[f64],
    low: &[f64],
    conversion: usize,
    base: usize,
    span_b: usize,
) -> Ichimoku {
    let tenkan = midpoint(high, low, conversion);
    let kijun = midpoint(high, low, base);
    let mid: Vec<Option<f64>> = tenkan
        .iter()
        .zip(kijun.iter())
        .map(|(t, k)| match (t, k) {
            (Some(t), Some(k)) => Some((t + k) / 2.0),
            _ => None,
        })
        .collect();
    let senkou_a = shift(&mid, base);
    let senkou_b = shift(&midpoint(high, low, span_b), base);
    Ichimoku {
        tenkan,
        kijun,
        senkou_a,
        senkou_b,
    }
}

/// Close from `base` bars back, aligned to the current bar. This is the
/// column the chikou-span confirmation compares against.
pub fn close_lag(close: &[f64], base: usize) -> Vec<Option<f64>> {
    shift(
        &close.iter().map(|&c| Some(c)).collect::<Vec<_>>(),
        base,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warm_up_alignment() {
        let n = 100;
        let high: Vec<f64> = (0..n).map(|i| 101.0 + i as f64 * 0.2).collect();
        let low: Vec<f64> = (0..n).map(|i| 99.0 + i as f64 * 0.2).collect();
        let out = ichimoku(&high, &low, 9, 26, 52);

        assert!(out.tenkan[..8].iter().all(|v| v.is_none()));
        assert!(out.tenkan[8..].iter().all(|v| v.is_some()));
        assert!(out.kijun[..25].iter().all(|v| v.is_none()));
        // senkou B: 52-bar midpoint shifted forward 26 bars
        assert!(out.senkou_b[..77].iter().all(|v| v.is_none()));
        assert!(out.senkou_b[77..].iter().all(|v| v.is_some()));
    }

    #[test]
    fn test_uptrend_sits_above_the_cloud() {
        let n = 120;
        let high: Vec<f64> = (0..n).map(|i| 101.0 + i as f64).collect();
        let low: Vec<f64> = (0..n).map(|i| 99.0 + i as f64).collect();
        let close: Vec<f64> = (0..n).map(|i| 100.0 + i as f64).collect();
        let out = ichimoku(&high, &low, 9, 26, 52);

        let i = n - 1;
        let cloud_top = out.senkou_a[i].unwrap().max(out.senkou_b[i].unwrap());
        assert!(close[i] > cloud_top);
        assert!(out.tenkan[i].unwrap() > out.kijun[i].unwrap());

        let lag = close_lag(&close, 26);
        assert!(close[i] > lag[i].unwrap());
    }

    #[test]
    fn test_flat_series_collapses_lines() {
        let high = [100.0; 90];
        let low = [100.0; 90];
        let out = ichimoku(&high, &low, 9, 26, 52);
        assert_eq!(out.tenkan[89], Some(100.0));
        assert_eq!(out.kijun[89], Some(100.0));
        assert_eq!(out.senkou_a[89], Some(100.0));
        assert_eq!(out.senkou_b[89], Some(100.0));
    }
}
