//! Keltner Channel

use crate::indicators::atr::atr;
use crate::indicators::ma::ema;

/// Channel columns aligned to the input.
#[derive(Debug, Clone)]
pub struct KeltnerChannel {
    pub upper: Vec<Option<f64>>,
    pub middle: Vec<Option<f64>>,
    pub lower: Vec<Option<f64>>,
}

/// EMA(close) middle line ± `mult` · ATR. Bands are defined where the ATR
/// is (index `atr_period` onward); the middle line from the first bar.
pub fn keltner(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    ema_period: usize,
    atr_period: usize,
    mult: f64,
) -> KeltnerChannel {
    let middle = ema(close, ema_period);
    let atr_col = atr(high, low, close, atr_period);
    let band = |sign: f64| -> Vec<Option<f64>> {
        middle
            .iter()
            .zip(atr_col.iter())
            .map(|(m, a)| match (m, a) {
                (Some(m), Some(a)) => Some(m + sign * mult * a),
                _ => None,
            })
            .collect()
    };
    KeltnerChannel {
        upper: band(1.0),
        lower: band(-1.0),
        middle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_orders_and_warm_up() {
        let n = 40;
        let high: Vec<f64> = (0..n).map(|i| 101.5 + (i as f64 * 0.3).sin()).collect();
        let low: Vec<f64> = (0..n).map(|i| 98.5 + (i as f64 * 0.3).sin()).collect();
        let close: Vec<f64> = (0..n).map(|i| 100.0 + (i as f64 * 0.3).sin()).collect();

        let ch = keltner(&high, &low, &close, 20, 10, 2.0);
        assert!(ch.upper[..10].iter().all(|v| v.is_none()));
        for i in 10..n {
            let (u, m, l) = (
                ch.upper[i].unwrap(),
                ch.middle[i].unwrap(),
                ch.lower[i].unwrap(),
            );
            assert!(u > m && m > l);
        }
    }

    #[test]
    fn test_flat_bars_collapse_channel() {
        let ch = keltner(&[100.0; 30], &[100.0; 30], &[100.0; 30], 20, 10, 2.0);
        for i in 10..30 {
            assert_eq!(ch.upper[i], Some(100.0));
            assert_eq!(ch.lower[i], Some(100.0));
        }
    }
}
