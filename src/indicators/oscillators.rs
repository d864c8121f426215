//! Oscillators: CCI, CMO, TSI, TRIX, Awesome Oscillator, Aroon, Vortex

use crate::indicators::atr::true_range;
use crate::indicators::ma::{ema, ema_opt, sma};
use crate::indicators::series::{diff, sub};

/// Commodity channel index over `period`; defined from index
/// `period − 1`. A zero mean deviation (flat window) reads 0.
pub fn cci(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = high.len();
    let typical: Vec<f64> = (0..n).map(|i| (high[i] + low[i] + close[i]) / 3.0).collect();
    let mean = sma(&typical, period);
    let mut out = vec![None; n];
    if period == 0 || period > n {
        return out;
    }
    for i in (period - 1)..n {
        let m = match mean[i] {
            Some(m) => m,
            None => continue,
        };
        let md: f64 = typical[i + 1 - period..=i]
            .iter()
            .map(|x| (x - m).abs())
            .sum::<f64>()
            / period as f64;
        out[i] = Some(if md == 0.0 {
            0.0
        } else {
            (typical[i] - m) / (0.015 * md)
        });
    }
    out
}

/// Chande momentum oscillator over `period`; defined from index `period`.
/// Range [−100, 100]; a window with no movement reads 0.
pub fn cmo(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let mut out = vec![None; n];
    if period == 0 {
        return out;
    }
    for i in period..n {
        let mut up = 0.0;
        let mut down = 0.0;
        for j in (i + 1 - period)..=i {
            let d = values[j] - values[j - 1];
            if d > 0.0 {
                up += d;
            } else {
                down -= d;
            }
        }
        let total = up + down;
        out[i] = Some(if total == 0.0 {
            0.0
        } else {
            100.0 * (up - down) / total
        });
    }
    out
}

/// True strength index: double-EMA-smoothed momentum over
/// (`long`, `short`), scaled to ±100. A zero denominator reads 0.
pub fn tsi(values: &[f64], long: usize, short: usize) -> Vec<Option<f64>> {
    let momentum = diff(values);
    let abs_momentum: Vec<Option<f64>> = momentum.iter().map(|m| m.map(f64::abs)).collect();
    let num = ema_opt(&ema_opt(&momentum, long), short);
    let den = ema_opt(&ema_opt(&abs_momentum, long), short);
    num.iter()
        .zip(den.iter())
        .map(|(n, d)| match (n, d) {
            (Some(n), Some(d)) => {
                if *d == 0.0 {
                    Some(0.0)
                } else {
                    Some(100.0 * n / d)
                }
            }
            _ => None,
        })
        .collect()
}

/// TRIX: one-bar percent change of a triple-smoothed EMA, scaled by 100.
/// Defined from index 1 onward (and wherever the base level is nonzero).
pub fn trix(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let smoothed = ema_opt(&ema_opt(&ema(values, period), period), period);
    let mut out = vec![None; values.len()];
    for i in 1..values.len() {
        if let (Some(prev), Some(cur)) = (smoothed[i - 1], smoothed[i]) {
            if prev != 0.0 {
                out[i] = Some((cur - prev) / prev * 100.0);
            }
        }
    }
    out
}

/// Awesome oscillator: SMA(median price, `fast`) − SMA(median price,
/// `slow`); defined from index `slow − 1`.
pub fn awesome_oscillator(high: &[f64], low: &[f64], fast: usize, slow: usize) -> Vec<Option<f64>> {
    let median: Vec<f64> = high
        .iter()
        .zip(low.iter())
        .map(|(h, l)| (h + l) / 2.0)
        .collect();
    sub(&sma(&median, fast), &sma(&median, slow))
}

/// Aroon up/down columns, each in [0, 100].
#[derive(Debug, Clone)]
pub struct Aroon {
    pub up: Vec<Option<f64>>,
    pub down: Vec<Option<f64>>,
}

/// Aroon over a `period + 1` bar window (the conventional reading of
/// "bars since the `period`-bar extreme"); defined from index `period`.
/// Ties resolve to the most recent extreme.
pub fn aroon(high: &[f64], low: &[f64], period: usize) -> Aroon {
    let n = high.len();
    let mut up = vec![None; n];
    let mut down = vec![None; n];
    if period == 0 {
        return Aroon { up, down };
    }
    for i in period..n {
        let window = &high[i - period..=i];
        let mut hi_idx = 0;
        for (j, x) in window.iter().enumerate() {
            if *x >= window[hi_idx] {
                hi_idx = j;
            }
        }
        let window = &low[i - period..=i];
        let mut lo_idx = 0;
        for (j, x) in window.iter().enumerate() {
            if *x <= window[lo_idx] {
                lo_idx = j;
            }
        }
        let since_high = (period - hi_idx) as f64;
        let since_low = (period - lo_idx) as f64;
        up[i] = Some(100.0 * (period as f64 - since_high) / period as f64);
        down[i] = Some(100.0 * (period as f64 - since_low) / period as f64);
    }
    Aroon { up, down }
}

/// Vortex VI+ / VI− columns.
#[derive(Debug, Clone)]
pub struct Vortex {
    pub plus: Vec<Option<f64>>,
    pub minus: Vec<Option<f64>>,
}

/// Vortex indicator over `period`; defined from index `period`. A zero
/// true-range sum (flat window) reads 1.0 on both sides (neutral).
pub fn vortex(high: &[f64], low: &[f64], close: &[f64], period: usize) -> Vortex {
    let n = high.len();
    let tr = true_range(high, low, close);
    let mut plus = vec![None; n];
    let mut minus = vec![None; n];
    if period == 0 {
        return Vortex { plus, minus };
    }
    for i in period..n {
        let mut vm_plus = 0.0;
        let mut vm_minus = 0.0;
        let mut tr_sum = 0.0;
        for j in (i + 1 - period)..=i {
            vm_plus += (high[j] - low[j - 1]).abs();
            vm_minus += (low[j] - high[j - 1]).abs();
            if let Some(t) = tr[j] {
                tr_sum += t;
            }
        }
        if tr_sum == 0.0 {
            plus[i] = Some(1.0);
            minus[i] = Some(1.0);
        } else {
            plus[i] = Some(vm_plus / tr_sum);
            minus[i] = Some(vm_minus / tr_sum);
        }
    }
    Vortex { plus, minus }
}
