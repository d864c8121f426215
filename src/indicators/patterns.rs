//! Candle transforms and pattern flags: Heikin-Ashi, hammers, divergences

use crate::data::Candle;
use crate::indicators::series::{opt, rolling_min_opt, rolling_max_opt, shift};

/// Heikin-Ashi open/close columns.
#[derive(Debug, Clone)]
pub struct HeikinAshi {
    pub open: Vec<Option<f64>>,
    pub close: Vec<Option<f64>>,
}

/// Heikin-Ashi recursion: smoothed close is the bar average, smoothed
/// open is the midpoint of the previous smoothed bar (seeded from the
/// first raw bar). Defined from the first bar.
pub fn heikin_ashi(candles: &[Candle]) -> HeikinAshi {
    let n = candles.len();
    let mut open = vec![None; n];
    let mut close = vec![None; n];
    for (i, c) in candles.iter().enumerate() {
        let ha_close = (c.open + c.high + c.low + c.close) / 4.0;
        let ha_open = if i == 0 {
            (c.open + c.close) / 2.0
        } else {
            (open[i - 1].unwrap_or(0.0) + close[i - 1].unwrap_or(0.0)) / 2.0
        };
        open[i] = Some(ha_open);
        close[i] = Some(ha_close);
    }
    HeikinAshi { open, close }
}

/// Hammer flags: a real body near the top of the range with a lower
/// shadow at least twice the body and at most a body-sized upper shadow.
/// Zero-body bars (dojis) don't qualify.
pub fn hammer_flags(candles: &[Candle]) -> Vec<bool> {
    candles
        .iter()
        .map(|c| {
            let body = c.body_size();
            body > 0.0 && c.lower_wick() >= 2.0 * body && c.upper_wick() <= body
        })
        .collect()
}

/// Bullish divergence: price prints a lower low against the prior
/// `lookback`-bar window while the oscillator holds above its own prior
/// low. All referenced values must be defined.
pub fn bullish_divergence(
    price_lows: &[f64],
    oscillator: &[Option<f64>],
    lookback: usize,
) -> Vec<bool> {
    let prior_price = shift(&rolling_min_opt(&opt(price_lows), lookback), 1);
    let prior_osc = shift(&rolling_min_opt(oscillator, lookback), 1);
    (0..price_lows.len())
        .map(|i| {
            match (prior_price[i], prior_osc[i], oscillator[i]) {
                (Some(pp), Some(po), Some(o)) => price_lows[i] < pp && o > po,
                _ => false,
            }
        })
        .collect()
}

/// Bearish divergence: price prints a higher high while the oscillator
/// fails to follow.
pub fn bearish_divergence(
    price_highs: &[f64],
    oscillator: &[Option<f64>],
    lookback: usize,
) -> Vec<bool> {
    let prior_price = shift(&rolling_max_opt(&opt(price_highs), lookback), 1);
    let prior_osc = shift(&rolling_max_opt(oscillator, lookback), 1);
    (0..price_highs.len())
        .map(|i| {
            match (prior_price[i], prior_osc[i], oscillator[i]) {
                (Some(pp), Some(po), Some(o)) => price_highs[i] > pp && o < po,
                _ => false,
            }
        })
        .collect()
}
