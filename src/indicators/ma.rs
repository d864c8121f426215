//! Moving averages: simple, exponentially weighted, triple EMA, Wilder

use crate::indicators::series::opt;

/// Simple moving average; defined once a full window of `period` bars
/// exists (index `period - 1` onward).
pub fn sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    sma_opt(&opt(values), period)
}

/// SMA over an optional column. A window containing any undefined slot is
/// undefined, so warm-up gaps propagate instead of skewing the mean.
pub fn sma_opt(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || period > values.len() {
        return out;
    }
    for i in (period - 1)..values.len() {
        let mut sum = 0.0;
        let mut full = true;
        for v in &values[i + 1 - period..=i] {
            match v {
                Some(x) => sum += x,
                None => {
                    full = false;
                    break;
                }
            }
        }
        if full {
            out[i] = Some(sum / period as f64);
        }
    }
    out
}

/// Exponentially weighted moving average with `span` weighting
/// (`alpha = 2 / (span + 1)`), adjusted weights. Values exist from the
/// first bar; early outputs are provisional until roughly a span of bars
/// has been seen.
pub fn ema(values: &[f64], span: usize) -> Vec<Option<f64>> {
    ema_opt(&opt(values), span)
}

/// EMA over an optional column: undefined until the first defined input,
/// then weighted over defined inputs with decay applied across gaps.
pub fn ema_opt(values: &[Option<f64>], span: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if span == 0 {
        return out;
    }
    let alpha = 2.0 / (span as f64 + 1.0);
    let decay = 1.0 - alpha;
    let mut num = 0.0;
    let mut den = 0.0;
    let mut seen = false;
    for (i, v) in values.iter().enumerate() {
        match v {
            Some(x) => {
                num = x + decay * num;
                den = 1.0 + decay * den;
                seen = true;
                out[i] = Some(num / den);
            }
            None if seen => {
                // interior gap: weights decay, level carries
                num *= decay;
                den *= decay;
                out[i] = Some(num / den);
            }
            None => {}
        }
    }
    out
}

/// Triple exponential moving average: `3·e1 − 3·e2 + e3`.
pub fn tema(values: &[f64], span: usize) -> Vec<Option<f64>> {
    let e1 = ema(values, span);
    let e2 = ema_opt(&e1, span);
    let e3 = ema_opt(&e2, span);
    e1.iter()
        .zip(e2.iter())
        .zip(e3.iter())
        .map(|((a, b), c)| match (a, b, c) {
            (Some(a), Some(b), Some(c)) => Some(3.0 * a - 3.0 * b + c),
            _ => None,
        })
        .collect()
}

/// Wilder's smoothing: SMA seed over the first full window, then
/// `(prev · (period − 1) + x) / period`. Interior gaps carry the level.
pub fn wilder_smooth(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 {
        return out;
    }
    let start = match values.iter().position(|v| v.is_some()) {
        Some(i) => i,
        None => return out,
    };
    if start + period > values.len() {
        return out;
    }
    let seed_end = start + period - 1;
    let mut sum = 0.0;
    for v in &values[start..=seed_end] {
        match v {
            Some(x) => sum += x,
            // a gap inside the seed window leaves the whole column undefined
            None => return out,
        }
    }
    let mut prev = sum / period as f64;
    out[seed_end] = Some(prev);
    for i in (seed_end + 1)..values.len() {
        if let Some(x) = values[i] {
            prev = (prev * (period as f64 - 1.0) + x) / period as f64;
        }
        out[i] = Some(prev);
    }
    out
}
