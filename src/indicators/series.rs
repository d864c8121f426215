//! Series building blocks and boolean combinators
//!
//! Shared by the indicator implementations and the strategy rules. All
//! comparisons treat an undefined (`None`) operand as `false`: a warm-up
//! gap can never satisfy an entry condition.

/// Lift a fully-defined column into the optional representation.
pub fn opt(values: &[f64]) -> Vec<Option<f64>> {
    values.iter().map(|&x| Some(x)).collect()
}

/// First difference; index 0 is undefined.
pub fn diff(values: &[f64]) -> Vec<Option<f64>> {
    values
        .iter()
        .enumerate()
        .map(|(i, &x)| if i == 0 { None } else { Some(x - values[i - 1]) })
        .collect()
}

/// One-bar fractional change; undefined at index 0 or on a zero base.
pub fn pct_change(values: &[f64]) -> Vec<Option<f64>> {
    values
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            if i == 0 {
                return None;
            }
            let prev = values[i - 1];
            if prev == 0.0 {
                None
            } else {
                Some((x - prev) / prev)
            }
        })
        .collect()
}

/// Shift a column forward by `n` bars (row `i` reads the value from
/// `i - n`); the first `n` rows become undefined.
pub fn shift(values: &[Option<f64>], n: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| if i < n { None } else { values[i - n] })
        .collect()
}

/// Rolling maximum over the trailing `period` bars.
pub fn rolling_max(values: &[f64], period: usize) -> Vec<Option<f64>> {
    rolling_max_opt(&opt(values), period)
}

/// Rolling minimum over the trailing `period` bars.
pub fn rolling_min(values: &[f64], period: usize) -> Vec<Option<f64>> {
    rolling_min_opt(&opt(values), period)
}

/// Rolling maximum over an optional column; a window touching any
/// undefined slot is undefined.
pub fn rolling_max_opt(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    rolling_fold(values, period, f64::max)
}

/// Rolling minimum over an optional column.
pub fn rolling_min_opt(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    rolling_fold(values, period, f64::min)
}

fn rolling_fold(
    values: &[Option<f64>],
    period: usize,
    fold: fn(f64, f64) -> f64,
) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || period > values.len() {
        return out;
    }
    for i in (period - 1)..values.len() {
        let mut acc: Option<f64> = None;
        for v in &values[i + 1 - period..=i] {
            match (acc, v) {
                (_, None) => {
                    acc = None;
                    break;
                }
                (None, Some(x)) => acc = Some(*x),
                (Some(a), Some(x)) => acc = Some(fold(a, *x)),
            }
        }
        out[i] = acc;
    }
    out
}

/// Element-wise difference `a - b`, undefined where either side is.
pub fn sub(a: &[Option<f64>], b: &[Option<f64>]) -> Vec<Option<f64>> {
    a.iter()
        .zip(b)
        .map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) => Some(x - y),
            _ => None,
        })
        .collect()
}

/// Scale a column by a constant.
pub fn scale(values: &[Option<f64>], factor: f64) -> Vec<Option<f64>> {
    values.iter().map(|v| v.map(|x| x * factor)).collect()
}

/// `a > b` element-wise; `false` where either side is undefined.
pub fn gt(a: &[Option<f64>], b: &[Option<f64>]) -> Vec<bool> {
    a.iter()
        .zip(b)
        .map(|(x, y)| matches!((x, y), (Some(x), Some(y)) if x > y))
        .collect()
}

/// `a < b` element-wise; `false` where either side is undefined.
pub fn lt(a: &[Option<f64>], b: &[Option<f64>]) -> Vec<bool> {
    a.iter()
        .zip(b)
        .map(|(x, y)| matches!((x, y), (Some(x), Some(y)) if x < y))
        .collect()
}

/// `a > threshold` element-wise.
pub fn gt_value(a: &[Option<f64>], threshold: f64) -> Vec<bool> {
    a.iter().map(|x| matches!(x, Some(x) if *x > threshold)).collect()
}

/// `a < threshold` element-wise.
pub fn lt_value(a: &[Option<f64>], threshold: f64) -> Vec<bool> {
    a.iter().map(|x| matches!(x, Some(x) if *x < threshold)).collect()
}

/// `a` crosses above `b` on this bar: previously at or below, now above.
/// All four operands must be defined.
pub fn cross_above(a: &[Option<f64>], b: &[Option<f64>]) -> Vec<bool> {
    let n = a.len().min(b.len());
    let mut out = vec![false; n];
    for i in 1..n {
        if let (Some(pa), Some(pb), Some(ca), Some(cb)) = (a[i - 1], b[i - 1], a[i], b[i]) {
            out[i] = pa <= pb && ca > cb;
        }
    }
    out
}

/// `a` crosses below `b` on this bar: previously at or above, now below.
pub fn cross_below(a: &[Option<f64>], b: &[Option<f64>]) -> Vec<bool> {
    let n = a.len().min(b.len());
    let mut out = vec![false; n];
    for i in 1..n {
        if let (Some(pa), Some(pb), Some(ca), Some(cb)) = (a[i - 1], b[i - 1], a[i], b[i]) {
            out[i] = pa >= pb && ca < cb;
        }
    }
    out
}

/// True where the series is defined on this bar and the previous one and
/// strictly rose.
pub fn rising(values: &[Option<f64>]) -> Vec<bool> {
    let mut out = vec![false; values.len()];
    for i in 1..values.len() {
        if let (Some(prev), Some(cur)) = (values[i - 1], values[i]) {
            out[i] = cur > prev;
        }
    }
    out
}

/// Element-wise conjunction of two condition columns.
pub fn and(a: &[bool], b: &[bool]) -> Vec<bool> {
    a.iter().zip(b).map(|(x, y)| *x && *y).collect()
}

/// Element-wise conjunction over any number of condition columns.
pub fn all_of(conditions: &[&[bool]]) -> Vec<bool> {
    let n = conditions.iter().map(|c| c.len()).min().unwrap_or(0);
    (0..n).map(|i| conditions.iter().all(|c| c[i])).collect()
}
