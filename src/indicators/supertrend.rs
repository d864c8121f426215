//! SuperTrend

use crate::indicators::atr::atr;

/// SuperTrend line plus direction per bar.
#[derive(Debug, Clone)]
pub struct Supertrend {
    /// Active stop line: the carried lower band in an uptrend, the carried
    /// upper band in a downtrend.
    pub line: Vec<Option<f64>>,
    /// `true` where the trend is up (close above the carried upper band
    /// at the last flip)
    pub bullish: Vec<bool>,
}

/// ATR bands around the bar midpoint with the usual carry rules: a band
/// only ratchets in the trend direction until price closes through it.
/// Defined where the ATR is (index `atr_period` onward).
pub fn supertrend(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    atr_period: usize,
    factor: f64,
) -> Supertrend {
    let n = high.len();
    let mut line = vec![None; n];
    let mut bullish = vec![false; n];
    let atr_col = atr(high, low, close, atr_period);

    let mut prev_upper = f64::NAN;
    let mut prev_lower = f64::NAN;
    let mut rising = false;
    let mut started = false;

    for i in 0..n {
        let a = match atr_col[i] {
            Some(a) => a,
            None => continue,
        };
        let mid = (high[i] + low[i]) / 2.0;
        let basic_upper = mid + factor * a;
        let basic_lower = mid - factor * a;

        let (upper, lower) = if !started {
            (basic_upper, basic_lower)
        } else {
            let upper = if basic_upper < prev_upper || close[i - 1] > prev_upper {
                basic_upper
            } else {
                prev_upper
            };
            let lower = if basic_lower > prev_lower || close[i - 1] < prev_lower {
                basic_lower
            } else {
                prev_lower
            };
            (upper, lower)
        };

        if !started {
            rising = close[i] > basic_upper;
            started = true;
        } else if close[i] > upper {
            rising = true;
        } else if close[i] < lower {
            rising = false;
        }

        line[i] = Some(if rising { lower } else { upper });
        bullish[i] = rising;
        prev_upper = upper;
        prev_lower = lower;
    }

    Supertrend { line, bullish }
}
