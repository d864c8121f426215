//! MACD (Moving Average Convergence Divergence)

use crate::indicators::ma::{ema, ema_opt};
use crate::indicators::series::sub;

/// MACD output columns, each aligned to the input.
#[derive(Debug, Clone)]
pub struct Macd {
    /// fast EMA − slow EMA
    pub line: Vec<Option<f64>>,
    /// EMA of the line over the signal span
    pub signal: Vec<Option<f64>>,
    /// line − signal
    pub histogram: Vec<Option<f64>>,
}

/// Standard MACD; the conventional parameterization is (12, 26, 9).
pub fn macd(values: &[f64], fast: usize, slow: usize, signal: usize) -> Macd {
    let fast_ema = ema(values, fast);
    let slow_ema = ema(values, slow);
    let line = sub(&fast_ema, &slow_ema);
    let signal_line = ema_opt(&line, signal);
    let histogram = sub(&line, &signal_line);
    Macd {
        line,
        signal: signal_line,
        histogram,
    }
}
