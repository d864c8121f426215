//! Per-symbol input validation
//!
//! Upstream collaborators own timezone normalization and deduplication;
//! the scanner re-checks only what the evaluation depends on: the five
//! OHLCV columns, numeric coercibility, sane price/volume signs, strictly
//! increasing timestamps, and enough bars for the slowest requested
//! strategy. A failing symbol is skipped with a [`SkipReason`], never an
//! error for the batch.

use serde::{Deserialize, Serialize};

use crate::data::{coerce_numeric, Candle, CandleSeries, RawSeries, REQUIRED_COLUMNS};

/// Minimum series length a run demands, plus the strategy that demands
/// it (the one with the longest declared lookback).
#[derive(Debug, Clone, Copy)]
pub struct LengthRequirement<'a> {
    pub min_bars: usize,
    pub set_by: &'a str,
}

/// Why a symbol was left out of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// The series has no bars at all.
    EmptySeries,
    /// Fewer bars than the slowest requested strategy needs.
    TooShort {
        len: usize,
        required: usize,
        set_by: String,
    },
    /// A required OHLCV column is absent on some bar.
    MissingColumn { column: String, row: usize },
    /// A required column holds a value that does not coerce to a finite
    /// number.
    NotNumeric { column: String, row: usize },
    /// A price column is zero or negative.
    NonPositivePrice { column: String, row: usize },
    /// Volume is negative.
    NegativeVolume { row: usize },
    /// Timestamps are not strictly increasing.
    TimestampOrder { row: usize },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::EmptySeries => write!(f, "empty series"),
            SkipReason::TooShort {
                len,
                required,
                set_by,
            } => write!(f, "{len} bars, but '{set_by}' needs {required}"),
            SkipReason::MissingColumn { column, row } => {
                write!(f, "missing column '{column}' at row {row}")
            }
            SkipReason::NotNumeric { column, row } => {
                write!(f, "column '{column}' is not numeric at row {row}")
            }
            SkipReason::NonPositivePrice { column, row } => {
                write!(f, "non-positive price in '{column}' at row {row}")
            }
            SkipReason::NegativeVolume { row } => write!(f, "negative volume at row {row}"),
            SkipReason::TimestampOrder { row } => {
                write!(f, "timestamp at row {row} does not increase")
            }
        }
    }
}

/// Validate one symbol's raw series into candles the strategies can run
/// on. All bars must pass; the first offence names the symbol's skip
/// reason.
pub fn validate_series(
    series: &RawSeries,
    required: LengthRequirement<'_>,
) -> std::result::Result<CandleSeries, SkipReason> {
    if series.is_empty() {
        return Err(SkipReason::EmptySeries);
    }
    if series.len() < required.min_bars {
        return Err(SkipReason::TooShort {
            len: series.len(),
            required: required.min_bars,
            set_by: required.set_by.to_string(),
        });
    }

    let mut candles = Vec::with_capacity(series.len());
    for (row, bar) in series.bars().iter().enumerate() {
        let mut fields = [0.0f64; 5];
        for (slot, column) in fields.iter_mut().zip(REQUIRED_COLUMNS) {
            let value = bar.field(column).ok_or_else(|| SkipReason::MissingColumn {
                column: column.to_string(),
                row,
            })?;
            let number = coerce_numeric(value).filter(|x| x.is_finite()).ok_or_else(|| {
                SkipReason::NotNumeric {
                    column: column.to_string(),
                    row,
                }
            })?;
            *slot = number;
        }
        let [open, high, low, close, volume] = fields;

        for (column, price) in REQUIRED_COLUMNS[..4].iter().zip([open, high, low, close]) {
            if price <= 0.0 {
                return Err(SkipReason::NonPositivePrice {
                    column: column.to_string(),
                    row,
                });
            }
        }
        if volume < 0.0 {
            return Err(SkipReason::NegativeVolume { row });
        }

        candles.push(Candle::new(bar.timestamp, open, high, low, close, volume));
    }

    for row in 1..candles.len() {
        if candles[row].timestamp <= candles[row - 1].timestamp {
            return Err(SkipReason::TimestampOrder { row });
        }
    }

    Ok(CandleSeries::from_vec(candles))
}
