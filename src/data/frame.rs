//! Per-evaluation working frame
//!
//! Each (symbol, strategy) evaluation gets a fresh `Frame` built from the
//! symbol's validated candles. Strategies append derived columns to it;
//! the scanner reads the boolean entry columns back out. Base OHLCV
//! columns are materialized once on construction so indicator functions
//! can borrow plain `&[f64]` slices.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::data::{Candle, CandleSeries};
use crate::error::Error;
use crate::Result;

/// A derived column: float series with explicit warm-up gaps, or a
/// boolean condition series.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Float(Vec<Option<f64>>),
    Bool(Vec<bool>),
}

impl Column {
    /// Number of rows in the column
    pub fn len(&self) -> usize {
        match self {
            Column::Float(v) => v.len(),
            Column::Bool(v) => v.len(),
        }
    }

    /// Check if the column is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Last value rendered for a row snapshot; warm-up gaps and non-finite
    /// floats become JSON null.
    fn latest_value(&self) -> Value {
        match self {
            // Value::from(f64) already maps NaN/inf to null
            Column::Float(v) => match v.last().copied().flatten() {
                Some(x) => Value::from(x),
                None => Value::Null,
            },
            Column::Bool(v) => match v.last() {
                Some(b) => Value::Bool(*b),
                None => Value::Null,
            },
        }
    }
}

/// Working table for one strategy evaluation
#[derive(Debug, Clone)]
pub struct Frame {
    candles: Vec<Candle>,
    open: Vec<f64>,
    high: Vec<f64>,
    low: Vec<f64>,
    close: Vec<f64>,
    volume: Vec<f64>,
    derived: BTreeMap<String, Column>,
}

impl Frame {
    /// Build a frame from validated candles. The frame owns its copy: a
    /// strategy can never reach the caller's series through it.
    pub fn from_series(series: &CandleSeries) -> Self {
        Self {
            open: series.opens(),
            high: series.highs(),
            low: series.lows(),
            close: series.closes(),
            volume: series.volumes(),
            candles: series.candles().to_vec(),
            derived: BTreeMap::new(),
        }
    }

    /// Number of bars
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// Check if the frame has no bars
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Validated candles backing this frame
    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// Open price column
    pub fn open(&self) -> &[f64] {
        &self.open
    }

    /// High price column
    pub fn high(&self) -> &[f64] {
        &self.high
    }

    /// Low price column
    pub fn low(&self) -> &[f64] {
        &self.low
    }

    /// Close price column
    pub fn close(&self) -> &[f64] {
        &self.close
    }

    /// Volume column
    pub fn volume(&self) -> &[f64] {
        &self.volume
    }

    /// Timestamp of the latest bar
    pub fn latest_timestamp(&self) -> Option<DateTime<Utc>> {
        self.candles.last().map(|c| c.timestamp)
    }

    /// Write a float column. Re-setting a name overwrites.
    pub fn set_float(&mut self, name: impl Into<String>, values: Vec<Option<f64>>) -> Result<()> {
        let name = name.into();
        self.check_len(&name, values.len())?;
        self.derived.insert(name, Column::Float(values));
        Ok(())
    }

    /// Write a boolean column. Re-setting a name overwrites.
    pub fn set_bool(&mut self, name: impl Into<String>, values: Vec<bool>) -> Result<()> {
        let name = name.into();
        self.check_len(&name, values.len())?;
        self.derived.insert(name, Column::Bool(values));
        Ok(())
    }

    fn check_len(&self, name: &str, actual: usize) -> Result<()> {
        if actual != self.len() {
            return Err(Error::LengthMismatch {
                column: name.to_string(),
                expected: self.len(),
                actual,
            });
        }
        Ok(())
    }

    /// Read a float column back
    pub fn floats(&self, name: &str) -> Result<&[Option<f64>]> {
        match self.derived.get(name) {
            Some(Column::Float(v)) => Ok(v),
            Some(Column::Bool(_)) => Err(Error::ColumnType(name.to_string())),
            None => Err(Error::MissingColumn(name.to_string())),
        }
    }

    /// Read a boolean column back
    pub fn bools(&self, name: &str) -> Result<&[bool]> {
        match self.derived.get(name) {
            Some(Column::Bool(v)) => Ok(v),
            Some(Column::Float(_)) => Err(Error::ColumnType(name.to_string())),
            None => Err(Error::MissingColumn(name.to_string())),
        }
    }

    /// Check whether a derived column exists
    pub fn has_column(&self, name: &str) -> bool {
        self.derived.contains_key(name)
    }

    /// Derived columns in name order
    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.derived.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Snapshot of the latest bar: base columns plus every derived column,
    /// one value each. Warm-up gaps serialize as null, never NaN.
    pub fn latest_row(&self) -> Map<String, Value> {
        let mut row = Map::new();
        if let Some(last) = self.candles.last() {
            row.insert("open".to_string(), Value::from(last.open));
            row.insert("high".to_string(), Value::from(last.high));
            row.insert("low".to_string(), Value::from(last.low));
            row.insert("close".to_string(), Value::from(last.close));
            row.insert("volume".to_string(), Value::from(last.volume));
        }
        for (name, column) in &self.derived {
            row.insert(name.clone(), column.latest_value());
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn frame(closes: &[f64]) -> Frame {
        let candles = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                    + chrono::Duration::minutes(i as i64);
                Candle::new(ts, c, c + 1.0, c - 1.0, c, 1000.0)
            })
            .collect();
        Frame::from_series(&CandleSeries::from_vec(candles))
    }

    #[test]
    fn test_set_and_read_columns() {
        let mut f = frame(&[1.0, 2.0, 3.0]);
        f.set_float("x", vec![None, Some(1.0), Some(2.0)]).unwrap();
        f.set_bool("flag", vec![false, false, true]).unwrap();

        assert_eq!(f.floats("x").unwrap()[1], Some(1.0));
        assert_eq!(f.bools("flag").unwrap(), &[false, false, true]);
        assert!(f.has_column("x"));
        assert!(!f.has_column("y"));
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let mut f = frame(&[1.0, 2.0, 3.0]);
        let err = f.set_float("x", vec![Some(1.0)]).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { expected: 3, actual: 1, .. }));
    }

    #[test]
    fn test_missing_and_mistyped_columns() {
        let mut f = frame(&[1.0, 2.0]);
        f.set_bool("flag", vec![true, false]).unwrap();

        assert!(matches!(f.floats("nope"), Err(Error::MissingColumn(_))));
        assert!(matches!(f.floats("flag"), Err(Error::ColumnType(_))));
        assert!(matches!(f.bools("nope"), Err(Error::MissingColumn(_))));
    }

    #[test]
    fn test_latest_row_renders_gaps_as_null() {
        let mut f = frame(&[1.0, 2.0, 3.0]);
        f.set_float("warm", vec![Some(1.0), Some(2.0), None]).unwrap();
        f.set_float("nan", vec![None, None, Some(f64::NAN)]).unwrap();
        f.set_bool("sig", vec![false, false, true]).unwrap();

        let row = f.latest_row();
        assert_eq!(row["close"], Value::from(3.0));
        assert_eq!(row["warm"], Value::Null);
        assert_eq!(row["nan"], Value::Null);
        assert_eq!(row["sig"], Value::Bool(true));
    }

    #[test]
    fn test_columns_iterate_in_name_order() {
        let mut f = frame(&[1.0]);
        f.set_bool("b", vec![true]).unwrap();
        f.set_bool("a", vec![true]).unwrap();
        let names: Vec<&str> = f.columns().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
