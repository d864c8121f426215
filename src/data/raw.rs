//! Raw market data as delivered by upstream collaborators.
//!
//! The scanner accepts loosely-typed rows on purpose: a missing or
//! non-numeric column is a per-symbol validation outcome, not a type error
//! at the API boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Column names every symbol must provide.
pub const REQUIRED_COLUMNS: [&str; 5] = ["open", "high", "low", "close", "volume"];

/// One raw bar: a timestamp plus whatever columns upstream provided.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawBar {
    /// Bar timestamp
    pub timestamp: DateTime<Utc>,
    /// Named columns; the scanner requires open/high/low/close/volume
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl RawBar {
    /// Create a bar carrying exactly the five required columns.
    pub fn from_ohlcv(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        let mut fields = Map::new();
        fields.insert("open".to_string(), Value::from(open));
        fields.insert("high".to_string(), Value::from(high));
        fields.insert("low".to_string(), Value::from(low));
        fields.insert("close".to_string(), Value::from(close));
        fields.insert("volume".to_string(), Value::from(volume));
        Self { timestamp, fields }
    }

    /// Fetch a column value, if present.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Remove a column (handy for building malformed fixtures).
    pub fn remove_field(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }
}

/// A symbol's raw bar series, oldest bar first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawSeries {
    bars: Vec<RawBar>,
}

impl RawSeries {
    /// Create an empty series
    pub fn new() -> Self {
        Self { bars: Vec::new() }
    }

    /// Create from a vector of bars
    pub fn from_bars(bars: Vec<RawBar>) -> Self {
        Self { bars }
    }

    /// Append a bar
    pub fn push(&mut self, bar: RawBar) {
        self.bars.push(bar);
    }

    /// Number of bars
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// All bars, oldest first
    pub fn bars(&self) -> &[RawBar] {
        &self.bars
    }
}

impl From<Vec<RawBar>> for RawSeries {
    fn from(bars: Vec<RawBar>) -> Self {
        Self::from_bars(bars)
    }
}

/// Lenient numeric coercion: numbers pass through, numeric strings parse,
/// everything else is `None`. Finiteness is checked by the validator, not
/// here.
pub fn coerce_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
