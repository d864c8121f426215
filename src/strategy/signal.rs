//! Signal records and entry-column naming rules
//!
//! Strategies communicate through column names: any boolean column whose
//! name contains [`ENTRY_MARKER`] is an entry signal, and the substrings
//! `Buy` / `Sell` in the name set its polarity. A name with neither is a
//! neutral entry (direction decided downstream).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Marker substring that makes a boolean column an entry column.
pub const ENTRY_MARKER: &str = "_Entry";

/// Whether a derived column name is an entry column.
pub fn is_entry_column(name: &str) -> bool {
    name.contains(ENTRY_MARKER)
}

/// Trade direction of an entry column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    Buy,
    Sell,
    Neutral,
}

impl Polarity {
    /// Classify an entry column by name.
    pub fn of(column: &str) -> Polarity {
        if column.contains("Buy") {
            Polarity::Buy
        } else if column.contains("Sell") {
            Polarity::Sell
        } else {
            Polarity::Neutral
        }
    }
}

/// One fired evaluation: a strategy whose entry condition holds on the
/// latest bar of a symbol's series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    pub symbol: String,
    /// Strategy display name as registered
    pub strategy: String,
    /// Timestamp of the bar the signal fired on
    pub timestamp: DateTime<Utc>,
    /// Entry columns true on the latest bar, in column-name order
    pub entry_signals: Vec<String>,
    /// Snapshot of every column at the latest bar; warm-up gaps are null
    pub latest_row: Map<String, Value>,
}

impl SignalRecord {
    pub fn buy_signals(&self) -> impl Iterator<Item = &str> {
        self.entry_signals
            .iter()
            .filter(|name| Polarity::of(name) == Polarity::Buy)
            .map(String::as_str)
    }

    pub fn sell_signals(&self) -> impl Iterator<Item = &str> {
        self.entry_signals
            .iter()
            .filter(|name| Polarity::of(name) == Polarity::Sell)
            .map(String::as_str)
    }
}
