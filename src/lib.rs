//! StratScan-RS: a batch OHLCV strategy-evaluation engine
//!
//! Feed the scanner a map of symbol → raw OHLCV series plus a list of
//! strategy display names; it evaluates every requested strategy against
//! every symbol and returns the (symbol, strategy) pairs whose entry
//! condition fired on the latest bar, together with run diagnostics.
//!
//! # Features
//!
//! - **Indicator Library**: RSI, MACD, ADX, Bollinger/Keltner bands,
//!   Ichimoku, PSAR, SuperTrend, VWAP, volume flows and more, with
//!   explicit warm-up (`None`) semantics and documented edge-case
//!   sentinels
//! - **Strategy Catalogue**: 54 named entry strategies in 8 categories,
//!   each with overridable default parameters
//! - **Registry**: strongly-typed descriptors, duplicate-safe registration
//! - **Scanner**: per-symbol validation, per-pair failure isolation,
//!   JSON-ready signal records
//!
//! # Example
//!
//! ```
//! use stratscan_rs::prelude::*;
//! use std::collections::BTreeMap;
//!
//! let data: BTreeMap<String, RawSeries> = BTreeMap::new();
//! let scanner = Scanner::default();
//! let report = scanner.scan(&data, &["Momentum Trading"]);
//! assert!(report.signals.is_empty());
//! ```

pub mod data;
pub mod error;
pub mod indicators;
pub mod scan;
pub mod strategy;

// Re-export commonly used types
pub mod prelude {
    pub use crate::data::*;
    pub use crate::indicators::*;
    pub use crate::scan::*;
    pub use crate::strategy::*;

    pub use crate::error::Error;
    pub use crate::Result;
}

/// Result type alias
pub type Result<T> = std::result::Result<T, error::Error>;
