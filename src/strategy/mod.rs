//! Strategy descriptors, parameters, signals and the built-in catalogue

pub mod catalog;
pub mod params;
pub mod registry;
pub mod signal;

pub use params::Params;
pub use registry::Registry;
pub use signal::{is_entry_column, Polarity, SignalRecord, ENTRY_MARKER};

use serde::{Deserialize, Serialize};

use crate::data::Frame;
use crate::Result;

/// Catalogue category a strategy belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Momentum,
    TrendFollowing,
    MeanReversion,
    Breakout,
    VolumeVolatility,
    Oscillator,
    Pattern,
    Hybrid,
}

impl Category {
    /// Human-readable category label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Momentum => "Momentum",
            Category::TrendFollowing => "Trend Following",
            Category::MeanReversion => "Mean Reversion",
            Category::Breakout => "Breakout & Patterns",
            Category::VolumeVolatility => "Volume & Volatility",
            Category::Oscillator => "Advanced Oscillators",
            Category::Pattern => "Pattern Recognition",
            Category::Hybrid => "Hybrid",
        }
    }

    /// All categories in catalogue order
    pub fn all() -> [Category; 8] {
        [
            Category::Momentum,
            Category::TrendFollowing,
            Category::MeanReversion,
            Category::Breakout,
            Category::VolumeVolatility,
            Category::Oscillator,
            Category::Pattern,
            Category::Hybrid,
        ]
    }
}

/// A strategy's compute hook: append derived columns and one or more
/// entry columns to the frame. Pure with respect to the base columns.
pub type ComputeFn = fn(&mut Frame, &Params) -> Result<()>;

/// Everything the registry knows about one strategy.
#[derive(Debug, Clone, Copy)]
pub struct StrategyDef {
    /// Display name, the lookup key (e.g. "Mean Reversion (RSI)")
    pub name: &'static str,
    pub category: Category,
    /// Longest lookback the rule needs for an honest reading; series
    /// shorter than this are skipped for runs that request the strategy
    pub min_bars: usize,
    /// Default parameter set; callers may override any subset
    pub defaults: fn() -> Params,
    pub compute: ComputeFn,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels_are_distinct() {
        let labels: std::collections::HashSet<&str> =
            Category::all().iter().map(|c| c.label()).collect();
        assert_eq!(labels.len(), 8);
    }
}
