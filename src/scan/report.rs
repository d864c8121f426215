//! Scan results and per-symbol aggregation

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::scan::validate::SkipReason;
use crate::strategy::SignalRecord;

/// One symbol left out of a run, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolSkip {
    pub symbol: String,
    pub reason: SkipReason,
}

/// One (symbol, strategy) evaluation that errored. The rest of the batch
/// is unaffected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationFailure {
    pub symbol: String,
    pub strategy: String,
    pub message: String,
}

/// Everything a scan produced: the fired signal records in evaluation
/// order, plus the diagnostics that let a caller tell "nothing fired"
/// apart from "nothing was evaluated".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    /// Fired records: outer order by symbol, inner by request order
    pub signals: Vec<SignalRecord>,
    /// (symbol, strategy) pairs actually evaluated
    pub evaluated: usize,
    pub skipped_symbols: Vec<SymbolSkip>,
    /// Requested names with no registry entry, in request order
    pub unknown_strategies: Vec<String>,
    pub failures: Vec<EvaluationFailure>,
}

impl ScanReport {
    /// Per-symbol rollup of this report's signals.
    pub fn summarize(&self) -> BTreeMap<String, SymbolSummary> {
        summarize(&self.signals)
    }
}

/// Rollup of every fired signal for one symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymbolSummary {
    /// Strategies that fired, in evaluation order
    pub strategies: Vec<String>,
    pub buy_signals: usize,
    pub sell_signals: usize,
    /// All fired entry columns, neutral ones included
    pub total_signals: usize,
    /// Buy share of the polar signals, in [0, 1]; 0.5 when no entry
    /// column declared a direction
    pub signal_strength: f64,
}

/// Aggregate fired records per symbol: which strategies fired, buy/sell
/// counts by column-name polarity, and a buy-ratio strength score.
pub fn summarize(signals: &[SignalRecord]) -> BTreeMap<String, SymbolSummary> {
    let mut summaries: BTreeMap<String, SymbolSummary> = BTreeMap::new();
    for record in signals {
        let summary = summaries.entry(record.symbol.clone()).or_default();
        summary.strategies.push(record.strategy.clone());
        summary.total_signals += record.entry_signals.len();
        summary.buy_signals += record.buy_signals().count();
        summary.sell_signals += record.sell_signals().count();
    }
    for summary in summaries.values_mut() {
        let polar = summary.buy_signals + summary.sell_signals;
        summary.signal_strength = if polar == 0 {
            0.5
        } else {
            summary.buy_signals as f64 / polar as f64
        };
    }
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::Map;

    fn record(symbol: &str, strategy: &str, entries: &[&str]) -> SignalRecord {
        SignalRecord {
            symbol: symbol.to_string(),
            strategy: strategy.to_string(),
            timestamp: Utc::now(),
            entry_signals: entries.iter().map(|s| s.to_string()).collect(),
            latest_row: Map::new(),
        }
    }

    #[test]
    fn test_summarize_counts_polarity() {
        let signals = vec![
            record("AAPL", "Mean Reversion (RSI)", &["Mean_Reversion_RSI_Entry_Buy"]),
            record("AAPL", "MACD Bearish Cross", &["MACD_Bearish_Cross_Entry_Sell"]),
            record("TSLA", "Momentum Trading", &["Momentum_Trading_Entry"]),
        ];
        let summaries = summarize(&signals);

        let aapl = &summaries["AAPL"];
        assert_eq!(aapl.strategies, vec!["Mean Reversion (RSI)", "MACD Bearish Cross"]);
        assert_eq!(aapl.buy_signals, 1);
        assert_eq!(aapl.sell_signals, 1);
        assert_eq!(aapl.total_signals, 2);
        assert_eq!(aapl.signal_strength, 0.5);

        // a neutral-only symbol has no polar signals: strength is neutral
        let tsla = &summaries["TSLA"];
        assert_eq!(tsla.buy_signals, 0);
        assert_eq!(tsla.sell_signals, 0);
        assert_eq!(tsla.total_signals, 1);
        assert_eq!(tsla.signal_strength, 0.5);
    }

    #[test]
    fn test_summarize_strength_is_buy_ratio() {
        let signals = vec![
            record("NVDA", "Golden Cross RSI", &["Golden_Cross_RSI_Entry_Buy"]),
            record("NVDA", "VWAP RSI", &["VWAP_RSI_Entry_Buy"]),
            record("NVDA", "Bearish RSI Divergence", &["Bearish_RSI_Divergence_Entry_Sell"]),
        ];
        let summaries = summarize(&signals);
        let nvda = &summaries["NVDA"];
        assert_eq!(nvda.buy_signals, 2);
        assert_eq!(nvda.sell_signals, 1);
        assert!((nvda.signal_strength - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_report_serializes_cleanly() {
        let report = ScanReport::default();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["signals"], serde_json::json!([]));
        assert_eq!(json["evaluated"], serde_json::json!(0));

        let back: ScanReport = serde_json::from_value(json).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn test_report_round_trips_with_diagnostics() {
        let report = ScanReport {
            signals: vec![record("AMD", "Momentum Trading", &["Momentum_Trading_Entry"])],
            evaluated: 4,
            skipped_symbols: vec![SymbolSkip {
                symbol: "BAD".to_string(),
                reason: SkipReason::MissingColumn {
                    column: "volume".to_string(),
                    row: 0,
                },
            }],
            unknown_strategies: vec!["Not A Strategy".to_string()],
            failures: vec![EvaluationFailure {
                symbol: "AMD".to_string(),
                strategy: "Custom".to_string(),
                message: "column 'x' not found in frame".to_string(),
            }],
        };
        let text = serde_json::to_string(&report).unwrap();
        let back: ScanReport = serde_json::from_str(&text).unwrap();
        assert_eq!(back, report);
    }
}
