//! The batch scanner
//!
//! One `scan` call evaluates every requested strategy against every
//! symbol and returns a [`ScanReport`]. The call itself is infallible:
//! invalid symbols, unknown strategy names and per-pair evaluation
//! errors all become diagnostics on the report, never a batch abort.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::data::{Column, Frame, RawSeries};
use crate::scan::report::{EvaluationFailure, ScanReport, SymbolSkip};
use crate::scan::validate::{validate_series, LengthRequirement};
use crate::strategy::{is_entry_column, Registry, SignalRecord, StrategyDef};

/// Stateless batch evaluator over a strategy registry.
pub struct Scanner {
    registry: Registry,
}

impl Scanner {
    /// Scanner over a caller-assembled registry.
    pub fn new(registry: Registry) -> Self {
        Scanner { registry }
    }

    /// The registry this scanner evaluates against.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Evaluate the requested strategies against every symbol.
    ///
    /// Symbols are evaluated in map (sorted) order, strategies in request
    /// order, so identical inputs always produce an identical report.
    /// Each (symbol, strategy) pair computes on its own fresh frame; the
    /// caller's series are never touched.
    pub fn scan<S: AsRef<str>>(
        &self,
        data: &BTreeMap<String, RawSeries>,
        strategies: &[S],
    ) -> ScanReport {
        let mut report = ScanReport::default();

        let mut resolved: Vec<&StrategyDef> = Vec::with_capacity(strategies.len());
        for name in strategies {
            let name = name.as_ref();
            match self.registry.get(name) {
                Some(def) => resolved.push(def),
                None => {
                    warn!("Strategy '{}' is not registered, skipping it", name);
                    report.unknown_strategies.push(name.to_string());
                }
            }
        }
        if resolved.is_empty() {
            info!(
                "Scan over {} symbols had no known strategies to run",
                data.len()
            );
            return report;
        }

        // the slowest requested strategy sets the length bar for the run
        let slowest = resolved
            .iter()
            .max_by_key(|def| def.min_bars)
            .copied()
            .unwrap_or(resolved[0]);
        let requirement = LengthRequirement {
            min_bars: slowest.min_bars,
            set_by: slowest.name,
        };

        for (symbol, series) in data {
            let candles = match validate_series(series, requirement) {
                Ok(candles) => candles,
                Err(reason) => {
                    warn!("Skipping {}: {}", symbol, reason);
                    report.skipped_symbols.push(SymbolSkip {
                        symbol: symbol.clone(),
                        reason,
                    });
                    continue;
                }
            };

            for def in &resolved {
                let mut frame = Frame::from_series(&candles);
                report.evaluated += 1;

                if let Err(err) = (def.compute)(&mut frame, &(def.defaults)()) {
                    warn!("Strategy '{}' failed on {}: {}", def.name, symbol, err);
                    report.failures.push(EvaluationFailure {
                        symbol: symbol.clone(),
                        strategy: def.name.to_string(),
                        message: err.to_string(),
                    });
                    continue;
                }

                let fired = fired_entry_columns(&frame);
                debug!(
                    "Evaluated '{}' on {}: {} entry column(s) fired",
                    def.name,
                    symbol,
                    fired.len()
                );
                if fired.is_empty() {
                    continue;
                }
                let Some(timestamp) = frame.latest_timestamp() else {
                    continue;
                };
                report.signals.push(SignalRecord {
                    symbol: symbol.clone(),
                    strategy: def.name.to_string(),
                    timestamp,
                    entry_signals: fired,
                    latest_row: frame.latest_row(),
                });
            }
        }

        info!(
            "Scan complete: {} pairs evaluated, {} signals, {} symbols skipped, {} unknown strategies, {} failures",
            report.evaluated,
            report.signals.len(),
            report.skipped_symbols.len(),
            report.unknown_strategies.len(),
            report.failures.len()
        );
        report
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Scanner::new(Registry::builtin())
    }
}

/// Entry columns that fired: latest bar true, and true somewhere in the
/// series (an empty column can never fire). Name order, matching the
/// frame's column order.
fn fired_entry_columns(frame: &Frame) -> Vec<String> {
    frame
        .columns()
        .filter_map(|(name, column)| match column {
            Column::Bool(values)
                if is_entry_column(name)
                    && values.last() == Some(&true)
                    && values.contains(&true) =>
            {
                Some(name.to_string())
            }
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    use crate::data::{CandleSeries, RawBar};
    use crate::scan::validate::SkipReason;
    use crate::strategy::{Category, Params};
    use crate::Result;

    fn raw_series(bars: usize) -> RawSeries {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let mut series = RawSeries::new();
        for i in 0..bars {
            let close = 100.0 + (i as f64 * 0.4).sin() * 2.0;
            series.push(RawBar::from_ohlcv(
                start + Duration::minutes(i as i64),
                close - 0.3,
                close + 0.8,
                close - 0.8,
                close,
                1_000.0 + (i % 5) as f64 * 50.0,
            ));
        }
        series
    }

    fn data_for(symbols: &[&str], bars: usize) -> BTreeMap<String, RawSeries> {
        symbols
            .iter()
            .map(|s| (s.to_string(), raw_series(bars)))
            .collect()
    }

    fn always_fires(frame: &mut Frame, _params: &Params) -> Result<()> {
        frame.set_bool("Always_Entry_Buy", vec![true; frame.len()])
    }

    fn never_fires(frame: &mut Frame, _params: &Params) -> Result<()> {
        frame.set_bool("Never_Entry_Buy", vec![false; frame.len()])
    }

    fn always_errs(frame: &mut Frame, _params: &Params) -> Result<()> {
        frame.floats("no_such_column").map(|_| ())
    }

    fn test_registry() -> Registry {
        let mut registry = Registry::new();
        for (name, compute) in [
            ("Always", always_fires as crate::strategy::ComputeFn),
            ("Never", never_fires),
            ("Broken", always_errs),
        ] {
            registry
                .register(StrategyDef {
                    name,
                    category: Category::Hybrid,
                    min_bars: 5,
                    defaults: Params::new,
                    compute,
                })
                .unwrap();
        }
        registry
    }

    #[test]
    fn test_unknown_strategy_is_a_diagnostic_not_an_error() {
        let scanner = Scanner::new(test_registry());
        let report = scanner.scan(&data_for(&["AAPL"], 30), &["NotARealStrategy"]);
        assert!(report.signals.is_empty());
        assert_eq!(report.evaluated, 0);
        assert_eq!(report.unknown_strategies, vec!["NotARealStrategy"]);
        assert!(report.skipped_symbols.is_empty());
    }

    #[test]
    fn test_fired_and_quiet_strategies() {
        let scanner = Scanner::new(test_registry());
        let report = scanner.scan(&data_for(&["AAPL"], 30), &["Always", "Never"]);

        assert_eq!(report.evaluated, 2);
        assert_eq!(report.signals.len(), 1);
        let record = &report.signals[0];
        assert_eq!(record.symbol, "AAPL");
        assert_eq!(record.strategy, "Always");
        assert_eq!(record.entry_signals, vec!["Always_Entry_Buy"]);
        assert_eq!(record.latest_row["Always_Entry_Buy"], serde_json::json!(true));
    }

    #[test]
    fn test_failure_is_isolated_per_pair() {
        let scanner = Scanner::new(test_registry());
        let report = scanner.scan(&data_for(&["AAPL", "MSFT"], 30), &["Broken", "Always"]);

        // the broken strategy fails on both symbols, the good one fires
        assert_eq!(report.evaluated, 4);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.signals.len(), 2);
        assert!(report
            .failures
            .iter()
            .all(|f| f.strategy == "Broken" && f.message.contains("no_such_column")));
    }

    #[test]
    fn test_symbols_are_scanned_in_sorted_order() {
        let scanner = Scanner::new(test_registry());
        let mut data = BTreeMap::new();
        data.insert("ZM".to_string(), raw_series(30));
        data.insert("AA".to_string(), raw_series(30));
        let report = scanner.scan(&data, &["Always"]);

        let symbols: Vec<&str> = report.signals.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AA", "ZM"]);
    }

    #[test]
    fn test_short_symbol_skip_names_the_slowest_strategy() {
        let mut registry = test_registry();
        registry
            .register(StrategyDef {
                name: "Slow",
                category: Category::Hybrid,
                min_bars: 100,
                defaults: Params::new,
                compute: never_fires,
            })
            .unwrap();
        let scanner = Scanner::new(registry);
        let report = scanner.scan(&data_for(&["AAPL"], 30), &["Always", "Slow"]);

        assert_eq!(report.evaluated, 0);
        assert_eq!(report.skipped_symbols.len(), 1);
        assert_eq!(
            report.skipped_symbols[0].reason,
            SkipReason::TooShort {
                len: 30,
                required: 100,
                set_by: "Slow".to_string(),
            }
        );
    }

    #[test]
    fn test_strategies_cannot_see_each_others_columns() {
        fn reads_always(frame: &mut Frame, _params: &Params) -> Result<()> {
            assert!(!frame.has_column("Always_Entry_Buy"));
            frame.set_bool("Fresh_Entry_Buy", vec![true; frame.len()])
        }
        let mut registry = test_registry();
        registry
            .register(StrategyDef {
                name: "Fresh",
                category: Category::Hybrid,
                min_bars: 5,
                defaults: Params::new,
                compute: reads_always,
            })
            .unwrap();
        let scanner = Scanner::new(registry);
        let report = scanner.scan(&data_for(&["AAPL"], 30), &["Always", "Fresh"]);
        assert_eq!(report.signals.len(), 2);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_fired_entry_columns_ignores_floats_and_all_false() {
        let candles: Vec<crate::data::Candle> = (0..3)
            .map(|i| {
                let ts = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                    + Duration::minutes(i as i64);
                crate::data::Candle::new(ts, 1.0, 2.0, 0.5, 1.5, 100.0)
            })
            .collect();
        let mut frame = Frame::from_series(&CandleSeries::from_vec(candles));
        frame.set_bool("A_Entry_Buy", vec![false, true, true]).unwrap();
        frame.set_bool("B_Entry_Buy", vec![true, true, false]).unwrap();
        frame.set_bool("C_Entry", vec![false, false, false]).unwrap();
        frame.set_bool("not_entry", vec![true, true, true]).unwrap();
        frame
            .set_float("D_Entry_Buy", vec![Some(1.0), Some(1.0), Some(1.0)])
            .unwrap();

        assert_eq!(fired_entry_columns(&frame), vec!["A_Entry_Buy"]);
    }
}
