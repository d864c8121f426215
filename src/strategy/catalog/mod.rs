//! Built-in strategy catalogue
//!
//! Fifty-four entry strategies across eight categories. Each compute
//! function appends its derived columns and one or more boolean
//! `*_Entry*` columns to the frame. The column names are load-bearing:
//! the scanner substring-matches them (see [`crate::strategy::signal`]),
//! so they are spelled out here rather than derived.

mod breakout;
mod hybrid;
mod mean_reversion;
mod momentum;
mod oscillator;
mod pattern;
mod trend;
mod volume;

use crate::data::Frame;
use crate::indicators::{gt, opt, scale, sma};
use crate::strategy::StrategyDef;
use crate::Result;

/// Window for the shared volume baseline column.
pub(crate) const VOLUME_MA_PERIOD: usize = 20;

/// Every built-in strategy, in catalogue order.
pub fn all() -> Vec<StrategyDef> {
    let mut defs = Vec::with_capacity(54);
    defs.extend(momentum::defs());
    defs.extend(trend::defs());
    defs.extend(mean_reversion::defs());
    defs.extend(breakout::defs());
    defs.extend(volume::defs());
    defs.extend(oscillator::defs());
    defs.extend(pattern::defs());
    defs.extend(hybrid::defs());
    defs
}

/// Volume spike filter shared across categories: volume above
/// `multiplier` times its 20-bar SMA. Stores the baseline as `volume_ma`
/// so it shows up in row snapshots.
pub(crate) fn volume_spike(frame: &mut Frame, multiplier: f64) -> Result<Vec<bool>> {
    let baseline = sma(frame.volume(), VOLUME_MA_PERIOD);
    let spike = gt(&opt(frame.volume()), &scale(&baseline, multiplier));
    frame.set_float("volume_ma", baseline)?;
    Ok(spike)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use chrono::{Duration, TimeZone, Utc};

    use crate::data::{Candle, CandleSeries};
    use crate::strategy::is_entry_column;

    /// Synthetic but plausible series: a drifting sine wave with uneven
    /// volume, long enough for the slowest built-in lookback.
    fn fixture_frame(bars: usize) -> Frame {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let candles: Vec<Candle> = (0..bars)
            .map(|i| {
                let x = i as f64;
                let mid = 100.0 + 0.05 * x + 6.0 * (x / 9.0).sin();
                let open = mid - 0.4 * (x / 5.0).cos();
                let close = mid + 0.5 * (x / 7.0).sin();
                let high = open.max(close) + 0.8;
                let low = open.min(close) - 0.8;
                let volume = 1_000.0 + 180.0 * ((x / 4.0).sin().abs()) + (i % 13) as f64 * 45.0;
                Candle::new(start + Duration::minutes(i as i64), open, high, low, close, volume)
            })
            .collect();
        Frame::from_series(&CandleSeries::from_vec(candles))
    }

    #[test]
    fn test_catalogue_has_54_unique_names() {
        let defs = all();
        assert_eq!(defs.len(), 54);
        let names: HashSet<&str> = defs.iter().map(|d| d.name).collect();
        assert_eq!(names.len(), 54);
    }

    #[test]
    fn test_every_strategy_runs_and_appends_entry_columns() {
        let defs = all();
        for def in &defs {
            let mut frame = fixture_frame(260);
            (def.compute)(&mut frame, &(def.defaults)())
                .unwrap_or_else(|e| panic!("{} failed: {e}", def.name));

            let entry_columns: Vec<&str> = frame
                .columns()
                .filter(|(name, _)| is_entry_column(name))
                .map(|(name, _)| name)
                .collect();
            assert!(!entry_columns.is_empty(), "{} appended no entry column", def.name);
            for name in entry_columns {
                assert!(frame.bools(name).is_ok(), "{name} is not boolean");
            }
        }
    }

    #[test]
    fn test_every_strategy_tolerates_short_series() {
        // three bars is below every declared lookback; the scanner gates
        // on min_bars, but the computes themselves must not error
        let defs = all();
        for def in &defs {
            let mut frame = fixture_frame(3);
            (def.compute)(&mut frame, &(def.defaults)())
                .unwrap_or_else(|e| panic!("{} failed on short series: {e}", def.name));
            for (name, column) in frame.columns() {
                assert_eq!(column.len(), 3, "{} wrote a ragged column {name}", def.name);
            }
        }
    }

    #[test]
    fn test_min_bars_are_sane() {
        for def in all() {
            assert!(def.min_bars >= 2, "{} declares min_bars {}", def.name, def.min_bars);
            assert!(def.min_bars <= 260, "{} declares min_bars {}", def.name, def.min_bars);
        }
    }

    #[test]
    fn test_volume_spike_marks_outliers_only() {
        let mut frame = fixture_frame(40);
        let spike = volume_spike(&mut frame, 1_000.0).unwrap();
        assert!(spike.iter().all(|&s| !s), "nothing clears a 1000x baseline");
        assert!(frame.has_column("volume_ma"));

        let mut frame = fixture_frame(40);
        let spike = volume_spike(&mut frame, 0.0).unwrap();
        // any positive volume clears a zero baseline once the SMA exists
        assert!(spike[VOLUME_MA_PERIOD..].iter().all(|&s| s));
        assert!(spike[..VOLUME_MA_PERIOD - 1].iter().all(|&s| !s));
    }
}
