//! Hybrid strategies: confluence setups that mix trend, momentum and
//! volume filters

use crate::data::Frame;
use crate::indicators::{
    all_of, and, atr, bollinger, bullish_divergence, cmf, cross_above, cross_below, ema, gt,
    gt_value, keltner, lt_value, macd, opt, rising, rolling_max, rolling_min, rsi, scale, sub,
};
use crate::strategy::{Category, Params, StrategyDef};
use crate::Result;

use super::volume_spike;

pub(super) fn defs() -> Vec<StrategyDef> {
    vec![
        StrategyDef {
            name: "Reversal (RSI/MACD)",
            category: Category::Hybrid,
            min_bars: 35,
            defaults: reversal_defaults,
            compute: reversal_rsi_macd,
        },
        StrategyDef {
            name: "Pullback Trading (EMA)",
            category: Category::Hybrid,
            min_bars: 22,
            defaults: pullback_defaults,
            compute: pullback_trading_ema,
        },
        StrategyDef {
            name: "End-of-Day (Intraday Consolidation)",
            category: Category::Hybrid,
            min_bars: 21,
            defaults: end_of_day_defaults,
            compute: end_of_day_consolidation,
        },
        StrategyDef {
            name: "EMA Ribbon MACD",
            category: Category::Hybrid,
            min_bars: 56,
            defaults: ema_ribbon_macd_defaults,
            compute: ema_ribbon_macd,
        },
        StrategyDef {
            name: "Chandelier Exit MACD",
            category: Category::Hybrid,
            min_bars: 35,
            defaults: chandelier_macd_defaults,
            compute: chandelier_exit_macd,
        },
        StrategyDef {
            name: "Double MA Pullback",
            category: Category::Hybrid,
            min_bars: 51,
            defaults: double_ma_pullback_defaults,
            compute: double_ma_pullback,
        },
        StrategyDef {
            name: "RSI Range Breakout BB",
            category: Category::Hybrid,
            min_bars: 21,
            defaults: rsi_range_breakout_defaults,
            compute: rsi_range_breakout_bb,
        },
        StrategyDef {
            name: "Keltner Middle RSI Divergence",
            category: Category::Hybrid,
            min_bars: 29,
            defaults: keltner_divergence_defaults,
            compute: keltner_middle_rsi_divergence,
        },
        StrategyDef {
            name: "EMA Ribbon Expansion CMF",
            category: Category::Hybrid,
            min_bars: 56,
            defaults: ema_ribbon_expansion_defaults,
            compute: ema_ribbon_expansion_cmf,
        },
        StrategyDef {
            name: "MACD Bearish Cross",
            category: Category::Hybrid,
            min_bars: 35,
            defaults: macd_bearish_defaults,
            compute: macd_bearish_cross,
        },
    ]
}

fn reversal_defaults() -> Params {
    Params::new()
        .with("rsi_period", 14)
        .with("rsi_oversold", 30)
        .with("rsi_overbought", 70)
        .with("macd_fast", 12)
        .with("macd_slow", 26)
        .with("macd_signal", 9)
}

/// RSI extreme resolved by a MACD cross in the opposite direction.
fn reversal_rsi_macd(frame: &mut Frame, params: &Params) -> Result<()> {
    let rsi_period = params.usize_or("rsi_period", 14)?;
    let oversold = params.f64_or("rsi_oversold", 30.0)?;
    let overbought = params.f64_or("rsi_overbought", 70.0)?;
    let fast = params.usize_or("macd_fast", 12)?;
    let slow = params.usize_or("macd_slow", 26)?;
    let signal = params.usize_or("macd_signal", 9)?;

    let rsi = rsi(frame.close(), rsi_period);
    let macd = macd(frame.close(), fast, slow, signal);
    let buy = and(&lt_value(&rsi, oversold), &cross_above(&macd.line, &macd.signal));
    let sell = and(&gt_value(&rsi, overbought), &cross_below(&macd.line, &macd.signal));

    frame.set_float("rsi", rsi)?;
    frame.set_float("macd", macd.line)?;
    frame.set_float("macd_signal", macd.signal)?;
    frame.set_bool("Reversal_RSI_MACD_Entry_Buy", buy)?;
    frame.set_bool("Reversal_RSI_MACD_Entry_Sell", sell)
}

fn pullback_defaults() -> Params {
    Params::new().with("ema_short", 9).with("ema_long", 21)
}

/// Uptrend dip: the bar tags the short EMA and closes back above it.
fn pullback_trading_ema(frame: &mut Frame, params: &Params) -> Result<()> {
    let short_span = params.usize_or("ema_short", 9)?;
    let long_span = params.usize_or("ema_long", 21)?;

    let short = ema(frame.close(), short_span);
    let long = ema(frame.close(), long_span);
    let entry = ema_pullback(frame, &short, &long);

    frame.set_float("ema_short", short)?;
    frame.set_float("ema_long", long)?;
    frame.set_bool("Pullback_Trading_EMA_Entry_Buy", entry)
}

/// Shared pullback shape: trend up, low tags the fast line, close holds it.
fn ema_pullback(frame: &Frame, fast: &[Option<f64>], slow: &[Option<f64>]) -> Vec<bool> {
    (0..frame.len())
        .map(|i| match (fast[i], slow[i]) {
            (Some(f), Some(s)) => f > s && frame.low()[i] <= f && frame.close()[i] > f,
            _ => false,
        })
        .collect()
}

fn end_of_day_defaults() -> Params {
    Params::new()
        .with("ema_period", 20)
        .with("volume_multiplier", 1.5)
        .with("price_stability_pct", 0.002)
        .with("stability_window", 10)
}

/// Tight closing range above trend, on volume.
fn end_of_day_consolidation(frame: &mut Frame, params: &Params) -> Result<()> {
    let ema_period = params.usize_or("ema_period", 20)?;
    let multiplier = params.f64_or("volume_multiplier", 1.5)?;
    let stability_pct = params.f64_or("price_stability_pct", 0.002)?;
    let window = params.usize_or("stability_window", 10)?;

    let ema = ema(frame.close(), ema_period);
    let band = sub(
        &rolling_max(frame.close(), window),
        &rolling_min(frame.close(), window),
    );
    let tight: Vec<bool> = (0..frame.len())
        .map(|i| matches!(band[i], Some(w) if w <= stability_pct * frame.close()[i]))
        .collect();
    let above = gt(&opt(frame.close()), &ema);
    let spike = volume_spike(frame, multiplier)?;
    let entry = all_of(&[&tight, &above, &spike]);

    frame.set_float("ema", ema)?;
    frame.set_bool("End_of_Day_Intraday_Consolidation_Entry_Buy", entry)
}

fn ema_ribbon_macd_defaults() -> Params {
    Params::new()
        .with("ema_lengths", vec![8, 13, 21, 34, 55])
        .with("macd_fast", 12)
        .with("macd_slow", 26)
        .with("macd_signal", 9)
}

/// Fully stacked ribbon with MACD momentum behind it.
fn ema_ribbon_macd(frame: &mut Frame, params: &Params) -> Result<()> {
    let lengths = params.usize_list_or("ema_lengths", &[8, 13, 21, 34, 55])?;
    let fast = params.usize_or("macd_fast", 12)?;
    let slow = params.usize_or("macd_slow", 26)?;
    let signal = params.usize_or("macd_signal", 9)?;

    let ribbon: Vec<Vec<Option<f64>>> =
        lengths.iter().map(|&len| ema(frame.close(), len)).collect();
    let stacked = ribbon_stacked(&ribbon, frame.len());
    let macd = macd(frame.close(), fast, slow, signal);
    let entry = and(&stacked, &gt(&macd.line, &macd.signal));

    for (len, column) in lengths.iter().zip(ribbon) {
        frame.set_float(format!("ema_{len}"), column)?;
    }
    frame.set_float("macd", macd.line)?;
    frame.set_float("macd_signal", macd.signal)?;
    frame.set_bool("EMA_Ribbon_MACD_Entry_Buy", entry)
}

/// True where every ribbon line sits strictly above the next longer one.
fn ribbon_stacked(ribbon: &[Vec<Option<f64>>], len: usize) -> Vec<bool> {
    (0..len)
        .map(|i| {
            ribbon.windows(2).all(|pair| match (pair[0][i], pair[1][i]) {
                (Some(shorter), Some(longer)) => shorter > longer,
                _ => false,
            })
        })
        .collect()
}

fn chandelier_macd_defaults() -> Params {
    Params::new()
        .with("chandelier_period", 22)
        .with("chandelier_mult", 3.0)
        .with("fast", 12)
        .with("slow", 26)
        .with("signal", 9)
}

/// MACD turn taken only while price holds above its chandelier trail.
fn chandelier_exit_macd(frame: &mut Frame, params: &Params) -> Result<()> {
    let period = params.usize_or("chandelier_period", 22)?;
    let mult = params.f64_or("chandelier_mult", 3.0)?;
    let fast = params.usize_or("fast", 12)?;
    let slow = params.usize_or("slow", 26)?;
    let signal = params.usize_or("signal", 9)?;

    let atr = atr(frame.high(), frame.low(), frame.close(), period);
    let stop = sub(&rolling_max(frame.high(), period), &scale(&atr, mult));
    let above = gt(&opt(frame.close()), &stop);
    let macd = macd(frame.close(), fast, slow, signal);
    let entry = and(&above, &cross_above(&macd.line, &macd.signal));

    frame.set_float("chandelier_stop", stop)?;
    frame.set_float("macd", macd.line)?;
    frame.set_float("macd_signal", macd.signal)?;
    frame.set_bool("Chandelier_Exit_MACD_Entry_Buy", entry)
}

fn double_ma_pullback_defaults() -> Params {
    Params::new().with("fast_period", 20).with("slow_period", 50)
}

/// The pullback shape on slower session-scale averages.
fn double_ma_pullback(frame: &mut Frame, params: &Params) -> Result<()> {
    let fast_period = params.usize_or("fast_period", 20)?;
    let slow_period = params.usize_or("slow_period", 50)?;

    let fast = ema(frame.close(), fast_period);
    let slow = ema(frame.close(), slow_period);
    let entry = ema_pullback(frame, &fast, &slow);

    frame.set_float("ema_short", fast)?;
    frame.set_float("ema_long", slow)?;
    frame.set_bool("Double_MA_Pullback_Entry_Buy", entry)
}

fn rsi_range_breakout_defaults() -> Params {
    Params::new()
        .with("rsi_period", 14)
        .with("range_low", 40)
        .with("range_high", 60)
        .with("bb_period", 20)
        .with("bb_std", 2.0)
}

/// RSI escaping its chop band upward while price holds the middle band.
fn rsi_range_breakout_bb(frame: &mut Frame, params: &Params) -> Result<()> {
    let rsi_period = params.usize_or("rsi_period", 14)?;
    let range_low = params.f64_or("range_low", 40.0)?;
    let range_high = params.f64_or("range_high", 60.0)?;
    let bb_period = params.usize_or("bb_period", 20)?;
    let bb_std = params.f64_or("bb_std", 2.0)?;

    let rsi = rsi(frame.close(), rsi_period);
    let bb = bollinger(frame.close(), bb_period, bb_std);
    let escape: Vec<bool> = (0..frame.len())
        .map(|i| {
            i > 0
                && matches!(
                    (rsi[i - 1], rsi[i]),
                    (Some(prev), Some(cur))
                        if prev >= range_low && prev <= range_high && cur > range_high
                )
        })
        .collect();
    let entry = and(&escape, &gt(&opt(frame.close()), &bb.middle));

    frame.set_float("rsi", rsi)?;
    frame.set_float("bb_upper", bb.upper)?;
    frame.set_float("bb_middle", bb.middle)?;
    frame.set_float("bb_lower", bb.lower)?;
    frame.set_bool("RSI_Range_Breakout_BB_Entry_Buy", entry)
}

fn keltner_divergence_defaults() -> Params {
    Params::new()
        .with("kc_period", 20)
        .with("kc_mult", 2.0)
        .with("atr_period", 10)
        .with("rsi_period", 14)
        .with("div_lookback", 14)
}

/// Bullish RSI divergence resolved by a close back through the Keltner
/// midline.
fn keltner_middle_rsi_divergence(frame: &mut Frame, params: &Params) -> Result<()> {
    let kc_period = params.usize_or("kc_period", 20)?;
    let kc_mult = params.f64_or("kc_mult", 2.0)?;
    let atr_period = params.usize_or("atr_period", 10)?;
    let rsi_period = params.usize_or("rsi_period", 14)?;
    let div_lookback = params.usize_or("div_lookback", 14)?;

    let kc = keltner(frame.high(), frame.low(), frame.close(), kc_period, atr_period, kc_mult);
    let rsi = rsi(frame.close(), rsi_period);
    let divergence = bullish_divergence(frame.low(), &rsi, div_lookback);
    let reclaim = cross_above(&opt(frame.close()), &kc.middle);
    let entry = and(&reclaim, &divergence);

    frame.set_float("kc_upper", kc.upper)?;
    frame.set_float("kc_middle", kc.middle)?;
    frame.set_float("kc_lower", kc.lower)?;
    frame.set_float("rsi", rsi)?;
    frame.set_bool("Keltner_Middle_RSI_Divergence_Entry_Buy", entry)
}

fn ema_ribbon_expansion_defaults() -> Params {
    Params::new()
        .with("ema_lengths", vec![8, 13, 21, 34, 55])
        .with("cmf_period", 20)
}

/// Stacked ribbon widening bar over bar with money flow positive.
fn ema_ribbon_expansion_cmf(frame: &mut Frame, params: &Params) -> Result<()> {
    let lengths = params.usize_list_or("ema_lengths", &[8, 13, 21, 34, 55])?;
    let cmf_period = params.usize_or("cmf_period", 20)?;

    let ribbon: Vec<Vec<Option<f64>>> =
        lengths.iter().map(|&len| ema(frame.close(), len)).collect();
    let stacked = ribbon_stacked(&ribbon, frame.len());
    let width = match (ribbon.first(), ribbon.last()) {
        (Some(first), Some(last)) => sub(first, last),
        _ => vec![None; frame.len()],
    };
    let widening = rising(&width);
    let cmf = cmf(frame.high(), frame.low(), frame.close(), frame.volume(), cmf_period);
    let positive = gt_value(&cmf, 0.0);
    let entry = all_of(&[&stacked, &widening, &positive]);

    for (len, column) in lengths.iter().zip(ribbon) {
        frame.set_float(format!("ema_{len}"), column)?;
    }
    frame.set_float("cmf", cmf)?;
    frame.set_bool("EMA_Ribbon_Expansion_CMF_Entry_Buy", entry)
}

fn macd_bearish_defaults() -> Params {
    Params::new()
        .with("fast", 12)
        .with("slow", 26)
        .with("signal", 9)
        .with("volume_multiplier", 1.2)
}

/// MACD rolling under its signal line on active volume.
fn macd_bearish_cross(frame: &mut Frame, params: &Params) -> Result<()> {
    let fast = params.usize_or("fast", 12)?;
    let slow = params.usize_or("slow", 26)?;
    let signal = params.usize_or("signal", 9)?;
    let multiplier = params.f64_or("volume_multiplier", 1.2)?;

    let macd = macd(frame.close(), fast, slow, signal);
    let cross = cross_below(&macd.line, &macd.signal);
    let spike = volume_spike(frame, multiplier)?;
    let entry = and(&cross, &spike);

    frame.set_float("macd", macd.line)?;
    frame.set_float("macd_signal", macd.signal)?;
    frame.set_float("macd_hist", macd.histogram)?;
    frame.set_bool("MACD_Bearish_Cross_Entry_Sell", entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    use crate::data::{Candle, CandleSeries};

    fn bars(rows: &[(f64, f64, f64, f64, f64)]) -> Frame {
        let start = Utc.with_ymd_and_hms(2024, 3, 12, 9, 30, 0).unwrap();
        let candles: Vec<Candle> = rows
            .iter()
            .enumerate()
            .map(|(i, &(o, h, l, c, v))| {
                Candle::new(start + Duration::minutes(i as i64), o, h, l, c, v)
            })
            .collect();
        Frame::from_series(&CandleSeries::from_vec(candles))
    }

    fn frame_from_closes(closes: &[f64]) -> Frame {
        let rows: Vec<(f64, f64, f64, f64, f64)> = closes
            .iter()
            .map(|&c| (c - 0.2, c + 0.4, c - 0.4, c, 1_000.0))
            .collect();
        bars(&rows)
    }

    #[test]
    fn test_pullback_buys_the_dip_only() {
        // steady climb whose lows stay well above the 9 EMA, except one
        // bar that wicks down to the average and closes back above it
        let rows: Vec<(f64, f64, f64, f64, f64)> = (0..40)
            .map(|i| {
                let c = 100.0 + i as f64;
                if i == 35 {
                    (c - 0.3, c + 0.4, c - 5.0, c, 1_000.0)
                } else {
                    (c - 0.3, c + 0.4, c - 0.3, c, 1_000.0)
                }
            })
            .collect();
        let mut frame = bars(&rows);
        pullback_trading_ema(&mut frame, &pullback_defaults()).unwrap();

        let entry = frame.bools("Pullback_Trading_EMA_Entry_Buy").unwrap();
        assert!(entry[35], "the dip bar should fire");
        assert_eq!(entry.iter().filter(|&&b| b).count(), 1, "only the dip bar fires");
    }

    #[test]
    fn test_reversal_buys_the_oversold_macd_turn() {
        let mut closes: Vec<f64> = (0..40).map(|i| 150.0 - 1.5 * i as f64).collect();
        closes.extend((1..=10).map(|i| 91.5 + 2.0 * i as f64));
        let mut frame = frame_from_closes(&closes);
        reversal_rsi_macd(&mut frame, &reversal_defaults()).unwrap();

        let buy = frame.bools("Reversal_RSI_MACD_Entry_Buy").unwrap();
        assert!(
            buy[40..=42].iter().any(|&b| b),
            "the MACD turn lands while RSI is still oversold"
        );
        assert!(buy[..40].iter().all(|&b| !b), "no buy during the slide");

        let sell = frame.bools("Reversal_RSI_MACD_Entry_Sell").unwrap();
        assert!(sell.iter().all(|&b| !b), "nothing here is overbought");
    }

    #[test]
    fn test_end_of_day_consolidation_needs_tight_range_and_volume() {
        let mut rows: Vec<(f64, f64, f64, f64, f64)> = (0..25)
            .map(|i| {
                let c = 100.0 + i as f64;
                (c - 0.2, c + 0.4, c - 0.4, c, 1_000.0)
            })
            .collect();
        // coil just under the highs, then a volume push on the last bar
        rows.extend((0..14).map(|_| (124.9, 125.3, 124.7, 125.0, 1_000.0)));
        rows.push((125.0, 125.4, 124.9, 125.05, 2_000.0));
        let mut frame = bars(&rows);
        end_of_day_consolidation(&mut frame, &end_of_day_defaults()).unwrap();

        let entry = frame.bools("End_of_Day_Intraday_Consolidation_Entry_Buy").unwrap();
        assert!(entry[39], "tight range above trend on volume should fire");
        assert!(entry[..39].iter().all(|&b| !b), "the climb is never stable enough");
    }

    #[test]
    fn test_ema_ribbon_macd_tracks_a_stacked_trend() {
        let rising: Vec<f64> = (0..80).map(|i| 100.0 + i as f64).collect();
        let mut frame = frame_from_closes(&rising);
        ema_ribbon_macd(&mut frame, &ema_ribbon_macd_defaults()).unwrap();
        let entry = frame.bools("EMA_Ribbon_MACD_Entry_Buy").unwrap();
        assert!(entry[55..].iter().all(|&b| b), "a clean ramp keeps the ribbon stacked");
        assert!(!entry[0], "one bar cannot stack the ribbon");
        assert!(frame.has_column("ema_8") && frame.has_column("ema_55"));

        let falling: Vec<f64> = (0..80).map(|i| 200.0 - i as f64).collect();
        let mut frame = frame_from_closes(&falling);
        ema_ribbon_macd(&mut frame, &ema_ribbon_macd_defaults()).unwrap();
        let entry = frame.bools("EMA_Ribbon_MACD_Entry_Buy").unwrap();
        assert!(entry.iter().all(|&b| !b), "a downtrend inverts the stack");
    }

    #[test]
    fn test_chandelier_exit_macd_buys_the_resumption() {
        // long climb, shallow five-bar pullback, strong resumption; price
        // never loses the chandelier trail so the MACD re-cross is taken
        let mut closes: Vec<f64> = (0..40).map(|i| 100.0 + 1.5 * i as f64).collect();
        closes.extend((1..=5).map(|i| 158.5 - i as f64));
        closes.extend((1..=15).map(|i| 153.5 + 2.0 * i as f64));
        let mut frame = frame_from_closes(&closes);
        chandelier_exit_macd(&mut frame, &chandelier_macd_defaults()).unwrap();

        let entry = frame.bools("Chandelier_Exit_MACD_Entry_Buy").unwrap();
        assert!(entry[45..].iter().any(|&b| b), "the re-cross should be taken");
        assert!(entry[..45].iter().all(|&b| !b));
    }

    #[test]
    fn test_rsi_range_breakout_bb_pops_out_of_chop() {
        // strict alternation pins RSI mid-range, then three strong bars
        let mut closes = vec![100.0];
        for i in 1..30 {
            let prev = closes[i - 1];
            closes.push(if i % 2 == 1 { prev + 0.5 } else { prev - 0.45 });
        }
        let last = *closes.last().unwrap();
        closes.extend([last + 2.0, last + 4.0, last + 6.0]);
        let mut frame = frame_from_closes(&closes);
        rsi_range_breakout_bb(&mut frame, &rsi_range_breakout_defaults()).unwrap();

        let entry = frame.bools("RSI_Range_Breakout_BB_Entry_Buy").unwrap();
        assert!(entry[30], "the first strong bar lifts RSI out of the band");
        assert!(entry[..30].iter().all(|&b| !b), "chop never leaves the band");
    }

    #[test]
    fn test_keltner_middle_divergence_buys_the_reclaim() {
        // crash, shallow recovery below the midline, then a flush bar that
        // prints a fresh low but closes back through the middle band
        let mut rows: Vec<(f64, f64, f64, f64, f64)> = Vec::new();
        rows.extend((0..20).map(|_| (100.0, 100.4, 99.6, 100.0, 1_000.0)));
        for i in 1..=4 {
            let c = 100.0 - 3.0 * i as f64;
            rows.push((c + 1.0, c + 1.4, c - 0.4, c, 1_000.0));
        }
        for i in 1..=10 {
            let c = 88.0 + 0.4 * i as f64;
            rows.push((c - 0.3, c + 0.4, c - 0.4, c, 1_000.0));
        }
        rows.push((92.1, 95.4, 86.5, 94.8, 1_000.0));
        let mut frame = bars(&rows);
        keltner_middle_rsi_divergence(&mut frame, &keltner_divergence_defaults()).unwrap();

        let entry = frame.bools("Keltner_Middle_RSI_Divergence_Entry_Buy").unwrap();
        assert!(entry[34], "fresh low plus midline reclaim should fire");
        assert_eq!(entry.iter().filter(|&&b| b).count(), 1);
    }

    #[test]
    fn test_ribbon_expansion_needs_acceleration() {
        // accelerating ramp: the ribbon widens every bar
        let accelerating: Vec<f64> = (0..80).map(|i| 100.0 + 0.02 * (i * i) as f64).collect();
        let rows: Vec<(f64, f64, f64, f64, f64)> = accelerating
            .iter()
            .map(|&c| (c - 0.5, c + 0.1, c - 0.9, c, 1_000.0))
            .collect();
        let mut frame = bars(&rows);
        ema_ribbon_expansion_cmf(&mut frame, &ema_ribbon_expansion_defaults()).unwrap();
        let entry = frame.bools("EMA_Ribbon_Expansion_CMF_Entry_Buy").unwrap();
        assert!(entry[30..].iter().all(|&b| b), "widening stack with positive flow");

        // decelerating ramp: still stacked, but the ribbon is contracting
        let fading: Vec<f64> = (0..80)
            .map(|i| 100.0 + 30.0 * (1.0 - 0.95_f64.powi(i)))
            .collect();
        let rows: Vec<(f64, f64, f64, f64, f64)> = fading
            .iter()
            .map(|&c| (c - 0.5, c + 0.1, c - 0.9, c, 1_000.0))
            .collect();
        let mut frame = bars(&rows);
        ema_ribbon_expansion_cmf(&mut frame, &ema_ribbon_expansion_defaults()).unwrap();
        let entry = frame.bools("EMA_Ribbon_Expansion_CMF_Entry_Buy").unwrap();
        assert!(entry[45..].iter().all(|&b| !b), "a fading trend stops expanding");
    }

    #[test]
    fn test_macd_bearish_cross_sells_the_break() {
        let mut rows: Vec<(f64, f64, f64, f64, f64)> = (0..40)
            .map(|i| {
                let c = 100.0 + 1.5 * i as f64;
                (c - 0.2, c + 0.4, c - 0.4, c, 1_000.0)
            })
            .collect();
        rows.extend((1..=8).map(|i| {
            let c = 158.5 - 2.0 * i as f64;
            (c + 0.8, c + 1.0, c - 0.4, c, 3_000.0)
        }));
        let mut frame = bars(&rows);
        macd_bearish_cross(&mut frame, &macd_bearish_defaults()).unwrap();

        let entry = frame.bools("MACD_Bearish_Cross_Entry_Sell").unwrap();
        assert!(entry[40..=43].iter().any(|&b| b), "the break crosses MACD down on volume");
        assert!(entry[..40].iter().all(|&b| !b), "no sell while the trend holds");
    }
}
