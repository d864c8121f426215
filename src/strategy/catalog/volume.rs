//! Volume and volatility strategies: trade where participation is

use crate::data::Frame;
use crate::indicators::{
    and, aroon, bollinger, cross_above, cross_below, gt, gt_value, lt_value, opt, pct_change,
    rsi, tema, vwap,
};
use crate::strategy::{Category, Params, StrategyDef};
use crate::Result;

use super::volume_spike;

pub(super) fn defs() -> Vec<StrategyDef> {
    vec![
        StrategyDef {
            name: "VWAP RSI",
            category: Category::VolumeVolatility,
            min_bars: 15,
            defaults: vwap_rsi_defaults,
            compute: vwap_rsi,
        },
        StrategyDef {
            name: "News Trading (Volatility Spike)",
            category: Category::VolumeVolatility,
            min_bars: 21,
            defaults: news_trading_defaults,
            compute: news_trading,
        },
        StrategyDef {
            name: "TEMA Cross Volume",
            category: Category::VolumeVolatility,
            min_bars: 22,
            defaults: tema_cross_defaults,
            compute: tema_cross_volume,
        },
        StrategyDef {
            name: "VWAP Aroon",
            category: Category::VolumeVolatility,
            min_bars: 15,
            defaults: vwap_aroon_defaults,
            compute: vwap_aroon,
        },
        StrategyDef {
            name: "VWAP Breakdown Volume",
            category: Category::VolumeVolatility,
            min_bars: 21,
            defaults: vwap_breakdown_defaults,
            compute: vwap_breakdown_volume,
        },
        StrategyDef {
            name: "Bollinger Upper Break Volume",
            category: Category::VolumeVolatility,
            min_bars: 21,
            defaults: bollinger_upper_break_defaults,
            compute: bollinger_upper_break,
        },
    ]
}

fn vwap_rsi_defaults() -> Params {
    Params::new().with("rsi_period", 14).with("rsi_level", 50)
}

/// Price holding above VWAP with momentum onside.
fn vwap_rsi(frame: &mut Frame, params: &Params) -> Result<()> {
    let rsi_period = params.usize_or("rsi_period", 14)?;
    let rsi_level = params.f64_or("rsi_level", 50.0)?;

    let vwap = vwap(frame.high(), frame.low(), frame.close(), frame.volume());
    let rsi = rsi(frame.close(), rsi_period);
    let entry = and(
        &gt(&opt(frame.close()), &vwap),
        &gt_value(&rsi, rsi_level),
    );

    frame.set_float("vwap", vwap)?;
    frame.set_float("rsi", rsi)?;
    frame.set_bool("VWAP_RSI_Entry_Buy", entry)
}

fn news_trading_defaults() -> Params {
    Params::new()
        .with("volume_multiplier", 2.5)
        .with("price_change_threshold", 0.02)
}

/// A one-bar shock in price and volume, direction left to the reader.
fn news_trading(frame: &mut Frame, params: &Params) -> Result<()> {
    let multiplier = params.f64_or("volume_multiplier", 2.5)?;
    let threshold = params.f64_or("price_change_threshold", 0.02)?;

    let price_change: Vec<Option<f64>> = pct_change(frame.close())
        .iter()
        .map(|p| p.map(f64::abs))
        .collect();
    let shock = gt_value(&price_change, threshold);
    let spike = volume_spike(frame, multiplier)?;
    let entry = and(&shock, &spike);

    frame.set_float("price_change", price_change)?;
    frame.set_bool("News_Trading_Volatility_Spike_Entry", entry)
}

fn tema_cross_defaults() -> Params {
    Params::new()
        .with("tema_fast", 9)
        .with("tema_slow", 21)
        .with("volume_multiplier", 1.5)
}

/// Fast TEMA crossing the slow one on expanding volume.
fn tema_cross_volume(frame: &mut Frame, params: &Params) -> Result<()> {
    let fast = params.usize_or("tema_fast", 9)?;
    let slow = params.usize_or("tema_slow", 21)?;
    let multiplier = params.f64_or("volume_multiplier", 1.5)?;

    let tema_fast = tema(frame.close(), fast);
    let tema_slow = tema(frame.close(), slow);
    let spike = volume_spike(frame, multiplier)?;
    let entry = and(&cross_above(&tema_fast, &tema_slow), &spike);

    frame.set_float("tema_fast", tema_fast)?;
    frame.set_float("tema_slow", tema_slow)?;
    frame.set_bool("TEMA_Cross_Volume_Entry_Buy", entry)
}

fn vwap_aroon_defaults() -> Params {
    Params::new().with("aroon_period", 14).with("aroon_level", 70)
}

/// Above VWAP with Aroon showing a fresh, dominant uptrend.
fn vwap_aroon(frame: &mut Frame, params: &Params) -> Result<()> {
    let aroon_period = params.usize_or("aroon_period", 14)?;
    let aroon_level = params.f64_or("aroon_level", 70.0)?;

    let vwap = vwap(frame.high(), frame.low(), frame.close(), frame.volume());
    let aroon = aroon(frame.high(), frame.low(), aroon_period);

    let above_vwap = gt(&opt(frame.close()), &vwap);
    let fresh = gt_value(&aroon.up, aroon_level);
    let dominant = gt(&aroon.up, &aroon.down);
    let entry = and(&and(&above_vwap, &fresh), &dominant);

    frame.set_float("vwap", vwap)?;
    frame.set_float("aroon_up", aroon.up)?;
    frame.set_float("aroon_down", aroon.down)?;
    frame.set_bool("VWAP_Aroon_Entry_Buy", entry)
}

fn vwap_breakdown_defaults() -> Params {
    Params::new().with("rsi_period", 14).with("volume_multiplier", 1.5)
}

/// Loss of VWAP on volume with momentum already negative.
fn vwap_breakdown_volume(frame: &mut Frame, params: &Params) -> Result<()> {
    let rsi_period = params.usize_or("rsi_period", 14)?;
    let multiplier = params.f64_or("volume_multiplier", 1.5)?;

    let vwap = vwap(frame.high(), frame.low(), frame.close(), frame.volume());
    let rsi = rsi(frame.close(), rsi_period);
    let breakdown = cross_below(&opt(frame.close()), &vwap);
    let weak = lt_value(&rsi, 50.0);
    let spike = volume_spike(frame, multiplier)?;
    let entry = and(&and(&breakdown, &weak), &spike);

    frame.set_float("vwap", vwap)?;
    frame.set_float("rsi", rsi)?;
    frame.set_bool("VWAP_Breakdown_Volume_Entry_Sell", entry)
}

fn bollinger_upper_break_defaults() -> Params {
    Params::new()
        .with("bb_period", 20)
        .with("bb_std", 2.0)
        .with("volume_multiplier", 1.5)
}

/// Close punching through the upper band on conviction volume.
fn bollinger_upper_break(frame: &mut Frame, params: &Params) -> Result<()> {
    let bb_period = params.usize_or("bb_period", 20)?;
    let bb_std = params.f64_or("bb_std", 2.0)?;
    let multiplier = params.f64_or("volume_multiplier", 1.5)?;

    let bb = bollinger(frame.close(), bb_period, bb_std);
    let breakout = cross_above(&opt(frame.close()), &bb.upper);
    let spike = volume_spike(frame, multiplier)?;
    let entry = and(&breakout, &spike);

    frame.set_float("bb_upper", bb.upper)?;
    frame.set_float("bb_middle", bb.middle)?;
    frame.set_float("bb_lower", bb.lower)?;
    frame.set_bool("Bollinger_Upper_Break_Volume_Entry_Buy", entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    use crate::data::{Candle, CandleSeries};

    fn frame_from(rows: &[(f64, f64)]) -> Frame {
        // (close, volume) pairs on a fixed 1-minute grid
        let start = Utc.with_ymd_and_hms(2024, 3, 7, 13, 0, 0).unwrap();
        let candles: Vec<Candle> = rows
            .iter()
            .enumerate()
            .map(|(i, &(c, v))| {
                Candle::new(start + Duration::minutes(i as i64), c - 0.2, c + 0.5, c - 0.5, c, v)
            })
            .collect();
        Frame::from_series(&CandleSeries::from_vec(candles))
    }

    #[test]
    fn test_news_trading_wants_shock_and_volume_together() {
        let mut rows: Vec<(f64, f64)> = (0..30).map(|_| (100.0, 1_000.0)).collect();
        rows.push((104.0, 5_000.0)); // +4% on 5x volume
        let mut frame = frame_from(&rows);
        news_trading(&mut frame, &news_trading_defaults()).unwrap();
        let entry = frame.bools("News_Trading_Volatility_Spike_Entry").unwrap();
        assert!(entry[30]);
        assert!(entry[..30].iter().all(|&b| !b));

        // same shock on quiet volume stays silent
        rows[30] = (104.0, 1_100.0);
        let mut frame = frame_from(&rows);
        news_trading(&mut frame, &news_trading_defaults()).unwrap();
        assert!(!frame.bools("News_Trading_Volatility_Spike_Entry").unwrap()[30]);
    }

    #[test]
    fn test_news_trading_counts_crashes_too() {
        let mut rows: Vec<(f64, f64)> = (0..30).map(|_| (100.0, 1_000.0)).collect();
        rows.push((96.0, 5_000.0)); // -4% shock
        let mut frame = frame_from(&rows);
        news_trading(&mut frame, &news_trading_defaults()).unwrap();
        assert!(frame.bools("News_Trading_Volatility_Spike_Entry").unwrap()[30]);
    }

    #[test]
    fn test_vwap_rsi_holds_in_a_funded_uptrend() {
        let rows: Vec<(f64, f64)> = (0..40)
            .map(|i| (100.0 + 0.5 * i as f64, 1_000.0 + 10.0 * i as f64))
            .collect();
        let mut frame = frame_from(&rows);
        vwap_rsi(&mut frame, &vwap_rsi_defaults()).unwrap();
        let entry = frame.bools("VWAP_RSI_Entry_Buy").unwrap();
        // cumulative VWAP lags a steady climb; RSI reads 100 on pure gains
        assert!(entry[20..].iter().all(|&b| b));
        assert!(entry[..14].iter().all(|&b| !b), "RSI is undefined before its window");
    }

    #[test]
    fn test_vwap_breakdown_fires_on_the_loss_of_vwap() {
        // hold above VWAP, then dump below it on volume
        let mut rows: Vec<(f64, f64)> = (0..30)
            .map(|i| (100.0 + 0.2 * i as f64, 1_000.0))
            .collect();
        rows.push((80.0, 6_000.0));
        let mut frame = frame_from(&rows);
        vwap_breakdown_volume(&mut frame, &vwap_breakdown_defaults()).unwrap();
        let entry = frame.bools("VWAP_Breakdown_Volume_Entry_Sell").unwrap();
        assert!(entry[30]);
        assert!(entry[..30].iter().all(|&b| !b));
    }

    #[test]
    fn test_bollinger_upper_break_needs_the_cross() {
        let mut rows: Vec<(f64, f64)> = (0..30).map(|_| (100.0, 1_000.0)).collect();
        rows.push((103.0, 4_000.0));
        rows.push((103.5, 4_000.0)); // already above the band: no new cross
        let mut frame = frame_from(&rows);
        bollinger_upper_break(&mut frame, &bollinger_upper_break_defaults()).unwrap();
        let entry = frame.bools("Bollinger_Upper_Break_Volume_Entry_Buy").unwrap();
        assert!(entry[30], "the initial break should fire");
        assert!(!entry[31], "a bar already above the band is not a cross");
    }
}
