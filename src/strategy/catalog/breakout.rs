//! Breakout strategies: take the level break, filtered for conviction

use crate::data::Frame;
use crate::indicators::{
    and, cross_above, ema, fractal_high_levels, gt, gt_value, opt, rolling_min, rolling_pivots,
    rsi, shift,
};
use crate::strategy::{Category, Params, StrategyDef};
use crate::Result;

use super::volume_spike;

pub(super) fn defs() -> Vec<StrategyDef> {
    vec![
        StrategyDef {
            name: "Breakout Trading",
            category: Category::Breakout,
            min_bars: 20,
            defaults: breakout_trading_defaults,
            compute: breakout_trading,
        },
        StrategyDef {
            name: "Opening Range Breakout",
            category: Category::Breakout,
            min_bars: 20,
            defaults: opening_range_defaults,
            compute: opening_range_breakout,
        },
        StrategyDef {
            name: "Gap and Go",
            category: Category::Breakout,
            min_bars: 21,
            defaults: gap_and_go_defaults,
            compute: gap_and_go,
        },
        StrategyDef {
            name: "Fractal Breakout RSI",
            category: Category::Breakout,
            min_bars: 20,
            defaults: fractal_breakout_defaults,
            compute: fractal_breakout_rsi,
        },
        StrategyDef {
            name: "Pivot Point (Intraday S/R)",
            category: Category::Breakout,
            min_bars: 21,
            defaults: pivot_point_defaults,
            compute: pivot_point,
        },
        StrategyDef {
            name: "Liquidity Sweep Reversal",
            category: Category::Breakout,
            min_bars: 21,
            defaults: liquidity_sweep_defaults,
            compute: liquidity_sweep_reversal,
        },
    ]
}

fn breakout_trading_defaults() -> Params {
    Params::new().with("ema_period", 20).with("volume_multiplier", 1.5)
}

/// Close above its EMA on expanding volume.
fn breakout_trading(frame: &mut Frame, params: &Params) -> Result<()> {
    let ema_period = params.usize_or("ema_period", 20)?;
    let multiplier = params.f64_or("volume_multiplier", 1.5)?;

    let ema = ema(frame.close(), ema_period);
    let above = gt(&opt(frame.close()), &ema);
    let spike = volume_spike(frame, multiplier)?;
    let entry = and(&above, &spike);

    frame.set_float("ema", ema)?;
    frame.set_bool("Breakout_Trading_Entry", entry)
}

fn opening_range_defaults() -> Params {
    Params::new().with("range_bars", 15).with("volume_multiplier", 1.5)
}

/// Break of the high printed over the first bars of the series.
fn opening_range_breakout(frame: &mut Frame, params: &Params) -> Result<()> {
    let range_bars = params.usize_or("range_bars", 15)?;
    let multiplier = params.f64_or("volume_multiplier", 1.5)?;

    let n = frame.len();
    let span = range_bars.min(n);
    let range_high = frame.high()[..span].iter().cloned().fold(f64::MIN, f64::max);
    let range_low = frame.low()[..span].iter().cloned().fold(f64::MAX, f64::min);

    // the levels exist once the range is complete; earlier bars are
    // still forming it and must not see it
    let level = |value: f64| -> Vec<Option<f64>> {
        (0..n)
            .map(|i| (span > 0 && i + 1 >= range_bars).then_some(value))
            .collect()
    };
    let high_level = level(range_high);
    let low_level = level(range_low);

    let breakout = cross_above(&opt(frame.close()), &high_level);
    let spike = volume_spike(frame, multiplier)?;
    let entry = and(&breakout, &spike);

    frame.set_float("range_high", high_level)?;
    frame.set_float("range_low", low_level)?;
    frame.set_bool("Opening_Range_Breakout_Entry_Buy", entry)
}

fn gap_and_go_defaults() -> Params {
    Params::new()
        .with("gap_threshold", 0.02)
        .with("rsi_period", 14)
        .with("volume_multiplier", 1.5)
}

/// Overnight gap up that keeps going: bullish bar, momentum, volume.
fn gap_and_go(frame: &mut Frame, params: &Params) -> Result<()> {
    let gap_threshold = params.f64_or("gap_threshold", 0.02)?;
    let rsi_period = params.usize_or("rsi_period", 14)?;
    let multiplier = params.f64_or("volume_multiplier", 1.5)?;

    let n = frame.len();
    let mut gap_pct = vec![None; n];
    for i in 1..n {
        let prev_close = frame.close()[i - 1];
        if prev_close != 0.0 {
            gap_pct[i] = Some((frame.open()[i] - prev_close) / prev_close);
        }
    }
    let gapped: Vec<bool> = gap_pct
        .iter()
        .map(|g| matches!(g, Some(g) if *g >= gap_threshold))
        .collect();
    let bullish: Vec<bool> = (0..n).map(|i| frame.close()[i] > frame.open()[i]).collect();

    let rsi = rsi(frame.close(), rsi_period);
    let momentum = gt_value(&rsi, 50.0);
    let spike = volume_spike(frame, multiplier)?;

    let mut entry = and(&gapped, &bullish);
    entry = and(&entry, &momentum);
    entry = and(&entry, &spike);

    frame.set_float("gap_pct", gap_pct)?;
    frame.set_float("rsi", rsi)?;
    frame.set_bool("Gap_and_Go_Entry_Buy", entry)
}

fn fractal_breakout_defaults() -> Params {
    Params::new()
        .with("fractal_wing", 2)
        .with("rsi_period", 14)
        .with("rsi_level", 50)
}

/// Break of the last confirmed fractal high with momentum onside.
fn fractal_breakout_rsi(frame: &mut Frame, params: &Params) -> Result<()> {
    let wing = params.usize_or("fractal_wing", 2)?;
    let rsi_period = params.usize_or("rsi_period", 14)?;
    let rsi_level = params.f64_or("rsi_level", 50.0)?;

    let fractal = fractal_high_levels(frame.high(), wing);
    let rsi = rsi(frame.close(), rsi_period);
    let entry = and(
        &cross_above(&opt(frame.close()), &fractal),
        &gt_value(&rsi, rsi_level),
    );

    frame.set_float("fractal_high", fractal)?;
    frame.set_float("rsi", rsi)?;
    frame.set_bool("Fractal_Breakout_RSI_Entry_Buy", entry)
}

fn pivot_point_defaults() -> Params {
    Params::new()
        .with("pivot_lookback", 20)
        .with("exit_ema_period", 20)
}

/// Close reclaiming the rolling R1 resistance. The exit EMA rides along
/// as a derived column for downstream exit handling.
fn pivot_point(frame: &mut Frame, params: &Params) -> Result<()> {
    let lookback = params.usize_or("pivot_lookback", 20)?;
    let exit_ema_period = params.usize_or("exit_ema_period", 20)?;

    let pivots = rolling_pivots(frame.high(), frame.low(), frame.close(), lookback);
    let exit_ema = ema(frame.close(), exit_ema_period);
    let entry = cross_above(&opt(frame.close()), &pivots.r1);

    frame.set_float("pivot", pivots.pp)?;
    frame.set_float("r1", pivots.r1)?;
    frame.set_float("s1", pivots.s1)?;
    frame.set_float("exit_ema", exit_ema)?;
    frame.set_bool("Pivot_Point_Intraday_S_R_Entry_Buy", entry)
}

fn liquidity_sweep_defaults() -> Params {
    Params::new().with("lookback", 20).with("rsi_period", 14)
}

/// Stop-run under the prior low that closes back above it.
fn liquidity_sweep_reversal(frame: &mut Frame, params: &Params) -> Result<()> {
    let lookback = params.usize_or("lookback", 20)?;
    let rsi_period = params.usize_or("rsi_period", 14)?;

    let prior_low = shift(&rolling_min(frame.low(), lookback), 1);
    let n = frame.len();
    let entry: Vec<bool> = (0..n)
        .map(|i| match prior_low[i] {
            Some(level) => frame.low()[i] < level && frame.close()[i] > level,
            None => false,
        })
        .collect();
    let rsi = rsi(frame.close(), rsi_period);

    frame.set_float("prior_low", prior_low)?;
    frame.set_float("rsi", rsi)?;
    frame.set_bool("Liquidity_Sweep_Reversal_Entry_Buy", entry)
}
