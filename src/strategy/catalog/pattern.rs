//! Pattern strategies: single-bar shapes and divergences

use crate::data::Frame;
use crate::indicators::{
    and, bearish_divergence, bullish_divergence, gt_value, hammer_flags, keltner, rolling_max,
    rsi, shift, supertrend,
};
use crate::strategy::{Category, Params, StrategyDef};
use crate::Result;

use super::volume_spike;

pub(super) fn defs() -> Vec<StrategyDef> {
    vec![
        StrategyDef {
            name: "Hammer on Keltner Volume",
            category: Category::Pattern,
            min_bars: 21,
            defaults: hammer_keltner_defaults,
            compute: hammer_on_keltner,
        },
        StrategyDef {
            name: "Hammer Volume",
            category: Category::Pattern,
            min_bars: 20,
            defaults: hammer_volume_defaults,
            compute: hammer_volume,
        },
        StrategyDef {
            name: "RSI Bullish Divergence Candlestick",
            category: Category::Pattern,
            min_bars: 29,
            defaults: rsi_bullish_divergence_defaults,
            compute: rsi_bullish_divergence,
        },
        StrategyDef {
            name: "Ross Hook Momentum",
            category: Category::Pattern,
            min_bars: 15,
            defaults: ross_hook_defaults,
            compute: ross_hook_momentum,
        },
        StrategyDef {
            name: "Bearish RSI Divergence",
            category: Category::Pattern,
            min_bars: 29,
            defaults: bearish_rsi_divergence_defaults,
            compute: bearish_rsi_divergence,
        },
        StrategyDef {
            name: "SuperTrend Flip",
            category: Category::Pattern,
            min_bars: 15,
            defaults: supertrend_flip_defaults,
            compute: supertrend_flip,
        },
    ]
}

fn hammer_keltner_defaults() -> Params {
    Params::new()
        .with("kc_period", 20)
        .with("kc_mult", 2.0)
        .with("atr_period", 10)
        .with("volume_multiplier", 1.5)
}

/// A hammer whose wick tags the lower Keltner band, on volume.
fn hammer_on_keltner(frame: &mut Frame, params: &Params) -> Result<()> {
    let kc_period = params.usize_or("kc_period", 20)?;
    let kc_mult = params.f64_or("kc_mult", 2.0)?;
    let atr_period = params.usize_or("atr_period", 10)?;
    let multiplier = params.f64_or("volume_multiplier", 1.5)?;

    let kc = keltner(frame.high(), frame.low(), frame.close(), kc_period, atr_period, kc_mult);
    let hammers = hammer_flags(frame.candles());
    let tagged: Vec<bool> = (0..frame.len())
        .map(|i| match kc.lower[i] {
            Some(band) => hammers[i] && frame.low()[i] < band,
            None => false,
        })
        .collect();
    let spike = volume_spike(frame, multiplier)?;
    let entry = and(&tagged, &spike);

    frame.set_float("kc_upper", kc.upper)?;
    frame.set_float("kc_middle", kc.middle)?;
    frame.set_float("kc_lower", kc.lower)?;
    frame.set_bool("Hammer_on_Keltner_Volume_Entry_Buy", entry)
}

fn hammer_volume_defaults() -> Params {
    Params::new().with("volume_multiplier", 1.5)
}

/// A hammer backed by real participation.
fn hammer_volume(frame: &mut Frame, params: &Params) -> Result<()> {
    let multiplier = params.f64_or("volume_multiplier", 1.5)?;

    let hammers = hammer_flags(frame.candles());
    let spike = volume_spike(frame, multiplier)?;
    let entry = and(&hammers, &spike);

    frame.set_bool("hammer", hammers)?;
    frame.set_bool("Hammer_Volume_Entry_Buy", entry)
}

fn rsi_bullish_divergence_defaults() -> Params {
    Params::new().with("rsi_period", 14).with("div_lookback", 14)
}

/// Fresh price low that RSI refuses to confirm, on a green bar.
fn rsi_bullish_divergence(frame: &mut Frame, params: &Params) -> Result<()> {
    let rsi_period = params.usize_or("rsi_period", 14)?;
    let div_lookback = params.usize_or("div_lookback", 14)?;

    let rsi = rsi(frame.close(), rsi_period);
    let divergence = bullish_divergence(frame.low(), &rsi, div_lookback);
    let green: Vec<bool> = (0..frame.len())
        .map(|i| frame.close()[i] > frame.open()[i])
        .collect();
    let entry = and(&divergence, &green);

    frame.set_float("rsi", rsi)?;
    frame.set_bool("RSI_Bullish_Divergence_Candlestick_Entry_Buy", entry)
}

fn ross_hook_defaults() -> Params {
    Params::new()
        .with("lookback", 10)
        .with("rsi_period", 14)
        .with("rsi_level", 50)
}

/// Breakout resuming after a one-bar pullback in the highs.
fn ross_hook_momentum(frame: &mut Frame, params: &Params) -> Result<()> {
    let lookback = params.usize_or("lookback", 10)?;
    let rsi_period = params.usize_or("rsi_period", 14)?;
    let rsi_level = params.f64_or("rsi_level", 50.0)?;

    let prior_high = shift(&rolling_max(frame.high(), lookback), 1);
    let n = frame.len();
    let hooked: Vec<bool> = (0..n)
        .map(|i| i >= 2 && frame.high()[i - 1] < frame.high()[i - 2])
        .collect();
    let breaks: Vec<bool> = (0..n)
        .map(|i| matches!(prior_high[i], Some(level) if frame.close()[i] > level))
        .collect();
    let rsi = rsi(frame.close(), rsi_period);
    let entry = and(&and(&hooked, &breaks), &gt_value(&rsi, rsi_level));

    frame.set_float("prior_high", prior_high)?;
    frame.set_float("rsi", rsi)?;
    frame.set_bool("Ross_Hook_Momentum_Entry_Buy", entry)
}

fn bearish_rsi_divergence_defaults() -> Params {
    Params::new().with("rsi_period", 14).with("div_lookback", 14)
}

/// Fresh price high that RSI refuses to confirm.
fn bearish_rsi_divergence(frame: &mut Frame, params: &Params) -> Result<()> {
    let rsi_period = params.usize_or("rsi_period", 14)?;
    let div_lookback = params.usize_or("div_lookback", 14)?;

    let rsi = rsi(frame.close(), rsi_period);
    let entry = bearish_divergence(frame.high(), &rsi, div_lookback);

    frame.set_float("rsi", rsi)?;
    frame.set_bool("Bearish_RSI_Divergence_Entry_Sell", entry)
}

fn supertrend_flip_defaults() -> Params {
    Params::new().with("atr_length", 10).with("factor", 3.0)
}

/// The bar on which SuperTrend direction turns up.
fn supertrend_flip(frame: &mut Frame, params: &Params) -> Result<()> {
    let atr_length = params.usize_or("atr_length", 10)?;
    let factor = params.f64_or("factor", 3.0)?;

    let st = supertrend(frame.high(), frame.low(), frame.close(), atr_length, factor);
    let entry: Vec<bool> = (0..st.bullish.len())
        .map(|i| i > 0 && st.bullish[i] && !st.bullish[i - 1])
        .collect();

    frame.set_float("supertrend", st.line)?;
    frame.set_bool("supertrend_bullish", st.bullish)?;
    frame.set_bool("SuperTrend_Flip_Entry_Buy", entry)
}
