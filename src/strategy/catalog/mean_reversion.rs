//! Mean-reversion strategies: fade stretched prices back to a baseline

use crate::data::Frame;
use crate::indicators::{
    and, bollinger, cross_above, gt, gt_value, keltner, lt, lt_value, macd, mfi, opt, rsi,
};
use crate::strategy::{Category, Params, StrategyDef};
use crate::Result;

use super::volume_spike;

pub(super) fn defs() -> Vec<StrategyDef> {
    vec![
        StrategyDef {
            name: "Mean Reversion (RSI)",
            category: Category::MeanReversion,
            min_bars: 15,
            defaults: mean_reversion_rsi_defaults,
            compute: mean_reversion_rsi,
        },
        StrategyDef {
            name: "Scalping (Bollinger Bands)",
            category: Category::MeanReversion,
            min_bars: 20,
            defaults: scalping_bollinger_defaults,
            compute: scalping_bollinger,
        },
        StrategyDef {
            name: "MACD RSI Oversold",
            category: Category::MeanReversion,
            min_bars: 35,
            defaults: macd_rsi_oversold_defaults,
            compute: macd_rsi_oversold,
        },
        StrategyDef {
            name: "CCI Reversion",
            category: Category::MeanReversion,
            min_bars: 21,
            defaults: cci_reversion_defaults,
            compute: cci_reversion,
        },
        StrategyDef {
            name: "Keltner RSI Oversold",
            category: Category::MeanReversion,
            min_bars: 21,
            defaults: keltner_rsi_oversold_defaults,
            compute: keltner_rsi_oversold,
        },
        StrategyDef {
            name: "Keltner MFI Oversold",
            category: Category::MeanReversion,
            min_bars: 21,
            defaults: keltner_mfi_oversold_defaults,
            compute: keltner_mfi_oversold,
        },
        StrategyDef {
            name: "Bollinger Bounce Volume",
            category: Category::MeanReversion,
            min_bars: 21,
            defaults: bollinger_bounce_defaults,
            compute: bollinger_bounce,
        },
        StrategyDef {
            name: "MFI Bollinger",
            category: Category::MeanReversion,
            min_bars: 20,
            defaults: mfi_bollinger_defaults,
            compute: mfi_bollinger,
        },
    ]
}

fn mean_reversion_rsi_defaults() -> Params {
    Params::new()
        .with("rsi_period", 14)
        .with("rsi_upper", 70)
        .with("rsi_lower", 30)
}

/// Two-sided RSI fade: buy washed-out, sell overheated.
fn mean_reversion_rsi(frame: &mut Frame, params: &Params) -> Result<()> {
    let rsi_period = params.usize_or("rsi_period", 14)?;
    let rsi_upper = params.f64_or("rsi_upper", 70.0)?;
    let rsi_lower = params.f64_or("rsi_lower", 30.0)?;

    let rsi = rsi(frame.close(), rsi_period);
    let buy = lt_value(&rsi, rsi_lower);
    let sell = gt_value(&rsi, rsi_upper);

    frame.set_float("rsi", rsi)?;
    frame.set_bool("Mean_Reversion_RSI_Entry_Buy", buy)?;
    frame.set_bool("Mean_Reversion_RSI_Entry_Sell", sell)
}

fn scalping_bollinger_defaults() -> Params {
    Params::new().with("bb_period", 20).with("bb_std", 2.0)
}

/// Two-sided band fade: buy under the lower band, sell over the upper.
fn scalping_bollinger(frame: &mut Frame, params: &Params) -> Result<()> {
    let bb_period = params.usize_or("bb_period", 20)?;
    let bb_std = params.f64_or("bb_std", 2.0)?;

    let bb = bollinger(frame.close(), bb_period, bb_std);
    let buy = lt(&opt(frame.close()), &bb.lower);
    let sell = gt(&opt(frame.close()), &bb.upper);

    frame.set_float("bb_upper", bb.upper)?;
    frame.set_float("bb_middle", bb.middle)?;
    frame.set_float("bb_lower", bb.lower)?;
    frame.set_bool("Scalping_Bollinger_Bands_Entry_Buy", buy)?;
    frame.set_bool("Scalping_Bollinger_Bands_Entry_Sell", sell)
}

fn macd_rsi_oversold_defaults() -> Params {
    Params::new()
        .with("fast", 12)
        .with("slow", 26)
        .with("signal", 9)
        .with("rsi_period", 14)
        .with("rsi_oversold", 30)
}

/// MACD turning up while RSI is still washed out.
fn macd_rsi_oversold(frame: &mut Frame, params: &Params) -> Result<()> {
    let fast = params.usize_or("fast", 12)?;
    let slow = params.usize_or("slow", 26)?;
    let signal = params.usize_or("signal", 9)?;
    let rsi_period = params.usize_or("rsi_period", 14)?;
    let rsi_oversold = params.f64_or("rsi_oversold", 30.0)?;

    let macd = macd(frame.close(), fast, slow, signal);
    let rsi = rsi(frame.close(), rsi_period);
    let entry = and(
        &cross_above(&macd.line, &macd.signal),
        &lt_value(&rsi, rsi_oversold),
    );

    frame.set_float("macd", macd.line)?;
    frame.set_float("macd_signal", macd.signal)?;
    frame.set_float("rsi", rsi)?;
    frame.set_bool("MACD_RSI_Oversold_Entry_Buy", entry)
}

fn cci_reversion_defaults() -> Params {
    Params::new().with("cci_period", 20).with("cci_oversold", -100)
}

/// CCI climbing back up through its oversold floor.
fn cci_reversion(frame: &mut Frame, params: &Params) -> Result<()> {
    let cci_period = params.usize_or("cci_period", 20)?;
    let cci_oversold = params.f64_or("cci_oversold", -100.0)?;

    let cci = crate::indicators::cci(frame.high(), frame.low(), frame.close(), cci_period);
    let floor = vec![Some(cci_oversold); cci.len()];
    let entry = cross_above(&cci, &floor);

    frame.set_float("cci", cci)?;
    frame.set_bool("CCI_Reversion_Entry_Buy", entry)
}

fn keltner_rsi_oversold_defaults() -> Params {
    Params::new()
        .with("kc_period", 20)
        .with("kc_mult", 2.0)
        .with("atr_period", 10)
        .with("rsi_period", 14)
        .with("rsi_oversold", 30)
}

/// Close pressed under the lower Keltner band with RSI agreeing.
fn keltner_rsi_oversold(frame: &mut Frame, params: &Params) -> Result<()> {
    let kc_period = params.usize_or("kc_period", 20)?;
    let kc_mult = params.f64_or("kc_mult", 2.0)?;
    let atr_period = params.usize_or("atr_period", 10)?;
    let rsi_period = params.usize_or("rsi_period", 14)?;
    let rsi_oversold = params.f64_or("rsi_oversold", 30.0)?;

    let kc = keltner(frame.high(), frame.low(), frame.close(), kc_period, atr_period, kc_mult);
    let rsi = rsi(frame.close(), rsi_period);
    let entry = and(
        &lt(&opt(frame.close()), &kc.lower),
        &lt_value(&rsi, rsi_oversold),
    );

    frame.set_float("kc_upper", kc.upper)?;
    frame.set_float("kc_middle", kc.middle)?;
    frame.set_float("kc_lower", kc.lower)?;
    frame.set_float("rsi", rsi)?;
    frame.set_bool("Keltner_RSI_Oversold_Entry_Buy", entry)
}

fn keltner_mfi_oversold_defaults() -> Params {
    Params::new()
        .with("kc_period", 20)
        .with("kc_mult", 2.0)
        .with("atr_period", 10)
        .with("mfi_period", 14)
        .with("mfi_oversold", 20)
}

/// Close pressed under the lower Keltner band with money flow drained.
fn keltner_mfi_oversold(frame: &mut Frame, params: &Params) -> Result<()> {
    let kc_period = params.usize_or("kc_period", 20)?;
    let kc_mult = params.f64_or("kc_mult", 2.0)?;
    let atr_period = params.usize_or("atr_period", 10)?;
    let mfi_period = params.usize_or("mfi_period", 14)?;
    let mfi_oversold = params.f64_or("mfi_oversold", 20.0)?;

    let kc = keltner(frame.high(), frame.low(), frame.close(), kc_period, atr_period, kc_mult);
    let mfi = mfi(frame.high(), frame.low(), frame.close(), frame.volume(), mfi_period);
    let entry = and(
        &lt(&opt(frame.close()), &kc.lower),
        &lt_value(&mfi, mfi_oversold),
    );

    frame.set_float("kc_upper", kc.upper)?;
    frame.set_float("kc_middle", kc.middle)?;
    frame.set_float("kc_lower", kc.lower)?;
    frame.set_float("mfi", mfi)?;
    frame.set_bool("Keltner_MFI_Oversold_Entry_Buy", entry)
}

fn bollinger_bounce_defaults() -> Params {
    Params::new()
        .with("bb_period", 20)
        .with("bb_std", 2.0)
        .with("volume_multiplier", 1.5)
}

/// Reclaim of the lower band on conviction volume.
fn bollinger_bounce(frame: &mut Frame, params: &Params) -> Result<()> {
    let bb_period = params.usize_or("bb_period", 20)?;
    let bb_std = params.f64_or("bb_std", 2.0)?;
    let multiplier = params.f64_or("volume_multiplier", 1.5)?;

    let bb = bollinger(frame.close(), bb_period, bb_std);
    let below = lt(&opt(frame.close()), &bb.lower);
    let above = gt(&opt(frame.close()), &bb.lower);
    let reclaim: Vec<bool> = (0..below.len())
        .map(|i| i > 0 && below[i - 1] && above[i])
        .collect();
    let spike = volume_spike(frame, multiplier)?;
    let entry = and(&reclaim, &spike);

    frame.set_float("bb_upper", bb.upper)?;
    frame.set_float("bb_middle", bb.middle)?;
    frame.set_float("bb_lower", bb.lower)?;
    frame.set_bool("Bollinger_Bounce_Volume_Entry_Buy", entry)
}

fn mfi_bollinger_defaults() -> Params {
    Params::new()
        .with("mfi_period", 14)
        .with("mfi_oversold", 20)
        .with("bb_period", 20)
        .with("bb_std", 2.0)
}

/// Drained money flow with price under the lower band.
fn mfi_bollinger(frame: &mut Frame, params: &Params) -> Result<()> {
    let mfi_period = params.usize_or("mfi_period", 14)?;
    let mfi_oversold = params.f64_or("mfi_oversold", 20.0)?;
    let bb_period = params.usize_or("bb_period", 20)?;
    let bb_std = params.f64_or("bb_std", 2.0)?;

    let mfi = mfi(frame.high(), frame.low(), frame.close(), frame.volume(), mfi_period);
    let bb = bollinger(frame.close(), bb_period, bb_std);
    let entry = and(
        &lt_value(&mfi, mfi_oversold),
        &lt(&opt(frame.close()), &bb.lower),
    );

    frame.set_float("mfi", mfi)?;
    frame.set_float("bb_upper", bb.upper)?;
    frame.set_float("bb_middle", bb.middle)?;
    frame.set_float("bb_lower", bb.lower)?;
    frame.set_bool("MFI_Bollinger_Entry_Buy", entry)
}
