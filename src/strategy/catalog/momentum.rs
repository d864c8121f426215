//! Momentum strategies: entries that chase confirmed strength

use crate::data::Frame;
use crate::indicators::{
    adx, and, cross_above, ema_opt, gt_value, macd, mfi, obv, rising, rsi, trix, vortex,
};
use crate::strategy::{Category, Params, StrategyDef};
use crate::Result;

use super::volume_spike;

pub(super) fn defs() -> Vec<StrategyDef> {
    vec![
        StrategyDef {
            name: "Momentum Trading",
            category: Category::Momentum,
            min_bars: 20,
            defaults: momentum_trading_defaults,
            compute: momentum_trading,
        },
        StrategyDef {
            name: "MACD Bullish ADX",
            category: Category::Momentum,
            min_bars: 35,
            defaults: macd_bullish_adx_defaults,
            compute: macd_bullish_adx,
        },
        StrategyDef {
            name: "ADX Rising MFI Surge",
            category: Category::Momentum,
            min_bars: 29,
            defaults: adx_rising_mfi_surge_defaults,
            compute: adx_rising_mfi_surge,
        },
        StrategyDef {
            name: "TRIX OBV",
            category: Category::Momentum,
            min_bars: 25,
            defaults: trix_obv_defaults,
            compute: trix_obv,
        },
        StrategyDef {
            name: "Vortex ADX",
            category: Category::Momentum,
            min_bars: 29,
            defaults: vortex_adx_defaults,
            compute: vortex_adx,
        },
    ]
}

fn momentum_trading_defaults() -> Params {
    Params::new()
        .with("rsi_period", 14)
        .with("volume_multiplier", 2.0)
        .with("rsi_level", 70)
}

/// RSI above its overbought level while volume runs hot.
fn momentum_trading(frame: &mut Frame, params: &Params) -> Result<()> {
    let rsi_period = params.usize_or("rsi_period", 14)?;
    let multiplier = params.f64_or("volume_multiplier", 2.0)?;
    let rsi_level = params.f64_or("rsi_level", 70.0)?;

    let rsi = rsi(frame.close(), rsi_period);
    let spike = volume_spike(frame, multiplier)?;
    let entry = and(&gt_value(&rsi, rsi_level), &spike);

    frame.set_float("rsi", rsi)?;
    frame.set_bool("Momentum_Trading_Entry", entry)
}

fn macd_bullish_adx_defaults() -> Params {
    Params::new()
        .with("fast", 12)
        .with("slow", 26)
        .with("signal", 9)
        .with("adx_period", 14)
        .with("adx_level", 25)
}

/// MACD bullish cross filtered by trend strength.
fn macd_bullish_adx(frame: &mut Frame, params: &Params) -> Result<()> {
    let fast = params.usize_or("fast", 12)?;
    let slow = params.usize_or("slow", 26)?;
    let signal = params.usize_or("signal", 9)?;
    let adx_period = params.usize_or("adx_period", 14)?;
    let adx_level = params.f64_or("adx_level", 25.0)?;

    let macd = macd(frame.close(), fast, slow, signal);
    let adx = adx(frame.high(), frame.low(), frame.close(), adx_period);
    let entry = and(
        &cross_above(&macd.line, &macd.signal),
        &gt_value(&adx.adx, adx_level),
    );

    frame.set_float("macd", macd.line)?;
    frame.set_float("macd_signal", macd.signal)?;
    frame.set_float("adx", adx.adx)?;
    frame.set_bool("MACD_Bullish_ADX_Entry_Buy", entry)
}

fn adx_rising_mfi_surge_defaults() -> Params {
    Params::new()
        .with("adx_period", 14)
        .with("mfi_period", 14)
        .with("mfi_level", 60)
}

/// Strengthening trend with money flow pushing in.
fn adx_rising_mfi_surge(frame: &mut Frame, params: &Params) -> Result<()> {
    let adx_period = params.usize_or("adx_period", 14)?;
    let mfi_period = params.usize_or("mfi_period", 14)?;
    let mfi_level = params.f64_or("mfi_level", 60.0)?;

    let adx = adx(frame.high(), frame.low(), frame.close(), adx_period);
    let mfi = mfi(frame.high(), frame.low(), frame.close(), frame.volume(), mfi_period);
    let entry = and(&rising(&adx.adx), &gt_value(&mfi, mfi_level));

    frame.set_float("adx", adx.adx)?;
    frame.set_float("mfi", mfi)?;
    frame.set_bool("ADX_Rising_MFI_Surge_Entry_Buy", entry)
}

fn trix_obv_defaults() -> Params {
    Params::new().with("trix_period", 15).with("trix_signal", 9)
}

/// TRIX turning up through its signal line with OBV confirming.
fn trix_obv(frame: &mut Frame, params: &Params) -> Result<()> {
    let trix_period = params.usize_or("trix_period", 15)?;
    let trix_signal = params.usize_or("trix_signal", 9)?;

    let trix = trix(frame.close(), trix_period);
    let signal = ema_opt(&trix, trix_signal);
    let obv = obv(frame.close(), frame.volume());
    let entry = and(&cross_above(&trix, &signal), &rising(&obv));

    frame.set_float("trix", trix)?;
    frame.set_float("trix_signal", signal)?;
    frame.set_float("obv", obv)?;
    frame.set_bool("TRIX_OBV_Entry_Buy", entry)
}

fn vortex_adx_defaults() -> Params {
    Params::new()
        .with("vortex_period", 14)
        .with("adx_period", 14)
        .with("adx_trend_level", 25)
}

/// VI+ overtaking VI− inside an established trend.
fn vortex_adx(frame: &mut Frame, params: &Params) -> Result<()> {
    let vortex_period = params.usize_or("vortex_period", 14)?;
    let adx_period = params.usize_or("adx_period", 14)?;
    let adx_trend_level = params.f64_or("adx_trend_level", 25.0)?;

    let vi = vortex(frame.high(), frame.low(), frame.close(), vortex_period);
    let adx = adx(frame.high(), frame.low(), frame.close(), adx_period);
    let entry = and(
        &cross_above(&vi.plus, &vi.minus),
        &gt_value(&adx.adx, adx_trend_level),
    );

    frame.set_float("vi_plus", vi.plus)?;
    frame.set_float("vi_minus", vi.minus)?;
    frame.set_float("adx", adx.adx)?;
    frame.set_bool("Vortex_ADX_Entry_Buy", entry)
}
