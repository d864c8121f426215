//! Oscillator strategies: timing entries off bounded momentum gauges

use crate::data::Frame;
use crate::indicators::{
    and, awesome_oscillator, bollinger, bullish_divergence, cci, cmo, cross_above, ema_opt, gt,
    gt_value, heikin_ashi, macd, opt, parabolic_sar, rising, rolling_max, rsi, shift, tsi,
};
use crate::strategy::{Category, Params, StrategyDef};
use crate::Result;

pub(super) fn defs() -> Vec<StrategyDef> {
    vec![
        StrategyDef {
            name: "PSAR RSI",
            category: Category::Oscillator,
            min_bars: 15,
            defaults: psar_rsi_defaults,
            compute: psar_rsi,
        },
        StrategyDef {
            name: "RSI EMA Crossover",
            category: Category::Oscillator,
            min_bars: 25,
            defaults: rsi_ema_crossover_defaults,
            compute: rsi_ema_crossover,
        },
        StrategyDef {
            name: "CCI Bollinger",
            category: Category::Oscillator,
            min_bars: 21,
            defaults: cci_bollinger_defaults,
            compute: cci_bollinger,
        },
        StrategyDef {
            name: "TSI Resistance Break",
            category: Category::Oscillator,
            min_bars: 39,
            defaults: tsi_resistance_defaults,
            compute: tsi_resistance_break,
        },
        StrategyDef {
            name: "Awesome Oscillator Divergence MACD",
            category: Category::Oscillator,
            min_bars: 48,
            defaults: ao_divergence_defaults,
            compute: ao_divergence_macd,
        },
        StrategyDef {
            name: "Heikin Ashi CMO",
            category: Category::Oscillator,
            min_bars: 16,
            defaults: heikin_ashi_cmo_defaults,
            compute: heikin_ashi_cmo,
        },
    ]
}

fn psar_rsi_defaults() -> Params {
    Params::new()
        .with("initial_af", 0.02)
        .with("max_af", 0.2)
        .with("rsi_period", 14)
        .with("rsi_level", 50)
}

/// SAR flipping under price on this bar, with momentum already positive.
fn psar_rsi(frame: &mut Frame, params: &Params) -> Result<()> {
    let initial_af = params.f64_or("initial_af", 0.02)?;
    let max_af = params.f64_or("max_af", 0.2)?;
    let rsi_period = params.usize_or("rsi_period", 14)?;
    let rsi_level = params.f64_or("rsi_level", 50.0)?;

    let sar = parabolic_sar(frame.high(), frame.low(), frame.close(), initial_af, max_af);
    let flip: Vec<bool> = (0..sar.bullish.len())
        .map(|i| i > 0 && sar.bullish[i] && !sar.bullish[i - 1])
        .collect();
    let rsi = rsi(frame.close(), rsi_period);
    let entry = and(&flip, &gt_value(&rsi, rsi_level));

    frame.set_float("psar", sar.value)?;
    frame.set_float("rsi", rsi)?;
    frame.set_bool("PSAR_RSI_Entry_Buy", entry)
}

fn rsi_ema_crossover_defaults() -> Params {
    Params::new().with("rsi_period", 14).with("rsi_ema_period", 9)
}

/// RSI crossing its own smoothing line from below.
fn rsi_ema_crossover(frame: &mut Frame, params: &Params) -> Result<()> {
    let rsi_period = params.usize_or("rsi_period", 14)?;
    let rsi_ema_period = params.usize_or("rsi_ema_period", 9)?;

    let rsi = rsi(frame.close(), rsi_period);
    let rsi_ema = ema_opt(&rsi, rsi_ema_period);
    let entry = cross_above(&rsi, &rsi_ema);

    frame.set_float("rsi", rsi)?;
    frame.set_float("rsi_ema", rsi_ema)?;
    frame.set_bool("RSI_EMA_Crossover_Entry_Buy", entry)
}

fn cci_bollinger_defaults() -> Params {
    Params::new()
        .with("cci_period", 20)
        .with("cci_level", 100)
        .with("bb_period", 20)
        .with("bb_std", 2.0)
}

/// CCI bursting through its trigger with price above the band midline.
fn cci_bollinger(frame: &mut Frame, params: &Params) -> Result<()> {
    let cci_period = params.usize_or("cci_period", 20)?;
    let cci_level = params.f64_or("cci_level", 100.0)?;
    let bb_period = params.usize_or("bb_period", 20)?;
    let bb_std = params.f64_or("bb_std", 2.0)?;

    let cci = cci(frame.high(), frame.low(), frame.close(), cci_period);
    let bb = bollinger(frame.close(), bb_period, bb_std);
    let trigger = vec![Some(cci_level); cci.len()];
    let entry = and(
        &cross_above(&cci, &trigger),
        &gt(&opt(frame.close()), &bb.middle),
    );

    frame.set_float("cci", cci)?;
    frame.set_float("bb_upper", bb.upper)?;
    frame.set_float("bb_middle", bb.middle)?;
    frame.set_float("bb_lower", bb.lower)?;
    frame.set_bool("CCI_Bollinger_Entry_Buy", entry)
}

fn tsi_resistance_defaults() -> Params {
    Params::new()
        .with("tsi_long", 25)
        .with("tsi_short", 13)
        .with("resistance_lookback", 20)
}

/// Break of the prior high while TSI confirms positive momentum.
fn tsi_resistance_break(frame: &mut Frame, params: &Params) -> Result<()> {
    let tsi_long = params.usize_or("tsi_long", 25)?;
    let tsi_short = params.usize_or("tsi_short", 13)?;
    let lookback = params.usize_or("resistance_lookback", 20)?;

    let tsi = tsi(frame.close(), tsi_long, tsi_short);
    let resistance = shift(&rolling_max(frame.high(), lookback), 1);
    let entry = and(
        &gt_value(&tsi, 0.0),
        &cross_above(&opt(frame.close()), &resistance),
    );

    frame.set_float("tsi", tsi)?;
    frame.set_float("resistance", resistance)?;
    frame.set_bool("TSI_Resistance_Break_Entry_Buy", entry)
}

fn ao_divergence_defaults() -> Params {
    Params::new()
        .with("ao_fast", 5)
        .with("ao_slow", 34)
        .with("div_lookback", 14)
        .with("fast", 12)
        .with("slow", 26)
        .with("signal", 9)
}

/// Bullish AO divergence with the MACD histogram already turning.
fn ao_divergence_macd(frame: &mut Frame, params: &Params) -> Result<()> {
    let ao_fast = params.usize_or("ao_fast", 5)?;
    let ao_slow = params.usize_or("ao_slow", 34)?;
    let div_lookback = params.usize_or("div_lookback", 14)?;
    let fast = params.usize_or("fast", 12)?;
    let slow = params.usize_or("slow", 26)?;
    let signal = params.usize_or("signal", 9)?;

    let ao = awesome_oscillator(frame.high(), frame.low(), ao_fast, ao_slow);
    let macd = macd(frame.close(), fast, slow, signal);
    let divergence = bullish_divergence(frame.low(), &ao, div_lookback);
    let entry = and(&divergence, &rising(&macd.histogram));

    frame.set_float("ao", ao)?;
    frame.set_float("macd_hist", macd.histogram)?;
    frame.set_bool("Awesome_Oscillator_Divergence_MACD_Entry_Buy", entry)
}

fn heikin_ashi_cmo_defaults() -> Params {
    Params::new().with("cmo_period", 14).with("cmo_level", 0)
}

/// Two bullish Heikin-Ashi bars with Chande momentum above its floor.
fn heikin_ashi_cmo(frame: &mut Frame, params: &Params) -> Result<()> {
    let cmo_period = params.usize_or("cmo_period", 14)?;
    let cmo_level = params.f64_or("cmo_level", 0.0)?;

    let ha = heikin_ashi(frame.candles());
    let bullish = gt(&ha.close, &ha.open);
    let two_in_a_row: Vec<bool> = (0..bullish.len())
        .map(|i| i > 0 && bullish[i] && bullish[i - 1])
        .collect();
    let cmo = cmo(frame.close(), cmo_period);
    let entry = and(&two_in_a_row, &gt_value(&cmo, cmo_level));

    frame.set_float("ha_open", ha.open)?;
    frame.set_float("ha_close", ha.close)?;
    frame.set_float("cmo", cmo)?;
    frame.set_bool("Heikin_Ashi_CMO_Entry_Buy", entry)
}
