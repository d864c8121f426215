//! Trend-following strategies: ride strength that is already established

use crate::data::Frame;
use crate::indicators::{
    adx, all_of, and, close_lag, cross_above, ema, gt, gt_value, heikin_ashi, ichimoku,
    lt_value, opt, parabolic_sar, rsi, supertrend,
};
use crate::strategy::{Category, Params, StrategyDef};
use crate::Result;

pub(super) fn defs() -> Vec<StrategyDef> {
    vec![
        StrategyDef {
            name: "Trend Following (EMA/ADX)",
            category: Category::TrendFollowing,
            min_bars: 29,
            defaults: trend_following_defaults,
            compute: trend_following,
        },
        StrategyDef {
            name: "Golden Cross RSI",
            category: Category::TrendFollowing,
            min_bars: 201,
            defaults: golden_cross_rsi_defaults,
            compute: golden_cross_rsi,
        },
        StrategyDef {
            name: "SuperTrend RSI Pullback",
            category: Category::TrendFollowing,
            min_bars: 15,
            defaults: supertrend_rsi_pullback_defaults,
            compute: supertrend_rsi_pullback,
        },
        StrategyDef {
            name: "ADX Heikin Ashi",
            category: Category::TrendFollowing,
            min_bars: 29,
            defaults: adx_heikin_ashi_defaults,
            compute: adx_heikin_ashi,
        },
        StrategyDef {
            name: "Ichimoku Basic Combo",
            category: Category::TrendFollowing,
            min_bars: 78,
            defaults: ichimoku_defaults,
            compute: ichimoku_basic_combo,
        },
        StrategyDef {
            name: "Ichimoku Multi-Line",
            category: Category::TrendFollowing,
            min_bars: 78,
            defaults: ichimoku_defaults,
            compute: ichimoku_multi_line,
        },
        StrategyDef {
            name: "EMA SAR",
            category: Category::TrendFollowing,
            min_bars: 21,
            defaults: ema_sar_defaults,
            compute: ema_sar,
        },
    ]
}

fn trend_following_defaults() -> Params {
    Params::new()
        .with("ema_short", 9)
        .with("ema_long", 21)
        .with("adx_period", 14)
        .with("adx_threshold", 25)
}

/// Fast EMA over slow EMA while ADX confirms the trend has teeth.
fn trend_following(frame: &mut Frame, params: &Params) -> Result<()> {
    let ema_short = params.usize_or("ema_short", 9)?;
    let ema_long = params.usize_or("ema_long", 21)?;
    let adx_period = params.usize_or("adx_period", 14)?;
    let adx_threshold = params.f64_or("adx_threshold", 25.0)?;

    let short = ema(frame.close(), ema_short);
    let long = ema(frame.close(), ema_long);
    let adx = adx(frame.high(), frame.low(), frame.close(), adx_period);
    let entry = and(&gt(&short, &long), &gt_value(&adx.adx, adx_threshold));

    frame.set_float("ema_short", short)?;
    frame.set_float("ema_long", long)?;
    frame.set_float("adx", adx.adx)?;
    frame.set_bool("Trend_Following_EMA_ADX_Entry", entry)
}

fn golden_cross_rsi_defaults() -> Params {
    Params::new()
        .with("short_ema", 50)
        .with("long_ema", 200)
        .with("rsi_period", 14)
        .with("rsi_level", 50)
}

/// The classic 50/200 golden cross, taken only with momentum onside.
fn golden_cross_rsi(frame: &mut Frame, params: &Params) -> Result<()> {
    let short_ema = params.usize_or("short_ema", 50)?;
    let long_ema = params.usize_or("long_ema", 200)?;
    let rsi_period = params.usize_or("rsi_period", 14)?;
    let rsi_level = params.f64_or("rsi_level", 50.0)?;

    let short = ema(frame.close(), short_ema);
    let long = ema(frame.close(), long_ema);
    let rsi = rsi(frame.close(), rsi_period);
    let entry = and(&cross_above(&short, &long), &gt_value(&rsi, rsi_level));

    frame.set_float("ema_short", short)?;
    frame.set_float("ema_long", long)?;
    frame.set_float("rsi", rsi)?;
    frame.set_bool("Golden_Cross_RSI_Entry_Buy", entry)
}

fn supertrend_rsi_pullback_defaults() -> Params {
    Params::new()
        .with("atr_length", 10)
        .with("factor", 3.0)
        .with("rsi_period", 14)
        .with("rsi_pullback", 45)
}

/// A dip inside a SuperTrend uptrend: direction up, RSI pulled back.
fn supertrend_rsi_pullback(frame: &mut Frame, params: &Params) -> Result<()> {
    let atr_length = params.usize_or("atr_length", 10)?;
    let factor = params.f64_or("factor", 3.0)?;
    let rsi_period = params.usize_or("rsi_period", 14)?;
    let rsi_pullback = params.f64_or("rsi_pullback", 45.0)?;

    let st = supertrend(frame.high(), frame.low(), frame.close(), atr_length, factor);
    let rsi = rsi(frame.close(), rsi_period);
    let entry = and(&st.bullish, &lt_value(&rsi, rsi_pullback));

    frame.set_float("supertrend", st.line)?;
    frame.set_bool("supertrend_bullish", st.bullish)?;
    frame.set_float("rsi", rsi)?;
    frame.set_bool("SuperTrend_RSI_Pullback_Entry_Buy", entry)
}

fn adx_heikin_ashi_defaults() -> Params {
    Params::new().with("adx_period", 14).with("adx_level", 25)
}

/// Two bullish Heikin-Ashi bars in a row inside a strong trend.
fn adx_heikin_ashi(frame: &mut Frame, params: &Params) -> Result<()> {
    let adx_period = params.usize_or("adx_period", 14)?;
    let adx_level = params.f64_or("adx_level", 25.0)?;

    let adx = adx(frame.high(), frame.low(), frame.close(), adx_period);
    let ha = heikin_ashi(frame.candles());
    let bullish = gt(&ha.close, &ha.open);
    let two_in_a_row: Vec<bool> = (0..bullish.len())
        .map(|i| i > 0 && bullish[i] && bullish[i - 1])
        .collect();
    let entry = and(&gt_value(&adx.adx, adx_level), &two_in_a_row);

    frame.set_float("adx", adx.adx)?;
    frame.set_float("ha_open", ha.open)?;
    frame.set_float("ha_close", ha.close)?;
    frame.set_bool("ADX_Heikin_Ashi_Entry_Buy", entry)
}

fn ichimoku_defaults() -> Params {
    Params::new()
        .with("conversion", 9)
        .with("base", 26)
        .with("span_b", 52)
}

fn ichimoku_columns(frame: &mut Frame, params: &Params) -> Result<crate::indicators::Ichimoku> {
    let conversion = params.usize_or("conversion", 9)?;
    let base = params.usize_or("base", 26)?;
    let span_b = params.usize_or("span_b", 52)?;

    let ich = ichimoku(frame.high(), frame.low(), conversion, base, span_b);
    frame.set_float("tenkan", ich.tenkan.clone())?;
    frame.set_float("kijun", ich.kijun.clone())?;
    frame.set_float("senkou_a", ich.senkou_a.clone())?;
    frame.set_float("senkou_b", ich.senkou_b.clone())?;
    Ok(ich)
}

fn cloud_top(ich: &crate::indicators::Ichimoku) -> Vec<Option<f64>> {
    ich.senkou_a
        .iter()
        .zip(ich.senkou_b.iter())
        .map(|(a, b)| match (a, b) {
            (Some(a), Some(b)) => Some(a.max(*b)),
            _ => None,
        })
        .collect()
}

/// Price above the cloud with the conversion line leading.
fn ichimoku_basic_combo(frame: &mut Frame, params: &Params) -> Result<()> {
    let ich = ichimoku_columns(frame, params)?;
    let entry = and(
        &gt(&opt(frame.close()), &cloud_top(&ich)),
        &gt(&ich.tenkan, &ich.kijun),
    );
    frame.set_bool("Ichimoku_Basic_Combo_Entry_Buy", entry)
}

/// The basic combo plus a bullish cloud and the lagging-span check.
fn ichimoku_multi_line(frame: &mut Frame, params: &Params) -> Result<()> {
    let base = params.usize_or("base", 26)?;
    let ich = ichimoku_columns(frame, params)?;

    let above_cloud = gt(&opt(frame.close()), &cloud_top(&ich));
    let conversion_lead = gt(&ich.tenkan, &ich.kijun);
    let bullish_cloud = gt(&ich.senkou_a, &ich.senkou_b);
    // chikou confirmation read forward: close above its own level
    // `base` bars back
    let chikou = gt(&opt(frame.close()), &close_lag(frame.close(), base));
    let entry = all_of(&[&above_cloud, &conversion_lead, &bullish_cloud, &chikou]);

    frame.set_bool("Ichimoku_Multi_Line_Entry_Buy", entry)
}

fn ema_sar_defaults() -> Params {
    Params::new()
        .with("ema_period", 20)
        .with("initial_af", 0.02)
        .with("max_af", 0.2)
}

/// Close above its EMA while the parabolic SAR sits under price.
fn ema_sar(frame: &mut Frame, params: &Params) -> Result<()> {
    let ema_period = params.usize_or("ema_period", 20)?;
    let initial_af = params.f64_or("initial_af", 0.02)?;
    let max_af = params.f64_or("max_af", 0.2)?;

    let ema = ema(frame.close(), ema_period);
    let sar = parabolic_sar(frame.high(), frame.low(), frame.close(), initial_af, max_af);
    let entry = and(&gt(&opt(frame.close()), &ema), &sar.bullish);

    frame.set_float("ema", ema)?;
    frame.set_float("psar", sar.value)?;
    frame.set_bool("EMA_SAR_Entry_Buy", entry)
}
