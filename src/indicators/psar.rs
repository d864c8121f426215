//! Parabolic SAR (stop and reverse)

/// SAR column plus the trend side it is tracking on each bar.
#[derive(Debug, Clone)]
pub struct Psar {
    pub value: Vec<Option<f64>>,
    /// `true` where the SAR sits below price (uptrend)
    pub bullish: Vec<bool>,
}

/// Classic accelerating-factor SAR. The acceleration starts at
/// `initial_af`, grows by `initial_af` on every new extreme and caps at
/// `max_af`. Defined from index 1; the first trend side is seeded by the
/// direction of the first close-to-close move.
pub fn parabolic_sar(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    initial_af: f64,
    max_af: f64,
) -> Psar {
    let n = high.len();
    let mut value = vec![None; n];
    let mut bullish = vec![false; n];
    if n < 2 {
        return Psar { value, bullish };
    }

    let mut rising = close[1] >= close[0];
    let mut sar = if rising { low[0].min(low[1]) } else { high[0].max(high[1]) };
    let mut ep = if rising { high[0].max(high[1]) } else { low[0].min(low[1]) };
    let mut af = initial_af;
    value[1] = Some(sar);
    bullish[1] = rising;

    for i in 2..n {
        let mut next = sar + af * (ep - sar);
        if rising {
            // SAR may never enter the prior two bars' range
            next = next.min(low[i - 1]).min(low[i - 2]);
            if low[i] < next {
                // stop hit: reverse to a downtrend
                rising = false;
                sar = ep;
                ep = low[i];
                af = initial_af;
            } else {
                sar = next;
                if high[i] > ep {
                    ep = high[i];
                    af = (af + initial_af).min(max_af);
                }
            }
        } else {
            next = next.max(high[i - 1]).max(high[i - 2]);
            if high[i] > next {
                rising = true;
                sar = ep;
                ep = high[i];
                af = initial_af;
            } else {
                sar = next;
                if low[i] < ep {
                    ep = low[i];
                    af = (af + initial_af).min(max_af);
                }
            }
        }
        value[i] = Some(sar);
        bullish[i] = rising;
    }

    Psar { value, bullish }
}
