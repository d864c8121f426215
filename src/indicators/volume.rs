//! Volume flow indicators: OBV, MFI, CMF

/// On-balance volume: cumulative volume signed by the close-to-close
/// direction. The first bar contributes its volume with a positive sign.
pub fn obv(close: &[f64], volume: &[f64]) -> Vec<Option<f64>> {
    let mut acc = 0.0;
    (0..close.len())
        .map(|i| {
            if i == 0 {
                acc = volume[0];
            } else if close[i] > close[i - 1] {
                acc += volume[i];
            } else if close[i] < close[i - 1] {
                acc -= volume[i];
            }
            Some(acc)
        })
        .collect()
}

/// Money flow index over `period`; defined from index `period`.
/// Sentinels: zero negative flow reads 100, a window with no flow at all
/// reads 50 (neutral).
pub fn mfi(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    volume: &[f64],
    period: usize,
) -> Vec<Option<f64>> {
    let n = high.len();
    let typical: Vec<f64> = (0..n).map(|i| (high[i] + low[i] + close[i]) / 3.0).collect();
    let mut out = vec![None; n];
    if period == 0 || n == 0 {
        return out;
    }
    for i in period..n {
        let mut positive = 0.0;
        let mut negative = 0.0;
        for j in (i + 1 - period)..=i {
            let flow = typical[j] * volume[j];
            if typical[j] > typical[j - 1] {
                positive += flow;
            } else if typical[j] < typical[j - 1] {
                negative += flow;
            }
        }
        out[i] = Some(if negative == 0.0 && positive == 0.0 {
            50.0
        } else if negative == 0.0 {
            100.0
        } else {
            100.0 - 100.0 / (1.0 + positive / negative)
        });
    }
    out
}

/// Chaikin money flow over `period`; defined from index `period − 1`.
/// Values lie in [−1, 1]. A zero-range bar contributes no flow; a window
/// with zero total volume reads 0.
pub fn cmf(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    volume: &[f64],
    period: usize,
) -> Vec<Option<f64>> {
    let n = high.len();
    let mfv: Vec<f64> = (0..n)
        .map(|i| {
            let range = high[i] - low[i];
            if range == 0.0 {
                0.0
            } else {
                ((close[i] - low[i]) - (high[i] - close[i])) / range * volume[i]
            }
        })
        .collect();
    let mut out = vec![None; n];
    if period == 0 || period > n {
        return out;
    }
    for i in (period - 1)..n {
        let window = (i + 1 - period)..=i;
        let flow: f64 = mfv[window.clone()].iter().sum();
        let vol: f64 = volume[window].iter().sum();
        out[i] = Some(if vol == 0.0 { 0.0 } else { flow / vol });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obv_signs_volume_by_direction() {
        let close = [10.0, 11.0, 10.5, 10.5, 12.0];
        let volume = [100.0, 200.0, 50.0, 80.0, 10.0];
        let out = obv(&close, &volume);
        assert_eq!(out[0], Some(100.0));
        assert_eq!(out[1], Some(300.0));
        assert_eq!(out[2], Some(250.0));
        assert_eq!(out[3], Some(250.0)); // unchanged close: no contribution
        assert_eq!(out[4], Some(260.0));
    }

    #[test]
    fn test_mfi_bounds_and_sentinels() {
        let n = 30;
        // strictly rising typical prices: all flow positive ⇒ 100
        let high: Vec<f64> = (0..n).map(|i| 101.0 + i as f64).collect();
        let low: Vec<f64> = (0..n).map(|i| 99.0 + i as f64).collect();
        let close: Vec<f64> = (0..n).map(|i| 100.0 + i as f64).collect();
        let volume = vec![1000.0; n];
        let out = mfi(&high, &low, &close, &volume, 14);
        assert!(out[..14].iter().all(|v| v.is_none()));
        assert!(out[14..].iter().all(|v| v == &Some(100.0)));

        // flat typical prices ⇒ no flow either way ⇒ neutral 50
        let flat = vec![100.0; n];
        let out = mfi(&flat, &flat, &flat, &volume, 14);
        assert!(out[14..].iter().all(|v| v == &Some(50.0)));
    }

    #[test]
    fn test_mfi_stays_in_bounds() {
        let n = 40;
        let close: Vec<f64> = (0..n).map(|i| 100.0 + (i as f64 * 0.8).sin() * 4.0).collect();
        let high: Vec<f64> = close.iter().map(|c| c + 1.0).collect();
        let low: Vec<f64> = close.iter().map(|c| c - 1.0).collect();
        let volume: Vec<f64> = (0..n).map(|i| 1000.0 + (i % 7) as f64 * 100.0).collect();
        for v in mfi(&high, &low, &close, &volume, 14).into_iter().flatten() {
            assert!((0.0..=100.0).contains(&v));
        }
    }

    #[test]
    fn test_cmf_sign_follows_close_position() {
        let n = 25;
        // closes pinned to the high: full accumulation ⇒ +1
        let high = vec![102.0; n];
        let low = vec![98.0; n];
        let close = vec![102.0; n];
        let volume = vec![500.0; n];
        let out = cmf(&high, &low, &close, &volume, 20);
        assert!(out[..19].iter().all(|v| v.is_none()));
        assert!(out[19..].iter().all(|v| (v.unwrap() - 1.0).abs() < 1e-12));

        // closes pinned to the low ⇒ −1
        let close = vec![98.0; n];
        let out = cmf(&high, &low, &close, &volume, 20);
        assert!(out[19..].iter().all(|v| (v.unwrap() + 1.0).abs() < 1e-12));
    }

    #[test]
    fn test_cmf_zero_range_and_zero_volume_read_zero() {
        let n = 25;
        let flat = vec![100.0; n];
        let volume = vec![0.0; n];
        let out = cmf(&flat, &flat, &flat, &volume, 20);
        assert!(out[19..].iter().all(|v| v == &Some(0.0)));
    }
}
