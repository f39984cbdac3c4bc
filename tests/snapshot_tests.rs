use token_pulse::model::candle::{Candle, CandleSeries};
use token_pulse::snapshot::{compute_snapshot, TrendSignal};

fn candle(i: i64, close: f64, volume: f64) -> Candle {
    Candle {
        open: close,
        high: close * 1.01,
        low: close * 0.99,
        close,
        volume,
        unix_time: i * 3_600,
    }
}

fn series_from_closes(closes: &[f64]) -> CandleSeries {
    let candles = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| candle(i as i64, c, 10.0))
        .collect();
    CandleSeries::try_from_candles(candles).unwrap()
}

#[test]
fn full_length_series_populates_every_indicator() {
    let closes: Vec<f64> = (0..72)
        .map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0)
        .collect();
    let series = series_from_closes(&closes);

    let snap = compute_snapshot("SOL", "addr", &series).unwrap();
    assert_eq!(snap.token_symbol, "SOL");
    assert_eq!(snap.data_points, 72);
    assert!(snap.rsi.is_some());
    assert!(snap.ma20.is_some());
    assert!(snap.ma50.is_some());
    assert!(snap.adx.is_some());
    assert!(snap.macd_value.is_some());
    assert!(snap.stochastic_k.is_some());
    assert!(snap.stochastic_d.is_some());
    assert!((snap.current_price - *closes.last().unwrap()).abs() < 1e-6);
    assert_eq!(snap.data_start.unwrap().timestamp(), 0);
    assert_eq!(snap.data_end.unwrap().timestamp(), 71 * 3_600);
}

#[test]
/// Flat prices: equal MAs give a neutral cross, the MACD histogram is zero,
/// and the no-momentum indicators read null instead of erroring.
fn flat_series_is_neutral_with_zero_histogram() {
    let series = series_from_closes(&[250.0; 60]);

    let snap = compute_snapshot("USDC", "addr", &series).unwrap();
    assert_eq!(snap.ma_cross, TrendSignal::Neutral);
    assert_eq!(snap.macd, TrendSignal::Neutral);
    assert!(snap.macd_histogram.unwrap().abs() < 1e-9);
    assert_eq!(snap.rsi, None);
    assert!((snap.volume_ratio - 1.0).abs() < f64::EPSILON);
    assert!((snap.ma20.unwrap() - snap.ma50.unwrap()).abs() < 1e-9);
}

#[test]
/// A series shorter than the longest window produces a partial snapshot,
/// never a failure.
fn short_series_yields_partial_snapshot() {
    // 25 candles: enough for RSI(14) and MA20, short of MA50 and of the
    // 27 bars ADX needs for its two stacked windows.
    let closes: Vec<f64> = (0..25).map(|i| 10.0 + i as f64).collect();
    let series = series_from_closes(&closes);

    let snap = compute_snapshot("WIF", "addr", &series).unwrap();
    assert!(snap.rsi.is_some());
    assert!(snap.ma20.is_some());
    assert_eq!(snap.ma50, None);
    assert_eq!(snap.adx, None);
    // Slow MA missing means the cross cannot be judged.
    assert_eq!(snap.ma_cross, TrendSignal::Neutral);
}

#[test]
fn uptrend_reads_bullish() {
    let closes: Vec<f64> = (0..72).map(|i| 100.0 + 2.0 * i as f64).collect();
    let series = series_from_closes(&closes);

    let snap = compute_snapshot("JUP", "addr", &series).unwrap();
    assert_eq!(snap.ma_cross, TrendSignal::Bull);
    assert_eq!(snap.macd, TrendSignal::Bull);
    assert!((snap.rsi.unwrap() - 100.0).abs() < 1e-9);
}

#[test]
fn rounding_matches_presentation_scale() {
    let closes: Vec<f64> = (0..72)
        .map(|i| 1.23456789 + (i as f64 * 0.21).sin() * 0.1)
        .collect();
    let series = series_from_closes(&closes);

    let snap = compute_snapshot("BONK", "addr", &series).unwrap();
    let rsi = snap.rsi.unwrap();
    assert!((rsi * 10.0 - (rsi * 10.0).round()).abs() < 1e-9, "rsi 1dp");
    let ma20 = snap.ma20.unwrap();
    assert!(
        (ma20 * 1e4 - (ma20 * 1e4).round()).abs() < 1e-6,
        "ma20 4dp"
    );
}
