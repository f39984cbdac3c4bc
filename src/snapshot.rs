//! Per-token indicator snapshot: the record a refresh run computes and caches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::indicator::adx::Adx;
use crate::indicator::macd::Macd;
use crate::indicator::rolling::Sma;
use crate::indicator::rsi::Rsi;
use crate::indicator::stochastic::Stochastic;
use crate::model::candle::CandleSeries;

pub const RSI_PERIOD: usize = 14;
pub const MA_FAST_PERIOD: usize = 20;
pub const MA_SLOW_PERIOD: usize = 50;
pub const VOLUME_WINDOW: usize = 24;
pub const ADX_PERIOD: usize = 14;
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;
pub const STOCH_PERIOD: usize = 14;
pub const STOCH_SMOOTH: usize = 3;

/// Series length below which some indicators come back null.
pub const RELIABLE_SERIES_LEN: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendSignal {
    Bull,
    Bear,
    Neutral,
}

impl TrendSignal {
    fn from_cross(fast: Option<f64>, slow: Option<f64>) -> Self {
        match (fast, slow) {
            (Some(f), Some(s)) if f > s => TrendSignal::Bull,
            (Some(f), Some(s)) if f < s => TrendSignal::Bear,
            _ => TrendSignal::Neutral,
        }
    }
}

/// All six indicators for one token, plus series metadata. Immutable once
/// computed; the next refresh supersedes it wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub token_symbol: String,
    pub token_address: String,
    pub rsi: Option<f64>,
    pub ma_cross: TrendSignal,
    pub ma20: Option<f64>,
    pub ma50: Option<f64>,
    pub volume_ratio: f64,
    pub adx: Option<f64>,
    pub macd: TrendSignal,
    pub macd_value: Option<f64>,
    pub macd_signal_value: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub stochastic_k: Option<f64>,
    pub stochastic_d: Option<f64>,
    pub stochastic_signal: TrendSignal,
    pub current_price: f64,
    pub volume_24h: f64,
    pub data_points: usize,
    pub data_start: Option<DateTime<Utc>>,
    pub data_end: Option<DateTime<Utc>>,
    pub computed_at: DateTime<Utc>,
}

/// Compute a snapshot from an hourly candle series. Window-based statistics use
/// trailing windows ending at the last candle; insufficient history shows up as
/// null fields rather than an error. An empty series is a `Computation` error
/// only because the fetcher's own validation should have rejected it already.
pub fn compute_snapshot(
    symbol: &str,
    address: &str,
    series: &CandleSeries,
) -> Result<IndicatorSnapshot, AppError> {
    let latest = series
        .last()
        .ok_or_else(|| AppError::Computation(format!("empty candle series for {}", symbol)))?
        .clone();

    if series.len() < RELIABLE_SERIES_LEN {
        tracing::warn!(
            symbol,
            data_points = series.len(),
            "short candle series, indicators may be partial"
        );
    }

    let mut rsi = Rsi::new(RSI_PERIOD);
    let mut ma_fast = Sma::new(MA_FAST_PERIOD);
    let mut ma_slow = Sma::new(MA_SLOW_PERIOD);
    let mut macd = Macd::new(MACD_FAST, MACD_SLOW, MACD_SIGNAL);
    let mut stochastic = Stochastic::new(STOCH_PERIOD, STOCH_SMOOTH);
    let mut adx = Adx::new(ADX_PERIOD);

    for candle in series.candles() {
        rsi.push(candle.close);
        ma_fast.push(candle.close);
        ma_slow.push(candle.close);
        macd.push(candle.close);
        stochastic.push(candle.high, candle.low, candle.close);
        adx.push(candle.high, candle.low, candle.close);
    }

    let ma20 = ma_fast.value();
    let ma50 = ma_slow.value();
    let macd_out = macd.value();
    let macd_line = macd_out.map(|o| o.macd);
    let macd_signal_line = macd_out.map(|o| o.signal);
    let stoch_k = stochastic.percent_k();
    let stoch_d = stochastic.percent_d();

    let (volume_ratio, volume_24h) = volume_stats(&series.volumes());

    Ok(IndicatorSnapshot {
        token_symbol: symbol.to_string(),
        token_address: address.to_string(),
        rsi: rsi.value().map(|v| round_to(v, 1)),
        ma_cross: TrendSignal::from_cross(ma20, ma50),
        ma20: ma20.map(|v| round_to(v, 4)),
        ma50: ma50.map(|v| round_to(v, 4)),
        volume_ratio: round_to(volume_ratio, 1),
        adx: adx.value().map(|v| round_to(v, 1)),
        macd: TrendSignal::from_cross(macd_line, macd_signal_line),
        macd_value: macd_line.map(|v| round_to(v, 6)),
        macd_signal_value: macd_signal_line.map(|v| round_to(v, 6)),
        macd_histogram: macd_out.map(|o| round_to(o.histogram, 6)),
        stochastic_k: stoch_k.map(|v| round_to(v, 1)),
        stochastic_d: stoch_d.map(|v| round_to(v, 1)),
        stochastic_signal: stochastic_signal(stoch_k, stoch_d),
        current_price: round_to(latest.close, 8),
        volume_24h: round_to(volume_24h, 2),
        data_points: series.len(),
        data_start: series.first().and_then(|c| c.timestamp()),
        data_end: latest.timestamp(),
        computed_at: Utc::now(),
    })
}

/// Latest volume against the trailing 24-period mean (whole series when
/// shorter), plus the trailing 24-period volume sum.
fn volume_stats(volumes: &[f64]) -> (f64, f64) {
    let tail = if volumes.len() >= VOLUME_WINDOW {
        &volumes[volumes.len() - VOLUME_WINDOW..]
    } else {
        volumes
    };
    let sum: f64 = tail.iter().sum();
    let avg = sum / tail.len() as f64;
    let latest = *volumes.last().unwrap_or(&0.0);
    let ratio = if avg > 0.0 { latest / avg } else { 1.0 };
    (ratio, sum)
}

fn stochastic_signal(k: Option<f64>, d: Option<f64>) -> TrendSignal {
    match (k, d) {
        (Some(k), Some(d)) if k > d && k < 80.0 => TrendSignal::Bull,
        (Some(k), Some(d)) if k < d && k > 20.0 => TrendSignal::Bear,
        _ => TrendSignal::Neutral,
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
