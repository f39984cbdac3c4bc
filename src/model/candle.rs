use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// One hourly OHLCV bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub unix_time: i64,
}

impl Candle {
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.unix_time, 0)
    }

    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }
}

/// Ordered candle history: strictly increasing timestamps, no duplicates.
#[derive(Debug, Clone, Default)]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl CandleSeries {
    /// Build a series from raw candles. Sorts by timestamp, drops duplicate
    /// timestamps (first occurrence wins), rejects an empty input.
    pub fn try_from_candles(mut candles: Vec<Candle>) -> Result<Self, AppError> {
        if candles.is_empty() {
            return Err(AppError::Data(
                "no valid market data after processing".to_string(),
            ));
        }
        candles.sort_by_key(|c| c.unix_time);
        candles.dedup_by_key(|c| c.unix_time);
        Ok(Self { candles })
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn first(&self) -> Option<&Candle> {
        self.candles.first()
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.volume).collect()
    }
}
