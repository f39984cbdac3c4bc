use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::model::candle::Candle;

#[derive(Debug, Deserialize)]
pub struct PriceHistoryResponse {
    #[serde(default)]
    pub data: PriceHistoryData,
}

#[derive(Debug, Default, Deserialize)]
pub struct PriceHistoryData {
    #[serde(default)]
    pub items: Vec<CandleRow>,
}

/// One provider row. Price/volume fields tolerate numbers, numeric strings,
/// null, or absence; anything else coerces to `None` and the row is dropped
/// later instead of failing the series.
#[derive(Debug, Deserialize)]
pub struct CandleRow {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub o: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub h: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub l: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub c: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub v: Option<f64>,
    #[serde(rename = "unixTime")]
    pub unix_time: i64,
}

impl CandleRow {
    /// Canonical candle, or `None` when any required field is missing.
    pub fn to_candle(&self) -> Option<Candle> {
        Some(Candle {
            open: self.o?,
            high: self.h?,
            low: self.l?,
            close: self.c?,
            volume: self.v?,
            unix_time: self.unix_time,
        })
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_f64(&value))
}

fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}
