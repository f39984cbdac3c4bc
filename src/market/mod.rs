pub mod rest;
pub mod types;

use crate::error::AppError;
use crate::model::candle::CandleSeries;

/// Seam between the refresh loop and the market-data provider. The real
/// client implements it over HTTP; tests substitute canned series.
#[allow(async_fn_in_trait)]
pub trait CandleSource {
    async fn fetch_hourly(&self, address: &str, hours: i64) -> Result<CandleSeries, AppError>;
}
