use std::time::Duration;

use chrono::Utc;

use crate::config::MarketDataConfig;
use crate::error::AppError;
use crate::model::candle::{Candle, CandleSeries};

use super::types::PriceHistoryResponse;
use super::CandleSource;

/// REST client for the market-data provider's hourly price history.
#[derive(Debug)]
pub struct MarketDataClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    rate_limit_delay: Duration,
}

impl MarketDataClient {
    pub fn new(cfg: &MarketDataConfig) -> Result<Self, AppError> {
        if cfg.api_key.trim().is_empty() {
            return Err(AppError::Config(
                "BIRDEYE_API_KEY not configured".to_string(),
            ));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
            rate_limit_delay: Duration::from_millis(cfg.rate_limit_delay_ms),
        })
    }

    /// Fetch `hours` of 1-hour candles ending now, as one time-bounded window.
    pub async fn price_history(
        &self,
        address: &str,
        hours: i64,
    ) -> Result<CandleSeries, AppError> {
        let to = Utc::now().timestamp();
        let from = to - hours * 3_600;
        let url = format!("{}/price-history", self.base_url);

        tracing::debug!(address, hours, "fetching price history");

        let from_s = from.to_string();
        let to_s = to.to_string();
        let resp = self
            .http
            .get(&url)
            .header("X-API-KEY", &self.api_key)
            .query(&[
                ("address", address),
                ("interval", "1H"),
                ("from", from_s.as_str()),
                ("to", to_s.as_str()),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(AppError::Fetch { status, body });
        }

        let payload: PriceHistoryResponse = resp.json().await?;

        // Fixed post-call wait so sequential token fetches stay inside the
        // provider's rate limit.
        tokio::time::sleep(self.rate_limit_delay).await;

        process_rows(payload)
    }
}

impl CandleSource for MarketDataClient {
    async fn fetch_hourly(&self, address: &str, hours: i64) -> Result<CandleSeries, AppError> {
        self.price_history(address, hours).await
    }
}

/// Map provider rows to the canonical series: rows with missing or
/// non-numeric required fields are dropped, an empty result is a data error.
fn process_rows(payload: PriceHistoryResponse) -> Result<CandleSeries, AppError> {
    if payload.data.items.is_empty() {
        return Err(AppError::Data(
            "no candle data returned from provider".to_string(),
        ));
    }
    let candles: Vec<Candle> = payload
        .data
        .items
        .iter()
        .filter_map(|row| row.to_candle())
        .collect();
    CandleSeries::try_from_candles(candles)
}
