//! Refresh orchestration: walk the token universe, fetch, compute, cache.
//!
//! The unit of failure is one token's pipeline run. A failed token is
//! recorded in the summary and its cache entry is left alone (stale or
//! absent); the loop always runs to the end of the universe.
//!
//! In the cache the summary shares the token keyspace under `_summary`, but
//! the read paths split it out: `all_cached_indicators` returns the typed
//! symbol-to-snapshot map and `cached_summary` the summary record, so callers
//! never match on `CacheRecord` themselves.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::{CacheStats, TtlCache};
use crate::market::CandleSource;
use crate::snapshot::{compute_snapshot, IndicatorSnapshot};
use crate::tokens::TokenInfo;

/// Cache key for the per-run summary record, alongside the token symbols.
pub const SUMMARY_KEY: &str = "_summary";

/// Either a token's snapshot or the run summary; both live in the same
/// keyspace, like rows of one cache collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CacheRecord {
    Indicators(IndicatorSnapshot),
    Summary(RefreshSummary),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshSummary {
    pub total_tokens: usize,
    pub successful: usize,
    pub failed: usize,
    pub errors: HashMap<String, String>,
    pub generated_at: DateTime<Utc>,
}

/// Outcome of one `refresh_all` run: per-token results (None for failures)
/// plus the summary that was also cached.
#[derive(Debug, Clone)]
pub struct RefreshReport {
    pub indicators: HashMap<String, Option<IndicatorSnapshot>>,
    pub summary: RefreshSummary,
}

pub struct RefreshService<S: CandleSource> {
    source: S,
    cache: Arc<TtlCache<CacheRecord>>,
    universe: Vec<TokenInfo>,
    lookback_hours: i64,
    ttl: Duration,
}

impl<S: CandleSource> RefreshService<S> {
    pub fn new(
        source: S,
        cache: Arc<TtlCache<CacheRecord>>,
        universe: Vec<TokenInfo>,
        lookback_hours: i64,
        ttl_hours: i64,
    ) -> Self {
        Self {
            source,
            cache,
            universe,
            lookback_hours,
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Run the full pipeline for every token in the universe, sequentially.
    /// Per-token errors are captured in the summary; they never abort the run.
    pub async fn refresh_all(&self) -> RefreshReport {
        let mut indicators: HashMap<String, Option<IndicatorSnapshot>> = HashMap::new();
        let mut errors: HashMap<String, String> = HashMap::new();

        for token in &self.universe {
            tracing::info!(symbol = %token.symbol, "refreshing token");
            match self.refresh_token(token).await {
                Ok(snapshot) => {
                    self.cache.put(
                        &token.symbol,
                        CacheRecord::Indicators(snapshot.clone()),
                        self.ttl,
                    );
                    indicators.insert(token.symbol.clone(), Some(snapshot));
                    tracing::info!(symbol = %token.symbol, "token refreshed");
                }
                Err(e) => {
                    let message = e.to_string();
                    tracing::error!(symbol = %token.symbol, error = %message, "token refresh failed");
                    errors.insert(token.symbol.clone(), message);
                    indicators.insert(token.symbol.clone(), None);
                }
            }
        }

        let summary = RefreshSummary {
            total_tokens: self.universe.len(),
            successful: indicators.values().filter(|v| v.is_some()).count(),
            failed: errors.len(),
            errors,
            generated_at: Utc::now(),
        };
        self.cache
            .put(SUMMARY_KEY, CacheRecord::Summary(summary.clone()), self.ttl);

        RefreshReport {
            indicators,
            summary,
        }
    }

    async fn refresh_token(
        &self,
        token: &TokenInfo,
    ) -> Result<IndicatorSnapshot, crate::error::AppError> {
        let series = self
            .source
            .fetch_hourly(&token.address, self.lookback_hours)
            .await?;
        compute_snapshot(&token.symbol, &token.address, &series)
    }

    /// Read path: one slot per configured token (None when absent or expired),
    /// so callers see nulls rather than errors for failed tokens.
    pub fn all_cached_indicators(&self) -> HashMap<String, Option<IndicatorSnapshot>> {
        let valid = self.cache.all_valid();
        self.universe
            .iter()
            .map(|token| {
                let snapshot = match valid.get(&token.symbol) {
                    Some(CacheRecord::Indicators(s)) => Some(s.clone()),
                    _ => None,
                };
                (token.symbol.clone(), snapshot)
            })
            .collect()
    }

    /// The most recent non-expired run summary, if any.
    pub fn cached_summary(&self) -> Option<RefreshSummary> {
        match self.cache.get(SUMMARY_KEY) {
            Some(CacheRecord::Summary(summary)) => Some(summary),
            _ => None,
        }
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
