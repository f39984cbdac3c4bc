use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};

use token_pulse::cache::TtlCache;
use token_pulse::config::Config;
use token_pulse::market::rest::MarketDataClient;
use token_pulse::refresh::RefreshService;

#[tokio::main]
async fn main() -> Result<()> {
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {:#}", e);
            eprintln!("Make sure .env file exists with BIRDEYE_API_KEY");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                config
                    .logging
                    .level
                    .parse()
                    .unwrap_or_else(|_| "info".parse().unwrap())
            }),
        )
        .init();

    let universe = config.token_universe();
    tracing::info!(
        base_url = %config.market_data.base_url,
        tokens = universe.len(),
        lookback_hours = config.market_data.lookback_hours,
        "Starting indicator refresh"
    );

    // Missing credential is the one fatal precondition: abort before any work.
    let client =
        MarketDataClient::new(&config.market_data).context("market data client init failed")?;

    let cache = Arc::new(TtlCache::new());
    let service = RefreshService::new(
        client,
        cache,
        universe,
        config.market_data.lookback_hours,
        config.cache.indicator_ttl_hours,
    );

    let started = Instant::now();
    let report = service.refresh_all().await;

    tracing::info!(
        duration_secs = started.elapsed().as_secs_f64(),
        total_tokens = report.summary.total_tokens,
        successful = report.summary.successful,
        failed = report.summary.failed,
        "Refresh completed"
    );
    for (symbol, message) in &report.summary.errors {
        tracing::warn!(symbol = %symbol, error = %message, "token failed this cycle");
    }

    let stats = service.cache_stats();
    tracing::info!(
        total_entries = stats.total_entries,
        valid_entries = stats.valid_entries,
        "Cache state"
    );

    Ok(())
}
