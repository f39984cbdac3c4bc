use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::tokens::{default_universe, TokenInfo};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub market_data: MarketDataConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub tokens: Vec<TokenEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarketDataConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub rate_limit_delay_ms: u64,
    pub lookback_hours: i64,
    #[serde(skip)]
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    pub indicator_ttl_hours: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenEntry {
    pub symbol: String,
    pub address: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config_path = Path::new("config/default.toml");
        let config_str = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;

        let mut config: Config =
            toml::from_str(&config_str).context("failed to parse config/default.toml")?;

        // The credential never lives in the config file.
        config.market_data.api_key = std::env::var("BIRDEYE_API_KEY").unwrap_or_default();
        if config.market_data.api_key.trim().is_empty() {
            tracing::warn!("BIRDEYE_API_KEY not set; refresh runs will fail fast");
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.market_data.lookback_hours <= 0 {
            bail!("market_data.lookback_hours must be > 0");
        }
        if self.cache.indicator_ttl_hours <= 0 {
            bail!("cache.indicator_ttl_hours must be > 0");
        }
        if self.market_data.base_url.trim().is_empty() {
            bail!("market_data.base_url must not be empty");
        }
        Ok(())
    }

    /// Tokens to refresh: the config file's list when present, the built-in
    /// universe otherwise. Duplicate symbols keep the first entry.
    pub fn token_universe(&self) -> Vec<TokenInfo> {
        if self.tokens.is_empty() {
            return default_universe();
        }
        let mut out: Vec<TokenInfo> = Vec::new();
        for entry in &self.tokens {
            let symbol = entry.symbol.trim().to_ascii_uppercase();
            if symbol.is_empty() || out.iter().any(|t| t.symbol == symbol) {
                continue;
            }
            out.push(TokenInfo {
                symbol,
                address: entry.address.trim().to_string(),
            });
        }
        out
    }
}
