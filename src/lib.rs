//! token-pulse: hourly OHLCV fetch, technical indicator compute, TTL cache.
//!
//! The pipeline is fetch -> compute -> cache per token, run sequentially over
//! a fixed token universe because the market-data provider is rate limited.
//! Failed tokens are isolated: their cache entries go stale instead of the
//! run aborting.

pub mod cache;
pub mod config;
pub mod error;
pub mod indicator;
pub mod market;
pub mod model;
pub mod refresh;
pub mod snapshot;
pub mod tokens;
