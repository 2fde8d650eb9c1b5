//! App state: configuration and the injected price service.

use std::time::Instant;

use spotmark_coingecko::{CoinGeckoConfig, PriceService, PriceServiceConfig};
use spotmark_core::constants::{COINGECKO_API_BASE, HISTORY_CACHE_TTL_MS, SPOT_CACHE_TTL_MS};
use spotmark_core::error::Result;

/// Server configuration, usually read from the environment.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// CoinGecko base URL.
    pub coingecko_base_url: String,
    /// Optional CoinGecko demo API key.
    pub coingecko_api_key: Option<String>,
    /// Spot-quote cache TTL in milliseconds.
    pub spot_ttl_ms: u64,
    /// History-series cache TTL in milliseconds.
    pub history_ttl_ms: u64,
    /// Whether responses are cached at all.
    pub enable_cache: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            coingecko_base_url: COINGECKO_API_BASE.into(),
            coingecko_api_key: None,
            spot_ttl_ms: SPOT_CACHE_TTL_MS,
            history_ttl_ms: HISTORY_CACHE_TTL_MS,
            enable_cache: true,
        }
    }
}

impl ApiConfig {
    /// Builds configuration from the environment (and `.env`, if present).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let defaults = Self::default();
        Self {
            coingecko_base_url: std::env::var("COINGECKO_BASE_URL")
                .unwrap_or(defaults.coingecko_base_url),
            coingecko_api_key: std::env::var("COINGECKO_API_KEY").ok(),
            spot_ttl_ms: env_u64("SPOT_CACHE_TTL_MS", defaults.spot_ttl_ms),
            history_ttl_ms: env_u64("HISTORY_CACHE_TTL_MS", defaults.history_ttl_ms),
            enable_cache: std::env::var("ENABLE_CACHE")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
        }
    }
}

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Shared application state, constructed once at startup and handed to the
/// router. The caches live inside the price service; nothing here is global.
pub struct AppState {
    /// Active configuration.
    pub config: ApiConfig,
    /// Cached price service.
    pub prices: PriceService,
    /// Server start time, for uptime reporting.
    pub started_at: Instant,
}

impl AppState {
    /// Wires the price service from configuration.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let mut coingecko = CoinGeckoConfig::new(&config.coingecko_base_url);
        if let Some(key) = &config.coingecko_api_key {
            coingecko = coingecko.with_api_key(key);
        }

        let service_config = PriceServiceConfig {
            coingecko,
            spot_ttl_ms: config.spot_ttl_ms,
            history_ttl_ms: config.history_ttl_ms,
            enable_cache: config.enable_cache,
        };

        Ok(Self {
            config,
            prices: PriceService::with_config(service_config)?,
            started_at: Instant::now(),
        })
    }
}
