//! Cached price service combining the upstream provider with TTL caches.
//!
//! Serves spot quotes and simple moving averages by:
//! 1. Mapping ticker symbols to coin ids
//! 2. Checking the matching cache (spot and history have different TTLs)
//! 3. On miss, fetching from the provider and populating the cache
//!
//! There is no single-flight de-duplication: two concurrent misses for the
//! same key may both fetch, and the second `set` overwrites the first.
//! Values for one key are equivalent within the TTL window, so last write
//! wins is fine.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use spotmark_cache::TtlCache;
use spotmark_core::constants::{
    HISTORY_CACHE_TTL_MS, MAX_SMA_DAYS, MIN_SMA_DAYS, SPOT_CACHE_TTL_MS,
};
use spotmark_core::error::{Result, SpotmarkError};
use spotmark_core::traits::PriceProvider;
use spotmark_core::types::{PricePoint, SpotPriceMap};

use crate::client::{CoinGeckoClient, CoinGeckoConfig};
use crate::symbols;

/// Price service configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PriceServiceConfig {
    /// Upstream client configuration.
    pub coingecko: CoinGeckoConfig,
    /// Spot-quote cache TTL in milliseconds.
    pub spot_ttl_ms: u64,
    /// History-series cache TTL in milliseconds.
    pub history_ttl_ms: u64,
    /// Whether to cache at all.
    pub enable_cache: bool,
}

impl Default for PriceServiceConfig {
    fn default() -> Self {
        Self {
            coingecko: CoinGeckoConfig::default(),
            spot_ttl_ms: SPOT_CACHE_TTL_MS,
            history_ttl_ms: HISTORY_CACHE_TTL_MS,
            enable_cache: true,
        }
    }
}

impl PriceServiceConfig {
    /// Creates a config pointed at the given upstream base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            coingecko: CoinGeckoConfig::new(base_url),
            ..Default::default()
        }
    }

    /// Disables caching.
    pub fn no_cache(mut self) -> Self {
        self.enable_cache = false;
        self
    }
}

/// Where a response was served from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceSource {
    /// Served from the in-memory cache.
    Cache,
    /// Fetched from the upstream provider for this request.
    Live,
}

/// Spot quote for one requested symbol.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Quote {
    /// The requested ticker symbol, uppercased.
    pub symbol: String,
    /// Price in the quote currency; `None` when the provider had no quote.
    pub usd: Option<f64>,
}

/// Result of a spot-quote lookup.
#[derive(Clone, Debug)]
pub struct SpotQuotes {
    /// Whether this came from cache or a live fetch.
    pub source: PriceSource,
    /// One quote per requested symbol, in request order.
    pub quotes: Vec<Quote>,
}

/// A cached daily price series for one symbol.
#[derive(Clone, Debug)]
pub struct DailyHistory {
    /// The requested ticker symbol, uppercased.
    pub symbol: String,
    /// Upstream coin id the series was fetched under.
    pub coin_id: String,
    /// The window actually used, after clamping.
    pub days: u32,
    /// Daily price samples, oldest first.
    pub series: Vec<PricePoint>,
}

/// Result of a moving-average computation.
#[derive(Clone, Debug)]
pub struct MovingAverage {
    /// The requested ticker symbol, uppercased.
    pub symbol: String,
    /// The window actually used, after clamping.
    pub days: u32,
    /// Number of series points the average was computed over.
    pub points: usize,
    /// Simple moving average, rounded to 4 decimal places.
    pub sma: f64,
}

struct FeedCaches {
    spot: TtlCache<SpotPriceMap>,
    history: TtlCache<Vec<PricePoint>>,
}

/// Price service: symbol mapping + caching in front of a [`PriceProvider`].
pub struct PriceService<P = CoinGeckoClient> {
    provider: P,
    caches: Option<FeedCaches>,
}

impl PriceService<CoinGeckoClient> {
    /// Creates a service against the public CoinGecko API with defaults.
    pub fn new() -> Result<Self> {
        Self::with_config(PriceServiceConfig::default())
    }

    /// Creates a service from configuration.
    pub fn with_config(config: PriceServiceConfig) -> Result<Self> {
        let provider = CoinGeckoClient::with_config(config.coingecko.clone());
        Self::with_provider(provider, &config)
    }
}

impl<P: PriceProvider> PriceService<P> {
    /// Creates a service around an explicit provider.
    ///
    /// This is the seam tests use to substitute a canned provider.
    pub fn with_provider(provider: P, config: &PriceServiceConfig) -> Result<Self> {
        let caches = if config.enable_cache {
            Some(FeedCaches {
                spot: TtlCache::from_millis(config.spot_ttl_ms)?,
                history: TtlCache::from_millis(config.history_ttl_ms)?,
            })
        } else {
            None
        };

        Ok(Self { provider, caches })
    }

    /// Looks up current spot quotes for the given ticker symbols.
    ///
    /// Quotes come back in request order; a symbol the provider returned no
    /// price for carries `usd: None`.
    #[instrument(skip(self))]
    pub async fn spot_quotes(&self, symbols: &[String]) -> Result<SpotQuotes> {
        if symbols.is_empty() {
            return Err(SpotmarkError::NoSymbols);
        }

        let mut resolved = Vec::with_capacity(symbols.len());
        for raw in symbols {
            let symbol = raw.trim().to_uppercase();
            let id = symbols::to_coin_id(&symbol)
                .ok_or_else(|| SpotmarkError::UnsupportedSymbol(symbol.clone()))?;
            resolved.push((symbol, id));
        }

        // Canonical cache key: the sorted, deduplicated id set. The same
        // coins in a different request order share one entry.
        let mut ids: Vec<String> = resolved.iter().map(|(_, id)| id.to_string()).collect();
        ids.sort_unstable();
        ids.dedup();
        let key = ids.join(",");

        if let Some(caches) = &self.caches {
            if let Some(prices) = caches.spot.get(&key) {
                debug!(key, "Spot cache hit");
                return Ok(SpotQuotes {
                    source: PriceSource::Cache,
                    quotes: build_quotes(&resolved, &prices),
                });
            }
        }

        debug!(key, "Spot cache miss, fetching");
        let prices = self.provider.spot_prices(&ids).await?;

        if let Some(caches) = &self.caches {
            caches.spot.set(key, prices.clone());
        }

        info!(symbols = resolved.len(), "Fetched live spot quotes");
        Ok(SpotQuotes {
            source: PriceSource::Live,
            quotes: build_quotes(&resolved, &prices),
        })
    }

    /// Fetches the cached daily price series for one symbol.
    ///
    /// `days` is clamped into the supported window before anything else, so
    /// the clamped value is what appears in cache keys and the result.
    #[instrument(skip(self))]
    pub async fn daily_history(&self, symbol: &str, days: u32) -> Result<DailyHistory> {
        let symbol = symbol.trim().to_uppercase();
        let id = symbols::to_coin_id(&symbol)
            .ok_or_else(|| SpotmarkError::UnsupportedSymbol(symbol.clone()))?;
        let days = days.clamp(MIN_SMA_DAYS, MAX_SMA_DAYS);

        let key = format!("{id}:{days}");
        let series = match self.caches.as_ref().and_then(|c| c.history.get(&key)) {
            Some(series) => {
                debug!(key, "History cache hit");
                series
            }
            None => {
                debug!(key, "History cache miss, fetching");
                let series = self.provider.daily_history(id, days).await?;
                if let Some(caches) = &self.caches {
                    caches.history.set(key, series.clone());
                }
                series
            }
        };

        Ok(DailyHistory {
            symbol,
            coin_id: id.to_string(),
            days,
            series,
        })
    }

    /// Computes the simple moving average for one symbol.
    #[instrument(skip(self))]
    pub async fn moving_average(&self, symbol: &str, days: u32) -> Result<MovingAverage> {
        let history = self.daily_history(symbol, days).await?;
        let sma =
            sma(&history.series).ok_or_else(|| SpotmarkError::EmptySeries(history.coin_id))?;

        info!(symbol = %history.symbol, days = history.days, points = history.series.len(), "Computed moving average");
        Ok(MovingAverage {
            symbol: history.symbol,
            days: history.days,
            points: history.series.len(),
            sma,
        })
    }
}

fn build_quotes(resolved: &[(String, &'static str)], prices: &SpotPriceMap) -> Vec<Quote> {
    resolved
        .iter()
        .map(|(symbol, id)| Quote {
            symbol: symbol.clone(),
            usd: prices.get(*id).map(|p| p.usd),
        })
        .collect()
}

/// Arithmetic mean of the price column, rounded to 4 decimal places.
/// `None` for an empty series.
fn sma(series: &[PricePoint]) -> Option<f64> {
    if series.is_empty() {
        return None;
    }
    let sum: f64 = series.iter().map(|p| p.usd).sum();
    let mean = sum / series.len() as f64;
    Some((mean * 10_000.0).round() / 10_000.0)
}
