//! DTOs for API requests and responses.

use serde::{Deserialize, Serialize};

use spotmark_coingecko::{MovingAverage, PriceSource, Quote};
use spotmark_core::constants::DEFAULT_SMA_DAYS;

/// Query parameters for `/prices`.
#[derive(Debug, Deserialize)]
pub struct PricesQuery {
    /// Comma-separated ticker symbols, e.g. `BTC,ETH`.
    pub symbols: Option<String>,
}

/// Query parameters for `/ma`.
#[derive(Debug, Deserialize)]
pub struct MaQuery {
    /// Ticker symbol, e.g. `BTC`.
    pub symbol: Option<String>,
    /// Moving-average window in days; clamped server-side.
    #[serde(default = "default_days")]
    pub days: u32,
}

fn default_days() -> u32 {
    DEFAULT_SMA_DAYS
}

/// Response for `/prices`.
#[derive(Debug, Serialize)]
pub struct PricesResponse {
    /// Whether the quotes came from cache or a live fetch.
    pub source: PriceSource,
    /// One quote per requested symbol, in request order.
    pub data: Vec<Quote>,
}

/// Response for `/ma`.
#[derive(Debug, Serialize)]
pub struct MaResponse {
    /// Requested symbol, uppercased.
    pub symbol: String,
    /// Window actually used, after clamping.
    pub days: u32,
    /// Number of series points averaged.
    pub points: usize,
    /// Simple moving average, rounded to 4 decimal places.
    pub sma: f64,
}

impl From<MovingAverage> for MaResponse {
    fn from(ma: MovingAverage) -> Self {
        Self {
            symbol: ma.symbol,
            days: ma.days,
            points: ma.points,
            sma: ma.sma,
        }
    }
}

/// Response for `/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status string, always "ok" when the server answers.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Seconds since the server started.
    pub uptime_seconds: u64,
}
