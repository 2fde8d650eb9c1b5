//! Service constants for spotmark.
//!
//! Cache lifetimes and moving-average bounds match the behavior the HTTP
//! surface documents; the upstream defaults can be overridden per client.

// ═══════════════════════════════════════════════════════════════════════════════
// UPSTREAM PROVIDER
// ═══════════════════════════════════════════════════════════════════════════════

/// Default base URL for the CoinGecko v3 API.
pub const COINGECKO_API_BASE: &str = "https://api.coingecko.com/api/v3";

/// Quote currency used for every price request.
pub const VS_CURRENCY: &str = "usd";

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE LIFETIMES
// ═══════════════════════════════════════════════════════════════════════════════

/// How long a spot-price lookup stays fresh.
/// Spot prices move faster than is useful to re-fetch.
pub const SPOT_CACHE_TTL_MS: u64 = 30_000;

/// How long a daily history series stays fresh.
/// A day's series is stable for much longer than a spot quote.
pub const HISTORY_CACHE_TTL_MS: u64 = 300_000;

// ═══════════════════════════════════════════════════════════════════════════════
// MOVING AVERAGE WINDOW
// ═══════════════════════════════════════════════════════════════════════════════

/// Smallest accepted moving-average window, in days.
pub const MIN_SMA_DAYS: u32 = 2;

/// Largest accepted moving-average window, in days.
pub const MAX_SMA_DAYS: u32 = 90;

/// Window used when the caller does not specify one.
pub const DEFAULT_SMA_DAYS: u32 = 7;
