//! Common traits for spotmark.
//!
//! These traits define the interfaces that different implementations can satisfy,
//! enabling modularity and testing.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{PricePoint, SpotPriceMap};

/// Interface for an upstream price provider.
///
/// Implementations might use:
/// - The CoinGecko HTTP API (production)
/// - A canned in-memory provider (tests)
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Fetches current spot prices for the given coin ids.
    ///
    /// Ids absent from the returned map had no quote upstream; that is not
    /// an error at this layer.
    async fn spot_prices(&self, ids: &[String]) -> Result<SpotPriceMap>;

    /// Fetches the daily price series for one coin over the last `days` days.
    async fn daily_history(&self, id: &str, days: u32) -> Result<Vec<PricePoint>>;
}
