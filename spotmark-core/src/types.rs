//! Domain types for spotmark.
//!
//! - [`SpotPrice`]: a current quote for one coin in the quote currency
//! - [`SpotPriceMap`]: upstream response shape for a multi-coin spot lookup
//! - [`PricePoint`]: one sample of a historical price series

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current quote for a single coin.
///
/// Matches the per-coin object of CoinGecko's `/simple/price` response
/// (`{"usd": 50000.0}`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpotPrice {
    /// Price in the quote currency.
    pub usd: f64,
}

/// Spot lookup response: coin id → quote.
pub type SpotPriceMap = HashMap<String, SpotPrice>;

/// One sample of a historical price series.
///
/// Serializes as the upstream pair shape `[timestamp_ms, price]`, so a whole
/// series round-trips against CoinGecko's `market_chart.prices` array.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "(i64, f64)", into = "(i64, f64)")]
pub struct PricePoint {
    /// Sample time as Unix milliseconds.
    pub timestamp_ms: i64,
    /// Price in the quote currency at that time.
    pub usd: f64,
}

impl PricePoint {
    /// Sample time as a wall-clock datetime, if the timestamp is representable.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp_ms)
    }
}

impl From<(i64, f64)> for PricePoint {
    fn from((timestamp_ms, usd): (i64, f64)) -> Self {
        Self { timestamp_ms, usd }
    }
}

impl From<PricePoint> for (i64, f64) {
    fn from(point: PricePoint) -> Self {
        (point.timestamp_ms, point.usd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_point_wire_shape() {
        let series: Vec<PricePoint> =
            serde_json::from_str("[[1700000000000, 42000.5], [1700086400000, 43100.0]]").unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].timestamp_ms, 1_700_000_000_000);
        assert_eq!(series[1].usd, 43_100.0);

        let json = serde_json::to_string(&series[0]).unwrap();
        assert_eq!(json, "[1700000000000,42000.5]");
    }

    #[test]
    fn test_price_point_datetime() {
        let point = PricePoint {
            timestamp_ms: 0,
            usd: 1.0,
        };
        assert_eq!(point.datetime().unwrap().timestamp(), 0);
    }

    #[test]
    fn test_spot_price_map_decoding() {
        let map: SpotPriceMap =
            serde_json::from_str(r#"{"bitcoin":{"usd":50000.0},"ethereum":{"usd":3000.0}}"#)
                .unwrap();
        assert_eq!(map["bitcoin"].usd, 50_000.0);
        assert_eq!(map["ethereum"].usd, 3_000.0);
    }
}
