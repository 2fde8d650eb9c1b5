//! CoinGecko HTTP client.
//!
//! Thin wrapper over the two v3 endpoints the service needs:
//! `/simple/price` for spot quotes and `/coins/{id}/market_chart` for
//! daily history.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url::Url;

use spotmark_core::constants::{COINGECKO_API_BASE, VS_CURRENCY};
use spotmark_core::error::{Result, SpotmarkError};
use spotmark_core::traits::PriceProvider;
use spotmark_core::types::{PricePoint, SpotPriceMap};

/// Header CoinGecko expects demo API keys on.
const API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// Upstream error bodies are quoted in our own errors; keep them short.
const MAX_ERROR_BODY_LEN: usize = 200;

/// CoinGecko client configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CoinGeckoConfig {
    /// Base URL of the v3 API.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// Optional demo API key, sent as a request header when present.
    pub api_key: Option<String>,
}

impl Default for CoinGeckoConfig {
    fn default() -> Self {
        Self {
            base_url: COINGECKO_API_BASE.into(),
            timeout_seconds: 30,
            api_key: None,
        }
    }
}

impl CoinGeckoConfig {
    /// Creates a configuration with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Adds a demo API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

/// Client for the CoinGecko v3 API.
pub struct CoinGeckoClient {
    config: CoinGeckoConfig,
    http_client: reqwest::Client,
}

impl CoinGeckoClient {
    /// Creates a client against the public API with default configuration.
    pub fn new() -> Self {
        Self::with_config(CoinGeckoConfig::default())
    }

    /// Creates a client with custom configuration.
    pub fn with_config(config: CoinGeckoConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
        }
    }

    /// Fetches current spot prices for the given coin ids.
    ///
    /// Ids CoinGecko does not recognize are simply absent from the returned
    /// map; the call itself still succeeds.
    #[instrument(skip(self))]
    pub async fn simple_prices(&self, ids: &[String]) -> Result<SpotPriceMap> {
        let url = self.endpoint(
            "simple/price",
            &[("ids", ids.join(",").as_str()), ("vs_currencies", VS_CURRENCY)],
        )?;

        let prices: SpotPriceMap = self.get_json(url).await?;
        debug!(requested = ids.len(), returned = prices.len(), "Fetched spot prices");
        Ok(prices)
    }

    /// Fetches the daily price series for one coin over the last `days` days.
    ///
    /// A response without a `prices` field yields an empty series.
    #[instrument(skip(self))]
    pub async fn market_chart(&self, id: &str, days: u32) -> Result<Vec<PricePoint>> {
        let url = self.endpoint(
            &format!("coins/{id}/market_chart"),
            &[("vs_currency", VS_CURRENCY), ("days", days.to_string().as_str())],
        )?;

        let chart: MarketChartResponse = self.get_json(url).await?;
        debug!(id, days, points = chart.prices.len(), "Fetched market chart");
        Ok(chart.prices)
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let base = self.config.base_url.trim_end_matches('/');
        Url::parse_with_params(&format!("{base}/{path}"), params)
            .map_err(|e| SpotmarkError::ConfigError(format!("Invalid base URL: {e}")))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T> {
        let mut request = self.http_client.get(url);
        if let Some(key) = &self.config.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SpotmarkError::HttpError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body: String = response
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(MAX_ERROR_BODY_LEN)
                .collect();
            return Err(SpotmarkError::UpstreamStatus { status, body });
        }

        response
            .json()
            .await
            .map_err(|e| SpotmarkError::HttpError(e.to_string()))
    }
}

impl Default for CoinGeckoClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceProvider for CoinGeckoClient {
    async fn spot_prices(&self, ids: &[String]) -> Result<SpotPriceMap> {
        self.simple_prices(ids).await
    }

    async fn daily_history(&self, id: &str, days: u32) -> Result<Vec<PricePoint>> {
        self.market_chart(id, days).await
    }
}

/// Relevant slice of the `market_chart` response.
#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    #[serde(default)]
    prices: Vec<PricePoint>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> CoinGeckoClient {
        CoinGeckoClient::with_config(CoinGeckoConfig::new(server.uri()))
    }

    #[tokio::test]
    async fn test_simple_prices_decoding() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/simple/price"))
            .and(query_param("ids", "bitcoin,ethereum"))
            .and(query_param("vs_currencies", "usd"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "bitcoin": {"usd": 50000.0},
                "ethereum": {"usd": 3000.0},
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let ids = vec!["bitcoin".to_string(), "ethereum".to_string()];
        let prices = client.simple_prices(&ids).await.unwrap();

        assert_eq!(prices["bitcoin"].usd, 50_000.0);
        assert_eq!(prices["ethereum"].usd, 3_000.0);
    }

    #[tokio::test]
    async fn test_market_chart_decoding() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/coins/bitcoin/market_chart"))
            .and(query_param("vs_currency", "usd"))
            .and(query_param("days", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "prices": [[1700000000000_i64, 42000.5], [1700086400000_i64, 43100.0]],
                "market_caps": [],
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let series = client.market_chart("bitcoin", 7).await.unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].timestamp_ms, 1_700_000_000_000);
        assert_eq!(series[1].usd, 43_100.0);
    }

    #[tokio::test]
    async fn test_market_chart_missing_prices_field() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/coins/bitcoin/market_chart"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let series = client.market_chart("bitcoin", 7).await.unwrap();
        assert!(series.is_empty());
    }

    #[tokio::test]
    async fn test_upstream_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/simple/price"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Throttled"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .simple_prices(&["bitcoin".to_string()])
            .await
            .unwrap_err();

        match err {
            SpotmarkError::UpstreamStatus { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "Throttled");
            }
            other => panic!("expected UpstreamStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_api_key_header_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/simple/price"))
            .and(header(API_KEY_HEADER, "demo-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let config = CoinGeckoConfig::new(server.uri()).with_api_key("demo-key");
        let client = CoinGeckoClient::with_config(config);
        client.simple_prices(&["bitcoin".to_string()]).await.unwrap();
    }
}
