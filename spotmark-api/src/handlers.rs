//! API route handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use tracing::info;

use spotmark_core::error::SpotmarkError;

use crate::dto::*;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}

/// GET /prices?symbols=BTC,ETH
pub async fn get_prices(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PricesQuery>,
) -> Result<Json<PricesResponse>> {
    let raw = params.symbols.unwrap_or_default();
    let symbols: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if symbols.is_empty() {
        return Err(ApiError::bad_request(
            "Provide symbols, e.g. /prices?symbols=BTC,ETH",
        ));
    }

    let result = state.prices.spot_quotes(&symbols).await.map_err(|e| match e {
        SpotmarkError::UnsupportedSymbol(_) => {
            ApiError::bad_request("One or more symbols not supported.")
        }
        other => ApiError::from(other),
    })?;

    info!(symbols = symbols.len(), source = ?result.source, "Served spot prices");
    Ok(Json(PricesResponse {
        source: result.source,
        data: result.quotes,
    }))
}

/// GET /ma?symbol=BTC&days=7
pub async fn get_moving_average(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MaQuery>,
) -> Result<Json<MaResponse>> {
    let symbol = params
        .symbol
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Provide symbol, e.g. /ma?symbol=BTC&days=7"))?;

    let result = state
        .prices
        .moving_average(&symbol, params.days)
        .await
        .map_err(|e| match e {
            SpotmarkError::UnsupportedSymbol(_) => ApiError::bad_request("Symbol not supported"),
            other => ApiError::from(other),
        })?;

    info!(symbol = %result.symbol, days = result.days, "Served moving average");
    Ok(Json(MaResponse::from(result)))
}
