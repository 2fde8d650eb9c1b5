//! # spotmark API Server
//!
//! REST API exposing spot prices and simple moving averages.
//!
//! ## Endpoints
//!
//! - `GET /health` - Liveness and version info
//! - `GET /prices?symbols=BTC,ETH` - Current spot prices
//! - `GET /ma?symbol=BTC&days=7` - Simple moving average over a day window
//!
//! ## Example
//!
//! ```rust,ignore
//! use spotmark_api::{ApiServer, ApiConfig};
//!
//! let config = ApiConfig::from_env();
//! let server = ApiServer::new(config)?;
//! server.run(([0, 0, 0, 0], 3000)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod dto;
mod error;
mod handlers;
mod routes;
mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::{ApiConfig, AppState};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use spotmark_core::error::Result;

/// API server for spotmark.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a new API server with the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self> {
        Ok(Self {
            state: Arc::new(AppState::new(config)?),
        })
    }

    /// Creates the router with all routes configured.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        info!("spotmark API server listening on {}", addr);

        axum::serve(listener, self.router()).await
    }
}

/// Starts the API server with environment-driven configuration.
pub async fn start_server(port: u16) -> Result<()> {
    let config = ApiConfig::from_env();
    let server = ApiServer::new(config)?;
    server.run(([0, 0, 0, 0], port)).await?;
    Ok(())
}
