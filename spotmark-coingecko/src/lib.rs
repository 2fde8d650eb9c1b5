//! # spotmark CoinGecko Integration
//!
//! Upstream price fetching for spotmark: symbol→coin-id mapping, the
//! CoinGecko HTTP client, and the TTL-cached [`PriceService`] built on top
//! of both.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod client;
mod service;
pub mod symbols;

pub use client::{CoinGeckoClient, CoinGeckoConfig};
pub use service::{
    DailyHistory, MovingAverage, PriceService, PriceServiceConfig, PriceSource, Quote, SpotQuotes,
};
