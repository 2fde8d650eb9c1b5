//! # spotmark Core
//!
//! Core types, errors, and traits shared by the spotmark crates.
//!
//! This crate provides the foundational building blocks used by all other spotmark crates:
//!
//! - **Types**: Domain models for spot prices and historical price points
//! - **Errors**: Comprehensive error types with context
//! - **Constants**: Cache TTLs, moving-average bounds, and upstream defaults
//! - **Traits**: The price-provider interface implemented by upstream clients
//!
//! ## Example
//!
//! ```rust
//! use spotmark_core::{PricePoint, SpotPrice};
//!
//! // Types are serializable in the upstream wire shape
//! let point = PricePoint { timestamp_ms: 1_700_000_000_000, usd: 42_000.5 };
//! let json = serde_json::to_string(&point).unwrap();
//! assert_eq!(json, "[1700000000000,42000.5]");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{Result, SpotmarkError};
pub use traits::*;
pub use types::*;
