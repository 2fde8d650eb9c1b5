//! Error types for spotmark.
//!
//! This module provides the shared error hierarchy using `thiserror`.
//! All errors include context and are designed to be actionable.

use thiserror::Error;

/// Result type alias using `SpotmarkError`.
pub type Result<T> = std::result::Result<T, SpotmarkError>;

/// Main error type for all spotmark operations.
#[derive(Debug, Error)]
pub enum SpotmarkError {
    // ═══════════════════════════════════════════════════════════════════════════
    // INPUT VALIDATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Symbol has no known upstream coin id.
    #[error("Unsupported symbol: {0}")]
    UnsupportedSymbol(String),

    /// A quote request carried no symbols at all.
    #[error("No symbols provided")]
    NoSymbols,

    /// Configuration error (bad TTL, bad base URL, ...).
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // UPSTREAM ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// HTTP transport failure talking to the upstream provider.
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Upstream provider answered with a non-success status.
    #[error("Upstream API error: status {status}: {body}")]
    UpstreamStatus {
        /// HTTP status code returned by the provider.
        status: u16,
        /// Response body, truncated by the caller if oversized.
        body: String,
    },

    /// Upstream returned a price series with no points.
    #[error("Empty price series for '{0}'")]
    EmptySeries(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // RUNTIME ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Socket or file I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SpotmarkError {
    /// Returns true if this error is recoverable (can retry).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SpotmarkError::HttpError(_)
                | SpotmarkError::UpstreamStatus { .. }
                | SpotmarkError::EmptySeries(_)
        )
    }

    /// Returns true if this error was caused by the caller's input.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            SpotmarkError::UnsupportedSymbol(_) | SpotmarkError::NoSymbols
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SpotmarkError::UpstreamStatus {
            status: 429,
            body: "rate limited".into(),
        };
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("rate limited"));
    }

    #[test]
    fn test_error_classification() {
        assert!(SpotmarkError::HttpError("test".into()).is_recoverable());
        assert!(!SpotmarkError::UnsupportedSymbol("XYZ".into()).is_recoverable());

        assert!(SpotmarkError::NoSymbols.is_validation_error());
        assert!(SpotmarkError::UnsupportedSymbol("XYZ".into()).is_validation_error());
        assert!(!SpotmarkError::HttpError("test".into()).is_validation_error());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_result: std::result::Result<serde_json::Value, _> =
            serde_json::from_str("invalid");
        let result: Result<serde_json::Value> = json_result.map_err(SpotmarkError::from);
        assert!(matches!(result, Err(SpotmarkError::JsonError(_))));
    }
}
