//! # Quote Error Types
//!
//! Error types for configuration loading and quote dispatch.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Quote Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Submission    │  │     Delivery            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  EmptyCart      │  │  Http                   │ │
//! │  │  ConfigLoad...  │  │  Validation     │  │  Rejected               │ │
//! │  │  MissingCreds   │  │  AlreadySending │  │  Delivery               │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use constantine_core::ValidationError;
use thiserror::Error;

/// Result type alias for quote operations.
pub type QuoteResult<T> = Result<T, QuoteError>;

/// Errors raised while configuring or sending a quote.
#[derive(Debug, Error)]
pub enum QuoteError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// A configuration value is unusable.
    #[error("Invalid mail configuration: {0}")]
    InvalidConfig(String),

    /// The config file could not be read or parsed.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// A credential required by the delivery service is empty.
    #[error("Missing mail credential: {0}")]
    MissingCredential(&'static str),

    // =========================================================================
    // Submission Errors
    // =========================================================================
    /// Nothing to quote.
    #[error("Cannot request a quote for an empty cart")]
    EmptyCart,

    /// The destination address was refused.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A quote is already being sent.
    #[error("A quote request is already in progress")]
    AlreadySending,

    // =========================================================================
    // Delivery Errors
    // =========================================================================
    /// Transport-level failure (DNS, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The delivery service answered with a non-2xx status.
    #[error("Mail service rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Dispatch failed; the cart was left untouched.
    #[error("Quote delivery failed: {0}")]
    Delivery(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for QuoteError {
    fn from(err: std::io::Error) -> Self {
        QuoteError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for QuoteError {
    fn from(err: toml::de::Error) -> Self {
        QuoteError::ConfigLoadFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl QuoteError {
    /// Returns true if the user can simply try again with the same input.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            QuoteError::Http(_)
                | QuoteError::Rejected { .. }
                | QuoteError::Delivery(_)
                | QuoteError::AlreadySending
        )
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            QuoteError::InvalidConfig(_)
                | QuoteError::ConfigLoadFailed(_)
                | QuoteError::MissingCredential(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(QuoteError::Delivery("timeout".into()).is_retryable());
        assert!(QuoteError::Rejected {
            status: 502,
            body: String::new()
        }
        .is_retryable());

        assert!(!QuoteError::EmptyCart.is_retryable());
        assert!(!QuoteError::InvalidConfig("bad".into()).is_retryable());
    }

    #[test]
    fn test_config_errors() {
        assert!(QuoteError::MissingCredential("service_id").is_config_error());
        assert!(!QuoteError::EmptyCart.is_config_error());
    }

    #[test]
    fn test_validation_is_transparent() {
        let err: QuoteError = ValidationError::Required {
            field: "email".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            ValidationError::Required {
                field: "email".to_string()
            }
            .to_string()
        );
    }
}
