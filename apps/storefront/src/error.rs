//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  UI host                     Rust Backend                               │
//! │  ───────                     ────────────                               │
//! │                                                                         │
//! │  invoke('request_quote')                                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Core Error? ──── CoreError::ProductNotFound ──────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Quote Error? ─── QuoteError::Delivery ───────── ApiError ─────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  catch (e) {                                                            │
//! │    // e.code    = "DELIVERY_FAILED"                                     │
//! │    // e.message = "Une erreur est survenue lors de l'envoi."            │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Messages are French because they are shown to shoppers as-is.

use constantine_core::promotion::INVALID_CODE_MESSAGE;
use constantine_core::{CoreError, ValidationError};
use constantine_quote::QuoteError;
use serde::Serialize;
use thiserror::Error;

/// Shown when the quote e-mail could not be sent.
pub const DELIVERY_FAILED_MESSAGE: &str = "Une erreur est survenue lors de l'envoi.";

/// Shown when a quote is requested for an empty cart.
pub const EMPTY_CART_MESSAGE: &str = "Votre panier est vide.";

/// Shown when a second quote is requested while one is being sent.
pub const QUOTE_IN_PROGRESS_MESSAGE: &str = "Envoi en cours, veuillez patienter.";

/// API error returned from storefront commands.
///
/// ## Serialization
/// This is what the UI receives when a command fails:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: hoodie-atelier"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Promotion code not recognized
    InvalidPromoCode,

    /// Quote requested for an empty cart
    EmptyCart,

    /// A quote is already being sent
    QuoteInProgress,

    /// The quote e-mail could not be sent
    DeliveryFailed,

    /// Internal error
    InternalError,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InternalError, message)
    }

    /// The notice shown when a promotion code is refused.
    pub fn invalid_promo_code() -> Self {
        ApiError::new(ErrorCode::InvalidPromoCode, INVALID_CODE_MESSAGE)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::DuplicateProduct(id) => {
                ApiError::validation(format!("Duplicate product id: {}", id))
            }
            CoreError::InvalidCatalog(e) => {
                tracing::error!("Catalog could not be parsed: {}", e);
                ApiError::internal("Catalog unavailable")
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts quote errors to API errors.
///
/// Delivery details are logged, never shown to the shopper.
impl From<QuoteError> for ApiError {
    fn from(err: QuoteError) -> Self {
        match err {
            QuoteError::EmptyCart => ApiError::new(ErrorCode::EmptyCart, EMPTY_CART_MESSAGE),
            QuoteError::Validation(e) => ApiError::validation(e.to_string()),
            QuoteError::AlreadySending => {
                ApiError::new(ErrorCode::QuoteInProgress, QUOTE_IN_PROGRESS_MESSAGE)
            }
            e @ (QuoteError::Http(_) | QuoteError::Rejected { .. } | QuoteError::Delivery(_)) => {
                tracing::error!("Quote delivery failed: {}", e);
                ApiError::new(ErrorCode::DeliveryFailed, DELIVERY_FAILED_MESSAGE)
            }
            e @ (QuoteError::InvalidConfig(_)
            | QuoteError::ConfigLoadFailed(_)
            | QuoteError::MissingCredential(_)) => {
                tracing::error!("Mail configuration error: {}", e);
                ApiError::internal("Quote service misconfigured")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Startup Errors
// =============================================================================

/// Failures while building the storefront at startup.
#[derive(Debug, Error)]
pub enum StartupError {
    /// Mail configuration could not be loaded.
    #[error("mail configuration: {0}")]
    Config(#[from] QuoteError),

    /// The catalog file is invalid.
    #[error("catalog: {0}")]
    Catalog(#[from] CoreError),

    /// The catalog file could not be read.
    #[error("reading catalog file: {0}")]
    Io(#[from] std::io::Error),
}
