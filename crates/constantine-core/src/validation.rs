//! # Validation Module
//!
//! Input validation utilities for the storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── <input type="email" required>                                     │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Storefront command (Rust)                                    │
//! │  └── THIS MODULE: e-mail, catalog entries, promotion table             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use constantine_core::validation::validate_email;
//!
//! assert_eq!(validate_email("  client@example.com ").unwrap(), "client@example.com");
//! assert!(validate_email("not-an-email").is_err());
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::money::BPS_PER_UNIT;
use crate::types::Product;
use crate::{MAX_EMAIL_LEN, MAX_PROMO_CODE_LEN};

// =============================================================================
// String Validators
// =============================================================================

/// Validates the destination address of a quote.
///
/// ## Rules
/// - Must not be empty
/// - At most 254 characters
/// - Exactly one `@`, a non-empty local part, and a dot inside the domain
/// - No whitespace
///
/// ## Returns
/// The trimmed address.
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if email.len() > MAX_EMAIL_LEN {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: MAX_EMAIL_LEN,
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("missing '@'"))?;

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must be of the form name@domain"));
    }

    let domain_ok = domain
        .split_once('.')
        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'));
    if !domain_ok {
        return Err(invalid("domain must contain a dot"));
    }

    Ok(email.to_string())
}

/// Validates a promotion code as typed by the user.
///
/// Empty codes are allowed (they are simply rejected by the promotion table);
/// only absurdly long input is refused.
pub fn validate_promo_code_input(code: &str) -> ValidationResult<()> {
    if code.trim().len() > MAX_PROMO_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "promo code".to_string(),
            max: MAX_PROMO_CODE_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a promotion discount in basis points.
///
/// ## Rules
/// - Must be in `[0, 10000)`: 100% off is not a promotion
pub fn validate_discount_bps(bps: u32) -> ValidationResult<()> {
    if bps >= BPS_PER_UNIT {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: i64::from(BPS_PER_UNIT) - 1,
        });
    }

    Ok(())
}

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates a catalog entry before it is indexed.
///
/// ## Rules
/// - Id and name must not be empty
/// - Price must be non-negative
/// - At least one size and one image (the product page needs both)
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    if product.id.as_str().trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product id".to_string(),
        });
    }

    if product.name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: format!("name of product {}", product.id),
        });
    }

    if product.price_cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: format!("price of product {}", product.id),
            min: 0,
            max: i64::MAX,
        });
    }

    if product.sizes.is_empty() {
        return Err(ValidationError::Required {
            field: format!("sizes of product {}", product.id),
        });
    }

    if product.images.is_empty() {
        return Err(ValidationError::Required {
            field: format!("images of product {}", product.id),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
