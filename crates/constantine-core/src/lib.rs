//! # constantine-core: Pure Business Logic for the Maison Constantine Storefront
//!
//! This crate contains the catalog, the cart pricing engine, the promotion
//! codes and the quote record, as pure code with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Storefront Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (SPA)                               │   │
//! │  │   Collection ──► Product page ──► Cart drawer ──► Quote form    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/storefront (commands)                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ constantine-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐   │   │
//! │  │  │ catalog │ │  money  │ │  cart   │ │promotion│ │  quote  │   │   │
//! │  │  └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO GLOBAL STATE                         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          constantine-quote (e-mail dispatch boundary)           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartLine, Category)
//! - [`money`] - Integer euro cents and basis-point discount rates
//! - [`catalog`] - The static collection, indexed by product id
//! - [`promotion`] - Promotion code table and outcomes
//! - [`cart`] - `CartService`, the pricing engine
//! - [`quote`] - Flat quote record for the e-mail template
//! - [`validation`] - Input validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Injected State**: a cart is an object you construct, never a global
//! 2. **No I/O**: network and file system access is FORBIDDEN here
//! 3. **Integer Money**: all amounts are euro cents, discounts are basis points
//! 4. **Graceful Degradation**: pricing never fails; bad input prices at zero
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use constantine_core::{CartService, Catalog, Money, PromotionTable};
//!
//! let mut cart = CartService::new(
//!     Arc::new(Catalog::builtin()),
//!     Arc::new(PromotionTable::builtin()),
//! );
//! cart.add_line("tee-heritage-noir", "M");
//! cart.add_line("tee-heritage-noir", "M");
//! assert_eq!(cart.subtotal(), Money::from_euros(90));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod promotion;
pub mod quote;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartLineView, CartService, CartState, CartTotals};
pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError, ValidationResult};
pub use money::{DiscountRate, Money};
pub use promotion::{ActivePromotion, PromotionOutcome, PromotionTable};
pub use quote::QuoteRecord;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Longest accepted e-mail address (RFC 5321 path limit).
pub const MAX_EMAIL_LEN: usize = 254;

/// Longest promotion code accepted from the input field.
pub const MAX_PROMO_CODE_LEN: usize = 32;
