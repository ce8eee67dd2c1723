//! # Cart State
//!
//! Holds the session's cart.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Shopper Action           Command                 Cart State Change     │
//! │  ──────────────           ───────                 ─────────────────     │
//! │                                                                         │
//! │  "Ajouter au panier" ────► add_to_cart() ───────► add_line(id, size)   │
//! │                                                                         │
//! │  Trash icon ─────────────► remove_from_cart() ──► remove_line(i)       │
//! │                                                                         │
//! │  "Appliquer" ────────────► apply_promo_code() ──► apply_promotion()    │
//! │                                                                         │
//! │  Open drawer ────────────► get_cart() ──────────► (read only)          │
//! │                                                                         │
//! │  NOTE: The lock is released before request_quote awaits the network.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use constantine_core::{CartService, Catalog, PromotionTable};

/// Session cart shared between commands.
///
/// A poisoned lock is recovered: every `CartService` method leaves the
/// cart consistent even if a caller's closure panics afterwards.
#[derive(Debug, Clone)]
pub struct CartState {
    cart: Arc<Mutex<CartService>>,
}

impl CartState {
    /// Creates an empty cart priced against `catalog` and `promotions`.
    pub fn new(catalog: Arc<Catalog>, promotions: Arc<PromotionTable>) -> Self {
        CartState {
            cart: Arc::new(Mutex::new(CartService::new(catalog, promotions))),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = cart_state.with_cart(|cart| cart.totals());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartService) -> R,
    {
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|cart| cart.add_line("hoodie-atelier", "M"));
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartService) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }
}
