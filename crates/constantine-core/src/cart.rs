//! # Cart Module
//!
//! The pricing engine: cart lines, subtotal, the single active promotion and
//! the discounted total.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  UI Action              CartService               CartState Change      │
//! │  ─────────              ───────────               ────────────────      │
//! │                                                                         │
//! │  "Ajouter au panier" ─► add_line(id, size) ─────► qty += 1 or push     │
//! │                                                                         │
//! │  Trash icon ──────────► remove_line(index) ─────► lines.remove(index)  │
//! │                                                                         │
//! │  "Appliquer" ─────────► apply_promotion(code) ──► promotion = Some/None│
//! │                                                                         │
//! │  Drawer footer ───────► totals() ───────────────► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Pricing
//! ```text
//! subtotal = Σ price(line.product_id) × line.quantity    (unknown id → 0)
//! total    = subtotal × (1 − discount)                   (rounded to cent)
//! ```
//!
//! ## Usage
//! ```rust
//! use std::sync::Arc;
//! use constantine_core::{Catalog, CartService, Money, PromotionTable};
//!
//! let mut cart = CartService::new(
//!     Arc::new(Catalog::builtin()),
//!     Arc::new(PromotionTable::builtin()),
//! );
//! cart.add_line("hoodie-atelier", "M");
//! assert!(cart.apply_promotion("ndrc20").is_applied());
//! assert_eq!(cart.total(), Money::from_euros(96));
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::money::{DiscountRate, Money};
use crate::promotion::{ActivePromotion, PromotionOutcome, PromotionTable};
use crate::types::{CartLine, ProductId, Size};

// =============================================================================
// Cart State
// =============================================================================

/// The data owned by one cart.
///
/// ## Invariants
/// - Lines are unique by `(product_id, size)`
/// - Every line has a quantity of at least 1
/// - At most one promotion is active
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    /// Lines in insertion order.
    pub lines: Vec<CartLine>,

    /// The active promotion, if any.
    pub promotion: Option<ActivePromotion>,

    /// When the cart was created or last cleared.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        CartState {
            lines: Vec::new(),
            promotion: None,
            created_at: Utc::now(),
        }
    }

    /// Current discount rate (zero when no promotion is active).
    pub fn discount_rate(&self) -> DiscountRate {
        self.promotion
            .as_ref()
            .map(|p| p.rate)
            .unwrap_or_default()
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Cart Service
// =============================================================================

/// Owns a `CartState` and prices it against an injected catalog and promotion
/// table.
///
/// There is no global cart: every session (or test) builds its own service.
#[derive(Debug, Clone)]
pub struct CartService {
    catalog: Arc<Catalog>,
    promotions: Arc<PromotionTable>,
    state: CartState,
}

impl CartService {
    /// Creates an empty cart priced against `catalog`.
    pub fn new(catalog: Arc<Catalog>, promotions: Arc<PromotionTable>) -> Self {
        CartService {
            catalog,
            promotions,
            state: CartState::new(),
        }
    }

    /// Restores a cart from a previously captured state.
    ///
    /// Lines sharing a `(product_id, size)` key are merged into the first
    /// one and lines with a zero quantity are dropped.
    pub fn with_state(
        catalog: Arc<Catalog>,
        promotions: Arc<PromotionTable>,
        mut state: CartState,
    ) -> Self {
        let captured = state.lines.len();
        state.lines = merge_lines(state.lines);
        if state.lines.len() != captured {
            debug!(captured, kept = state.lines.len(), "Normalized restored cart lines");
        }

        CartService {
            catalog,
            promotions,
            state,
        }
    }

    /// The catalog this cart is priced against.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Read-only view of the underlying state.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    // =========================================================================
    // Line Management
    // =========================================================================

    /// Adds one unit of `(product_id, size)`.
    ///
    /// ## Behavior
    /// - Existing line with the same key: quantity increases by 1
    /// - Otherwise: a new line with quantity 1 is appended
    ///
    /// Unknown product ids are accepted; such a line is worth nothing.
    pub fn add_line(&mut self, product_id: impl Into<ProductId>, size: impl Into<Size>) {
        let product_id = product_id.into();
        let size = size.into();

        if !self.catalog.contains(product_id.as_str()) {
            warn!(product_id = %product_id, "Adding cart line for a product missing from the catalog");
        }

        if let Some(line) = self
            .state
            .lines
            .iter_mut()
            .find(|l| l.has_key(&product_id, &size))
        {
            line.quantity += 1;
            debug!(product_id = %product_id, size = %size, quantity = line.quantity, "Cart line incremented");
            return;
        }

        debug!(product_id = %product_id, size = %size, "Cart line added");
        self.state.lines.push(CartLine::new(product_id, size));
    }

    /// Removes the line at `index`.
    ///
    /// Out-of-range indices are ignored. The other lines keep their order.
    pub fn remove_line(&mut self, index: usize) -> Option<CartLine> {
        if index >= self.state.lines.len() {
            debug!(index, len = self.state.lines.len(), "Ignoring out-of-range cart line removal");
            return None;
        }

        let removed = self.state.lines.remove(index);
        debug!(product_id = %removed.product_id, size = %removed.size, "Cart line removed");
        Some(removed)
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.state.lines
    }

    /// Lines joined with their catalog data, for display.
    pub fn line_views(&self) -> Vec<CartLineView> {
        self.state
            .lines
            .iter()
            .enumerate()
            .map(|(index, line)| {
                let product = self.catalog.get(line.product_id.as_str());
                let unit_price = product.map(|p| p.price()).unwrap_or_default();
                CartLineView {
                    index,
                    product_id: line.product_id.clone(),
                    product_name: product.map(|p| p.name.clone()),
                    primary_image: product.and_then(|p| p.primary_image()).map(str::to_string),
                    size: line.size.clone(),
                    quantity: line.quantity,
                    unit_price,
                    line_total: unit_price.multiply_quantity(line.quantity),
                }
            })
            .collect()
    }

    /// Number of distinct lines (the "Panier (n)" count).
    pub fn item_count(&self) -> usize {
        self.state.lines.len()
    }

    /// Total units across all lines (the navbar badge).
    pub fn total_quantity(&self) -> u32 {
        self.state.lines.iter().map(|l| l.quantity).sum()
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.state.lines.is_empty()
    }

    /// Empties the cart and drops the promotion.
    pub fn clear(&mut self) {
        self.state = CartState::new();
    }

    // =========================================================================
    // Promotion
    // =========================================================================

    /// Applies a promotion code.
    ///
    /// ## Behavior
    /// - Known code: becomes the only active promotion (replaces, never stacks)
    /// - Unknown code: active promotion is cleared and `Rejected` is returned
    pub fn apply_promotion(&mut self, code: &str) -> PromotionOutcome {
        match self.promotions.lookup(code) {
            Some(promo) => {
                debug!(code = %promo.code, rate = %promo.rate, "Promotion applied");
                self.state.promotion = Some(promo.clone());
                PromotionOutcome::Applied(promo)
            }
            None => {
                let code = crate::promotion::normalize_code(code);
                debug!(code = %code, "Promotion code rejected");
                self.state.promotion = None;
                PromotionOutcome::Rejected { code }
            }
        }
    }

    /// Drops the active promotion, if any.
    pub fn clear_promotion(&mut self) {
        self.state.promotion = None;
    }

    /// The active promotion.
    pub fn promotion(&self) -> Option<&ActivePromotion> {
        self.state.promotion.as_ref()
    }

    /// Current discount rate (zero without promotion).
    pub fn discount_rate(&self) -> DiscountRate {
        self.state.discount_rate()
    }

    // =========================================================================
    // Pricing
    // =========================================================================

    /// Sum of `price × quantity` over lines whose product exists.
    pub fn subtotal(&self) -> Money {
        self.state
            .lines
            .iter()
            .filter_map(|line| {
                self.catalog
                    .price_of(line.product_id.as_str())
                    .map(|price| price.multiply_quantity(line.quantity))
            })
            .sum()
    }

    /// `subtotal × (1 − discount)`, rounded to the cent.
    pub fn total(&self) -> Money {
        self.subtotal().apply_discount(self.discount_rate())
    }

    /// Amount taken off by the promotion (`subtotal − total`).
    pub fn discount_amount(&self) -> Money {
        self.subtotal().discount_portion(self.discount_rate())
    }

    /// Snapshot of every figure shown in the drawer footer.
    pub fn totals(&self) -> CartTotals {
        let subtotal = self.subtotal();
        let rate = self.discount_rate();
        let total = subtotal.apply_discount(rate);

        CartTotals {
            item_count: self.item_count(),
            total_quantity: self.total_quantity(),
            subtotal,
            discount_rate: rate,
            discount_amount: subtotal - total,
            total,
            promotion_code: self.promotion().map(|p| p.code.clone()),
        }
    }
}

/// Folds lines with the same key together, keeping first-seen order.
fn merge_lines(lines: Vec<CartLine>) -> Vec<CartLine> {
    let mut merged: Vec<CartLine> = Vec::with_capacity(lines.len());
    for line in lines.into_iter().filter(|l| l.quantity > 0) {
        match merged
            .iter_mut()
            .find(|l| l.has_key(&line.product_id, &line.size))
        {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
            None => merged.push(line),
        }
    }
    merged
}

// =============================================================================
// Views
// =============================================================================

/// A cart line joined with its catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    /// Position in the cart (the argument of `remove_line`).
    pub index: usize,
    pub product_id: ProductId,
    /// `None` when the product is missing from the catalog.
    pub product_name: Option<String>,
    pub primary_image: Option<String>,
    pub size: Size,
    pub quantity: u32,
    /// Zero for unknown products.
    pub unit_price: Money,
    pub line_total: Money,
}

impl CartLineView {
    /// Returns true if the line references a catalog product.
    pub fn is_resolved(&self) -> bool {
        self.product_name.is_some()
    }
}

/// Cart totals summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: u32,
    pub subtotal: Money,
    pub discount_rate: DiscountRate,
    pub discount_amount: Money,
    pub total: Money,
    pub promotion_code: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================
