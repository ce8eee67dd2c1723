//! # Cart Commands
//!
//! Commands behind the cart drawer.
//!
//! ## Drawer Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PANIER (2)                                                        ✕    │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  Hoodie Atelier          M    x1                    120.00€      🗑     │
//! │  Casquette Monogramme    TU   x2                     70.00€      🗑     │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  [ CODE PROMO        ] [ APPLIQUER ]                                    │
//! │  Sous-total                                          190.00€            │
//! │  Remise (NDRC20)                                    - 38.00€            │
//! │  TOTAL                                               152.00€            │
//! └─────────────────────────────────────────────────────────────────────────┘
//!
//! invoke('get_cart') → { lines: [...], totals: {...} }
//! ```

use constantine_core::validation::validate_promo_code_input;
use constantine_core::{CartLineView, CartService, CartTotals, Product, PromotionOutcome, Size};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::CartState;

/// Cart response including lines and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLineView>,
    pub totals: CartTotals,
}

impl From<&CartService> for CartResponse {
    fn from(cart: &CartService) -> Self {
        CartResponse {
            lines: cart.line_views(),
            totals: cart.totals(),
        }
    }
}

/// Result of the "Appliquer" button.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoResponse {
    pub outcome: PromotionOutcome,
    /// Set when the code was refused; the UI shows its message.
    pub notice: Option<ApiError>,
    pub cart: CartResponse,
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::from(c))
}

/// Adds one unit of a product in a size.
///
/// Same product and size increments the existing line.
///
/// ## Errors
/// `VALIDATION_ERROR` when a catalog product is out of stock or the size is
/// not one it offers. Ids missing from the catalog are passed through.
pub fn add_to_cart(
    cart: &CartState,
    product_id: &str,
    size: &str,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, size = %size, "add_to_cart command");
    cart.with_cart_mut(|c| {
        if let Some(product) = c.catalog().get(product_id) {
            ensure_orderable(product, size)?;
        }
        c.add_line(product_id, size);
        Ok(CartResponse::from(&*c))
    })
}

/// The "Ajouter au panier" button is only enabled for an in-stock product
/// with one of its sizes selected.
fn ensure_orderable(product: &Product, size: &str) -> Result<(), ApiError> {
    if !product.in_stock {
        return Err(ApiError::validation(format!(
            "Product is out of stock: {}",
            product.id
        )));
    }
    if size.trim().is_empty() {
        return Err(ApiError::validation(format!(
            "A size is required for {}",
            product.id
        )));
    }
    if !product.offers_size(&Size::from(size)) {
        return Err(ApiError::validation(format!(
            "Size {} is not available for {}",
            size, product.id
        )));
    }
    Ok(())
}

/// Removes the line at `index`. Out-of-range indices are ignored.
pub fn remove_from_cart(cart: &CartState, index: usize) -> CartResponse {
    debug!(index, "remove_from_cart command");
    cart.with_cart_mut(|c| {
        c.remove_line(index);
        CartResponse::from(&*c)
    })
}

/// Empties the cart.
pub fn clear_cart(cart: &CartState) -> CartResponse {
    debug!("clear_cart command");
    cart.with_cart_mut(|c| {
        c.clear();
        CartResponse::from(&*c)
    })
}

/// Applies a promotion code.
///
/// ## Behavior
/// - Known code: replaces any active promotion
/// - Unknown code: discount drops to zero and `notice` carries
///   "Code promo invalide"
///
/// ## Errors
/// `VALIDATION_ERROR` only for absurdly long input.
pub fn apply_promo_code(cart: &CartState, code: &str) -> Result<PromoResponse, ApiError> {
    debug!(code = %code, "apply_promo_code command");
    validate_promo_code_input(code)?;

    let (outcome, cart) = cart.with_cart_mut(|c| {
        let outcome = c.apply_promotion(code);
        (outcome, CartResponse::from(&*c))
    });

    let notice = if outcome.is_applied() {
        info!(code = ?cart.totals.promotion_code, "Promotion code accepted");
        None
    } else {
        Some(ApiError::invalid_promo_code())
    };

    Ok(PromoResponse {
        outcome,
        notice,
        cart,
    })
}
