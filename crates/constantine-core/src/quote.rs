//! # Quote Record
//!
//! Flattens a cart into the key/value record handed to the e-mail template.
//!
//! ## Record Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  to_email      client@example.com                                      │
//! │  total         96.00€                                                  │
//! │  subtotal      120.00€                                                 │
//! │  discount      - 24.00€ (Code: NDRC20)      or   "Aucune remise"       │
//! │  cart_details  Hoodie Atelier (M) x1 - 120.00€                         │
//! │                Casquette Monogramme (TU) x2 - 35.00€                   │
//! │  my_email      contact@maisonconstantine.com                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names are the template variables, so they stay snake_case on the wire.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartService;

/// Discount line when no promotion is active.
pub const NO_DISCOUNT_LABEL: &str = "Aucune remise";

/// Name used on the quote for lines whose product is missing from the catalog.
pub const UNKNOWN_PRODUCT_LABEL: &str = "Article inconnu";

/// The flat record sent to the e-mail collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuoteRecord {
    /// Destination address.
    pub to_email: String,
    /// Formatted total, e.g. `"96.00€"`.
    pub total: String,
    /// Formatted subtotal.
    pub subtotal: String,
    /// Formatted discount line or [`NO_DISCOUNT_LABEL`].
    pub discount: String,
    /// One `"{name} ({size}) x{qty} - {unit price}"` entry per line, newline-joined.
    pub cart_details: String,
    /// Address notified of every quote request.
    pub my_email: String,
}

impl QuoteRecord {
    /// Builds the record from the cart's current state.
    ///
    /// The caller is responsible for validating `to_email` beforehand.
    pub fn from_cart(cart: &CartService, to_email: &str, notify_email: &str) -> Self {
        let totals = cart.totals();

        let discount = match cart.promotion() {
            Some(promo) if !promo.rate.is_zero() => {
                format!("- {} (Code: {})", totals.discount_amount, promo.code)
            }
            _ => NO_DISCOUNT_LABEL.to_string(),
        };

        let cart_details = cart
            .line_views()
            .iter()
            .map(|line| {
                format!(
                    "{} ({}) x{} - {}",
                    line.product_name.as_deref().unwrap_or(UNKNOWN_PRODUCT_LABEL),
                    line.size,
                    line.quantity,
                    line.unit_price
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        QuoteRecord {
            to_email: to_email.to_string(),
            total: totals.total.to_string(),
            subtotal: totals.subtotal.to_string(),
            discount,
            cart_details,
            my_email: notify_email.to_string(),
        }
    }

    /// The record as ordered `(key, value)` pairs.
    pub fn fields(&self) -> [(&'static str, &str); 6] {
        [
            ("to_email", self.to_email.as_str()),
            ("total", self.total.as_str()),
            ("subtotal", self.subtotal.as_str()),
            ("discount", self.discount.as_str()),
            ("cart_details", self.cart_details.as_str()),
            ("my_email", self.my_email.as_str()),
        ]
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::catalog::Catalog;
    use crate::promotion::PromotionTable;

    fn cart() -> CartService {
        CartService::new(
            Arc::new(Catalog::builtin()),
            Arc::new(PromotionTable::builtin()),
        )
    }

    #[test]
    fn test_record_without_discount() {
        let mut cart = cart();
        cart.add_line("hoodie-atelier", "M");
        cart.add_line("casquette-monogramme", "TU");
        cart.add_line("casquette-monogramme", "TU");

        let record = QuoteRecord::from_cart(&cart, "client@example.com", "contact@maison.fr");

        assert_eq!(record.to_email, "client@example.com");
        assert_eq!(record.subtotal, "190.00€");
        assert_eq!(record.total, "190.00€");
        assert_eq!(record.discount, NO_DISCOUNT_LABEL);
        assert_eq!(
            record.cart_details,
            "Hoodie Atelier (M) x1 - 120.00€\nCasquette Monogramme (TU) x2 - 35.00€"
        );
        assert_eq!(record.my_email, "contact@maison.fr");
    }

    #[test]
    fn test_record_with_discount() {
        let mut cart = cart();
        cart.add_line("hoodie-atelier", "L");
        cart.apply_promotion("ndrc20");

        let record = QuoteRecord::from_cart(&cart, "client@example.com", "contact@maison.fr");

        assert_eq!(record.subtotal, "120.00€");
        assert_eq!(record.total, "96.00€");
        assert_eq!(record.discount, "- 24.00€ (Code: NDRC20)");
    }

    #[test]
    fn test_unknown_product_line() {
        let mut cart = cart();
        cart.add_line("ghost", "M");

        let record = QuoteRecord::from_cart(&cart, "client@example.com", "contact@maison.fr");
        assert_eq!(record.cart_details, "Article inconnu (M) x1 - 0.00€");
        assert_eq!(record.total, "0.00€");
    }

    #[test]
    fn test_serializes_with_template_keys() {
        let mut cart = cart();
        cart.add_line("tee-heritage-noir", "S");
        let record = QuoteRecord::from_cart(&cart, "client@example.com", "contact@maison.fr");

        let json = serde_json::to_value(&record).unwrap();
        for (key, value) in record.fields() {
            assert_eq!(json[key], value);
        }
    }
}
