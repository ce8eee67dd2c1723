//! # Quote Commands
//!
//! The "Demander un devis" form at the bottom of the cart drawer.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  request_quote(email)                                                   │
//! │     │                                                                   │
//! │     ├── lock cart ──► QuoteDesk::prepare ──► unlock                     │
//! │     │                                                                   │
//! │     ├── QuoteDesk::dispatch(...).await      (no lock held)              │
//! │     │        │                                                          │
//! │     │        ├── Ok  ──► lock cart ──► clear quoted promotion ──► receipt│
//! │     │        └── Err ──► DELIVERY_FAILED, cart untouched                │
//! │     │                                                                   │
//! │     └── quote_status() reports the loading flag meanwhile               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use constantine_quote::QuoteReceipt;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{CartState, QuoteState};

/// Loading state of the quote form.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteStatus {
    pub submitting: bool,
}

/// Sends the current cart as a quote to `email`.
///
/// ## Errors
/// - `EMPTY_CART` / `VALIDATION_ERROR` before anything is sent
/// - `QUOTE_IN_PROGRESS` if another request is pending
/// - `DELIVERY_FAILED` if the e-mail service failed; the cart is kept
///
/// On success the promotion that was quoted is cleared. A code applied while
/// the e-mail was in flight stays active.
pub async fn request_quote(
    cart: &CartState,
    quote: &QuoteState,
    email: &str,
) -> Result<QuoteReceipt, ApiError> {
    debug!("request_quote command");

    let prepared = cart.with_cart(|c| quote.desk().prepare(c, email))?;
    let quoted = prepared.promotion.clone();
    let receipt = quote.desk().dispatch(prepared).await?;

    // A code applied while the e-mail was in flight was not quoted; keep it.
    cart.with_cart_mut(|c| {
        if c.promotion() == quoted.as_ref() {
            c.clear_promotion();
        } else {
            debug!(quote_id = %receipt.quote_id, "Promotion changed during dispatch; kept");
        }
    });
    info!(quote_id = %receipt.quote_id, "Quote request completed");

    Ok(receipt)
}

/// Reports whether a quote is being sent.
pub fn quote_status(quote: &QuoteState) -> QuoteStatus {
    QuoteStatus {
        submitting: quote.is_submitting(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use constantine_core::{Money, QuoteRecord};
    use constantine_quote::{QuoteMailer, QuoteResult, RecordingMailer};
    use tokio::sync::Notify;

    use super::*;
    use crate::commands::cart::{add_to_cart, apply_promo_code, get_cart};
    use crate::error::{ErrorCode, DELIVERY_FAILED_MESSAGE};
    use crate::state::CatalogState;

    fn setup(mailer: Arc<dyn QuoteMailer>) -> (CartState, QuoteState) {
        let catalog = CatalogState::builtin();
        let cart = CartState::new(catalog.catalog_arc(), catalog.promotions_arc());
        let quote = QuoteState::new(mailer, "contact@maisonconstantine.com");
        (cart, quote)
    }

    #[tokio::test]
    async fn test_request_quote_success() {
        let mailer = Arc::new(RecordingMailer::new());
        let (cart, quote) = setup(mailer.clone());
        add_to_cart(&cart, "hoodie-atelier", "M").unwrap();
        apply_promo_code(&cart, "NDRC20").unwrap();

        let receipt = request_quote(&cart, &quote, "client@example.com")
            .await
            .unwrap();

        assert_eq!(receipt.total, Money::from_euros(96));
        assert_eq!(mailer.sent()[0].total, "96.00€");

        let after = get_cart(&cart);
        assert_eq!(after.lines.len(), 1);
        assert!(after.totals.promotion_code.is_none());
        assert!(!quote_status(&quote).submitting);
    }

    #[tokio::test]
    async fn test_request_quote_failure_keeps_cart() {
        let mailer = Arc::new(RecordingMailer::failing());
        let (cart, quote) = setup(mailer.clone());
        add_to_cart(&cart, "hoodie-atelier", "M").unwrap();
        apply_promo_code(&cart, "NDRC20").unwrap();

        let err = request_quote(&cart, &quote, "client@example.com")
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::DeliveryFailed);
        assert_eq!(err.message, DELIVERY_FAILED_MESSAGE);
        assert!(!quote_status(&quote).submitting);

        let after = get_cart(&cart);
        assert_eq!(after.lines.len(), 1);
        assert_eq!(after.totals.promotion_code.as_deref(), Some("NDRC20"));
        assert_eq!(mailer.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_request_quote_rejects_bad_input() {
        let mailer = Arc::new(RecordingMailer::new());
        let (cart, quote) = setup(mailer.clone());

        let err = request_quote(&cart, &quote, "client@example.com")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyCart);

        add_to_cart(&cart, "tee-heritage-noir", "M").unwrap();
        let err = request_quote(&cart, &quote, "pas-un-email").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert_eq!(mailer.sent_count(), 0);
    }

    /// Mailer that holds the send until released.
    struct GatedMailer {
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl QuoteMailer for GatedMailer {
        async fn send(&self, _record: &QuoteRecord) -> QuoteResult<()> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_promotion_applied_during_dispatch_is_kept() {
        let mailer = Arc::new(GatedMailer {
            entered: Notify::new(),
            release: Notify::new(),
        });
        let (cart, quote) = setup(mailer.clone());
        add_to_cart(&cart, "hoodie-atelier", "M").unwrap();
        apply_promo_code(&cart, "NDRC20").unwrap();

        let task = {
            let (cart, quote) = (cart.clone(), quote.clone());
            tokio::spawn(async move { request_quote(&cart, &quote, "client@example.com").await })
        };

        mailer.entered.notified().await;
        assert!(quote_status(&quote).submitting);
        apply_promo_code(&cart, "INSTANTANIMAL").unwrap();

        mailer.release.notify_one();
        let receipt = task.await.unwrap().unwrap();
        assert_eq!(receipt.total, Money::from_euros(96));

        let after = get_cart(&cart);
        assert_eq!(after.totals.promotion_code.as_deref(), Some("INSTANTANIMAL"));
        assert_eq!(after.totals.total, Money::from_cents(120));
    }

    #[tokio::test]
    async fn test_promotion_applied_after_unpromoted_quote_is_kept() {
        let mailer = Arc::new(GatedMailer {
            entered: Notify::new(),
            release: Notify::new(),
        });
        let (cart, quote) = setup(mailer.clone());
        add_to_cart(&cart, "tee-heritage-noir", "L").unwrap();

        let task = {
            let (cart, quote) = (cart.clone(), quote.clone());
            tokio::spawn(async move { request_quote(&cart, &quote, "client@example.com").await })
        };

        mailer.entered.notified().await;
        apply_promo_code(&cart, "ndrc20").unwrap();
        mailer.release.notify_one();
        task.await.unwrap().unwrap();

        assert_eq!(get_cart(&cart).totals.promotion_code.as_deref(), Some("NDRC20"));
    }
}
