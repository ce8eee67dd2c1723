//! # Quote Submission
//!
//! `QuoteDesk` turns the current cart into a quote e-mail.
//!
//! ## Submission Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Quote Submission                                 │
//! │                                                                         │
//! │  prepare(cart, email)            (synchronous, cart borrowed)           │
//! │     ├── cart empty?      ──► QuoteError::EmptyCart                      │
//! │     ├── email invalid?   ──► QuoteError::Validation                     │
//! │     └── snapshot ──► PreparedQuote { quote_id, record, total, promo }   │
//! │                                                                         │
//! │  dispatch(prepared).await        (cart NOT borrowed)                    │
//! │     ├── in_flight = true                                                │
//! │     ├── mailer.send(record).await                                       │
//! │     │      ├── Ok  ──► QuoteReceipt                                     │
//! │     │      └── Err ──► QuoteError::Delivery   (cart untouched)          │
//! │     └── in_flight = false        (on both paths)                        │
//! │                                                                         │
//! │  On success the caller clears the promotion if it is still the one      │
//! │  that was quoted; cart lines are kept.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Splitting prepare from dispatch lets a host holding the cart behind a
//! mutex release the lock before awaiting the network.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use constantine_core::validation::validate_email;
use constantine_core::{ActivePromotion, CartService, Money, QuoteRecord};
use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::error::{QuoteError, QuoteResult};
use crate::mailer::QuoteMailer;

// =============================================================================
// Prepared Quote & Receipt
// =============================================================================

/// A validated snapshot of the cart, ready to send.
#[derive(Debug, Clone)]
pub struct PreparedQuote {
    /// Id assigned to this request.
    pub quote_id: Uuid,
    /// The record handed to the mailer.
    pub record: QuoteRecord,
    /// Cart total at snapshot time.
    pub total: Money,
    /// Promotion the total was computed with.
    pub promotion: Option<ActivePromotion>,
}

/// Confirmation returned once the mail service accepted the quote.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteReceipt {
    pub quote_id: Uuid,
    pub to_email: String,
    pub total: Money,
    pub sent_at: DateTime<Utc>,
}

// =============================================================================
// Quote Desk
// =============================================================================

/// Validates, snapshots and dispatches quote requests.
pub struct QuoteDesk {
    mailer: Arc<dyn QuoteMailer>,
    notify_email: String,
    in_flight: AtomicBool,
}

impl QuoteDesk {
    /// Creates a desk sending through `mailer`, copying `notify_email` on every quote.
    pub fn new(mailer: Arc<dyn QuoteMailer>, notify_email: impl Into<String>) -> Self {
        QuoteDesk {
            mailer,
            notify_email: notify_email.into(),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Address copied on every quote.
    pub fn notify_email(&self) -> &str {
        &self.notify_email
    }

    /// Returns true while a dispatch is awaiting the mailer.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Checks the request and snapshots the cart. No network access.
    ///
    /// ## Errors
    /// - `QuoteError::EmptyCart` if the cart has no lines
    /// - `QuoteError::Validation` if `to_email` is not a usable address
    pub fn prepare(&self, cart: &CartService, to_email: &str) -> QuoteResult<PreparedQuote> {
        if cart.is_empty() {
            return Err(QuoteError::EmptyCart);
        }

        let to_email = validate_email(to_email)?;

        Ok(PreparedQuote {
            quote_id: Uuid::new_v4(),
            record: QuoteRecord::from_cart(cart, &to_email, &self.notify_email),
            total: cart.total(),
            promotion: cart.promotion().cloned(),
        })
    }

    /// Sends a prepared quote.
    ///
    /// ## Errors
    /// - `QuoteError::AlreadySending` if another dispatch is in progress
    /// - `QuoteError::Delivery` if the mailer failed
    pub async fn dispatch(&self, prepared: PreparedQuote) -> QuoteResult<QuoteReceipt> {
        let _guard = InFlight::acquire(&self.in_flight)?;

        let PreparedQuote {
            quote_id,
            record,
            total,
            ..
        } = prepared;

        match self.mailer.send(&record).await {
            Ok(()) => {
                info!(%quote_id, to = %record.to_email, total = %total, "Quote sent");
                Ok(QuoteReceipt {
                    quote_id,
                    to_email: record.to_email,
                    total,
                    sent_at: Utc::now(),
                })
            }
            Err(e) => {
                error!(%quote_id, error = %e, "Quote delivery failed");
                Err(QuoteError::Delivery(e.to_string()))
            }
        }
    }

    /// Prepares and dispatches in one call, for callers that own the cart.
    ///
    /// Clears the active promotion after a successful send.
    pub async fn submit(
        &self,
        cart: &mut CartService,
        to_email: &str,
    ) -> QuoteResult<QuoteReceipt> {
        let prepared = self.prepare(cart, to_email)?;
        let receipt = self.dispatch(prepared).await?;
        cart.clear_promotion();
        Ok(receipt)
    }
}

impl std::fmt::Debug for QuoteDesk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuoteDesk")
            .field("notify_email", &self.notify_email)
            .field("in_flight", &self.is_submitting())
            .finish()
    }
}

/// Holds the loading flag; resets it on drop.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> QuoteResult<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| QuoteError::AlreadySending)?;
        Ok(InFlight(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use constantine_core::{Catalog, PromotionTable};
    use tokio::sync::Notify;

    use super::*;
    use crate::mailer::RecordingMailer;

    fn cart() -> CartService {
        CartService::new(
            Arc::new(Catalog::builtin()),
            Arc::new(PromotionTable::builtin()),
        )
    }

    fn desk(mailer: Arc<RecordingMailer>) -> QuoteDesk {
        QuoteDesk::new(mailer, "contact@maisonconstantine.com")
    }

    #[tokio::test]
    async fn test_empty_cart_is_refused_before_sending() {
        let mailer = Arc::new(RecordingMailer::new());
        let desk = desk(mailer.clone());
        let mut cart = cart();

        let result = desk.submit(&mut cart, "client@example.com").await;
        assert!(matches!(result, Err(QuoteError::EmptyCart)));
        assert_eq!(mailer.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_email_is_refused_before_sending() {
        let mailer = Arc::new(RecordingMailer::new());
        let desk = desk(mailer.clone());
        let mut cart = cart();
        cart.add_line("hoodie-atelier", "M");

        for email in ["", "client", "client@example", "a b@example.com"] {
            let result = desk.submit(&mut cart, email).await;
            assert!(matches!(result, Err(QuoteError::Validation(_))), "{email}");
        }
        assert_eq!(mailer.sent_count(), 0);
    }

    #[tokio::test]
    async fn test_successful_submission() {
        let mailer = Arc::new(RecordingMailer::new());
        let desk = desk(mailer.clone());
        let mut cart = cart();
        cart.add_line("hoodie-atelier", "M");
        cart.apply_promotion("NDRC20");

        let receipt = desk.submit(&mut cart, " client@example.com ").await.unwrap();

        assert_eq!(receipt.to_email, "client@example.com");
        assert_eq!(receipt.total, Money::from_euros(96));
        assert!(!desk.is_submitting());

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].discount, "- 24.00€ (Code: NDRC20)");
        assert_eq!(sent[0].my_email, "contact@maisonconstantine.com");

        // Promotion reset, lines kept.
        assert!(cart.promotion().is_none());
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_prepare_snapshots_promotion() {
        let desk = desk(Arc::new(RecordingMailer::new()));
        let mut cart = cart();
        cart.add_line("hoodie-atelier", "M");

        let prepared = desk.prepare(&cart, "client@example.com").unwrap();
        assert!(prepared.promotion.is_none());

        cart.apply_promotion("ndrc20");
        let prepared = desk.prepare(&cart, "client@example.com").unwrap();
        assert_eq!(prepared.promotion.as_ref(), cart.promotion());
        assert_eq!(prepared.total, Money::from_euros(96));
    }

    #[tokio::test]
    async fn test_failed_submission_keeps_cart() {
        let mailer = Arc::new(RecordingMailer::failing());
        let desk = desk(mailer.clone());
        let mut cart = cart();
        cart.add_line("tee-heritage-noir", "S");
        cart.apply_promotion("INSTANTANIMAL");

        let result = desk.submit(&mut cart, "client@example.com").await;

        assert!(matches!(result, Err(QuoteError::Delivery(_))));
        assert!(!desk.is_submitting());
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.promotion().map(|p| p.code.as_str()), Some("INSTANTANIMAL"));

        // Retry once the service recovers.
        mailer.set_failing(false);
        assert!(desk.submit(&mut cart, "client@example.com").await.is_ok());
    }

    /// Mailer that blocks until released, to observe the loading flag.
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
    async fn test_loading_flag_while_dispatching() {
        let mailer = Arc::new(GatedMailer {
            entered: Notify::new(),
            release: Notify::new(),
        });
        let desk = Arc::new(QuoteDesk::new(mailer.clone(), "contact@maisonconstantine.com"));

        let mut cart = cart();
        cart.add_line("pull-maille-sable", "L");
        let first = desk.prepare(&cart, "client@example.com").unwrap();
        let second = desk.prepare(&cart, "client@example.com").unwrap();

        let task = {
            let desk = desk.clone();
            tokio::spawn(async move { desk.dispatch(first).await })
        };

        mailer.entered.notified().await;
        assert!(desk.is_submitting());
        assert!(matches!(
            desk.dispatch(second).await,
            Err(QuoteError::AlreadySending)
        ));

        mailer.release.notify_one();
        assert!(task.await.unwrap().is_ok());
        assert!(!desk.is_submitting());
    }
}
