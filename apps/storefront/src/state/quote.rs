//! # Quote State
//!
//! Owns the `QuoteDesk`. Its loading flag backs the "Envoi..." button state.

use std::sync::Arc;

use constantine_quote::{QuoteDesk, QuoteMailer};

/// Shared quote desk.
#[derive(Debug, Clone)]
pub struct QuoteState {
    desk: Arc<QuoteDesk>,
}

impl QuoteState {
    /// Creates the desk around `mailer`.
    pub fn new(mailer: Arc<dyn QuoteMailer>, notify_email: impl Into<String>) -> Self {
        QuoteState {
            desk: Arc::new(QuoteDesk::new(mailer, notify_email)),
        }
    }

    pub fn desk(&self) -> &QuoteDesk {
        &self.desk
    }

    /// Returns true while a quote e-mail is being sent.
    pub fn is_submitting(&self) -> bool {
        self.desk.is_submitting()
    }
}
