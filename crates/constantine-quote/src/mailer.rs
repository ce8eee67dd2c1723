//! # Quote Mailers
//!
//! The seam between the storefront and the e-mail delivery service.
//!
//! ## Implementations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          QuoteMailer                                    │
//! │                                                                         │
//! │   EmailJsMailer                       RecordingMailer                   │
//! │   ─────────────                       ───────────────                   │
//! │   POST {endpoint}                     keeps every record in memory      │
//! │   {                                   can be told to fail               │
//! │     service_id, template_id,                                            │
//! │     user_id, template_params          used by tests and hosts running   │
//! │   }                                   without credentials               │
//! │   2xx = sent, anything else = error                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use constantine_core::QuoteRecord;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::MailConfig;
use crate::error::{QuoteError, QuoteResult};

/// Delivers a quote record to its recipients.
#[async_trait]
pub trait QuoteMailer: Send + Sync {
    /// Sends one quote. `Ok(())` means the service accepted it.
    async fn send(&self, record: &QuoteRecord) -> QuoteResult<()>;
}

// =============================================================================
// EmailJS
// =============================================================================

/// Body of an EmailJS `email/send` request.
#[derive(Debug, Serialize)]
struct EmailJsRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a QuoteRecord,
}

/// Sends quotes through the EmailJS REST API.
#[derive(Debug, Clone)]
pub struct EmailJsMailer {
    http: Client,
    endpoint: String,
    service_id: String,
    template_id: String,
    public_key: String,
}

impl EmailJsMailer {
    /// Creates a mailer from a validated configuration.
    ///
    /// ## Errors
    /// - `QuoteError::MissingCredential` if a credential is empty
    /// - `QuoteError::Http` if the HTTP client cannot be built
    pub fn new(config: &MailConfig) -> QuoteResult<Self> {
        let settings = &config.emailjs;

        if settings.service_id.is_empty() {
            return Err(QuoteError::MissingCredential("service_id"));
        }
        if settings.template_id.is_empty() {
            return Err(QuoteError::MissingCredential("template_id"));
        }
        if settings.public_key.is_empty() {
            return Err(QuoteError::MissingCredential("public_key"));
        }

        let http = Client::builder().timeout(config.timeout()).build()?;

        Ok(EmailJsMailer {
            http,
            endpoint: settings.endpoint.clone(),
            service_id: settings.service_id.clone(),
            template_id: settings.template_id.clone(),
            public_key: settings.public_key.clone(),
        })
    }

    /// The endpoint requests are POSTed to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl QuoteMailer for EmailJsMailer {
    async fn send(&self, record: &QuoteRecord) -> QuoteResult<()> {
        let body = EmailJsRequest {
            service_id: &self.service_id,
            template_id: &self.template_id,
            user_id: &self.public_key,
            template_params: record,
        };

        debug!(endpoint = %self.endpoint, to = %record.to_email, "Posting quote to EmailJS");

        let response = self.http.post(&self.endpoint).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, "EmailJS rejected the quote");

            return Err(QuoteError::Rejected {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(())
    }
}

// =============================================================================
// In-memory Mailer
// =============================================================================

/// Mailer that records quotes instead of sending them.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<QuoteRecord>>,
    fail: AtomicBool,
}

impl RecordingMailer {
    /// Creates a mailer that accepts every quote.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mailer that refuses every quote.
    pub fn failing() -> Self {
        let mailer = Self::default();
        mailer.set_failing(true);
        mailer
    }

    /// Switches failure mode on or off.
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Records accepted so far, oldest first.
    pub fn sent(&self) -> Vec<QuoteRecord> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of accepted records.
    pub fn sent_count(&self) -> usize {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl QuoteMailer for RecordingMailer {
    async fn send(&self, record: &QuoteRecord) -> QuoteResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(QuoteError::Rejected {
                status: 503,
                body: "recording mailer set to fail".to_string(),
            });
        }

        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> QuoteRecord {
        QuoteRecord {
            to_email: "client@example.com".to_string(),
            total: "96.00€".to_string(),
            subtotal: "120.00€".to_string(),
            discount: "- 24.00€ (Code: NDRC20)".to_string(),
            cart_details: "Hoodie Atelier (M) x1 - 120.00€".to_string(),
            my_email: "contact@maisonconstantine.com".to_string(),
        }
    }

    #[test]
    fn test_emailjs_requires_credentials() {
        let mut config = MailConfig::default();
        assert!(matches!(
            EmailJsMailer::new(&config),
            Err(QuoteError::MissingCredential("service_id"))
        ));

        config.emailjs.service_id = "svc".into();
        config.emailjs.template_id = "tpl".into();
        assert!(matches!(
            EmailJsMailer::new(&config),
            Err(QuoteError::MissingCredential("public_key"))
        ));

        config.emailjs.public_key = "key".into();
        let mailer = EmailJsMailer::new(&config).unwrap();
        assert_eq!(mailer.endpoint(), config.emailjs.endpoint);
    }

    #[test]
    fn test_request_body_shape() {
        let record = record();
        let body = EmailJsRequest {
            service_id: "svc",
            template_id: "tpl",
            user_id: "key",
            template_params: &record,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["service_id"], "svc");
        assert_eq!(json["user_id"], "key");
        assert_eq!(json["template_params"]["to_email"], "client@example.com");
        assert_eq!(json["template_params"]["discount"], "- 24.00€ (Code: NDRC20)");
    }

    #[tokio::test]
    async fn test_recording_mailer() {
        let mailer = RecordingMailer::new();
        mailer.send(&record()).await.unwrap();
        assert_eq!(mailer.sent_count(), 1);
        assert_eq!(mailer.sent()[0].total, "96.00€");

        mailer.set_failing(true);
        assert!(mailer.send(&record()).await.is_err());
        assert_eq!(mailer.sent_count(), 1);
    }
}
