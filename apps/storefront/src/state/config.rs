//! # Configuration State
//!
//! Storefront settings exposed to the UI.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`CONSTANTINE_*`)
//! 2. Config file (`storefront.toml`)
//! 3. Defaults (this file and `constantine_quote::config`)
//!
//! Read-only after initialization, so no mutex needed.

use constantine_quote::MailConfig;
use serde::{Deserialize, Serialize};

/// Brand name shown in the header and on quotes.
pub const STORE_NAME: &str = "MAISON CONSTANTINE";

/// How quotes leave the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteDelivery {
    /// Sent through EmailJS.
    EmailJs,

    /// Kept in memory; no credentials configured.
    Offline,
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Brand name
    pub store_name: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol, written after the amount
    pub currency_symbol: String,

    /// Address copied on every quote
    pub notify_email: String,

    /// Active quote delivery
    pub quote_delivery: QuoteDelivery,
}

impl ConfigState {
    /// Derives the UI configuration from the mail settings.
    pub fn from_mail_config(mail: &MailConfig) -> Self {
        let quote_delivery = if mail.emailjs.has_credentials() {
            QuoteDelivery::EmailJs
        } else {
            QuoteDelivery::Offline
        };

        ConfigState {
            notify_email: mail.notify_email.clone(),
            quote_delivery,
            ..Self::default()
        }
    }
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            store_name: STORE_NAME.to_string(),
            currency_code: "EUR".to_string(),
            currency_symbol: "€".to_string(),
            notify_email: constantine_quote::config::DEFAULT_NOTIFY_EMAIL.to_string(),
            quote_delivery: QuoteDelivery::Offline,
        }
    }
}
