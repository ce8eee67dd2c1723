//! # constantine-quote: Quote Dispatch
//!
//! Sends the quote e-mail that stands in for checkout on the storefront.
//!
//! ## Request Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   CartService ──► QuoteDesk::prepare ──► PreparedQuote                  │
//! │                                              │                          │
//! │                                              ▼                          │
//! │                       QuoteDesk::dispatch ──► dyn QuoteMailer           │
//! │                                              │                          │
//! │                        ┌─────────────────────┴───────────┐              │
//! │                        ▼                                 ▼              │
//! │                  EmailJsMailer                    RecordingMailer       │
//! │               (HTTPS, reqwest)                 (in-memory, tests)       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`config`] - `MailConfig` (defaults, TOML file, environment)
//! - [`mailer`] - `QuoteMailer` trait and implementations
//! - [`submission`] - `QuoteDesk`, the submission orchestrator
//! - [`error`] - `QuoteError`

pub mod config;
pub mod error;
pub mod mailer;
pub mod submission;

pub use config::{EmailJsSettings, MailConfig};
pub use error::{QuoteError, QuoteResult};
pub use mailer::{EmailJsMailer, QuoteMailer, RecordingMailer};
pub use submission::{PreparedQuote, QuoteDesk, QuoteReceipt};
