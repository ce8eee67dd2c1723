//! # Maison Constantine Storefront Library
//!
//! Host layer between the storefront UI and the business crates.
//!
//! ## Module Organization
//! ```text
//! constantine_storefront/
//! ├── lib.rs          ◄─── You are here (bootstrap & logging)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── catalog.rs  ◄─── Catalog + promotion table
//! │   ├── cart.rs     ◄─── Session cart behind a mutex
//! │   ├── quote.rs    ◄─── Quote desk and loading flag
//! │   └── config.rs   ◄─── UI configuration
//! ├── commands/
//! │   ├── catalog.rs  ◄─── list_products, get_product
//! │   ├── cart.rs     ◄─── get_cart, add_to_cart, apply_promo_code, ...
//! │   ├── quote.rs    ◄─── request_quote, quote_status
//! │   └── config.rs   ◄─── get_config
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Storefront Startup                                │
//! │                                                                         │
//! │  1. init_logging() ───────────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter                                │
//! │     • Default: info,constantine=debug; override with RUST_LOG           │
//! │                                                                         │
//! │  2. MailConfig::load ─────────────────────────────────────────────────► │
//! │     • defaults <- storefront.toml <- CONSTANTINE_* env vars             │
//! │                                                                         │
//! │  3. Catalog ──────────────────────────────────────────────────────────► │
//! │     • built-in collection, or CONSTANTINE_CATALOG_PATH (JSON)           │
//! │                                                                         │
//! │  4. Mailer ───────────────────────────────────────────────────────────► │
//! │     • EmailJsMailer when credentials are set                            │
//! │     • RecordingMailer otherwise (quotes stay in memory)                 │
//! │                                                                         │
//! │  5. State objects ────────────────────────────────────────────────────► │
//! │     • CatalogState, CartState, QuoteState, ConfigState                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;
use std::sync::Arc;

use constantine_quote::{EmailJsMailer, MailConfig, QuoteMailer, RecordingMailer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use error::StartupError;
use state::{CartState, CatalogState, ConfigState, QuoteState};

/// Environment variable pointing at an alternative catalog JSON file.
pub const CATALOG_PATH_ENV: &str = "CONSTANTINE_CATALOG_PATH";

/// Environment variable pointing at the mail config file.
pub const CONFIG_PATH_ENV: &str = "CONSTANTINE_CONFIG_PATH";

/// All session state, ready to be handed to command handlers.
#[derive(Debug, Clone)]
pub struct Storefront {
    pub catalog: CatalogState,
    pub cart: CartState,
    pub quote: QuoteState,
    pub config: ConfigState,
}

impl Storefront {
    /// Builds the state around the built-in collection.
    pub fn bootstrap(mail: &MailConfig, mailer: Arc<dyn QuoteMailer>) -> Self {
        Self::with_catalog(CatalogState::builtin(), mail, mailer)
    }

    /// Builds the state around a given collection.
    pub fn with_catalog(
        catalog: CatalogState,
        mail: &MailConfig,
        mailer: Arc<dyn QuoteMailer>,
    ) -> Self {
        let cart = CartState::new(catalog.catalog_arc(), catalog.promotions_arc());
        let quote = QuoteState::new(mailer, mail.notify_email.clone());
        let config = ConfigState::from_mail_config(mail);

        info!(
            products = catalog.catalog().len(),
            delivery = ?config.quote_delivery,
            "Storefront state initialized"
        );

        Storefront {
            catalog,
            cart,
            quote,
            config,
        }
    }

    /// Builds the storefront from the config file and environment.
    pub fn from_env() -> Result<Self, StartupError> {
        let config_path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        let mail = MailConfig::load(config_path)?;

        let catalog = match std::env::var_os(CATALOG_PATH_ENV) {
            Some(path) => CatalogState::from_file(&PathBuf::from(path))?,
            None => CatalogState::builtin(),
        };

        let mailer = mailer_for(&mail)?;
        Ok(Self::with_catalog(catalog, &mail, mailer))
    }
}

/// Picks the mailer matching the configuration.
pub fn mailer_for(mail: &MailConfig) -> Result<Arc<dyn QuoteMailer>, StartupError> {
    if mail.emailjs.has_credentials() {
        Ok(Arc::new(EmailJsMailer::new(mail)?))
    } else {
        warn!("EmailJS credentials not configured; quotes will not leave this process");
        Ok(Arc::new(RecordingMailer::new()))
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=constantine=trace` - Show trace for constantine crates only
/// - Default: `info,constantine=debug`
///
/// Calling it again once a subscriber is installed has no effect.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,constantine=debug"));

    if tracing_subscriber::fmt().with_env_filter(filter).try_init().is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
