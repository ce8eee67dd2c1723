//! # Mail Configuration
//!
//! Settings for the quote delivery service.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     CONSTANTINE_EMAILJS_SERVICE_ID=service_abc                         │
//! │     CONSTANTINE_NOTIFY_EMAIL=contact@maisonconstantine.com             │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │     ~/Library/Application Support/com.maisonconstantine.storefront/    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     public EmailJS endpoint, empty credentials, 15s timeout            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! notify_email = "contact@maisonconstantine.com"
//! timeout_secs = 15
//!
//! [emailjs]
//! service_id = "service_abc"
//! template_id = "template_quote"
//! public_key = "pk_live_..."
//! ```

use std::path::PathBuf;
use std::time::Duration;

use constantine_core::validation::validate_email;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{QuoteError, QuoteResult};

/// Public EmailJS REST endpoint.
pub const DEFAULT_EMAILJS_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Address that receives a copy of every quote request.
pub const DEFAULT_NOTIFY_EMAIL: &str = "contact@maisonconstantine.com";

// =============================================================================
// EmailJS Settings
// =============================================================================

/// Credentials and endpoint for the EmailJS REST API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailJsSettings {
    /// REST endpoint the quote is POSTed to.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// EmailJS service id.
    #[serde(default)]
    pub service_id: String,

    /// EmailJS template id. The template receives the quote record fields.
    #[serde(default)]
    pub template_id: String,

    /// EmailJS public key (sent as `user_id`).
    #[serde(default)]
    pub public_key: String,
}

fn default_endpoint() -> String {
    DEFAULT_EMAILJS_ENDPOINT.to_string()
}

impl Default for EmailJsSettings {
    fn default() -> Self {
        EmailJsSettings {
            endpoint: default_endpoint(),
            service_id: String::new(),
            template_id: String::new(),
            public_key: String::new(),
        }
    }
}

impl EmailJsSettings {
    /// Returns true once all three credentials are filled in.
    pub fn has_credentials(&self) -> bool {
        !self.service_id.is_empty() && !self.template_id.is_empty() && !self.public_key.is_empty()
    }
}

// =============================================================================
// Main Mail Configuration
// =============================================================================

/// Complete mail configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// EmailJS endpoint and credentials.
    #[serde(default)]
    pub emailjs: EmailJsSettings,

    /// Copy address written into every quote (`my_email`).
    #[serde(default = "default_notify_email")]
    pub notify_email: String,

    /// HTTP request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_notify_email() -> String {
    DEFAULT_NOTIFY_EMAIL.to_string()
}

fn default_timeout() -> u64 {
    15
}

impl Default for MailConfig {
    fn default() -> Self {
        MailConfig {
            emailjs: EmailJsSettings::default(),
            notify_email: default_notify_email(),
            timeout_secs: default_timeout(),
        }
    }
}

impl MailConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> QuoteResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading mail config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides_from(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load mail config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    ///
    /// Credentials may be empty here; hosts without them use an offline mailer.
    pub fn validate(&self) -> QuoteResult<()> {
        let endpoint = &self.emailjs.endpoint;
        if !endpoint.starts_with("https://") && !endpoint.starts_with("http://") {
            return Err(QuoteError::InvalidConfig(format!(
                "EmailJS endpoint must start with http:// or https://, got: '{}'",
                endpoint
            )));
        }

        if self.timeout_secs == 0 {
            return Err(QuoteError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        validate_email(&self.notify_email)
            .map_err(|e| QuoteError::InvalidConfig(format!("notify_email: {}", e)))?;

        Ok(())
    }

    /// Applies overrides read through `lookup` (the process environment in `load`).
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> QuoteResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(id) = lookup("CONSTANTINE_EMAILJS_SERVICE_ID") {
            debug!(service_id = %id, "Overriding EmailJS service id from environment");
            self.emailjs.service_id = id;
        }

        if let Some(id) = lookup("CONSTANTINE_EMAILJS_TEMPLATE_ID") {
            debug!(template_id = %id, "Overriding EmailJS template id from environment");
            self.emailjs.template_id = id;
        }

        if let Some(key) = lookup("CONSTANTINE_EMAILJS_PUBLIC_KEY") {
            self.emailjs.public_key = key;
        }

        if let Some(url) = lookup("CONSTANTINE_EMAILJS_ENDPOINT") {
            debug!(endpoint = %url, "Overriding EmailJS endpoint from environment");
            self.emailjs.endpoint = url;
        }

        if let Some(email) = lookup("CONSTANTINE_NOTIFY_EMAIL") {
            self.notify_email = email;
        }

        if let Some(raw) = lookup("CONSTANTINE_MAIL_TIMEOUT_SECS") {
            self.timeout_secs = raw.trim().parse().map_err(|_| {
                QuoteError::InvalidConfig(format!(
                    "CONSTANTINE_MAIL_TIMEOUT_SECS must be a whole number of seconds, got: '{}'",
                    raw
                ))
            })?;
        }

        Ok(())
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "maisonconstantine", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = MailConfig::default();
        assert_eq!(config.emailjs.endpoint, DEFAULT_EMAILJS_ENDPOINT);
        assert_eq!(config.notify_email, DEFAULT_NOTIFY_EMAIL);
        assert_eq!(config.timeout(), Duration::from_secs(15));
        assert!(!config.emailjs.has_credentials());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
notify_email = "atelier@maisonconstantine.com"
timeout_secs = 5

[emailjs]
service_id = "service_abc"
template_id = "template_quote"
public_key = "pk_test"
"#
        )
        .unwrap();

        let mut config: MailConfig =
            toml::from_str(&std::fs::read_to_string(file.path()).unwrap()).unwrap();
        config.apply_overrides_from(env(&[])).unwrap();

        assert_eq!(config.notify_email, "atelier@maisonconstantine.com");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.emailjs.endpoint, DEFAULT_EMAILJS_ENDPOINT);
        assert!(config.emailjs.has_credentials());
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout_secs = \"soon\"").unwrap();

        let result = MailConfig::load(Some(file.path().to_path_buf()));
        assert!(matches!(result, Err(QuoteError::ConfigLoadFailed(_))));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let config = MailConfig::load_or_default(Some(path));
        assert!(config.timeout_secs > 0);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = MailConfig::default();
        config
            .apply_overrides_from(env(&[
                ("CONSTANTINE_EMAILJS_SERVICE_ID", "svc"),
                ("CONSTANTINE_EMAILJS_TEMPLATE_ID", "tpl"),
                ("CONSTANTINE_EMAILJS_PUBLIC_KEY", "key"),
                ("CONSTANTINE_EMAILJS_ENDPOINT", "http://localhost:9000/send"),
                ("CONSTANTINE_NOTIFY_EMAIL", "ops@example.com"),
                ("CONSTANTINE_MAIL_TIMEOUT_SECS", " 30 "),
            ]))
            .unwrap();

        assert_eq!(config.emailjs.service_id, "svc");
        assert_eq!(config.emailjs.template_id, "tpl");
        assert_eq!(config.emailjs.public_key, "key");
        assert_eq!(config.emailjs.endpoint, "http://localhost:9000/send");
        assert_eq!(config.notify_email, "ops@example.com");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unparseable_timeout_is_rejected() {
        let mut config = MailConfig::default();
        let result =
            config.apply_overrides_from(env(&[("CONSTANTINE_MAIL_TIMEOUT_SECS", "forever")]));
        assert!(matches!(result, Err(QuoteError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_validation() {
        let mut config = MailConfig::default();

        config.emailjs.endpoint = String::new();
        assert!(config.validate().is_err());

        config.emailjs.endpoint = "ftp://mail".to_string();
        assert!(config.validate().is_err());

        config.emailjs.endpoint = DEFAULT_EMAILJS_ENDPOINT.to_string();
        config.timeout_secs = 0;
        assert!(config.validate().is_err());

        config.timeout_secs = 10;
        config.notify_email = "not-an-address".to_string();
        assert!(config.validate().is_err());
    }
}
