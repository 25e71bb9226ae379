//! # Cart Client Configuration
//!
//! Configuration for the cart API client.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SOUK_API_URL=https://souk.example.com/api/v1                       │
//! │     SOUK_SESSION_TOKEN=eyJhbGciOi...                                   │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/souk-cart/cart.toml (Linux)                              │
//! │     ~/Library/Application Support/com.souk.souk-cart/cart.toml (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     localhost API, anonymous session, generated client id              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Session Identity
//! The session token is handed to the engine explicitly through this struct.
//! The engine never reads ambient storage for identity; whoever owns the
//! login flow owns the token and passes it in.
//!
//! ## Configuration File Format
//! ```toml
//! # cart.toml
//! api_url = "https://souk.example.com/api/v1"
//! session_token = "eyJhbGciOi..."
//! connect_timeout_secs = 10
//! request_timeout_secs = 30
//! verify_tls = true
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

use crate::error::{CartError, CartResult};

// =============================================================================
// Cart Client Configuration
// =============================================================================

/// Configuration for [`crate::client::HttpCartClient`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartClientConfig {
    /// Base URL of the cart REST API, including the version prefix.
    /// The five cart endpoints are resolved relative to this.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Bearer token for the authenticated session, if any.
    /// Anonymous carts simply omit it.
    #[serde(default)]
    pub session_token: Option<String>,

    /// Client instance identifier, sent as `X-Client-Id` for request
    /// correlation in server logs. Auto-generated when not configured.
    #[serde(default = "default_client_id")]
    pub client_id: String,

    /// Connection timeout (seconds).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Per-request timeout (seconds). The engine imposes no timeout of its
    /// own beyond this transport default.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Enable TLS certificate verification.
    #[serde(default = "default_true")]
    pub verify_tls: bool,
}

fn default_api_url() -> String {
    "http://localhost:4000/api/v1".to_string()
}

fn default_client_id() -> String {
    Uuid::new_v4().to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

impl Default for CartClientConfig {
    fn default() -> Self {
        CartClientConfig {
            api_url: default_api_url(),
            session_token: None,
            client_id: default_client_id(),
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
            verify_tls: true,
        }
    }
}

impl CartClientConfig {
    /// Creates a config with defaults and a generated client id.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config for the given API base URL, defaults elsewhere.
    pub fn for_url(api_url: impl Into<String>) -> Self {
        CartClientConfig {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    /// Attaches a session token (builder style).
    pub fn with_session(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (cart.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CartResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading cart config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load cart config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Default platform config file location.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "souk", "souk-cart")
            .map(|dirs| dirs.config_dir().join("cart.toml"))
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("SOUK_API_URL") {
            debug!("Overriding api_url from SOUK_API_URL");
            self.api_url = url;
        }

        if let Ok(token) = std::env::var("SOUK_SESSION_TOKEN") {
            debug!("Overriding session_token from SOUK_SESSION_TOKEN");
            self.session_token = Some(token);
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CartResult<()> {
        let url = Url::parse(&self.api_url)
            .map_err(|e| CartError::InvalidConfig(format!("api_url: {}", e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(CartError::InvalidConfig(format!(
                "api_url must be http or https, got: {}",
                url.scheme()
            )));
        }

        if self.client_id.trim().is_empty() {
            return Err(CartError::InvalidConfig("client_id must not be empty".into()));
        }

        Ok(())
    }

    /// The API base URL parsed and normalized with a trailing slash, so
    /// relative endpoint joins keep the version prefix.
    pub fn parsed_api_url(&self) -> CartResult<Url> {
        let normalized = if self.api_url.ends_with('/') {
            self.api_url.clone()
        } else {
            format!("{}/", self.api_url)
        };

        Url::parse(&normalized).map_err(CartError::from)
    }

    /// Connection timeout as a Duration.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CartClientConfig::default();
        assert_eq!(config.api_url, "http://localhost:4000/api/v1");
        assert_eq!(config.connect_timeout_secs, 10);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.verify_tls);
        assert!(config.session_token.is_none());
        assert!(!config.client_id.is_empty());
    }

    #[test]
    fn test_parse_toml_with_partial_fields() {
        let config: CartClientConfig = toml::from_str(
            r#"
            api_url = "https://souk.example.com/api/v1"
            session_token = "tok-123"
            "#,
        )
        .unwrap();

        assert_eq!(config.api_url, "https://souk.example.com/api/v1");
        assert_eq!(config.session_token.as_deref(), Some("tok-123"));
        // Unspecified fields fall back to defaults
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.verify_tls);
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        let mut config = CartClientConfig::default();
        config.api_url = "not a url".into();
        assert!(config.validate().is_err());

        config.api_url = "ftp://souk.example.com".into();
        assert!(config.validate().is_err());

        config.api_url = "https://souk.example.com/api/v1".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parsed_api_url_normalizes_trailing_slash() {
        let config = CartClientConfig::for_url("https://souk.example.com/api/v1");
        let url = config.parsed_api_url().unwrap();
        assert_eq!(url.as_str(), "https://souk.example.com/api/v1/");

        // Joining keeps the version prefix
        assert_eq!(
            url.join("cart").unwrap().as_str(),
            "https://souk.example.com/api/v1/cart"
        );
    }

    #[test]
    fn test_with_session() {
        let config = CartClientConfig::for_url("https://souk.example.com/api/v1")
            .with_session("tok-456");
        assert_eq!(config.session_token.as_deref(), Some("tok-456"));
    }
}
