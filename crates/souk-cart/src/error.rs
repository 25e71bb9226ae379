//! # Cart Sync Error Types
//!
//! Error types for cart synchronization.
//!
//! ## Error Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Error Categories                              │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │   Validation    │  │     Server      │  │      Transport          │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Rejected before│  │  HTTP error with│  │  No response at all     │ │
//! │  │  any network    │  │  an optional    │  │  (connect, DNS,         │ │
//! │  │  call           │  │  body message   │  │  timeout)               │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  All three surface identically to the caller as Err(CartError) and     │
//! │  mirror into the store's last_error slot for passive consumers.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use souk_core::ValidationError;

/// Result type alias for cart sync operations.
pub type CartResult<T> = Result<T, CartError>;

/// Cart sync error type covering all failure classes.
///
/// ## Design Principles
/// - Each variant includes enough context for debugging
/// - Errors are categorized for different handling strategies
/// - All errors are `Send + Sync` for async compatibility
#[derive(Debug, Error)]
pub enum CartError {
    // =========================================================================
    // Local Validation
    // =========================================================================
    /// Caller input rejected before any network traffic.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // =========================================================================
    // Server Failures
    // =========================================================================
    /// The cart API answered with an error status.
    ///
    /// `message` is the human-readable text from the error body, when the
    /// server sent one.
    #[error("cart API error ({status}): {}", .message.as_deref().unwrap_or("request failed"))]
    Server { status: u16, message: Option<String> },

    // =========================================================================
    // Transport Failures
    // =========================================================================
    /// No HTTP response at all: connect failure, DNS failure or timeout.
    /// There is no server message to show for these.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The response arrived but its body was not the expected shape.
    #[error("failed to decode cart API response: {0}")]
    Decode(String),

    // =========================================================================
    // Configuration
    // =========================================================================
    /// Invalid cart client configuration.
    #[error("invalid cart client configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load the config file.
    #[error("failed to load cart config: {0}")]
    ConfigLoadFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for CartError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CartError::Decode(err.to_string())
        } else if err.is_timeout() {
            CartError::Transport(format!("request timed out: {}", err))
        } else if err.is_connect() {
            CartError::Transport(format!("connection failed: {}", err))
        } else {
            CartError::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for CartError {
    fn from(err: url::ParseError) -> Self {
        CartError::InvalidConfig(err.to_string())
    }
}

impl From<serde_json::Error> for CartError {
    fn from(err: serde_json::Error) -> Self {
        CartError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for CartError {
    fn from(err: std::io::Error) -> Self {
        CartError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for CartError {
    fn from(err: toml::de::Error) -> Self {
        CartError::ConfigLoadFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl CartError {
    /// Returns true if re-invoking the operation could plausibly succeed.
    ///
    /// The engine itself never retries (the caller decides); this only
    /// classifies.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CartError::Transport(_))
            || matches!(self, CartError::Server { status, .. } if *status >= 500)
    }

    /// Returns true if this error was raised before any network call.
    pub fn is_validation(&self) -> bool {
        matches!(self, CartError::Validation(_))
    }

    /// The text mirrored into the store's `last_error` slot.
    ///
    /// Server messages pass through verbatim; failures without one (and
    /// decode/transport failures) fall back to the fixed per-operation
    /// string the UI expects.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            CartError::Validation(err) => err.to_string(),
            CartError::Server {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}
