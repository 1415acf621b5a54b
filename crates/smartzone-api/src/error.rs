use std::fmt;

use thiserror::Error;

/// Top-level error type for the `smartzone-api` crate.
///
/// Covers every failure mode of the public API surface: session state,
/// transport, HTTP status, body decoding, and vendor success flags.
#[derive(Debug, Error)]
pub enum Error {
    // ── Session ─────────────────────────────────────────────────────
    /// A ticketed operation was attempted before a successful login.
    #[error("you must first login to perform this action")]
    NotAuthenticated,

    /// The controller refused the credentials or returned no ticket.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS configuration or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Controller ──────────────────────────────────────────────────
    /// Non-success HTTP status, with the controller's error body if it sent one.
    #[error("SmartZone API error (HTTP {status}): {message}")]
    Api {
        status: u16,
        message: String,
        code: Option<i64>,
    },

    /// The endpoint answered `{"success": false}`.
    #[error("Controller reported failure for {operation}")]
    RemoteFailure { operation: &'static str },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if a fresh login might resolve this error.
    pub fn is_auth_expired(&self) -> bool {
        matches!(
            self,
            Self::NotAuthenticated | Self::Authentication { .. } | Self::Api { status: 401, .. }
        )
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => *status == 503 || *status == 504,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }

    /// Extract the controller's `errorCode`, if available.
    pub fn api_error_code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } => *code,
            _ => None,
        }
    }
}

/// A paginated listing that stopped early.
///
/// `items` holds everything decoded from the pages before the failing one,
/// in order. Nothing is rolled back; the caller decides whether a partial
/// inventory is usable.
pub struct PartialList<T> {
    pub items: Vec<T>,
    pub error: Error,
}

impl<T> PartialList<T> {
    /// Drop the partial items and keep the error.
    pub fn into_error(self) -> Error {
        self.error
    }

    /// Split into the accumulated items and the error that stopped paging.
    pub fn into_parts(self) -> (Vec<T>, Error) {
        (self.items, self.error)
    }
}

impl<T> fmt::Debug for PartialList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartialList")
            .field("items", &self.items.len())
            .field("error", &self.error)
            .finish()
    }
}

impl<T> fmt::Display for PartialList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "listing aborted after {} items: {}",
            self.items.len(),
            self.error
        )
    }
}

impl<T> std::error::Error for PartialList<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// An error before any page arrived: nothing accumulated.
impl<T> From<Error> for PartialList<T> {
    fn from(error: Error) -> Self {
        Self {
            items: Vec::new(),
            error,
        }
    }
}

impl<T> From<PartialList<T>> for Error {
    fn from(partial: PartialList<T>) -> Self {
        partial.error
    }
}
