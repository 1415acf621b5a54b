//! CLI error types with miette diagnostics.
//!
//! Maps `smartzone_api::Error` and `ConfigError` into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use smartzone_api::PartialList;
use smartzone_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const REJECTED: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to controller at {url}")]
    #[diagnostic(
        code(smartzone::connection_failed),
        help(
            "Check that the controller is reachable on its management port.\n\
             URL: {url}\n\
             Try: smartzone controller --insecure"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("TLS setup failed: {message}")]
    #[diagnostic(
        code(smartzone::tls_error),
        help(
            "SmartZone controllers usually ship a self-signed certificate.\n\
             Use --insecure (-k) to accept it, or set ca_cert in your profile."
        )
    )]
    TlsError { message: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(smartzone::timeout),
        help("Increase the timeout with --timeout or check controller responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(smartzone::auth_failed),
        help(
            "Verify the username and password for profile '{profile}'.\n\
             Store a password with: smartzone config set-password --profile {profile}"
        )
    )]
    AuthFailed { profile: String, message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(smartzone::no_credentials),
        help(
            "Configure credentials with: smartzone config init\n\
             Or set SMARTZONE_USERNAME and SMARTZONE_PASSWORD."
        )
    )]
    NoCredentials { profile: String },

    // ── Controller ───────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(smartzone::not_found),
        help("Run: smartzone {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("Controller API error (HTTP {status}): {message}")]
    #[diagnostic(code(smartzone::api_error))]
    ApiError {
        status: u16,
        message: String,
        code: Option<i64>,
    },

    #[error("Controller declined '{operation}'")]
    #[diagnostic(
        code(smartzone::rejected),
        help("The controller answered without error but reported failure. Check the AP is online.")
    )]
    Rejected { operation: String },

    #[error("Unexpected response from controller: {message}")]
    #[diagnostic(
        code(smartzone::bad_response),
        help("The controller may run an unsupported firmware. Try a different --api-version.")
    )]
    BadResponse { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(smartzone::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(smartzone::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: smartzone config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No controller configured for profile '{profile}'")]
    #[diagnostic(
        code(smartzone::no_controller),
        help(
            "Pass --host <HOST> (or set SMARTZONE_HOST), or create a profile with: \
             smartzone config init\n\
             Expected config at: {path}"
        )
    )]
    NoController { profile: String, path: String },

    #[error(transparent)]
    #[diagnostic(code(smartzone::config))]
    Config(Box<ConfigError>),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(smartzone::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Rejected { .. } => exit_code::REJECTED,
            Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::ProfileNotFound { .. }
            | Self::NoController { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Translate a library error, naming the profile in auth failures.
    pub fn from_api(err: smartzone_api::Error, profile: &str) -> Self {
        use smartzone_api::Error as E;

        match err {
            E::NotAuthenticated => Self::AuthFailed {
                profile: profile.into(),
                message: "no active session".into(),
            },
            E::Authentication { message } => Self::AuthFailed {
                profile: profile.into(),
                message,
            },
            E::Transport(e) if e.is_timeout() => Self::Timeout,
            E::Transport(e) => Self::ConnectionFailed {
                url: e.url().map_or_else(|| "(unknown)".into(), ToString::to_string),
                source: Box::new(e),
            },
            E::InvalidUrl(e) => Self::Validation {
                field: "controller".into(),
                reason: e.to_string(),
            },
            E::Tls(message) => Self::TlsError { message },
            E::Api {
                status,
                message,
                code,
            } => Self::ApiError {
                status,
                message,
                code,
            },
            E::RemoteFailure { operation } => Self::Rejected {
                operation: operation.into(),
            },
            E::Deserialization { message, .. } => Self::BadResponse { message },
        }
    }

    /// Translate a failed listing, reporting how far it got.
    pub fn from_partial<T>(partial: PartialList<T>, profile: &str) -> Self {
        let (items, err) = partial.into_parts();
        if !items.is_empty() {
            tracing::warn!(collected = items.len(), "listing stopped before the last page");
        }
        Self::from_api(err, profile)
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::UnknownProfile { name } => Self::ProfileNotFound {
                name,
                available: "(see smartzone config profiles)".into(),
            },
            ConfigError::Api(e) => Self::from_api(e, "current"),
            other => Self::Config(Box::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_failure_maps_to_rejected() {
        let err = CliError::from_api(
            smartzone_api::Error::RemoteFailure {
                operation: "port status",
            },
            "lab",
        );
        assert!(matches!(err, CliError::Rejected { .. }));
        assert_eq!(err.exit_code(), exit_code::REJECTED);
    }

    #[test]
    fn auth_errors_name_the_profile() {
        let err = CliError::from_api(
            smartzone_api::Error::Authentication {
                message: "login failed (HTTP 401)".into(),
            },
            "lab",
        );
        assert_eq!(err.exit_code(), exit_code::AUTH);
        match err {
            CliError::AuthFailed { profile, .. } => assert_eq!(profile, "lab"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn missing_controller_is_a_usage_error() {
        let err = CliError::NoController {
            profile: "default".into(),
            path: "/nonexistent".into(),
        };
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }
}
