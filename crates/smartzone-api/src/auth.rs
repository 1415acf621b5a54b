use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Username/password pair used to obtain a service ticket.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    /// Body for `POST /serviceTicket`.
    pub(crate) fn login_body(&self) -> LoginRequest<'_> {
        LoginRequest {
            username: &self.username,
            password: self.password.expose_secret(),
        }
    }
}

#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Response of `POST /serviceTicket`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub service_ticket: Option<String>,
    #[serde(default)]
    pub controller_version: Option<String>,
}

/// Server-issued session token attached to every authenticated request.
///
/// `Debug` is redacted so the ticket never lands in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceTicket(String);

impl ServiceTicket {
    /// Returns `None` for an empty ticket string.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() { None } else { Some(Self(raw)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ServiceTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ServiceTicket(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ticket_is_rejected() {
        assert!(ServiceTicket::new("").is_none());
        assert!(ServiceTicket::new("ST-1").is_some());
    }

    #[test]
    fn ticket_debug_is_redacted() {
        let ticket = ServiceTicket::new("ST-secret").map(|t| format!("{t:?}"));
        assert_eq!(ticket.as_deref(), Some("ServiceTicket(<redacted>)"));
    }

    #[test]
    fn login_body_carries_both_fields() {
        let creds = Credentials::new("admin", SecretString::from("hunter2"));
        let body = serde_json::to_value(creds.login_body()).ok();
        assert_eq!(
            body,
            Some(serde_json::json!({ "username": "admin", "password": "hunter2" }))
        );
    }
}
