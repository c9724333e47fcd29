// ! Access-token verification types
// !
// ! Module carries the result of verifying a bearer token presented on an
// ! inbound request. The core never issues or refreshes tokens itself (that
// ! is the job of an external authorization server); it only needs a place
// ! to put what a verifier decided, so handlers can make scope-based access
// ! checks.

use std::collections::HashMap;

/// Outcome of a successful token verification.
///
/// Attached to `RequestHandlerExtra.auth_info` for every request the HTTP
/// transport admits; transports that carry no bearer token (stdio,
/// WebSocket) leave this unset.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthInfo {
    /// The verified token's subject, e.g. a user or client id.
    pub client_id: String,
    /// Scopes the token grants, as reported by the verifier.
    pub scopes: Vec<String>,
    /// Unix timestamp (seconds) the token expires at, if bounded.
    pub expires_at: Option<u64>,
    /// The resource indicator the token was issued for, if the verifier
    /// checked one (RFC 8707).
    pub resource: Option<String>,
    /// Verifier-specific extra claims, carried opaquely.
    pub extra: HashMap<String, serde_json::Value>,
}

impl AuthInfo {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            scopes: Vec::new(),
            expires_at: None,
            resource: None,
            extra: HashMap::new(),
        }
    }

    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }

    pub fn with_expiry(mut self, expires_at: u64) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Whether the token grants every scope in `required`.
    pub fn has_scopes(&self, required: &[&str]) -> bool {
        required
            .iter()
            .all(|s| self.scopes.iter().any(|granted| granted == s))
    }

    pub fn is_expired(&self, now_unix: u64) -> bool {
        self.expires_at.is_some_and(|exp| now_unix >= exp)
    }
}
