// ! Access-token verifier trait
// !
// ! The core consumes authorization only through this narrow interface: given
// ! a bearer token lifted off an inbound request, decide whether it is valid
// ! and what it grants. Issuing tokens, running PKCE, and authorization-server
// ! discovery are the job of an external OAuth 2.1 deployment and are out of
// ! scope for the engine itself.

use async_trait::async_trait;

use crate::auth::types::AuthInfo;
use crate::core::error::McpResult;

/// Verifies bearer tokens presented to an HTTP-transported server.
///
/// Implementations typically call out to an authorization server's
/// introspection endpoint, check a local JWT signature, or look up a
/// session store; the engine only needs the yes/no-plus-claims answer.
#[async_trait]
pub trait AccessTokenVerifier: Send + Sync {
    /// Verify `token` and return what it grants, or an error if it is
    /// invalid, expired, or does not cover the requested resource.
    async fn verify_access_token(&self, token: &str) -> McpResult<AuthInfo>;
}

/// A verifier that accepts every token unconditionally and grants no scopes.
///
/// Useful for local development and for transports that are not exposed
/// beyond a trusted loopback interface. Never use this for a server reachable
/// over an untrusted network.
pub struct NoopVerifier;

#[async_trait]
impl AccessTokenVerifier for NoopVerifier {
    async fn verify_access_token(&self, token: &str) -> McpResult<AuthInfo> {
        Ok(AuthInfo::new(token))
    }
}
