// ! Access-token verification surface for HTTP-transported MCP servers.
// !
// ! The core treats authorization as an external collaborator: it exposes a
// ! narrow `AccessTokenVerifier` trait and carries whatever the verifier
// ! decides as `AuthInfo` on each request, but never runs an OAuth flow,
// ! issues tokens, or talks to an authorization server's discovery endpoints
// ! itself. A real deployment plugs in a verifier backed by token
// ! introspection, local JWT validation, or a session store.

pub mod types;
pub mod verifier;

pub use types::AuthInfo;
pub use verifier::{AccessTokenVerifier, NoopVerifier};
