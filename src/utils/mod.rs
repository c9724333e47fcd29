// ! Utility functions and helpers for the MCP Rust SDK
// !
// ! Module provides various utility functions for URI handling, validation,
// ! and other common operations used throughout the SDK.

pub mod uri;
pub mod uri_template;

// Re-export commonly used utilities
pub use uri::*;
pub use uri_template::UriTemplate;
