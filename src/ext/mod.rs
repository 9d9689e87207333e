//! OAuth 2.0 protocol extensions.
pub mod pkce;
