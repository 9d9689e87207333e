//! Provider-agnostic [OAuth 2.0][rfc6749] Authorization Code flow engine,
//! with [PKCE][rfc7636].
//!
//! The crate covers the server-side half of a login: generating `state` and
//! PKCE verifiers, building the authorization redirect, and exchanging the
//! returned code for tokens. Session storage and the `state` comparison on
//! callback stay with the application.
//!
//! # Modules
//!
//! - [`client`]: client identity trait and the crate error type.
//! - [`endpoints`]: authorization URL building and token exchange.
//! - [`engine`]: [`OAuth2Engine`] and its [`ProviderConfig`].
//! - [`ext`]: protocol extensions (PKCE).
//! - [`provider`]: named provider presets ([`ProviderProfile`]).
//! - [`config`]: deserializable [`ClientSettings`].
//! - [`transport`]: blocking HTTP transport abstraction.
//! - [`util`]: random tokens and URI query utilities.
//!
//! Core OAuth 2.0 types ([`AccessToken`], [`ClientId`], [`Code`], [`Scope`],
//! [`State`], etc.) are re-exported at the crate root.
//!
//! [rfc6749]: https://datatracker.ietf.org/doc/html/rfc6749
//! [rfc7636]: https://datatracker.ietf.org/doc/html/rfc7636
#[cfg(feature = "reqwest")]
pub use reqwest;

pub use http;
pub use secrecy;

pub mod client;
pub mod config;
pub mod endpoints;
pub mod engine;
pub mod ext;
pub mod provider;
pub mod transport;
mod types;
pub mod util;

pub use config::ClientSettings;
pub use endpoints::token::TokenResponse;
pub use engine::{OAuth2Engine, ProviderConfig};
pub use ext::pkce::{PkceCodeVerifier, PkceCodeVerifierBuf};
pub use provider::ProviderProfile;
pub use types::*;
pub use util::generate_random_token;
