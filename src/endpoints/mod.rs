//! Authorization and token endpoint requests.
//!
//! - [`authorization`] builds the browser redirect to the authorization
//!   endpoint ([RFC 6749 Section 4.1.1](https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.1)).
//! - [`token`] builds the authorization code exchange and interprets its
//!   response ([RFC 6749 Section 4.1.3](https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.3)).
pub mod authorization;
pub mod token;
