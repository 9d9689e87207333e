//! HTTP transport layer and request body encoding.
//!
//! The transport only moves bytes: it never interprets status codes or
//! parses bodies. Protocol interpretation happens in
//! [`endpoints::token`](crate::endpoints::token).
use std::time::Duration;

use http::HeaderValue;
use serde::Serialize;

use crate::client::OAuth2ClientError;

mod client;

pub use client::*;

/// `Content-Type: application/json` header value.
pub const APPLICATION_JSON: HeaderValue = HeaderValue::from_static("application/json");

/// `Content-Type: application/x-www-form-urlencoded` header value.
pub const APPLICATION_X_WWW_FORM_URLENCODED: HeaderValue =
	HeaderValue::from_static("application/x-www-form-urlencoded");

/// Request extension bounding the whole round trip.
///
/// Transports must report an expired timeout as
/// [`OAuth2ClientError::Network`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeout(pub Duration);

/// URL-encoded form (`application/x-www-form-urlencoded`) body encoding.
pub struct WwwFormUrlEncoded;

impl WwwFormUrlEncoded {
	pub const VALUE: HeaderValue = APPLICATION_X_WWW_FORM_URLENCODED;

	pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, OAuth2ClientError> {
		log::debug!("serializing {}", std::any::type_name_of_val(value));
		serde_html_form::to_string(value)
			.map(String::into_bytes)
			.map_err(OAuth2ClientError::configuration)
	}
}
