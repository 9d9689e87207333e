//! OAuth 2.0 client identity and the crate error type.
use iref::Uri;

use crate::ClientId;

/// Registered OAuth 2.0 client, as seen by the authorization and token
/// endpoints.
pub trait OAuth2Client {
	fn client_id(&self) -> &ClientId;

	/// Redirection endpoint registered for this client.
	///
	/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-3.1.2>
	fn redirect_uri(&self) -> &Uri;
}

#[derive(Debug, thiserror::Error)]
pub enum OAuth2ClientError {
	/// Missing or invalid configuration, or an invalid call argument.
	#[error("invalid configuration: {0}")]
	Configuration(String),

	/// The secure randomness source is unavailable.
	#[error("unable to generate random token: {0}")]
	RandomGeneration(String),

	/// The HTTP round trip could not be completed.
	#[error("network error: {0}")]
	Network(String),

	/// The provider answered with a non-success status.
	#[error("server responded with status code {status}: {reason}")]
	HttpStatus {
		status: http::StatusCode,
		reason: String,
	},

	/// The response body does not match the expected schema.
	#[error("unable to parse response: {0}")]
	JsonParse(String),
}

impl OAuth2ClientError {
	pub fn configuration(e: impl ToString) -> Self {
		let msg = e.to_string();
		log::error!("configuration error: {msg}");
		Self::Configuration(msg)
	}

	pub fn random_generation(e: impl ToString) -> Self {
		let msg = e.to_string();
		log::error!("random generation error: {msg}");
		Self::RandomGeneration(msg)
	}

	pub fn network(e: impl ToString) -> Self {
		let msg = e.to_string();
		log::error!("network error: {msg}");
		Self::Network(msg)
	}

	pub fn http_status(status: http::StatusCode) -> Self {
		log::error!("unexpected server response status: {status}");
		Self::HttpStatus {
			status,
			reason: status.canonical_reason().unwrap_or("Unknown").to_owned(),
		}
	}

	pub fn json_parse(e: impl ToString) -> Self {
		let msg = e.to_string();
		log::error!("response parse error: {msg}");
		Self::JsonParse(msg)
	}

	/// Returns the HTTP status, if the provider answered with one.
	pub fn status(&self) -> Option<http::StatusCode> {
		match self {
			Self::HttpStatus { status, .. } => Some(*status),
			_ => None,
		}
	}

	/// Whether repeating the same call may succeed.
	///
	/// Transport failures and provider-side (5xx) failures are retryable.
	/// Nothing in this crate retries on its own.
	pub fn is_retryable(&self) -> bool {
		match self {
			Self::Network(_) => true,
			Self::HttpStatus { status, .. } => status.is_server_error(),
			_ => false,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn http_status_carries_reason() {
		let e = OAuth2ClientError::http_status(http::StatusCode::BAD_REQUEST);
		match &e {
			OAuth2ClientError::HttpStatus { status, reason } => {
				assert_eq!(*status, http::StatusCode::BAD_REQUEST);
				assert_eq!(reason, "Bad Request");
			}
			other => panic!("unexpected error: {other:?}"),
		}
		assert_eq!(e.status(), Some(http::StatusCode::BAD_REQUEST));
	}

	#[test]
	fn retryable_errors() {
		assert!(OAuth2ClientError::network("connection refused").is_retryable());
		assert!(
			OAuth2ClientError::http_status(http::StatusCode::SERVICE_UNAVAILABLE).is_retryable()
		);
		assert!(!OAuth2ClientError::http_status(http::StatusCode::UNAUTHORIZED).is_retryable());
		assert!(!OAuth2ClientError::json_parse("eof").is_retryable());
		assert!(!OAuth2ClientError::configuration("empty client id").is_retryable());
		assert!(!OAuth2ClientError::random_generation("no entropy").is_retryable());
	}
}
