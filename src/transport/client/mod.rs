use crate::client::OAuth2ClientError;

#[cfg(feature = "reqwest")]
mod reqwest;

/// Blocking HTTP client used for the token exchange.
///
/// Implementations perform exactly one round trip per call and must release
/// the underlying connection on every exit path. Any failure to obtain a
/// complete response (connection refused, TLS failure, timeout, truncated
/// body) is reported as [`OAuth2ClientError::Network`]. Non-success statuses
/// are *not* errors at this level, and `3xx` responses are returned as-is
/// rather than followed.
///
/// `reqwest` clients follow redirects by default and would resend the form
/// body to the redirect target. Build them with
/// `reqwest::redirect::Policy::none()`.
pub trait HttpClient {
	fn send(
		&self,
		request: http::Request<Vec<u8>>,
	) -> Result<http::Response<Vec<u8>>, OAuth2ClientError>;
}

impl<T> HttpClient for &T
where
	T: HttpClient,
{
	fn send(
		&self,
		request: http::Request<Vec<u8>>,
	) -> Result<http::Response<Vec<u8>>, OAuth2ClientError> {
		T::send(*self, request)
	}
}
