use base64::{
	Engine,
	prelude::{BASE64_STANDARD, BASE64_URL_SAFE_NO_PAD},
};
use iref::Uri;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_with::skip_serializing_none;

use crate::{
	AccessTokenBuf, Code, Scope,
	client::{OAuth2Client, OAuth2ClientError},
	ext::pkce::PkceCodeVerifier,
	transport::{APPLICATION_JSON, Timeout, WwwFormUrlEncoded},
	util::NoExtension,
};

/// Access Token Request with the Authorization Code Grant.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.3>
#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(tag = "grant_type", rename = "authorization_code")]
pub struct AuthorizationCodeTokenRequest<'a> {
	pub code: &'a str,

	pub redirect_uri: &'a str,

	/// PKCE verifier, when the authorization request carried a challenge.
	pub code_verifier: Option<&'a str>,
}

impl<'a> AuthorizationCodeTokenRequest<'a> {
	pub fn new(
		client: &'a impl OAuth2Client,
		code: &'a Code,
		code_verifier: Option<&'a PkceCodeVerifier>,
	) -> Self {
		Self {
			code: code.as_str(),
			redirect_uri: client.redirect_uri().as_str(),
			code_verifier: code_verifier.map(PkceCodeVerifier::as_str),
		}
	}

	/// Builds the `POST` request to `token_endpoint`, authenticating the
	/// client with HTTP Basic.
	pub fn build_request(
		self,
		token_endpoint: &Uri,
		client: &impl OAuth2Client,
		client_secret: &SecretString,
		timeout: Option<Timeout>,
	) -> Result<http::Request<Vec<u8>>, OAuth2ClientError> {
		let mut builder = http::Request::builder()
			.method(http::Method::POST)
			.uri(token_endpoint.as_str())
			.header(http::header::CONTENT_TYPE, WwwFormUrlEncoded::VALUE)
			.header(http::header::ACCEPT, APPLICATION_JSON)
			.header(
				http::header::AUTHORIZATION,
				basic_auth_header(client.client_id().as_str(), client_secret)?,
			);

		if let Some(timeout) = timeout {
			builder = builder.extension(timeout);
		}

		builder
			.body(WwwFormUrlEncoded::encode(&self)?)
			.map_err(OAuth2ClientError::configuration)
	}
}

/// `Basic base64(client_id:client_secret)`, marked sensitive.
pub fn basic_auth_header(
	client_id: &str,
	client_secret: &SecretString,
) -> Result<http::HeaderValue, OAuth2ClientError> {
	let credentials =
		BASE64_STANDARD.encode(format!("{client_id}:{}", client_secret.expose_secret()));
	let mut value = http::HeaderValue::try_from(format!("Basic {credentials}"))
		.map_err(OAuth2ClientError::configuration)?;
	value.set_sensitive(true);
	Ok(value)
}

/// Interprets a token endpoint response.
///
/// Anything other than `200 OK` is an [`OAuth2ClientError::HttpStatus`] and
/// its body is left unparsed. A `200 OK` body that does not deserialize into
/// `T` is an [`OAuth2ClientError::JsonParse`].
pub fn parse_token_response<T: DeserializeOwned>(
	response: http::Response<Vec<u8>>,
) -> Result<T, OAuth2ClientError> {
	if response.status() != http::StatusCode::OK {
		return Err(OAuth2ClientError::http_status(response.status()));
	}

	serde_json::from_slice(response.body()).map_err(OAuth2ClientError::json_parse)
}

/// Successful Access Token Response.
///
/// Unknown fields are ignored, or collected by the `E` extension.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-5.1>
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(serialize = "E: Serialize", deserialize = "E: Deserialize<'de>"))]
pub struct TokenResponse<E = NoExtension> {
	/// Access token issued by the authorization server.
	pub access_token: AccessTokenBuf,

	/// Type of the issued token, case insensitive (usually `Bearer`).
	pub token_type: String,

	/// Lifetime in seconds of the access token.
	///
	/// Some providers send it as a string; both forms are accepted.
	#[serde(default, deserialize_with = "deserialize_expires_in")]
	pub expires_in: Option<u64>,

	pub refresh_token: Option<String>,

	/// Granted scope, when it differs from the requested one.
	///
	/// Kept as a raw string: providers do not all follow the
	/// space-delimited grammar (some use commas).
	pub scope: Option<String>,

	/// OpenID Connect ID Token.
	pub id_token: Option<String>,

	#[serde(flatten)]
	pub ext: E,
}

impl<E> TokenResponse<E> {
	/// The granted scope, if present and well-formed.
	pub fn granted_scope(&self) -> Option<&Scope> {
		self.scope.as_deref().and_then(|s| Scope::new(s).ok())
	}

	/// Decodes the payload of the ID token without verifying its signature.
	///
	/// Signature verification needs the provider's keys and is left to the
	/// caller.
	pub fn id_token_claims(&self) -> Result<Option<serde_json::Value>, OAuth2ClientError> {
		let Some(id_token) = &self.id_token else {
			return Ok(None);
		};

		let mut parts = id_token.split('.');
		let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
			(Some(_), Some(payload), Some(_), None) => payload,
			_ => return Err(OAuth2ClientError::json_parse("malformed ID token")),
		};

		let payload = BASE64_URL_SAFE_NO_PAD
			.decode(payload.trim_end_matches('='))
			.map_err(OAuth2ClientError::json_parse)?;

		serde_json::from_slice(&payload)
			.map(Some)
			.map_err(OAuth2ClientError::json_parse)
	}
}

fn deserialize_expires_in<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Seconds {
		Number(u64),
		Text(String),
	}

	match Option::<Seconds>::deserialize(deserializer)? {
		None => Ok(None),
		Some(Seconds::Number(n)) => Ok(Some(n)),
		Some(Seconds::Text(s)) => s.trim().parse().map(Some).map_err(serde::de::Error::custom),
	}
}
