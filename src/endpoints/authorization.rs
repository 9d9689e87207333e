use iref::{Uri, UriBuf};
use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::{
	Scope, State,
	client::{OAuth2Client, OAuth2ClientError},
	ext::pkce::PkceCodeChallengeAndMethod,
	util::extend_uri_query,
};

/// Authorization Request query parameters.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.1>
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizationRequest<'a> {
	pub response_type: &'static str,
	pub client_id: &'a str,
	pub redirect_uri: &'a str,
	pub state: &'a str,
	pub scope: Option<&'a str>,
}

impl<'a> AuthorizationRequest<'a> {
	pub fn new(
		client: &'a impl OAuth2Client,
		state: &'a State,
		scope: Option<&'a Scope>,
	) -> Self {
		Self {
			response_type: "code",
			client_id: client.client_id().as_str(),
			redirect_uri: client.redirect_uri().as_str(),
			state: state.as_str(),
			scope: scope.map(Scope::as_str),
		}
	}

	pub fn with_pkce_challenge(
		self,
		pkce: PkceCodeChallengeAndMethod,
	) -> WithPkceChallenge<Self> {
		WithPkceChallenge::new(self, pkce)
	}
}

/// Attaches `code_challenge` and `code_challenge_method` to a request.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc7636#section-4.3>
#[derive(Debug, Clone, Serialize)]
pub struct WithPkceChallenge<T> {
	#[serde(flatten)]
	pub value: T,

	#[serde(flatten)]
	pub pkce: PkceCodeChallengeAndMethod,
}

impl<T> WithPkceChallenge<T> {
	pub fn new(value: T, pkce: PkceCodeChallengeAndMethod) -> Self {
		Self { value, pkce }
	}
}

impl<T> std::ops::Deref for WithPkceChallenge<T> {
	type Target = T;

	fn deref(&self) -> &Self::Target {
		&self.value
	}
}

/// Builds the authorization redirect URI.
///
/// Pure: `state` and the PKCE verifier must have been generated beforehand.
/// Query parameters already present on `authorize_endpoint` are kept, and
/// the new ones are appended in a stable order.
pub fn build_authorization_url(
	authorize_endpoint: &Uri,
	request: impl Serialize,
) -> Result<UriBuf, OAuth2ClientError> {
	let mut uri = authorize_endpoint.to_owned();
	extend_uri_query(&mut uri, request)?;
	log::debug!("authorization URL: {uri}");
	Ok(uri)
}
