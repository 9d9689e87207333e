//! The Authorization Code flow engine.
use std::time::Duration;

use iref::{Uri, UriBuf};
use secrecy::SecretString;
use serde::de::DeserializeOwned;

use crate::{
	ClientId, ClientIdBuf, Code, ProviderProfile, ScopeBuf, State,
	client::{OAuth2Client, OAuth2ClientError},
	config::ClientSettings,
	endpoints::{
		authorization::{AuthorizationRequest, build_authorization_url},
		token::{AuthorizationCodeTokenRequest, TokenResponse, parse_token_response},
	},
	ext::pkce::{PkceCodeChallengeAndMethod, PkceCodeChallengeMethod, PkceCodeVerifier},
	provider::{PkceRequirement, ResponseSchema},
	transport::{HttpClient, Timeout},
	util::parse_absolute_uri,
};

/// Immutable client and provider configuration.
///
/// Every field is validated on construction: identifiers are non-empty and
/// all URIs are absolute with a host.
#[derive(Debug)]
pub struct ProviderConfig {
	client_id: ClientIdBuf,
	client_secret: SecretString,
	redirect_uri: UriBuf,
	authorize_endpoint: UriBuf,
	token_endpoint: UriBuf,
	default_scopes: Vec<String>,
	requires_scope: bool,
	pkce: PkceRequirement,
	response_schema: ResponseSchema,
}

impl ProviderConfig {
	/// Configuration for a provider without a preset.
	///
	/// Scopes and PKCE are optional, and responses follow plain OAuth 2.0.
	pub fn new(
		client_id: &str,
		client_secret: SecretString,
		redirect_uri: &str,
		authorize_endpoint: &str,
		token_endpoint: &str,
	) -> Result<Self, OAuth2ClientError> {
		let client_id = ClientIdBuf::new(client_id.to_owned())
			.map_err(|_| OAuth2ClientError::configuration("invalid or empty `client_id`"))?;

		if secrecy::ExposeSecret::expose_secret(&client_secret).is_empty() {
			return Err(OAuth2ClientError::configuration("empty `client_secret`"));
		}

		Ok(Self {
			client_id,
			client_secret,
			redirect_uri: parse_absolute_uri("redirect_uri", redirect_uri)?,
			authorize_endpoint: parse_absolute_uri("authorize_endpoint", authorize_endpoint)?,
			token_endpoint: parse_absolute_uri("token_endpoint", token_endpoint)?,
			default_scopes: Vec::new(),
			requires_scope: false,
			pkce: PkceRequirement::Optional,
			response_schema: ResponseSchema::OAuth2,
		})
	}

	/// Configuration for a provider preset.
	pub fn from_profile(
		profile: &ProviderProfile,
		client_id: &str,
		client_secret: SecretString,
		redirect_uri: &str,
	) -> Result<Self, OAuth2ClientError> {
		let config = Self::new(
			client_id,
			client_secret,
			redirect_uri,
			profile.authorize_endpoint,
			profile.token_endpoint,
		)?;

		Ok(Self {
			default_scopes: profile.default_scopes.iter().map(|s| (*s).to_owned()).collect(),
			requires_scope: profile.requires_scope,
			pkce: profile.pkce,
			response_schema: profile.response_schema,
			..config
		})
	}

	pub fn with_authorize_endpoint(mut self, uri: &str) -> Result<Self, OAuth2ClientError> {
		self.authorize_endpoint = parse_absolute_uri("authorize_endpoint", uri)?;
		Ok(self)
	}

	pub fn with_token_endpoint(mut self, uri: &str) -> Result<Self, OAuth2ClientError> {
		self.token_endpoint = parse_absolute_uri("token_endpoint", uri)?;
		Ok(self)
	}

	/// Replaces the default scopes. Each one must be a valid scope token.
	pub fn with_default_scopes(mut self, scopes: Vec<String>) -> Result<Self, OAuth2ClientError> {
		ScopeBuf::from_strs(&scopes)?;
		self.default_scopes = scopes;
		Ok(self)
	}

	pub fn with_pkce_requirement(mut self, pkce: PkceRequirement) -> Self {
		self.pkce = pkce;
		self
	}

	pub fn with_response_schema(mut self, response_schema: ResponseSchema) -> Self {
		self.response_schema = response_schema;
		self
	}

	pub fn authorize_endpoint(&self) -> &Uri {
		&self.authorize_endpoint
	}

	pub fn token_endpoint(&self) -> &Uri {
		&self.token_endpoint
	}

	pub fn default_scopes(&self) -> &[String] {
		&self.default_scopes
	}

	pub fn pkce_requirement(&self) -> PkceRequirement {
		self.pkce
	}

	pub fn response_schema(&self) -> ResponseSchema {
		self.response_schema
	}
}

impl OAuth2Client for ProviderConfig {
	fn client_id(&self) -> &ClientId {
		&self.client_id
	}

	fn redirect_uri(&self) -> &Uri {
		&self.redirect_uri
	}
}

/// OAuth 2.0 Authorization Code flow engine.
///
/// Holds an immutable [`ProviderConfig`] and the [`HttpClient`] used for the
/// token exchange. There is no interior mutability: a shared reference can
/// be used from any number of threads at once, provided `C` is [`Sync`].
///
/// The token response status is interpreted here, so `C` must not follow
/// redirects (see [`HttpClient`]).
///
/// # Example
///
/// ```no_run
/// use oauth2_engine::{OAuth2Engine, PkceCodeVerifierBuf, ProviderConfig, ProviderProfile, StateBuf};
/// use secrecy::SecretString;
///
/// # fn main() -> Result<(), oauth2_engine::client::OAuth2ClientError> {
/// let config = ProviderConfig::from_profile(
/// 	&ProviderProfile::GOOGLE,
/// 	"client-id",
/// 	SecretString::new("client-secret".to_owned()),
/// 	"https://app.example/callback",
/// )?;
/// let http_client = reqwest::blocking::Client::builder()
/// 	.redirect(reqwest::redirect::Policy::none())
/// 	.build()
/// 	.map_err(oauth2_engine::client::OAuth2ClientError::network)?;
/// let engine = OAuth2Engine::new(config, http_client);
///
/// let state = StateBuf::new_random()?;
/// let code_verifier = PkceCodeVerifierBuf::new_random()?;
/// let url = engine.create_authorization_url_with_pkce(
/// 	&state,
/// 	oauth2_engine::ext::pkce::PkceCodeChallengeMethod::S256,
/// 	&code_verifier,
/// 	engine.default_scopes(),
/// )?;
/// // Redirect the user to `url`, then on callback:
/// let _tokens = engine.validate_authorization_code("code-from-callback", Some(&*code_verifier))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct OAuth2Engine<C> {
	config: ProviderConfig,
	http_client: C,
	timeout: Option<Duration>,
}

impl<C> OAuth2Engine<C> {
	pub fn new(config: ProviderConfig, http_client: C) -> Self {
		Self {
			config,
			http_client,
			timeout: None,
		}
	}

	pub fn from_settings(settings: ClientSettings, http_client: C) -> Result<Self, OAuth2ClientError> {
		let timeout = settings.timeout();
		let engine = Self::new(settings.into_provider_config()?, http_client);

		Ok(match timeout {
			Some(timeout) => engine.with_timeout(timeout),
			None => engine,
		})
	}

	/// Bounds each token exchange round trip.
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);
		self
	}

	pub fn config(&self) -> &ProviderConfig {
		&self.config
	}

	pub fn default_scopes(&self) -> &[String] {
		self.config.default_scopes()
	}

	/// Builds the authorization redirect URL without PKCE.
	pub fn create_authorization_url<S: AsRef<str>>(
		&self,
		state: &State,
		scopes: &[S],
	) -> Result<UriBuf, OAuth2ClientError> {
		if self.config.pkce == PkceRequirement::Required {
			return Err(OAuth2ClientError::configuration(
				"provider requires PKCE on the authorization request",
			));
		}

		let scope = self.scope(scopes)?;
		build_authorization_url(
			&self.config.authorize_endpoint,
			AuthorizationRequest::new(&self.config, state, scope.as_deref()),
		)
	}

	/// Builds the authorization redirect URL carrying the PKCE challenge
	/// derived from `code_verifier`.
	pub fn create_authorization_url_with_pkce<S: AsRef<str>>(
		&self,
		state: &State,
		method: PkceCodeChallengeMethod,
		code_verifier: &PkceCodeVerifier,
		scopes: &[S],
	) -> Result<UriBuf, OAuth2ClientError> {
		if self.config.pkce == PkceRequirement::Unsupported {
			return Err(OAuth2ClientError::configuration(
				"provider does not support PKCE",
			));
		}

		let scope = self.scope(scopes)?;
		let pkce = PkceCodeChallengeAndMethod::from_code_verifier(code_verifier, method);
		build_authorization_url(
			&self.config.authorize_endpoint,
			AuthorizationRequest::new(&self.config, state, scope.as_deref())
				.with_pkce_challenge(pkce),
		)
	}

	/// The token request [`validate_authorization_code`] sends.
	///
	/// [`validate_authorization_code`]: Self::validate_authorization_code
	pub fn authorization_code_request(
		&self,
		code: &str,
		code_verifier: Option<&PkceCodeVerifier>,
	) -> Result<http::Request<Vec<u8>>, OAuth2ClientError> {
		let code = Code::new(code)
			.map_err(|_| OAuth2ClientError::configuration("invalid authorization code"))?;

		match (self.config.pkce, code_verifier) {
			(PkceRequirement::Required, None) => {
				return Err(OAuth2ClientError::configuration(
					"provider requires a PKCE `code_verifier`",
				));
			}
			(PkceRequirement::Unsupported, Some(_)) => {
				return Err(OAuth2ClientError::configuration(
					"provider does not support PKCE",
				));
			}
			_ => (),
		}

		AuthorizationCodeTokenRequest::new(&self.config, code, code_verifier).build_request(
			&self.config.token_endpoint,
			&self.config,
			&self.config.client_secret,
			self.timeout.map(Timeout),
		)
	}

	fn scope<S: AsRef<str>>(&self, scopes: &[S]) -> Result<Option<ScopeBuf>, OAuth2ClientError> {
		let scope = ScopeBuf::from_strs(scopes)?;

		if scope.is_none() && self.config.requires_scope {
			return Err(OAuth2ClientError::configuration(
				"provider requires at least one scope",
			));
		}

		Ok(scope)
	}
}

impl<C: HttpClient> OAuth2Engine<C> {
	/// Exchanges an authorization code for tokens.
	///
	/// Performs a single round trip; nothing is retried.
	pub fn validate_authorization_code(
		&self,
		code: &str,
		code_verifier: Option<&PkceCodeVerifier>,
	) -> Result<TokenResponse, OAuth2ClientError> {
		let tokens: TokenResponse = self.validate_authorization_code_as(code, code_verifier)?;

		if self.config.response_schema == ResponseSchema::OpenIdConnect && tokens.id_token.is_none()
		{
			return Err(OAuth2ClientError::json_parse(
				"missing `id_token` in OpenID Connect token response",
			));
		}

		Ok(tokens)
	}

	/// Exchanges an authorization code for tokens, deserializing the
	/// response body into `T`.
	pub fn validate_authorization_code_as<T: DeserializeOwned>(
		&self,
		code: &str,
		code_verifier: Option<&PkceCodeVerifier>,
	) -> Result<T, OAuth2ClientError> {
		let request = self.authorization_code_request(code, code_verifier)?;
		let response = self.http_client.send(request)?;
		parse_token_response(response)
	}
}
