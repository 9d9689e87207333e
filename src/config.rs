//! Deserializable client configuration.
use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;

use crate::{ProviderConfig, ProviderProfile, client::OAuth2ClientError};

/// Client settings, as loaded from a configuration file or environment.
///
/// Either `provider` names a [`ProviderProfile`], or both endpoints are
/// given explicitly. Explicit endpoints override the profile's.
///
/// ```json
/// {
///   "client_id": "1234",
///   "client_secret": "s3cr3t",
///   "redirect_uri": "https://app.example/callback",
///   "provider": "discord",
///   "scopes": ["identify", "email"],
///   "timeout_secs": 10
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct ClientSettings {
	pub client_id: String,

	pub client_secret: SecretString,

	pub redirect_uri: String,

	#[serde(default)]
	pub provider: Option<String>,

	#[serde(default)]
	pub authorize_endpoint: Option<String>,

	#[serde(default)]
	pub token_endpoint: Option<String>,

	/// Replaces the profile's default scopes.
	#[serde(default)]
	pub scopes: Option<Vec<String>>,

	/// Bound on each token exchange round trip.
	#[serde(default)]
	pub timeout_secs: Option<u64>,
}

impl ClientSettings {
	pub fn timeout(&self) -> Option<Duration> {
		self.timeout_secs.map(Duration::from_secs)
	}

	/// Resolves the settings into a validated [`ProviderConfig`].
	pub fn into_provider_config(self) -> Result<ProviderConfig, OAuth2ClientError> {
		let mut config = match self.provider.as_deref() {
			Some(name) => {
				let profile = ProviderProfile::from_name(name).ok_or_else(|| {
					OAuth2ClientError::configuration(format!("unknown provider `{name}`"))
				})?;

				let mut config = ProviderConfig::from_profile(
					profile,
					&self.client_id,
					self.client_secret,
					&self.redirect_uri,
				)?;

				if let Some(authorize_endpoint) = &self.authorize_endpoint {
					log::debug!("overriding {} authorization endpoint", profile.name);
					config = config.with_authorize_endpoint(authorize_endpoint)?;
				}
				if let Some(token_endpoint) = &self.token_endpoint {
					log::debug!("overriding {} token endpoint", profile.name);
					config = config.with_token_endpoint(token_endpoint)?;
				}

				config
			}
			None => {
				let authorize_endpoint = self.authorize_endpoint.as_deref().ok_or_else(|| {
					OAuth2ClientError::configuration(
						"`authorize_endpoint` is required without a provider",
					)
				})?;
				let token_endpoint = self.token_endpoint.as_deref().ok_or_else(|| {
					OAuth2ClientError::configuration(
						"`token_endpoint` is required without a provider",
					)
				})?;

				ProviderConfig::new(
					&self.client_id,
					self.client_secret,
					&self.redirect_uri,
					authorize_endpoint,
					token_endpoint,
				)?
			}
		};

		if let Some(scopes) = self.scopes {
			config = config.with_default_scopes(scopes)?;
		}

		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use secrecy::ExposeSecret;

	use super::*;
	use crate::{
		client::OAuth2Client,
		provider::{PkceRequirement, ResponseSchema},
	};

	fn settings(json: &str) -> ClientSettings {
		serde_json::from_str(json).unwrap()
	}

	#[test]
	fn provider_preset() {
		let config = settings(
			r#"{
				"client_id": "1234",
				"client_secret": "s3cr3t",
				"redirect_uri": "https://app.example/callback",
				"provider": "Google"
			}"#,
		)
		.into_provider_config()
		.unwrap();

		assert_eq!(config.client_id().as_str(), "1234");
		assert_eq!(
			config.authorize_endpoint().as_str(),
			"https://accounts.google.com/o/oauth2/v2/auth"
		);
		assert_eq!(config.default_scopes(), ["openid", "email", "profile"]);
		assert_eq!(config.pkce_requirement(), PkceRequirement::Required);
		assert_eq!(config.response_schema(), ResponseSchema::OpenIdConnect);
	}

	#[test]
	fn overrides_win_over_preset() {
		let config = settings(
			r#"{
				"client_id": "1234",
				"client_secret": "s3cr3t",
				"redirect_uri": "https://app.example/callback",
				"provider": "discord",
				"token_endpoint": "http://127.0.0.1:8080/token",
				"scopes": ["identify", "email"]
			}"#,
		)
		.into_provider_config()
		.unwrap();

		assert_eq!(
			config.authorize_endpoint().as_str(),
			"https://discord.com/oauth2/authorize"
		);
		assert_eq!(config.token_endpoint().as_str(), "http://127.0.0.1:8080/token");
		assert_eq!(config.default_scopes(), ["identify", "email"]);
	}

	#[test]
	fn explicit_endpoints() {
		let settings = settings(
			r#"{
				"client_id": "abc",
				"client_secret": "s3cr3t",
				"redirect_uri": "https://app.example/cb",
				"authorize_endpoint": "https://example.com/auth",
				"token_endpoint": "https://example.com/token",
				"timeout_secs": 10
			}"#,
		);

		assert_eq!(settings.timeout(), Some(Duration::from_secs(10)));
		assert_eq!(settings.client_secret.expose_secret(), "s3cr3t");

		let config = settings.into_provider_config().unwrap();
		assert_eq!(config.pkce_requirement(), PkceRequirement::Optional);
		assert!(config.default_scopes().is_empty());
	}

	#[test]
	fn missing_endpoints_without_provider() {
		let result = settings(
			r#"{
				"client_id": "abc",
				"client_secret": "s3cr3t",
				"redirect_uri": "https://app.example/cb",
				"authorize_endpoint": "https://example.com/auth"
			}"#,
		)
		.into_provider_config();

		assert!(matches!(result, Err(OAuth2ClientError::Configuration(_))));
	}

	#[test]
	fn unknown_provider() {
		let result = settings(
			r#"{
				"client_id": "abc",
				"client_secret": "s3cr3t",
				"redirect_uri": "https://app.example/cb",
				"provider": "myspace"
			}"#,
		)
		.into_provider_config();

		assert!(matches!(result, Err(OAuth2ClientError::Configuration(_))));
	}

	#[test]
	fn invalid_scope_override() {
		let result = settings(
			r#"{
				"client_id": "abc",
				"client_secret": "s3cr3t",
				"redirect_uri": "https://app.example/cb",
				"provider": "spotify",
				"scopes": ["user read"]
			}"#,
		)
		.into_provider_config();

		assert!(matches!(result, Err(OAuth2ClientError::Configuration(_))));
	}
}
