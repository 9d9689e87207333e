//! Named identity provider presets.
//!
//! A profile is plain data: endpoints, default scopes, and what the provider
//! demands of the flow. Every profile drives the same
//! [`OAuth2Engine`](crate::OAuth2Engine).
use serde::{Deserialize, Serialize};

/// Whether a provider accepts or demands PKCE.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PkceRequirement {
	/// The provider rejects `code_challenge` / `code_verifier`.
	Unsupported,

	#[default]
	Optional,

	/// Every authorization request must carry a challenge and every
	/// exchange a verifier.
	Required,
}

/// Shape the token response is expected to have.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseSchema {
	/// RFC 6749 Section 5.1 access token response.
	#[default]
	OAuth2,

	/// OAuth 2.0 response that must also carry an `id_token`.
	OpenIdConnect,
}

/// Endpoint and flow presets of a known identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderProfile {
	pub name: &'static str,
	pub authorize_endpoint: &'static str,
	pub token_endpoint: &'static str,
	pub default_scopes: &'static [&'static str],
	pub requires_scope: bool,
	pub pkce: PkceRequirement,
	pub response_schema: ResponseSchema,
}

impl ProviderProfile {
	pub const DISCORD: Self = Self {
		name: "discord",
		authorize_endpoint: "https://discord.com/oauth2/authorize",
		token_endpoint: "https://discord.com/api/oauth2/token",
		default_scopes: &["identify"],
		requires_scope: true,
		pkce: PkceRequirement::Optional,
		response_schema: ResponseSchema::OAuth2,
	};

	pub const GITHUB: Self = Self {
		name: "github",
		authorize_endpoint: "https://github.com/login/oauth/authorize",
		token_endpoint: "https://github.com/login/oauth/access_token",
		default_scopes: &[],
		requires_scope: false,
		pkce: PkceRequirement::Unsupported,
		response_schema: ResponseSchema::OAuth2,
	};

	pub const GOOGLE: Self = Self {
		name: "google",
		authorize_endpoint: "https://accounts.google.com/o/oauth2/v2/auth",
		token_endpoint: "https://oauth2.googleapis.com/token",
		default_scopes: &["openid", "email", "profile"],
		requires_scope: true,
		pkce: PkceRequirement::Required,
		response_schema: ResponseSchema::OpenIdConnect,
	};

	pub const LINKEDIN: Self = Self {
		name: "linkedin",
		authorize_endpoint: "https://www.linkedin.com/oauth/v2/authorization",
		token_endpoint: "https://www.linkedin.com/oauth/v2/accessToken",
		default_scopes: &["openid", "profile", "email"],
		requires_scope: true,
		pkce: PkceRequirement::Unsupported,
		response_schema: ResponseSchema::OpenIdConnect,
	};

	pub const SPOTIFY: Self = Self {
		name: "spotify",
		authorize_endpoint: "https://accounts.spotify.com/authorize",
		token_endpoint: "https://accounts.spotify.com/api/token",
		default_scopes: &[],
		requires_scope: false,
		pkce: PkceRequirement::Optional,
		response_schema: ResponseSchema::OAuth2,
	};

	pub const ALL: &'static [Self] = &[
		Self::DISCORD,
		Self::GITHUB,
		Self::GOOGLE,
		Self::LINKEDIN,
		Self::SPOTIFY,
	];

	/// Looks up a preset by name, ignoring ASCII case.
	pub fn from_name(name: &str) -> Option<&'static Self> {
		Self::ALL
			.iter()
			.find(|profile| profile.name.eq_ignore_ascii_case(name))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::util::parse_absolute_uri;

	#[test]
	fn lookup_by_name() {
		assert_eq!(ProviderProfile::from_name("google"), Some(&ProviderProfile::GOOGLE));
		assert_eq!(ProviderProfile::from_name("Discord"), Some(&ProviderProfile::DISCORD));
		assert_eq!(ProviderProfile::from_name("myspace"), None);
	}

	#[test]
	fn presets_are_well_formed() {
		for profile in ProviderProfile::ALL {
			assert!(parse_absolute_uri("authorize_endpoint", profile.authorize_endpoint).is_ok());
			assert!(parse_absolute_uri("token_endpoint", profile.token_endpoint).is_ok());
			assert!(!profile.requires_scope || !profile.default_scopes.is_empty());
		}
	}
}
