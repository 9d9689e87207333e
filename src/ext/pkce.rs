//! Proof Key for Code Exchange by OAuth Public Clients
//!
//! See: <https://datatracker.ietf.org/doc/html/rfc7636>
use std::{borrow::Cow, str::FromStr};

use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use str_newtype::StrNewType;

use crate::{
	client::OAuth2ClientError,
	util::{is_unreserved, random_bytes},
};

/// Code Challenge used for [PKCE](https://tools.ietf.org/html/rfc7636) protection via the
/// `code_challenge` parameter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PkceCodeChallengeAndMethod {
	#[serde(rename = "code_challenge")]
	pub challenge: PkceCodeChallengeBuf,

	#[serde(rename = "code_challenge_method")]
	pub method: PkceCodeChallengeMethod,
}

impl PkceCodeChallengeAndMethod {
	/// Derives the challenge for `code_verifier` with the given method.
	pub fn from_code_verifier(
		code_verifier: &PkceCodeVerifier,
		method: PkceCodeChallengeMethod,
	) -> Self {
		Self {
			challenge: method.transform(code_verifier).into_owned(),
			method,
		}
	}

	/// Generates a random 32-byte verifier and its `S256` challenge.
	pub fn new_random_sha256() -> Result<(Self, PkceCodeVerifierBuf), OAuth2ClientError> {
		let code_verifier = PkceCodeVerifierBuf::new_random()?;
		Ok((
			Self::from_code_verifier(&code_verifier, PkceCodeChallengeMethod::S256),
			code_verifier,
		))
	}

	pub fn as_str(&self) -> &str {
		&self.challenge
	}

	pub fn method(&self) -> PkceCodeChallengeMethod {
		self.method
	}
}

/// Derives a `code_challenge` from a raw verifier string and method name.
///
/// Fails with [`OAuth2ClientError::Configuration`] if the verifier is not a
/// valid PKCE verifier or the method is neither `S256` nor `plain`.
pub fn derive_challenge(
	code_verifier: &str,
	method: &str,
) -> Result<PkceCodeChallengeBuf, OAuth2ClientError> {
	let method: PkceCodeChallengeMethod = method.parse()?;
	let code_verifier = PkceCodeVerifier::new(code_verifier)
		.map_err(|_| OAuth2ClientError::configuration("invalid PKCE `code_verifier`"))?;
	Ok(method.transform(code_verifier).into_owned())
}

/// Code Challenge.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc7636#section-4.2>
///
/// # Grammar
///
/// ```abnf
/// code-challenge = 43*128unreserved
/// unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, StrNewType)]
#[newtype(
	serde,
	owned(PkceCodeChallengeBuf, derive(PartialEq, Eq, PartialOrd, Ord, Hash))
)]
pub struct PkceCodeChallenge(str);

impl PkceCodeChallenge {
	pub const fn validate_str(s: &str) -> bool {
		Self::validate_bytes(s.as_bytes())
	}

	pub const fn validate_bytes(bytes: &[u8]) -> bool {
		validate_verifier_or_challenge(bytes)
	}
}

impl<'a> From<&'a PkceCodeVerifier> for &'a PkceCodeChallenge {
	fn from(value: &'a PkceCodeVerifier) -> Self {
		unsafe {
			// SAFETY: Code challenge and verifier have the same grammar.
			PkceCodeChallenge::new_unchecked(value)
		}
	}
}

/// Error returned when parsing an invalid PKCE code challenge method string.
#[derive(Debug, thiserror::Error)]
#[error("invalid PKCE `code_challenge_method` value")]
pub struct InvalidPkceCodeChallengeMethod;

impl From<InvalidPkceCodeChallengeMethod> for OAuth2ClientError {
	fn from(value: InvalidPkceCodeChallengeMethod) -> Self {
		OAuth2ClientError::configuration(value)
	}
}

pub const PKCE_CODE_CHALLENGE_METHOD_PLAIN: &str = "plain";

pub const PKCE_CODE_CHALLENGE_METHOD_S256: &str = "S256";

/// PKCE code challenge method.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc7636#section-4.2>
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PkceCodeChallengeMethod {
	/// The code challenge is the code verifier itself (not recommended).
	Plain,

	/// The code challenge is the BASE64URL-encoded SHA-256 hash of the
	/// code verifier.
	S256,
}

impl PkceCodeChallengeMethod {
	/// Transforms a code verifier into a code challenge using this method.
	pub fn transform<'a>(&self, code_verifier: &'a PkceCodeVerifier) -> Cow<'a, PkceCodeChallenge> {
		match self {
			Self::Plain => Cow::Borrowed(code_verifier.into()),
			Self::S256 => {
				let digest = Sha256::digest(code_verifier.as_str().as_bytes());
				Cow::Owned(PkceCodeChallengeBuf(BASE64_URL_SAFE_NO_PAD.encode(digest)))
			}
		}
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Plain => PKCE_CODE_CHALLENGE_METHOD_PLAIN,
			Self::S256 => PKCE_CODE_CHALLENGE_METHOD_S256,
		}
	}
}

impl FromStr for PkceCodeChallengeMethod {
	type Err = InvalidPkceCodeChallengeMethod;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			PKCE_CODE_CHALLENGE_METHOD_PLAIN => Ok(Self::Plain),
			PKCE_CODE_CHALLENGE_METHOD_S256 => Ok(Self::S256),
			_ => Err(InvalidPkceCodeChallengeMethod),
		}
	}
}

impl Serialize for PkceCodeChallengeMethod {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		self.as_str().serialize(serializer)
	}
}

impl<'de> Deserialize<'de> for PkceCodeChallengeMethod {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		String::deserialize(deserializer)?
			.parse()
			.map_err(serde::de::Error::custom)
	}
}

/// Code Verifier.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc7636#section-4.1>
///
/// # Grammar
///
/// ```abnf
/// code-verifier = 43*128unreserved
/// unreserved = ALPHA / DIGIT / "-" / "." / "_" / "~"
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, StrNewType)]
#[newtype(
	serde,
	owned(PkceCodeVerifierBuf, derive(PartialEq, Eq, PartialOrd, Ord, Hash))
)]
pub struct PkceCodeVerifier(str);

impl PkceCodeVerifier {
	pub const fn validate_str(s: &str) -> bool {
		Self::validate_bytes(s.as_bytes())
	}

	pub const fn validate_bytes(bytes: &[u8]) -> bool {
		validate_verifier_or_challenge(bytes)
	}
}

impl PkceCodeVerifierBuf {
	/// Generates a verifier from 32 random bytes (43 characters).
	pub fn new_random() -> Result<Self, OAuth2ClientError> {
		Self::new_random_len(32)
	}

	/// Generates a verifier from `len` random bytes, prior to base64-encoding.
	///
	/// `len` must be in `32..=96` so that the encoded verifier falls in the
	/// 43 to 128 character range required by RFC 7636.
	pub fn new_random_len(len: usize) -> Result<Self, OAuth2ClientError> {
		if !(32..=96).contains(&len) {
			return Err(OAuth2ClientError::configuration(format!(
				"PKCE verifier length must be within 32..=96 random bytes, got {len}"
			)));
		}

		let random_bytes = random_bytes(len)?;
		Ok(Self(BASE64_URL_SAFE_NO_PAD.encode(random_bytes)))
	}
}

const fn validate_verifier_or_challenge(bytes: &[u8]) -> bool {
	bytes.len() >= 43 && bytes.len() <= 128 && is_unreserved(bytes)
}
