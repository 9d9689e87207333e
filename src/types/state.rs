use str_newtype::StrNewType;

use crate::{
	client::OAuth2ClientError,
	util::{DEFAULT_RANDOM_TOKEN_LEN, generate_random_token},
};

use super::is_vschar_string;

/// An OAuth 2.0 state parameter (borrowed).
///
/// Opaque value round-tripped through the authorization redirect, used for
/// CSRF protection. Comparing the returned value with the stored one is the
/// caller's job.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-10.12>
///
/// # Grammar
///
/// ```abnf
/// state = 1*VSCHAR
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, StrNewType)]
#[newtype(serde, owned(StateBuf, derive(PartialEq, Eq, PartialOrd, Ord, Hash)))]
pub struct State(str);

impl State {
	pub const fn validate_str(s: &str) -> bool {
		Self::validate_bytes(s.as_bytes())
	}

	pub const fn validate_bytes(bytes: &[u8]) -> bool {
		is_vschar_string(bytes)
	}
}

impl StateBuf {
	/// Generates a new random, base64url-encoded 256-bit CSRF token.
	pub fn new_random() -> Result<Self, OAuth2ClientError> {
		Self::new_random_len(DEFAULT_RANDOM_TOKEN_LEN)
	}

	/// Generates a new random, base64url-encoded CSRF token from `len`
	/// random bytes.
	pub fn new_random_len(len: usize) -> Result<Self, OAuth2ClientError> {
		Ok(Self(generate_random_token(len)?))
	}
}
