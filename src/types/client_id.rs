use str_newtype::StrNewType;

use super::is_vschar_string;

/// An OAuth 2.0 client identifier (borrowed).
///
/// Client identifiers are issued to registered clients by the authorization
/// server, as defined in
/// [RFC 6749 Section 2.2](https://datatracker.ietf.org/doc/html/rfc6749#section-2.2).
///
/// The RFC grammar allows an empty identifier, but a confidential client
/// authenticating with HTTP Basic always has one, so empty values are
/// rejected here.
///
/// # Grammar
///
/// ```abnf
/// client_id = 1*VSCHAR
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, StrNewType)]
#[newtype(
	serde,
	owned(ClientIdBuf, derive(PartialEq, Eq, PartialOrd, Ord, Hash))
)]
pub struct ClientId(str);

impl ClientId {
	pub const fn validate_str(s: &str) -> bool {
		Self::validate_bytes(s.as_bytes())
	}

	pub const fn validate_bytes(bytes: &[u8]) -> bool {
		is_vschar_string(bytes)
	}
}
