use str_newtype::StrNewType;

use super::is_vschar_string;

/// An OAuth 2.0 authorization code (borrowed).
///
/// Short-lived credential returned to the redirection endpoint and exchanged
/// at the token endpoint.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.2>
///
/// # Grammar
///
/// ```abnf
/// code = 1*VSCHAR
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, StrNewType)]
#[newtype(serde, owned(CodeBuf, derive(PartialEq, Eq, PartialOrd, Ord, Hash)))]
pub struct Code(str);

impl Code {
	pub const fn validate_str(s: &str) -> bool {
		Self::validate_bytes(s.as_bytes())
	}

	pub const fn validate_bytes(bytes: &[u8]) -> bool {
		is_vschar_string(bytes)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn valid_code() {
		assert!(Code::new("SplxlOBeZQQYbYS6WxSbIA").is_ok());
		assert!(Code::new("4/0AX4XfWh with spaces").is_ok());
	}

	#[test]
	fn invalid_code() {
		assert!(Code::new("").is_err());
		assert!(Code::new("abc\r\n").is_err());
	}
}
