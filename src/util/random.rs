//! Secure random tokens for `state` and PKCE code verifiers.
use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use rand::{TryRngCore, rngs::OsRng};

use crate::client::OAuth2ClientError;

/// Number of random bytes used when the caller has no preference (256 bits).
pub const DEFAULT_RANDOM_TOKEN_LEN: usize = 32;

/// Generates `byte_length` bytes from the operating system's secure random
/// source and returns them base64url-encoded without padding.
///
/// The output only contains characters of the RFC 3986 `unreserved` set
/// (`A-Z a-z 0-9 - _`). There is no fallback to a weaker generator: if the
/// OS source fails, [`OAuth2ClientError::RandomGeneration`] is returned.
pub fn generate_random_token(byte_length: usize) -> Result<String, OAuth2ClientError> {
	Ok(BASE64_URL_SAFE_NO_PAD.encode(random_bytes(byte_length)?))
}

pub(crate) fn random_bytes(byte_length: usize) -> Result<Vec<u8>, OAuth2ClientError> {
	if byte_length == 0 {
		return Err(OAuth2ClientError::configuration(
			"random token length must be positive",
		));
	}

	let mut bytes = vec![0u8; byte_length];
	OsRng
		.try_fill_bytes(&mut bytes)
		.map_err(OAuth2ClientError::random_generation)?;
	Ok(bytes)
}

/// Returns `true` if every byte is in the RFC 3986 `unreserved` set.
pub const fn is_unreserved(bytes: &[u8]) -> bool {
	let mut i = 0;

	while i < bytes.len() {
		if !bytes[i].is_ascii_alphanumeric() && !matches!(bytes[i], b'-' | b'.' | b'_' | b'~') {
			return false;
		}

		i += 1
	}

	true
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;

	#[test]
	fn tokens_are_unreserved() {
		for len in [16, 32, 48, 64, 96] {
			let token = generate_random_token(len).unwrap();
			assert!(is_unreserved(token.as_bytes()), "{token}");
		}
	}

	#[test]
	fn tokens_decode_to_requested_length() {
		for len in 1..=128 {
			let token = generate_random_token(len).unwrap();
			let decoded = BASE64_URL_SAFE_NO_PAD.decode(&token).unwrap();
			assert_eq!(decoded.len(), len);
		}
	}

	#[test]
	fn token_length_is_monotonic() {
		let mut previous = 0;
		for len in 1..=128 {
			let token = generate_random_token(len).unwrap();
			assert!(token.len() >= previous);
			previous = token.len();
		}
	}

	#[test]
	fn tokens_do_not_collide() {
		let tokens: HashSet<String> = (0..10_000)
			.map(|_| generate_random_token(16).unwrap())
			.collect();
		assert_eq!(tokens.len(), 10_000);
	}

	#[test]
	fn zero_length_is_rejected() {
		assert!(matches!(
			generate_random_token(0),
			Err(OAuth2ClientError::Configuration(_))
		));
	}
}
