//! Core OAuth 2.0 string types.
//!
//! Each type is validated against the grammar given in
//! [RFC 6749 Appendix A](https://datatracker.ietf.org/doc/html/rfc6749#appendix-A)
//! and comes in a borrowed/owned pair (e.g. [`State`] / [`StateBuf`]),
//! following the same pattern as [`str`] / [`String`].
mod access_token;
mod client_id;
mod code;
mod scope;
mod state;

pub use access_token::*;
pub use client_id::*;
pub use code::*;
pub use scope::*;
pub use state::*;

/// VSCHAR: visible ASCII character plus space (`0x20..=0x7E`).
const fn is_vschar(c: u8) -> bool {
	c >= 0x20 && c <= 0x7e
}

/// NQCHAR: `%x21 / %x23-5B / %x5D-7E`.
const fn is_nqchar(c: u8) -> bool {
	c == 0x21 || (c >= 0x23 && c <= 0x5b) || (c >= 0x5d && c <= 0x7e)
}

/// Returns `true` if `bytes` is a non-empty sequence of VSCHAR.
const fn is_vschar_string(bytes: &[u8]) -> bool {
	let mut i = 0;

	while i < bytes.len() {
		if !is_vschar(bytes[i]) {
			return false;
		}

		i += 1
	}

	i > 0
}
