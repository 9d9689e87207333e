use str_newtype::StrNewType;

use crate::client::OAuth2ClientError;

use super::is_nqchar;

/// A single OAuth 2.0 scope token (borrowed).
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-3.3>
///
/// # Grammar
///
/// ```abnf
/// scope-token = 1*( %x21 / %x23-5B / %x5D-7E )
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, StrNewType)]
#[newtype(
	serde,
	owned(ScopeTokenBuf, derive(PartialEq, Eq, PartialOrd, Ord, Hash))
)]
pub struct ScopeToken(str);

impl ScopeToken {
	pub const fn validate_str(s: &str) -> bool {
		Self::validate_bytes(s.as_bytes())
	}

	pub const fn validate_bytes(bytes: &[u8]) -> bool {
		let mut i = 0;

		while i < bytes.len() {
			if !is_nqchar(bytes[i]) {
				return false;
			}

			i += 1;
		}

		i > 0
	}
}

/// An OAuth 2.0 scope value (borrowed).
///
/// A space-separated list of [`ScopeToken`]s.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-3.3>
///
/// # Grammar
///
/// ```abnf
/// scope       = scope-token *( SP scope-token )
/// scope-token = 1*NQCHAR
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, StrNewType)]
#[newtype(serde, owned(ScopeBuf, derive(PartialEq, Eq, PartialOrd, Ord, Hash)))]
pub struct Scope(str);

impl Scope {
	pub const fn validate_str(s: &str) -> bool {
		Self::validate_bytes(s.as_bytes())
	}

	pub const fn validate_bytes(bytes: &[u8]) -> bool {
		let mut i = 0;

		let mut expect_token = true;
		while expect_token {
			expect_token = false;
			let mut scope_token_empty = true;

			while i < bytes.len() {
				match bytes[i] {
					c if is_nqchar(c) => {
						scope_token_empty = false;
						i += 1;
					}
					b' ' => {
						expect_token = true;
						i += 1;
						break;
					}
					_ => return false,
				}
			}

			if scope_token_empty {
				return false;
			}
		}

		true
	}

	pub fn contains(&self, token: &ScopeToken) -> bool {
		self.iter().any(|t| t == token)
	}

	pub fn iter(&self) -> ScopeIter<'_> {
		ScopeIter(self.0.split(' '))
	}
}

impl<'a> IntoIterator for &'a Scope {
	type IntoIter = ScopeIter<'a>;
	type Item = &'a ScopeToken;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

/// Iterator over the [`ScopeToken`]s of a [`Scope`].
pub struct ScopeIter<'a>(std::str::Split<'a, char>);

impl<'a> Iterator for ScopeIter<'a> {
	type Item = &'a ScopeToken;

	fn next(&mut self) -> Option<Self::Item> {
		self.0
			.next()
			.map(|t| unsafe { ScopeToken::new_unchecked(t) })
	}
}

impl ScopeBuf {
	/// Joins scope tokens with a single space.
	///
	/// Returns `None` if the iterator yields no tokens.
	pub fn from_tokens<T>(tokens: impl IntoIterator<Item = T>) -> Option<Self>
	where
		T: AsRef<ScopeToken>,
	{
		let mut result = String::new();

		for token in tokens {
			if !result.is_empty() {
				result.push(' ');
			}

			result.push_str(token.as_ref().as_str());
		}

		if result.is_empty() {
			None
		} else {
			Some(Self(result))
		}
	}

	/// Validates each string as a [`ScopeToken`] and joins them.
	///
	/// Returns `Ok(None)` for an empty list.
	pub fn from_strs<S: AsRef<str>>(scopes: &[S]) -> Result<Option<Self>, OAuth2ClientError> {
		let tokens = scopes
			.iter()
			.map(|s| {
				ScopeToken::new(s.as_ref()).map_err(|_| {
					OAuth2ClientError::configuration(format!(
						"invalid scope token `{}`",
						s.as_ref()
					))
				})
			})
			.collect::<Result<Vec<_>, _>>()?;

		Ok(Self::from_tokens(tokens))
	}
}

impl<'a> IntoIterator for &'a ScopeBuf {
	type IntoIter = ScopeIter<'a>;
	type Item = &'a ScopeToken;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn valid_scope_token() {
		assert!(ScopeToken::new("openid").is_ok());
		assert!(ScopeToken::new("a").is_ok());
		assert!(ScopeToken::new("https://www.googleapis.com/auth/userinfo.email").is_ok());
	}

	#[test]
	fn invalid_scope_token() {
		assert!(ScopeToken::new("").is_err());
		assert!(ScopeToken::new("read write").is_err());
		assert!(ScopeToken::new("ab\\cd").is_err());
		assert!(ScopeToken::new("ab\"cd").is_err());
	}

	#[test]
	fn scope_grammar() {
		assert!(Scope::new("openid profile email").is_ok());
		assert!(Scope::new("").is_err());
		assert!(Scope::new(" openid").is_err());
		assert!(Scope::new("openid ").is_err());
		assert!(Scope::new("openid  profile").is_err());
	}

	#[test]
	fn scope_iter() {
		let scope = Scope::new("openid profile email").unwrap();
		let tokens: Vec<&str> = scope.iter().map(|t| t.as_str()).collect();
		assert_eq!(tokens, vec!["openid", "profile", "email"]);
		assert!(scope.contains(ScopeToken::new("profile").unwrap()));
		assert!(!scope.contains(ScopeToken::new("offline").unwrap()));
	}

	#[test]
	fn scope_buf_from_strs() {
		let scope = ScopeBuf::from_strs(&["identify", "email"]).unwrap().unwrap();
		assert_eq!(scope.as_str(), "identify email");

		let empty: [&str; 0] = [];
		assert!(ScopeBuf::from_strs(&empty).unwrap().is_none());

		assert!(matches!(
			ScopeBuf::from_strs(&["read write"]),
			Err(OAuth2ClientError::Configuration(_))
		));
	}
}
