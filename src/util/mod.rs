//! URI query string utilities and random token generation.
use iref::{
	Uri, UriBuf,
	uri::{Query, QueryBuf},
};
use serde::{Deserialize, Serialize};

use crate::client::OAuth2ClientError;

mod random;

pub use random::*;

/// Placeholder type for structs that carry no extension fields.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NoExtension {}

/// Parses an absolute URI with an authority component
/// (`scheme://host[:port]/...`).
pub fn parse_absolute_uri(name: &str, value: &str) -> Result<UriBuf, OAuth2ClientError> {
	let uri = Uri::new(value)
		.map_err(|_| OAuth2ClientError::configuration(format!("`{name}` is not a valid URI")))?;

	if uri.authority().is_none() {
		return Err(OAuth2ClientError::configuration(format!(
			"`{name}` must be an absolute URI with a host"
		)));
	}

	Ok(uri.to_owned())
}

/// Percent-encodes `value` as a URI query component.
///
/// Uses the `application/x-www-form-urlencoded` serializer, then writes
/// spaces as `%20` instead of `+`. A literal `+` is already escaped as
/// `%2B`, so the substitution is unambiguous.
pub fn serialize_query<T: Serialize>(value: T) -> Result<String, OAuth2ClientError> {
	let encoded = serde_html_form::to_string(value).map_err(OAuth2ClientError::configuration)?;
	Ok(encoded.replace('+', "%20"))
}

/// Appends the serialized `value` to the query of `uri`.
///
/// Existing query parameters are preserved.
pub fn extend_uri_query<T: Serialize>(uri: &mut UriBuf, value: T) -> Result<(), OAuth2ClientError> {
	let query = concat_query(
		uri.query().map(ToOwned::to_owned).unwrap_or_default(),
		&serialize_query(value)?,
	);

	let query = Query::new(query.as_str())
		.map_err(|_| OAuth2ClientError::configuration("invalid URI query"))?;
	uri.set_query(Some(query));
	Ok(())
}

/// Concatenates two query strings with `&` as separator.
///
/// If either query is empty, the other is returned as-is.
pub fn concat_query(query: QueryBuf, other: &str) -> String {
	let mut query = query.into_string();

	if !query.is_empty() && !other.is_empty() {
		query.push('&')
	}

	query.push_str(other);
	query
}

#[cfg(test)]
mod tests {
	use iref::uri;

	use super::*;

	#[derive(Serialize)]
	struct Params<'a> {
		scope: &'a str,
		redirect_uri: &'a str,
	}

	#[test]
	fn spaces_are_percent_encoded() {
		let query = serialize_query(Params {
			scope: "a b+c",
			redirect_uri: "https://app.example/cb",
		})
		.unwrap();

		assert_eq!(
			query,
			"scope=a%20b%2Bc&redirect_uri=https%3A%2F%2Fapp.example%2Fcb"
		);
	}

	#[test]
	fn existing_query_is_preserved() {
		let mut uri = uri!("https://example.com/auth?prompt=consent").to_owned();
		extend_uri_query(
			&mut uri,
			Params {
				scope: "a",
				redirect_uri: "x",
			},
		)
		.unwrap();

		assert_eq!(
			uri.as_str(),
			"https://example.com/auth?prompt=consent&scope=a&redirect_uri=x"
		);
	}

	#[test]
	fn absolute_uri_required() {
		assert!(parse_absolute_uri("redirect_uri", "https://app.example/cb").is_ok());
		assert!(parse_absolute_uri("redirect_uri", "/cb").is_err());
		assert!(parse_absolute_uri("redirect_uri", "urn:example:cb").is_err());
		assert!(parse_absolute_uri("redirect_uri", "").is_err());
	}
}
