//! Token exchange payloads and tolerant response-body parsing.
//!
//! Okta's token endpoint answers with JSON, but this module keeps the historical
//! compatibility shim for providers that mislabel their content type: the body is parsed
//! as JSON first and as a url-form-encoded query string second, strictly in that order.
//! A wrong `Content-Type` therefore never fails an exchange; only bodies without a
//! usable `access_token` in either representation do.

// self
use crate::{_prelude::*, error::TokenResponseError};

/// Result of a successful token exchange, per authentication attempt.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
	/// Bearer token used for the subsequent user-info fetch.
	pub access_token: String,
	/// Optional refresh token issued alongside the access token.
	pub refresh_token: Option<String>,
	/// Remaining response fields, with `refresh_token` always removed.
	pub extra: JsonMap<String, Value>,
}
impl Debug for TokenSet {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenSet")
			.field("access_token", &"<redacted>")
			.field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
			.field("extra", &self.extra)
			.finish()
	}
}

/// Selects the form key carrying the exchanged secret.
///
/// Okta expects the secret under `refresh_token` when the request's `grant_type`
/// parameter equals `"refresh_token"`, and under `code` for every other grant.
pub(crate) fn code_param_name(params: &BTreeMap<String, String>) -> &'static str {
	if params.get("grant_type").is_some_and(|value| value == "refresh_token") {
		"refresh_token"
	} else {
		"code"
	}
}

/// Serializes the parameter bag as an `application/x-www-form-urlencoded` body.
pub(crate) fn encode_form(params: &BTreeMap<String, String>) -> String {
	let mut serializer = url::form_urlencoded::Serializer::new(String::new());

	for (key, value) in params {
		serializer.append_pair(key, value);
	}

	serializer.finish()
}

/// Parses a token endpoint body into a [`TokenSet`], JSON first, form-encoded second.
///
/// `refresh_token` is extracted and removed from the remaining fields so it never leaks
/// into the extra-parameter bag handed onward.
pub(crate) fn parse_token_response(body: &str) -> Result<TokenSet, TokenResponseError> {
	let mut fields = match serde_json::from_str::<Value>(body) {
		Ok(Value::Object(map)) => map,
		// A scalar JSON body parses but carries no fields to extract.
		Ok(_) => JsonMap::new(),
		Err(_) => parse_form_fields(body),
	};
	let access_token = match fields.remove("access_token") {
		Some(Value::String(token)) => token,
		Some(_) => return Err(TokenResponseError::NonStringAccessToken),
		None => return Err(TokenResponseError::MissingAccessToken),
	};
	let refresh_token = match fields.remove("refresh_token") {
		Some(Value::String(token)) => Some(token),
		// A malformed refresh token is still stripped from the extras.
		_ => None,
	};

	Ok(TokenSet { access_token, refresh_token, extra: fields })
}

fn parse_form_fields(body: &str) -> JsonMap<String, Value> {
	url::form_urlencoded::parse(body.as_bytes())
		.map(|(key, value)| (key.into_owned(), Value::String(value.into_owned())))
		.collect()
}
