//! Canonical user profile mapped from Okta's user-info response.
//!
//! Field mapping is direct and never defaults: a claim missing from the response leaves
//! the mapped field empty instead of raising an error. The verbatim response text and
//! its parsed value travel with the profile so callers can reach provider fields the
//! canonical shape does not cover.

// self
use crate::_prelude::*;

/// Normalized representation of the authenticated user.
///
/// Constructed fresh per authentication attempt from the user-info response; the
/// strategy never persists it, so ownership passes entirely to the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OktaProfile {
	/// Subject identifier (Okta's `sub`).
	pub id: Option<String>,
	/// Display name, usually the full name (Okta's `name`).
	pub display_name: Option<String>,
	/// Username, usually the email (Okta's `preferred_username`).
	pub username: Option<String>,
	/// Full name, same source claim as [`display_name`](Self::display_name).
	pub full_name: Option<String>,
	/// Last name (Okta's `family_name`).
	pub family_name: Option<String>,
	/// First name (Okta's `given_name`).
	pub given_name: Option<String>,
	/// Email address.
	pub email: Option<String>,
	/// Locale, e.g. `en/US`.
	pub locale: Option<String>,
	/// Time zone, e.g. `Europe/Paris` (Okta's `zoneinfo`).
	pub zone_info: Option<String>,
	/// Last profile update as epoch seconds (Okta's `updated_at`).
	pub updated_at: Option<i64>,
	/// Whether Okta verified the email address.
	pub email_verified: Option<bool>,
	/// Verbatim response body text.
	pub raw: String,
	/// Parsed response body; always represents the same payload as [`raw`](Self::raw).
	pub json: Value,
}
impl OktaProfile {
	/// Maps a successful user-info response body into the canonical profile.
	///
	/// Malformed JSON—or claims carrying the wrong type—propagates as a hard
	/// [`Error::ProfileParse`] failure; the attempt is aborted, never retried.
	pub fn from_response(body: &str) -> Result<Self> {
		let mut deserializer = serde_json::Deserializer::from_str(body);
		let json: Value = serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| Error::ProfileParse { source })?;
		let claims: UserInfoClaims = serde_path_to_error::deserialize(json.clone())
			.map_err(|source| Error::ProfileParse { source })?;

		Ok(Self {
			id: claims.sub,
			display_name: claims.name.clone(),
			username: claims.preferred_username,
			full_name: claims.name,
			family_name: claims.family_name,
			given_name: claims.given_name,
			email: claims.email,
			locale: claims.locale,
			zone_info: claims.zoneinfo,
			updated_at: claims.updated_at,
			email_verified: claims.email_verified,
			raw: body.to_owned(),
			json,
		})
	}
}

/// Claim subset of the OpenID Connect user-info response consumed by the mapping.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UserInfoClaims {
	sub: Option<String>,
	name: Option<String>,
	preferred_username: Option<String>,
	family_name: Option<String>,
	given_name: Option<String>,
	email: Option<String>,
	locale: Option<String>,
	zoneinfo: Option<String>,
	updated_at: Option<i64>,
	email_verified: Option<bool>,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	const USER_INFO: &str = "{\"sub\":\"u1\",\"name\":\"Alan Smith\",\"preferred_username\":\"alan@x.com\",\"family_name\":\"Smith\",\"given_name\":\"Alan\",\"email\":\"alan@x.com\",\"zoneinfo\":\"Europe/Paris\",\"updated_at\":1700000000,\"email_verified\":true,\"locale\":\"en/US\"}";

	#[test]
	fn maps_every_canonical_field() {
		let profile =
			OktaProfile::from_response(USER_INFO).expect("User-info fixture should map.");

		assert_eq!(profile.id.as_deref(), Some("u1"));
		assert_eq!(profile.display_name.as_deref(), Some("Alan Smith"));
		assert_eq!(profile.username.as_deref(), Some("alan@x.com"));
		assert_eq!(profile.full_name.as_deref(), Some("Alan Smith"));
		assert_eq!(profile.family_name.as_deref(), Some("Smith"));
		assert_eq!(profile.given_name.as_deref(), Some("Alan"));
		assert_eq!(profile.email.as_deref(), Some("alan@x.com"));
		assert_eq!(profile.zone_info.as_deref(), Some("Europe/Paris"));
		assert_eq!(profile.updated_at, Some(1_700_000_000));
		assert_eq!(profile.email_verified, Some(true));
		assert_eq!(profile.locale.as_deref(), Some("en/US"));
	}

	#[test]
	fn raw_and_json_carry_the_same_payload() {
		let profile =
			OktaProfile::from_response(USER_INFO).expect("User-info fixture should map.");
		let reparsed: Value =
			serde_json::from_str(&profile.raw).expect("Raw body should stay valid JSON.");

		assert_eq!(profile.raw, USER_INFO);
		assert_eq!(profile.json, reparsed);
	}

	#[test]
	fn missing_claims_map_to_empty_fields() {
		let profile = OktaProfile::from_response("{\"sub\":\"u2\"}")
			.expect("Sparse user-info response should map.");

		assert_eq!(profile.id.as_deref(), Some("u2"));
		assert_eq!(profile.display_name, None);
		assert_eq!(profile.username, None);
		assert_eq!(profile.email, None);
		assert_eq!(profile.updated_at, None);
		assert_eq!(profile.email_verified, None);
	}

	#[test]
	fn malformed_bodies_are_hard_failures() {
		let err = OktaProfile::from_response("{\"sub\":")
			.expect_err("Truncated JSON should fail to map.");

		assert!(matches!(err, Error::ProfileParse { .. }));

		let err = OktaProfile::from_response("<html>sign in</html>")
			.expect_err("HTML body should fail to map.");

		assert!(matches!(err, Error::ProfileParse { .. }));
	}
}
