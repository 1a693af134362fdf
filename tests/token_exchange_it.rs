#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
// self
use okta_strategy::{
	config::OktaConfig,
	error::{Error, TokenResponseError},
	strategy::{OktaStrategy, ReqwestOktaStrategy},
};

const CLIENT_ID: &str = "client-it";
const CLIENT_SECRET: &str = "secret-it";
// base64("client-it:secret-it")
const BASIC_AUTHORIZATION: &str = "Basic Y2xpZW50LWl0OnNlY3JldC1pdA==";

fn build_strategy(server: &MockServer) -> ReqwestOktaStrategy {
	let config = OktaConfig::new(
		server.base_url(),
		CLIENT_ID,
		CLIENT_SECRET,
		"https://app.example.com/api/okta/callback",
	)
	.with_scope(["openid", "email", "profile"]);

	OktaStrategy::new(&config).expect("Strategy should build against the mock server.")
}

#[tokio::test]
async fn code_exchange_sends_the_documented_wire_shape() {
	let server = MockServer::start_async().await;
	let strategy = build_strategy(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/oauth2/v1/token")
				.header("content-type", "application/x-www-form-urlencoded")
				.header("authorization", BASIC_AUTHORIZATION)
				.body_includes("grant_type=authorization_code")
				.body_includes("code=valid-code");
			then.status(200)
				.header("content-type", "application/json")
				.body(
					"{\"access_token\":\"access-success\",\"refresh_token\":\"refresh-success\",\"token_type\":\"Bearer\",\"expires_in\":3600,\"scope\":\"openid email profile\"}",
				);
		})
		.await;
	let tokens = strategy
		.exchange_code("valid-code")
		.await
		.expect("Authorization code exchange should succeed.");

	mock.assert_async().await;

	assert_eq!(tokens.access_token, "access-success");
	assert_eq!(tokens.refresh_token.as_deref(), Some("refresh-success"));
	assert!(!tokens.extra.contains_key("refresh_token"));
	assert_eq!(
		tokens.extra.get("scope").and_then(|value| value.as_str()),
		Some("openid email profile")
	);
}

#[tokio::test]
async fn refresh_exchange_keys_the_secret_as_refresh_token() {
	let server = MockServer::start_async().await;
	let strategy = build_strategy(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/oauth2/v1/token")
				.header("authorization", BASIC_AUTHORIZATION)
				.body_includes("grant_type=refresh_token")
				.body_includes("refresh_token=refresh-old");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"access-rotated\",\"token_type\":\"Bearer\"}");
		})
		.await;
	let tokens = strategy
		.exchange_refresh_token("refresh-old")
		.await
		.expect("Refresh token exchange should succeed.");

	mock.assert_async().await;

	assert_eq!(tokens.access_token, "access-rotated");
	assert_eq!(tokens.refresh_token, None);
}

#[tokio::test]
async fn mislabeled_form_encoded_responses_still_parse() {
	let server = MockServer::start_async().await;
	let strategy = build_strategy(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/v1/token");
			then.status(200)
				.header("content-type", "text/plain")
				.body("access_token=access-form&refresh_token=refresh-form&token_type=bearer");
		})
		.await;
	let tokens = strategy
		.exchange_code("form-code")
		.await
		.expect("Form-encoded token bodies should parse via the fallback.");

	mock.assert_async().await;

	assert_eq!(tokens.access_token, "access-form");
	assert_eq!(tokens.refresh_token.as_deref(), Some("refresh-form"));
	assert!(!tokens.extra.contains_key("refresh_token"));
}

#[tokio::test]
async fn rejected_exchanges_surface_status_and_body() {
	let server = MockServer::start_async().await;
	let strategy = build_strategy(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/v1/token");
			then.status(400)
				.header("content-type", "application/json")
				.body("{\"error\":\"invalid_grant\",\"error_description\":\"already used\"}");
		})
		.await;
	let err = strategy
		.exchange_code("stale-code")
		.await
		.expect_err("Rejected exchanges should fail.");

	mock.assert_async().await;

	match err {
		Error::TokenEndpoint { status, body } => {
			assert_eq!(status, 400);
			assert!(body.contains("already used"));
		},
		other => panic!("Unexpected error variant: {other:?}."),
	}
}

#[tokio::test]
async fn unusable_success_bodies_fail_after_both_parse_attempts() {
	let server = MockServer::start_async().await;
	let strategy = build_strategy(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/v1/token");
			then.status(200).header("content-type", "text/html").body("<html>maintenance</html>");
		})
		.await;
	let err = strategy
		.exchange_code("any-code")
		.await
		.expect_err("Bodies without an access_token should fail.");

	mock.assert_async().await;

	assert!(matches!(err, Error::TokenResponse(TokenResponseError::MissingAccessToken)));
}

#[tokio::test]
async fn custom_authorization_server_namespaces_the_token_path() {
	let server = MockServer::start_async().await;
	let config = OktaConfig::new(
		server.base_url(),
		CLIENT_ID,
		CLIENT_SECRET,
		"https://app.example.com/api/okta/callback",
	)
	.with_authorization_server_id("aus8aus76q8iphupD0h7");
	let strategy =
		OktaStrategy::new(&config).expect("Strategy should build against the mock server.");
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/aus8aus76q8iphupD0h7/v1/token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"access-custom\"}");
		})
		.await;
	let tokens = strategy
		.exchange_code("custom-code")
		.await
		.expect("Exchange against the custom authorization server should succeed.");

	mock.assert_async().await;

	assert_eq!(tokens.access_token, "access-custom");
}
