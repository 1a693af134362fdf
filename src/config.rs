//! Strategy configuration and the Okta endpoint resolver.
//!
//! [`OktaConfig`] captures everything a caller supplies when registering the strategy:
//! the Okta domain, confidential client credentials, an optional custom authorization
//! server, an optional identity-provider routing id, scopes, and the callback URL.
//! [`OktaConfig::resolve`] derives the three Okta endpoint URLs from the issuer base by
//! pure string templating—no I/O, no validation, idempotent. Malformed inputs produce
//! malformed endpoint strings that surface later as HTTP or URL-parse failures.

// self
use crate::_prelude::*;

/// Caller-supplied strategy configuration, immutable after construction.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OktaConfig {
	/// Base URL of the Okta authorization server, e.g. `https://acme.okta.com`.
	pub audience: String,
	/// Optional custom authorization server id; endpoint paths are namespaced under it.
	pub authorization_server_id: Option<String>,
	/// Public client identifier.
	pub client_id: String,
	/// Confidential client secret; never logged and never placed in redirects.
	pub client_secret: String,
	/// Optional identity-provider routing id forwarded as the `idp` authorization parameter.
	pub identity_provider: Option<String>,
	/// Requested scopes; ordering and duplicates are passed through untouched.
	pub scope: Vec<String>,
	/// Redirect target registered with Okta.
	pub callback_url: String,
}
impl OktaConfig {
	/// Creates a configuration for the default authorization server.
	pub fn new(
		audience: impl Into<String>,
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		callback_url: impl Into<String>,
	) -> Self {
		Self {
			audience: audience.into(),
			authorization_server_id: None,
			client_id: client_id.into(),
			client_secret: client_secret.into(),
			identity_provider: None,
			scope: Vec::new(),
			callback_url: callback_url.into(),
		}
	}

	/// Namespaces all endpoints under a custom authorization server.
	pub fn with_authorization_server_id(mut self, id: impl Into<String>) -> Self {
		self.authorization_server_id = Some(id.into());

		self
	}

	/// Routes the authorization redirect through a specific identity provider.
	pub fn with_identity_provider(mut self, idp: impl Into<String>) -> Self {
		self.identity_provider = Some(idp.into());

		self
	}

	/// Replaces the requested scopes.
	pub fn with_scope<I>(mut self, scope: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<String>,
	{
		self.scope = scope.into_iter().map(Into::into).collect();

		self
	}

	/// Returns the issuer base shared by all three endpoints.
	pub fn issuer_base(&self) -> String {
		match &self.authorization_server_id {
			Some(id) => format!("{}/oauth2/{id}", self.audience),
			None => format!("{}/oauth2", self.audience),
		}
	}

	/// Resolves the endpoint set plus engine pass-through options.
	pub fn resolve(&self) -> ResolvedOptions {
		let base = self.issuer_base();
		let endpoints = ResolvedEndpoints {
			authorization_url: format!("{base}/v1/authorize"),
			token_url: format!("{base}/v1/token"),
			user_info_url: format!("{base}/v1/userinfo"),
		};

		ResolvedOptions {
			endpoints,
			client_id: self.client_id.clone(),
			client_secret: self.client_secret.clone(),
			identity_provider: self.identity_provider.clone(),
			scope: self.scope.clone(),
			callback_url: self.callback_url.clone(),
			enforce_state: true,
		}
	}
}
impl Debug for OktaConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OktaConfig")
			.field("audience", &self.audience)
			.field("authorization_server_id", &self.authorization_server_id)
			.field("client_id", &self.client_id)
			.field("client_secret", &"<redacted>")
			.field("identity_provider", &self.identity_provider)
			.field("scope", &self.scope)
			.field("callback_url", &self.callback_url)
			.finish()
	}
}

/// Okta endpoint URLs derived from the issuer base, computed once and never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedEndpoints {
	/// `{base}/v1/authorize`, target of the authorization redirect.
	pub authorization_url: String,
	/// `{base}/v1/token`, target of code and refresh-token exchanges.
	pub token_url: String,
	/// `{base}/v1/userinfo`, target of the profile fetch.
	pub user_info_url: String,
}

/// Resolver output handed to the strategy: endpoints plus engine pass-through fields.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedOptions {
	/// Derived endpoint set.
	pub endpoints: ResolvedEndpoints,
	/// Public client identifier.
	pub client_id: String,
	/// Confidential client secret.
	pub client_secret: String,
	/// Optional identity-provider routing id.
	pub identity_provider: Option<String>,
	/// Requested scopes, passed through verbatim.
	pub scope: Vec<String>,
	/// Redirect target registered with Okta.
	pub callback_url: String,
	/// Always true; the engine must protect the redirect with a CSRF state token.
	pub enforce_state: bool,
}
impl Debug for ResolvedOptions {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ResolvedOptions")
			.field("endpoints", &self.endpoints)
			.field("client_id", &self.client_id)
			.field("client_secret", &"<redacted>")
			.field("identity_provider", &self.identity_provider)
			.field("scope", &self.scope)
			.field("callback_url", &self.callback_url)
			.field("enforce_state", &self.enforce_state)
			.finish()
	}
}
