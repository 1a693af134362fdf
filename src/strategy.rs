//! The Okta provider adapter built on top of the generic `oauth2` engine.
//!
//! The engine keeps its usual jobs—authorize-URL construction and CSRF state
//! generation—while the strategy overrides the two integration points where Okta
//! deviates from vanilla OAuth 2.0: the access-token exchange (Basic-auth client
//! credentials in the header, grant-aware code parameter, tolerant body parsing) and
//! the user-info fetch (POST with a Bearer header instead of GET). Both overrides run
//! through [`StrategyHttpClient`] so the strategy stays transport-agnostic.

pub use oauth2;

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use oauth2::{
	AuthUrl, ClientId, CsrfToken, EndpointNotSet, EndpointSet, RedirectUrl, Scope, TokenUrl,
	basic::BasicClient,
};
// self
use crate::{
	_prelude::*,
	config::{OktaConfig, ResolvedOptions},
	error::ConfigError,
	http::{StrategyHttpClient, WireRequest},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	profile::OktaProfile,
	token::{self, TokenSet},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Fixed strategy name identifier, independent of configuration.
pub const STRATEGY_NAME: &str = "okta";

type ConfiguredBasicClient =
	BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

#[cfg(feature = "reqwest")]
/// Strategy specialized for the crate's default reqwest transport.
pub type ReqwestOktaStrategy = OktaStrategy<ReqwestHttpClient>;

/// Okta Authorization Code strategy for server-side logins.
///
/// A strategy is read-only after construction and safe to share across concurrent
/// authentication attempts behind an `Arc`; each attempt is an independent sequence of
/// at most two strictly ordered provider calls.
#[derive(Clone)]
pub struct OktaStrategy<C>
where
	C: ?Sized + StrategyHttpClient,
{
	options: ResolvedOptions,
	oauth_client: ConfiguredBasicClient,
	token_url: Url,
	user_info_url: Url,
	http_client: Arc<C>,
}
impl<C> OktaStrategy<C>
where
	C: ?Sized + StrategyHttpClient,
{
	/// Creates a strategy that reuses the caller-provided transport.
	///
	/// Resolves the Okta endpoints from the configuration and hands them to the
	/// `oauth2` engine; a resolved string that is not a valid URL fails here as a
	/// [`ConfigError`].
	pub fn with_http_client(config: &OktaConfig, http_client: impl Into<Arc<C>>) -> Result<Self> {
		let options = config.resolve();
		let authorization_url = Url::parse(&options.endpoints.authorization_url)
			.map_err(|source| ConfigError::InvalidEndpoint { endpoint: "authorization", source })?;
		let token_url = Url::parse(&options.endpoints.token_url)
			.map_err(|source| ConfigError::InvalidEndpoint { endpoint: "token", source })?;
		let user_info_url = Url::parse(&options.endpoints.user_info_url)
			.map_err(|source| ConfigError::InvalidEndpoint { endpoint: "user-info", source })?;
		let redirect_url = RedirectUrl::new(options.callback_url.clone())
			.map_err(|source| ConfigError::InvalidCallback { source })?;
		let oauth_client = BasicClient::new(ClientId::new(options.client_id.clone()))
			.set_auth_uri(AuthUrl::from_url(authorization_url))
			.set_token_uri(TokenUrl::from_url(token_url.clone()))
			.set_redirect_uri(redirect_url);

		Ok(Self {
			options,
			oauth_client,
			token_url,
			user_info_url,
			http_client: http_client.into(),
		})
	}

	/// Returns the fixed strategy name, [`STRATEGY_NAME`].
	pub fn name(&self) -> &'static str {
		STRATEGY_NAME
	}

	/// Returns the resolved options backing this strategy.
	pub fn options(&self) -> &ResolvedOptions {
		&self.options
	}

	/// Extra query parameters to merge into the authorization redirect.
	///
	/// Exactly `{"idp": identity_provider}` when an identity provider is configured,
	/// empty otherwise. Pure and side-effect free.
	pub fn authorization_params(&self) -> BTreeMap<String, String> {
		let mut params = BTreeMap::new();

		if let Some(idp) = &self.options.identity_provider {
			params.insert("idp".to_owned(), idp.clone());
		}

		params
	}

	/// Builds the authorization redirect via the engine.
	///
	/// The engine contributes the standard OAuth 2.0 parameters, the configured
	/// scopes, and a fresh random CSRF state token; [`Self::authorization_params`] is
	/// merged on top.
	pub fn start_authorization(&self) -> AuthorizationRedirect {
		let mut request = self.oauth_client.authorize_url(CsrfToken::new_random);

		for scope in &self.options.scope {
			request = request.add_scope(Scope::new(scope.clone()));
		}
		for (key, value) in self.authorization_params() {
			request = request.add_extra_param(key, value);
		}

		let (url, state) = request.url();

		AuthorizationRedirect { url, state }
	}

	/// Exchanges an authorization code for tokens.
	pub async fn exchange_code(&self, code: &str) -> Result<TokenSet> {
		let mut params = BTreeMap::new();

		params.insert("grant_type".to_owned(), "authorization_code".to_owned());
		params.insert("redirect_uri".to_owned(), self.options.callback_url.clone());

		self.token_request(FlowKind::AuthorizationCode, code, params).await
	}

	/// Exchanges a refresh token for a fresh token set.
	pub async fn exchange_refresh_token(&self, refresh_token: &str) -> Result<TokenSet> {
		let mut params = BTreeMap::new();

		params.insert("grant_type".to_owned(), "refresh_token".to_owned());

		self.token_request(FlowKind::Refresh, refresh_token, params).await
	}

	/// Token exchange override shared by code and refresh grants.
	///
	/// POSTs the parameter bag to the token endpoint with url-form-encoded body and
	/// Basic-auth client credentials in the header. `code` lands under the
	/// `refresh_token` form key when the bag's `grant_type` equals `"refresh_token"`,
	/// under `code` otherwise. The response body is parsed JSON-first with a
	/// url-form-encoded fallback, and `refresh_token` never leaks into
	/// [`TokenSet::extra`].
	pub async fn token_request(
		&self,
		kind: FlowKind,
		code: &str,
		mut params: BTreeMap<String, String>,
	) -> Result<TokenSet> {
		let span = FlowSpan::new(kind, "token_request");

		obs::record_flow_outcome(kind, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let code_param = token::code_param_name(&params);

				params.insert(code_param.to_owned(), code.to_owned());

				let request = WireRequest {
					url: self.token_url.clone(),
					headers: vec![
						("Content-Type", "application/x-www-form-urlencoded".to_owned()),
						("Authorization", self.basic_authorization()),
					],
					body: token::encode_form(&params),
				};
				let response = self.http_client.post(request).await?;

				if !response.is_success() {
					return Err(Error::TokenEndpoint {
						status: response.status,
						body: response.body,
					});
				}

				Ok(token::parse_token_response(&response.body)?)
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(kind, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(kind, FlowOutcome::Failure),
		}

		result
	}

	/// Profile fetch override: POST to the user-info endpoint with a Bearer header.
	///
	/// Okta serves user info on POST; the body stays empty. A non-success status fails
	/// with [`Error::ProfileFetch`] carrying the raw error payload; a success body that
	/// is not valid JSON fails hard with [`Error::ProfileParse`].
	pub async fn user_profile(&self, access_token: &str) -> Result<OktaProfile> {
		const KIND: FlowKind = FlowKind::UserProfile;

		let span = FlowSpan::new(KIND, "user_profile");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let request = WireRequest {
					url: self.user_info_url.clone(),
					headers: vec![("Authorization", format!("Bearer {access_token}"))],
					body: String::new(),
				};
				let response = self.http_client.post(request).await?;

				if !response.is_success() {
					return Err(Error::ProfileFetch {
						status: response.status,
						body: response.body,
					});
				}

				OktaProfile::from_response(&response.body)
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}

	/// Drives a complete callback-side attempt: code exchange, then profile fetch.
	///
	/// The fetch never starts before the exchange completes because it needs the
	/// access token. Any failure aborts the attempt; the caller restarts from the
	/// authorization redirect if desired.
	pub async fn authenticate(&self, code: &str) -> Result<Login> {
		let tokens = self.exchange_code(code).await?;
		let profile = self.user_profile(&tokens.access_token).await?;

		Ok(Login { tokens, profile })
	}

	fn basic_authorization(&self) -> String {
		let credentials =
			format!("{}:{}", self.options.client_id, self.options.client_secret);

		format!("Basic {}", STANDARD.encode(credentials))
	}
}
#[cfg(feature = "reqwest")]
impl OktaStrategy<ReqwestHttpClient> {
	/// Creates a strategy backed by the crate's default reqwest transport.
	pub fn new(config: &OktaConfig) -> Result<Self> {
		Self::with_http_client(config, ReqwestHttpClient::default())
	}
}
impl<C> Debug for OktaStrategy<C>
where
	C: ?Sized + StrategyHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OktaStrategy")
			.field("name", &STRATEGY_NAME)
			.field("options", &self.options)
			.finish()
	}
}

/// Authorization redirect issued by [`OktaStrategy::start_authorization`].
#[derive(Clone, Debug)]
pub struct AuthorizationRedirect {
	url: Url,
	state: CsrfToken,
}
impl AuthorizationRedirect {
	/// Fully-formed authorize URL that callers should send end-users to.
	pub fn url(&self) -> &Url {
		&self.url
	}

	/// Opaque CSRF state value that must round-trip via the callback.
	pub fn state(&self) -> &str {
		self.state.secret()
	}

	/// Validates the `state` parameter returned with the authorization callback.
	pub fn validate_state(&self, returned_state: &str) -> Result<()> {
		if returned_state == self.state.secret() {
			Ok(())
		} else {
			Err(Error::StateMismatch)
		}
	}
}

/// Outcome of a successful [`OktaStrategy::authenticate`] attempt.
///
/// Ownership passes entirely to the caller; the strategy keeps nothing.
#[derive(Clone, Debug)]
pub struct Login {
	/// Tokens issued by the exchange, extras stripped of `refresh_token`.
	pub tokens: TokenSet,
	/// Canonical profile resolved from the user-info endpoint.
	pub profile: OktaProfile,
}
