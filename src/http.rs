//! Transport primitives for the strategy's provider calls.
//!
//! The module exposes [`StrategyHttpClient`], the strategy's only dependency on an HTTP
//! stack. Both provider calls—the token exchange and the user-info fetch—are plain POST
//! requests that resolve to a status code and a body string, so the trait models exactly
//! that and nothing more. Implementations decide timeouts, TLS, and connection reuse;
//! the strategy never retries and never issues more than one request per call.

// self
use crate::{_prelude::*, error::TransportError};

/// Boxed `Send` future resolved by a transport call.
pub type WireFuture<'a> =
	Pin<Box<dyn Future<Output = Result<WireResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing the strategy's POST calls.
///
/// Implementations must be `Send + Sync + 'static` so a single strategy can be shared
/// across concurrent login attempts behind an `Arc` without additional wrappers.
pub trait StrategyHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Executes one POST request and resolves with the raw response.
	///
	/// Transport-level failures (DNS, TCP, TLS, IO) map into [`TransportError`];
	/// non-success HTTP statuses are not errors at this layer and must be returned as
	/// ordinary [`WireResponse`] values so callers can attach the body to their own
	/// error taxonomy.
	fn post<'a>(&'a self, request: WireRequest) -> WireFuture<'a>;
}

/// A single outbound POST request issued by the strategy.
#[derive(Clone, Debug)]
pub struct WireRequest {
	/// Fully-qualified request URL.
	pub url: Url,
	/// Header name/value pairs attached to the request.
	pub headers: Vec<(&'static str, String)>,
	/// Request body; empty for the user-info fetch.
	pub body: String,
}

/// Raw response captured from a transport call.
#[derive(Clone, Debug)]
pub struct WireResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body decoded as text.
	pub body: String,
}
impl WireResponse {
	/// Returns true for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Provider calls should not follow redirects, matching OAuth 2.0 guidance that token
/// endpoints return results directly instead of delegating to another URI. Configure
/// any custom [`ReqwestClient`] accordingly before wrapping it.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl std::ops::Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl StrategyHttpClient for ReqwestHttpClient {
	fn post<'a>(&'a self, request: WireRequest) -> WireFuture<'a> {
		let client = self.0.clone();

		Box::pin(async move {
			let mut builder = client.post(request.url).body(request.body);

			for (name, value) in request.headers {
				builder = builder.header(name, value);
			}

			let response = builder.send().await.map_err(TransportError::from)?;
			let status = response.status().as_u16();
			let body = response.text().await.map_err(TransportError::from)?;

			Ok(WireResponse { status, body })
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn success_covers_the_2xx_range() {
		assert!(WireResponse { status: 200, body: String::new() }.is_success());
		assert!(WireResponse { status: 204, body: String::new() }.is_success());
		assert!(!WireResponse { status: 199, body: String::new() }.is_success());
		assert!(!WireResponse { status: 302, body: String::new() }.is_success());
		assert!(!WireResponse { status: 401, body: String::new() }.is_success());
	}
}
