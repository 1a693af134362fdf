//! Strategy-level error types shared across configuration, transport, and the login flow.

// self
use crate::_prelude::*;

/// Strategy-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical strategy error exposed by public APIs.
///
/// Every variant terminates the current authentication attempt; nothing is retried
/// inside the strategy, so recovery means restarting the flow from the authorization
/// redirect.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Token endpoint response body could not be interpreted.
	#[error(transparent)]
	TokenResponse(#[from] TokenResponseError),

	/// Token endpoint rejected the exchange.
	#[error("Token endpoint returned HTTP {status}.")]
	TokenEndpoint {
		/// HTTP status code returned by the token endpoint.
		status: u16,
		/// Raw response body as received from the provider.
		body: String,
	},
	/// User-info endpoint returned a non-success status.
	#[error("Failed to fetch user profile: HTTP {status}.")]
	ProfileFetch {
		/// HTTP status code returned by the user-info endpoint.
		status: u16,
		/// Raw error payload as received from the provider.
		body: String,
	},
	/// User-info endpoint returned malformed JSON on a success response.
	#[error("User-info endpoint returned malformed JSON.")]
	ProfileParse {
		/// Structured parsing failure with the offending JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Returned `state` parameter does not match the one issued for the redirect.
	#[error("Authorization state mismatch.")]
	StateMismatch,
}

/// Configuration and validation failures raised while constructing the strategy.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Resolved endpoint string is not a valid URL.
	#[error("The {endpoint} endpoint URL is invalid.")]
	InvalidEndpoint {
		/// Which endpoint failed to parse.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Callback URL cannot be parsed.
	#[error("Callback URL is invalid.")]
	InvalidCallback {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Token endpoint bodies that stay unusable after both parse attempts.
///
/// The body is tried as JSON first and url-form-encoded second, so a wrong
/// `Content-Type` alone never raises this error; only responses missing a usable
/// `access_token` in either representation do.
#[derive(Debug, ThisError)]
pub enum TokenResponseError {
	/// Neither representation of the body carried an `access_token`.
	#[error("Token endpoint response is missing access_token.")]
	MissingAccessToken,
	/// The `access_token` field is present but not a string.
	#[error("Token endpoint returned a non-string access_token.")]
	NonStringAccessToken,
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the provider.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
