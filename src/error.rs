//! Crate-level error types shared by discovery, the password grant, and the admin API.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Issuer metadata could not be discovered.
	#[error(transparent)]
	Discovery(#[from] DiscoveryError),
	/// Token endpoint answered with something that is not a usable token response.
	#[error(transparent)]
	TokenEndpoint(#[from] TokenEndpointError),
	/// Transport failure (DNS, TCP, TLS) while talking to the token endpoint.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Admin REST API call failed.
	#[error(transparent)]
	Api(#[from] ApiError),

	/// Requested scopes exceed what the client may obtain.
	#[error("Token lacks the required scopes: {reason}")]
	InsufficientScope {
		/// Issuer-supplied reason string.
		reason: String,
	},
	/// Issuer rejected the grant (bad username or password, disabled account, ...).
	#[error("Issuer rejected the grant: {reason}")]
	InvalidGrant {
		/// Issuer-supplied reason string.
		reason: String,
	},
	/// Client authentication failed or the client may not use the grant.
	#[error("Client authentication failed: {reason}")]
	InvalidClient {
		/// Issuer-supplied reason string.
		reason: String,
	},
	/// Writing the client listing failed.
	#[error("Failed to write the client listing.")]
	Output(#[source] std::io::Error),
}
impl Error {
	/// Stable label for the error family, used in span fields and metric labels.
	pub fn category(&self) -> &'static str {
		match self {
			Self::Config(_) => "config",
			Self::Discovery(_) => "discovery",
			Self::TokenEndpoint(_) => "token_endpoint",
			Self::Transport(_) => "transport",
			Self::Api(_) => "api",
			Self::InsufficientScope { .. } => "insufficient_scope",
			Self::InvalidGrant { .. } => "invalid_grant",
			Self::InvalidClient { .. } => "invalid_client",
			Self::Output(_) => "output",
		}
	}

	/// HTTP status code of the response behind the failure, when one arrived.
	pub fn http_status(&self) -> Option<u16> {
		match self {
			Self::Discovery(DiscoveryError::Status { status, .. }) => Some(*status),
			Self::TokenEndpoint(
				TokenEndpointError::Unexpected { status, .. }
				| TokenEndpointError::MalformedResponse { status, .. },
			) => *status,
			Self::Api(err) => err.status(),
			_ => None,
		}
	}
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Provider descriptor contains an invalid URL.
	#[error("Descriptor contains an invalid URL.")]
	InvalidDescriptor {
		/// Underlying parsing failure.
		#[source]
		source: oauth2::url::ParseError,
	},
	/// Discovered metadata does not form a valid descriptor.
	#[error("Issuer metadata is not usable.")]
	Descriptor(#[from] crate::provider::ProviderDescriptorError),
	/// Admin API base path cannot carry path segments.
	#[error("Admin API base path `{base_path}` cannot be extended with path segments.")]
	InvalidBasePath {
		/// Offending base path.
		base_path: String,
	},
	/// Environment or literal setting failed to parse.
	#[error("Setting `{key}` is invalid.")]
	InvalidSetting {
		/// Name of the offending setting.
		key: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: BoxError,
	},

	/// Descriptor does not enable the requested grant.
	#[error("Issuer `{issuer}` does not enable the {grant} grant.")]
	UnsupportedGrant {
		/// Issuer identifier.
		issuer: String,
		/// Disabled grant label.
		grant: &'static str,
	},
	/// Request scopes cannot be normalized.
	#[error("Requested scopes are invalid.")]
	InvalidScope(#[from] crate::auth::ScopeValidationError),
	/// Token record builder validation failed.
	#[error("Unable to build token record.")]
	TokenBuild(#[from] crate::auth::TokenRecordBuilderError),
	/// Token endpoint returned an excessively large `expires_in`.
	#[error("The expires_in value exceeds the supported range.")]
	ExpiresInOutOfRange,
	/// Token endpoint returned a non-positive duration.
	#[error("The expires_in value must be positive.")]
	NonPositiveExpiresIn,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}

	/// Wraps a parsing failure for the named setting.
	pub fn invalid_setting(
		key: &'static str,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::InvalidSetting { key, source: Box::new(src) }
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Failures raised while fetching the OpenID Connect discovery document.
#[derive(Debug, ThisError)]
pub enum DiscoveryError {
	/// The request never produced a response.
	#[error("Discovery request to {url} failed.")]
	Request {
		/// Discovery document URL.
		url: String,
		/// Transport-specific failure.
		#[source]
		source: BoxError,
	},
	/// The issuer answered with a non-success status.
	#[error("Discovery request to {url} returned HTTP {status}.")]
	Status {
		/// Discovery document URL.
		url: String,
		/// HTTP status code.
		status: u16,
		/// Preview of the response body.
		body: String,
	},
	/// The body is not a valid discovery document.
	#[error("Discovery document at {url} is invalid.")]
	InvalidDocument {
		/// Discovery document URL.
		url: String,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

/// Unexpected answers from the token endpoint.
#[derive(Debug, ThisError)]
pub enum TokenEndpointError {
	/// The issuer returned an error that does not map onto a grant or client failure.
	#[error("{message}")]
	Unexpected {
		/// Human readable summary of the failure.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Token endpoint responded with JSON that could not be parsed.
	#[error("Token endpoint returned malformed JSON.")]
	MalformedResponse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
		/// Response content type, when available.
		content_type: Option<String>,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the token endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the token endpoint.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Failures raised by admin REST API calls.
#[derive(Debug, ThisError)]
pub enum ApiError {
	/// The request never produced a response.
	#[error("Admin API call `{operation}` failed before a response arrived.")]
	Transport {
		/// Operation name, e.g. `realm_clients_get`.
		operation: &'static str,
		/// Transport-specific failure.
		#[source]
		source: BoxError,
	},
	/// The API answered with a non-success status.
	#[error("Admin API call `{operation}` returned HTTP {status}.")]
	Status {
		/// Operation name.
		operation: &'static str,
		/// HTTP status code.
		status: u16,
		/// Preview of the response body.
		body: String,
	},
	/// The response body could not be decoded.
	#[error("Admin API call `{operation}` returned an undecodable body.")]
	Decode {
		/// Operation name.
		operation: &'static str,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl ApiError {
	/// HTTP status code carried by the error, when the API answered.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Status { status, .. } => Some(*status),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn http_status_comes_from_the_response_that_failed() {
		let discovery = Error::from(DiscoveryError::Status {
			url: "http://localhost/.well-known/openid-configuration".into(),
			status: 404,
			body: String::new(),
		});
		let token = Error::from(TokenEndpointError::Unexpected {
			message: "Token endpoint returned an OAuth error: temporarily_unavailable".into(),
			status: Some(503),
		});
		let grant = Error::InvalidGrant { reason: "invalid_grant".into() };

		assert_eq!((discovery.category(), discovery.http_status()), ("discovery", Some(404)));
		assert_eq!((token.category(), token.http_status()), ("token_endpoint", Some(503)));
		assert_eq!((grant.category(), grant.http_status()), ("invalid_grant", None));
	}
}
