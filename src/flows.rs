//! Flow orchestrators that run OAuth grants against a discovered issuer.

mod password;

pub use password::*;

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	http::{ReqwestHttpClient, TokenHttpClient},
	oauth::{ReqwestTransportErrorMapper, TransportErrorMapper},
	provider::{DefaultProviderStrategy, ProviderDescriptor, ProviderStrategy},
};

/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestOidcClient = OidcClient<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Runs token grants for a single OAuth client against one issuer.
///
/// The client owns the transport, the issuer descriptor, and the strategy so each grant only
/// deals with its own form parameters. The client secret travels with the descriptor's
/// preferred authentication method.
#[derive(Clone)]
pub struct OidcClient<C = ReqwestHttpClient, M = ReqwestTransportErrorMapper>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every token request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Issuer endpoints and capabilities.
	pub descriptor: ProviderDescriptor,
	/// Strategy responsible for request decoration and error classification.
	pub strategy: Arc<dyn ProviderStrategy>,
	/// OAuth 2.0 client identifier sent with every grant.
	pub client_id: String,
	/// Optional client secret for confidential authentication methods.
	pub client_secret: Option<TokenSecret>,
}
impl<C, M> OidcClient<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that reuses the caller-provided transport and mapper pair.
	pub fn with_http_client(
		descriptor: ProviderDescriptor,
		client_id: impl Into<String>,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			descriptor,
			strategy: Arc::new(DefaultProviderStrategy),
			client_id: client_id.into(),
			client_secret: None,
		}
	}

	/// Sets or replaces the client secret.
	pub fn with_client_secret(mut self, secret: impl Into<TokenSecret>) -> Self {
		self.client_secret = Some(secret.into());

		self
	}

	/// Replaces the strategy used to decorate requests and classify errors.
	pub fn with_strategy(mut self, strategy: Arc<dyn ProviderStrategy>) -> Self {
		self.strategy = strategy;

		self
	}
}
impl OidcClient<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a client backed by `http_client`, the crate's reqwest transport.
	///
	/// Pass the same [`ReqwestHttpClient`] used for discovery so every call shares one
	/// connection pool.
	pub fn new(
		descriptor: ProviderDescriptor,
		client_id: impl Into<String>,
		http_client: ReqwestHttpClient,
	) -> Self {
		Self::with_http_client(
			descriptor,
			client_id,
			http_client,
			Arc::new(ReqwestTransportErrorMapper),
		)
	}
}
impl<C, M> Debug for OidcClient<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("OidcClient")
			.field("descriptor", &self.descriptor)
			.field("client_id", &self.client_id)
			.field("client_secret_set", &self.client_secret.is_some())
			.finish()
	}
}
