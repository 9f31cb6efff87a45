//! Facade over the `oauth2` crate for the password grant.

pub use oauth2;

// crates.io
use oauth2::{
	AuthType, ClientId, ClientSecret, EndpointNotSet, EndpointSet, ExtraTokenFields,
	HttpClientError, RequestTokenError, ResourceOwnerPassword, ResourceOwnerUsername, Scope,
	StandardRevocableToken, StandardTokenResponse, TokenResponse, TokenUrl,
	basic::{
		BasicErrorResponse, BasicRequestTokenError, BasicRevocationErrorResponse,
		BasicTokenIntrospectionResponse, BasicTokenType,
	},
};
// self
use crate::{
	_prelude::*,
	auth::{ScopeSet, TokenRecord, TokenSecret},
	error::{ConfigError, TokenEndpointError, TransportError},
	http::{ReqwestHttpClient, ResponseMetadata, ResponseMetadataSlot, TokenHttpClient},
	provider::{
		ClientAuthMethod, GrantType, ProviderDescriptor, ProviderErrorContext, ProviderErrorKind,
		ProviderStrategy,
	},
};

type OidcTokenResponse = StandardTokenResponse<IdTokenFields, BasicTokenType>;
type ConfiguredClient = oauth2::Client<
	BasicErrorResponse,
	OidcTokenResponse,
	BasicTokenIntrospectionResponse,
	StandardRevocableToken,
	BasicRevocationErrorResponse,
	EndpointNotSet,
	EndpointNotSet,
	EndpointNotSet,
	EndpointNotSet,
	EndpointSet,
>;
type FacadeFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// OpenID Connect member carried next to the standard OAuth token response fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdTokenFields {
	/// Compact ID token, present when the `openid` scope was granted.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id_token: Option<String>,
}
impl ExtraTokenFields for IdTokenFields {}

/// Maps HTTP transport failures into crate [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport into a crate error.
	fn map_transport_error(
		&self,
		grant: GrantType,
		metadata: Option<&ResponseMetadata>,
		error: HttpClientError<E>,
	) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(
		&self,
		grant: GrantType,
		meta: Option<&ResponseMetadata>,
		err: HttpClientError<ReqwestError>,
	) -> Error {
		match err {
			HttpClientError::Reqwest(inner) if inner.is_builder() =>
				ConfigError::from(*inner).into(),
			HttpClientError::Reqwest(inner) => TransportError::from(*inner).into(),
			HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			HttpClientError::Other(message) => TokenEndpointError::Unexpected {
				message: format!("HTTP client failed during the {grant} grant: {message}"),
				status: meta_status(meta),
			}
			.into(),
			_ => TokenEndpointError::Unexpected {
				message: format!("HTTP client failed during the {grant} grant."),
				status: meta_status(meta),
			}
			.into(),
		}
	}
}

pub(crate) trait OAuth2Facade {
	fn exchange_password<'a>(
		&'a self,
		strategy: &'a dyn ProviderStrategy,
		username: &'a str,
		password: &'a TokenSecret,
		scope: &'a ScopeSet,
		extra_params: &'a [(String, String)],
	) -> FacadeFuture<'a, TokenRecord>;
}

pub(crate) struct BasicFacade<C = ReqwestHttpClient, M = ReqwestTransportErrorMapper>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	oauth_client: ConfiguredClient,
	http_client: Arc<C>,
	error_mapper: Arc<M>,
}
impl<C, M> BasicFacade<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	pub(crate) fn from_descriptor(
		descriptor: &ProviderDescriptor,
		client_id: &str,
		client_secret: Option<&str>,
		http_client: impl Into<Arc<C>>,
		error_mapper: impl Into<Arc<M>>,
	) -> Result<Self> {
		let token_url = TokenUrl::new(descriptor.endpoints.token.to_string())
			.map_err(|source| ConfigError::InvalidDescriptor { source })?;
		let method = descriptor.preferred_client_auth_method;
		let mut oauth_client: ConfiguredClient =
			oauth2::Client::new(ClientId::new(client_id.to_owned())).set_token_uri(token_url);

		if let Some(secret) = client_secret.filter(|_| method != ClientAuthMethod::NoSecret) {
			oauth_client = oauth_client.set_client_secret(ClientSecret::new(secret.to_owned()));
		}
		if method != ClientAuthMethod::ClientSecretBasic {
			oauth_client = oauth_client.set_auth_type(AuthType::RequestBody);
		}

		Ok(Self {
			oauth_client,
			http_client: http_client.into(),
			error_mapper: error_mapper.into(),
		})
	}
}
impl<C, M> OAuth2Facade for BasicFacade<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn exchange_password<'a>(
		&'a self,
		strategy: &'a dyn ProviderStrategy,
		username: &'a str,
		password: &'a TokenSecret,
		scope: &'a ScopeSet,
		extra_params: &'a [(String, String)],
	) -> FacadeFuture<'a, TokenRecord> {
		let meta = ResponseMetadataSlot::default();

		Box::pin(async move {
			let instrumented = self.http_client.with_metadata(meta.clone());
			let username = ResourceOwnerUsername::new(username.to_owned());
			let password = ResourceOwnerPassword::new(password.expose().to_owned());
			let mut request = self.oauth_client.exchange_password(&username, &password);

			for value in scope.iter() {
				request = request.add_scope(Scope::new(value.to_owned()));
			}
			for (key, value) in extra_params {
				request = request.add_extra_param(key, value);
			}

			let response = request.request_async(&instrumented).await.map_err(|err| {
				map_request_error(
					strategy,
					GrantType::Password,
					meta.take(),
					err,
					self.error_mapper.as_ref(),
				)
			})?;

			map_token_response(response)
		})
	}
}

fn map_token_response(response: OidcTokenResponse) -> Result<TokenRecord> {
	let mut builder = TokenRecord::builder()
		.access_token(response.access_token().secret().to_owned())
		.token_type(response.token_type().as_ref())
		.issued_at(OffsetDateTime::now_utc());

	if let Some(expires_in) = response.expires_in() {
		let expires_in =
			i64::try_from(expires_in.as_secs()).map_err(|_| ConfigError::ExpiresInOutOfRange)?;

		if expires_in <= 0 {
			return Err(ConfigError::NonPositiveExpiresIn.into());
		}

		builder = builder.expires_in(Duration::seconds(expires_in));
	}
	if let Some(scopes) = response.scopes() {
		let granted = ScopeSet::new(
			scopes.iter().map(|scope| scope.as_str()).filter(|scope| !scope.is_empty()),
		)
		.map_err(ConfigError::from)?;

		builder = builder.scope(granted);
	}
	if let Some(id_token) = &response.extra_fields().id_token {
		builder = builder.id_token(id_token.clone());
	}

	builder.build().map_err(|err| ConfigError::from(err).into())
}

fn map_request_error<E, M>(
	strategy: &dyn ProviderStrategy,
	grant: GrantType,
	meta: Option<ResponseMetadata>,
	err: BasicRequestTokenError<HttpClientError<E>>,
	mapper: &M,
) -> Error
where
	E: 'static + Send + Sync + StdError,
	M: ?Sized + TransportErrorMapper<E>,
{
	let meta = meta.as_ref();

	match err {
		RequestTokenError::ServerResponse(response) =>
			map_server_response_error(strategy, grant, response, meta),
		RequestTokenError::Request(error) => mapper.map_transport_error(grant, meta, error),
		RequestTokenError::Parse(source, _body) => TokenEndpointError::MalformedResponse {
			source,
			status: meta_status(meta),
			content_type: meta.and_then(|value| value.content_type.clone()),
		}
		.into(),
		RequestTokenError::Other(message) => TokenEndpointError::Unexpected {
			message: format!("Token endpoint returned an unexpected response: {message}"),
			status: meta_status(meta),
		}
		.into(),
	}
}

fn map_server_response_error(
	strategy: &dyn ProviderStrategy,
	grant: GrantType,
	response: BasicErrorResponse,
	meta: Option<&ResponseMetadata>,
) -> Error {
	let code = response.error().as_ref().to_owned();
	let mut ctx = ProviderErrorContext::new(grant).with_oauth_error(code.clone());

	if let Some(description) = response.error_description() {
		ctx = ctx.with_error_description(description.clone());
	}
	if let Some(status) = meta_status(meta) {
		ctx = ctx.with_http_status(status);
	}

	let reason = match response.error_description() {
		Some(description) => format!("{code} ({description})"),
		None => code,
	};

	match strategy.classify_token_error(&ctx) {
		ProviderErrorKind::InvalidGrant => Error::InvalidGrant { reason },
		ProviderErrorKind::InvalidClient => Error::InvalidClient { reason },
		ProviderErrorKind::InsufficientScope => Error::InsufficientScope { reason },
		ProviderErrorKind::Unexpected => TokenEndpointError::Unexpected {
			message: format!("Token endpoint returned an OAuth error: {reason}"),
			status: meta_status(meta),
		}
		.into(),
	}
}

fn meta_status(meta: Option<&ResponseMetadata>) -> Option<u16> {
	meta.and_then(|value| value.status)
}
