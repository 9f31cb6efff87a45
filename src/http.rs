//! HTTP plumbing shared by discovery, the token endpoint, and the admin API.
//!
//! Token requests go through the `oauth2` crate, which only needs an [`AsyncHttpClient`]. The
//! [`TokenHttpClient`] trait hands out such clients bound to a [`ResponseMetadataSlot`] so the
//! error mapper can see the HTTP status and content type of a failed token response.
//! Plain JSON reads (discovery document, admin API) go straight through
//! [`ReqwestHttpClient::get_json`].

// std
use std::ops::Deref;
// crates.io
use oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse};
use reqwest::{
	RequestBuilder,
	header::{ACCEPT, CONTENT_TYPE},
};
use serde::de::DeserializeOwned;
// self
use crate::_prelude::*;

const BODY_PREVIEW_LIMIT: usize = 256;

/// Abstraction over HTTP transports able to execute token requests while publishing response
/// metadata for error classification.
///
/// Implementations must be `Send + Sync + 'static` so a single transport can back every flow,
/// and the request futures of the handles they return must be `Send`.
pub trait TokenHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// [`AsyncHttpClient`] handle tied to a [`ResponseMetadataSlot`].
	type Handle: for<'c> AsyncHttpClient<
			'c,
			Error = HttpClientError<Self::TransportError>,
			Future: 'c + Send,
		>
		+ 'static
		+ Send
		+ Sync;

	/// Builds an [`AsyncHttpClient`] handle that records outcomes in `slot`.
	///
	/// Handles must call [`ResponseMetadataSlot::take`] before dispatching and
	/// [`ResponseMetadataSlot::store`] as soon as a response (successful or not) arrives.
	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle;
}

/// Metadata captured from the most recent token endpoint response.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResponseMetadata {
	/// HTTP status code returned by the token endpoint, if available.
	pub status: Option<u16>,
	/// `Content-Type` header, if present.
	pub content_type: Option<String>,
}

/// Thread-safe slot sharing [`ResponseMetadata`] between the transport and the error mapper.
#[derive(Clone, Debug, Default)]
pub struct ResponseMetadataSlot(Arc<Mutex<Option<ResponseMetadata>>>);
impl ResponseMetadataSlot {
	/// Stores new metadata for the current request.
	pub fn store(&self, meta: ResponseMetadata) {
		*self.0.lock() = Some(meta);
	}

	/// Returns the captured metadata, if any, consuming it from the slot.
	pub fn take(&self) -> Option<ResponseMetadata> {
		self.0.lock().take()
	}
}

/// Shared reqwest client used for every outbound call.
///
/// The same connection pool serves discovery, the token request, and the admin API.
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Sends `request` expecting a JSON body of type `T` and a success status.
	pub(crate) async fn get_json<T>(&self, request: RequestBuilder) -> Result<T, JsonGetError>
	where
		T: DeserializeOwned,
	{
		let response =
			request.header(ACCEPT, "application/json").send().await.map_err(JsonGetError::Transport)?;
		let status = response.status();
		let body = response.bytes().await.map_err(JsonGetError::Transport)?;

		if !status.is_success() {
			return Err(JsonGetError::Status {
				status: status.as_u16(),
				body: body_preview(&String::from_utf8_lossy(&body)),
			});
		}

		let mut deserializer = serde_json::Deserializer::from_slice(&body);

		serde_path_to_error::deserialize(&mut deserializer).map_err(JsonGetError::Decode)
	}
}
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl Debug for ReqwestHttpClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("ReqwestHttpClient(..)")
	}
}
impl TokenHttpClient for ReqwestHttpClient {
	type Handle = InstrumentedHandle;
	type TransportError = ReqwestError;

	fn with_metadata(&self, slot: ResponseMetadataSlot) -> Self::Handle {
		InstrumentedHandle(Arc::new(InstrumentedHttpClient { client: self.0.clone(), slot }))
	}
}

/// Failure modes of [`ReqwestHttpClient::get_json`].
#[derive(Debug)]
pub(crate) enum JsonGetError {
	/// The request failed before a complete response arrived.
	Transport(ReqwestError),
	/// The server answered with a non-success status.
	Status { status: u16, body: String },
	/// The body is not the expected JSON document.
	Decode(serde_path_to_error::Error<serde_json::Error>),
}

struct InstrumentedHttpClient {
	client: ReqwestClient,
	slot: ResponseMetadataSlot,
}

/// Handle returned by [`ReqwestHttpClient`] that satisfies [`TokenHttpClient`].
#[derive(Clone)]
pub struct InstrumentedHandle(Arc<InstrumentedHttpClient>);
impl<'c> AsyncHttpClient<'c> for InstrumentedHandle {
	type Error = HttpClientError<ReqwestError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let inner = Arc::clone(&self.0);

		Box::pin(async move {
			inner.slot.take();

			let response = inner
				.client
				.execute(request.try_into().map_err(Box::new)?)
				.await
				.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let content_type =
				headers.get(CONTENT_TYPE).and_then(|value| value.to_str().ok()).map(str::to_owned);

			inner.slot.store(ResponseMetadata { status: Some(status.as_u16()), content_type });

			let mut converted =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*converted.status_mut() = status;
			*converted.headers_mut() = headers;

			Ok(converted)
		})
	}
}

/// Truncates response bodies before they are attached to errors.
pub(crate) fn body_preview(body: &str) -> String {
	if body.chars().count() <= BODY_PREVIEW_LIMIT {
		return body.to_owned();
	}

	let mut buf = body.chars().take(BODY_PREVIEW_LIMIT).collect::<String>();

	buf.push('…');

	buf
}
