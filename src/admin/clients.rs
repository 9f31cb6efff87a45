// crates.io
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	admin::{ClientQuery, ClientRepresentation, Configuration},
	auth::RealmName,
	error::ApiError,
	http::{JsonGetError, ReqwestHttpClient},
	obs::{self, FlowKind},
};

/// Client registrations of a realm.
#[derive(Clone, Debug)]
pub struct ClientsApi {
	configuration: Configuration,
	http_client: ReqwestHttpClient,
}
impl ClientsApi {
	/// Creates the API group with a fresh reqwest client.
	pub fn new(configuration: Configuration) -> Self {
		Self::with_http_client(configuration, ReqwestHttpClient::default())
	}

	/// Creates the API group on top of an existing client, sharing its connection pool.
	pub fn with_http_client(configuration: Configuration, http_client: ReqwestHttpClient) -> Self {
		Self { configuration, http_client }
	}

	/// Settings this API group was built with.
	pub fn configuration(&self) -> &Configuration {
		&self.configuration
	}

	/// Lists the clients of `realm` in server order.
	pub async fn realm_clients_get(
		&self,
		realm: &RealmName,
		query: &ClientQuery,
	) -> Result<Vec<ClientRepresentation>> {
		let url = self.configuration.endpoint([realm.as_ref(), "clients"])?;
		let request = self.http_client.get(url).query(&query.to_pairs());

		self.call("realm_clients_get", realm, request).await
	}

	/// Fetches a single client by its internal `id`.
	pub async fn realm_clients_id_get(
		&self,
		realm: &RealmName,
		id: &str,
	) -> Result<ClientRepresentation> {
		let url = self.configuration.endpoint([realm.as_ref(), "clients", id])?;

		self.call("realm_clients_id_get", realm, self.http_client.get(url)).await
	}

	async fn call<T>(
		&self,
		operation: &'static str,
		realm: &RealmName,
		request: RequestBuilder,
	) -> Result<T>
	where
		T: DeserializeOwned,
	{
		obs::observe(FlowKind::AdminApi, operation, realm.as_ref(), async {
			self.http_client
				.get_json(self.configuration.authorize(request))
				.await
				.map_err(|err| Error::from(map_api_error(operation, err)))
		})
		.await
	}
}

fn map_api_error(operation: &'static str, err: JsonGetError) -> ApiError {
	match err {
		JsonGetError::Transport(source) => ApiError::Transport { operation, source: Box::new(source) },
		JsonGetError::Status { status, body } => ApiError::Status { operation, status, body },
		JsonGetError::Decode(source) => ApiError::Decode { operation, source },
	}
}
