//! End-to-end flow behind the `keycloak-clients` binary.
//!
//! Discovery, the password grant, and the admin call run strictly in order on one shared HTTP
//! client. The first failure aborts the run; nothing is retried.

// std
use std::io::Write;
// self
use crate::{
	_prelude::*,
	admin::{ClientQuery, ClientRepresentation, ClientsApi, Configuration},
	auth::TokenRecord,
	config::AppConfig,
	flows::{OidcClient, PasswordGrantRequest},
	http::ReqwestHttpClient,
	provider::Issuer,
};

const HEADER: &str = "The default clients:";

/// Signs in, lists the clients of the configured realm, and writes them to `out`.
pub async fn run<W>(config: &AppConfig, out: &mut W) -> Result<()>
where
	W: Write,
{
	let http_client = ReqwestHttpClient::default();
	let token = acquire_token(config, &http_client).await?;
	let configuration =
		Configuration::new(config.admin_base_path.clone(), token.access_token.clone());
	let clients = ClientsApi::with_http_client(configuration, http_client)
		.realm_clients_get(&config.realm, &ClientQuery::default())
		.await?;

	write_clients(out, &clients)
}

/// Discovers the issuer and runs the password grant with the configured credentials.
pub async fn acquire_token(
	config: &AppConfig,
	http_client: &ReqwestHttpClient,
) -> Result<TokenRecord> {
	let issuer = Issuer::discover(http_client, &config.issuer_url).await?;
	let mut client =
		OidcClient::new(issuer.descriptor, config.client_id.to_string(), http_client.clone());

	if let Some(secret) = &config.client_secret {
		client = client.with_client_secret(secret.clone());
	}

	client
		.password_grant(PasswordGrantRequest::new(config.username.clone(), config.password.clone()))
		.await
}

/// Writes the listing header followed by one indented `clientId` per line.
///
/// Clients without a `clientId` produce an indented empty line so the count stays visible.
pub fn write_clients<W>(out: &mut W, clients: &[ClientRepresentation]) -> Result<()>
where
	W: Write,
{
	writeln!(out, "{HEADER}").map_err(Error::Output)?;

	for client in clients {
		writeln!(out, "  {}", client.client_id.as_deref().unwrap_or_default())
			.map_err(Error::Output)?;
	}

	out.flush().map_err(Error::Output)
}
