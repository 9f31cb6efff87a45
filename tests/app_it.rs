// crates.io
use httpmock::{HttpMockRequest, Mock, prelude::*};
use serde_json::json;
// self
use keycloak_clients::{
	app,
	config::AppConfig,
	error::{ApiError, Error},
};

const WELL_KNOWN: &str = "/auth/realms/master/.well-known/openid-configuration";
const TOKEN_PATH: &str = "/auth/realms/master/protocol/openid-connect/token";
const CLIENTS_PATH: &str = "/auth/admin/realms/master/clients";

fn single_authorization(req: &HttpMockRequest) -> bool {
	req.headers_vec().iter().filter(|(name, _)| name.eq_ignore_ascii_case("authorization")).count()
		== 1
}

fn config_for(server: &MockServer) -> AppConfig {
	let issuer = server.url("/auth/realms/master/");
	let base_path = server.url("/auth/admin/realms");

	AppConfig::from_lookup(|key| match key {
		"KEYCLOAK_ISSUER_URL" => Some(issuer.clone()),
		"KEYCLOAK_ADMIN_BASE_PATH" => Some(base_path.clone()),
		_ => None,
	})
	.expect("Mock configuration should be valid.")
}

async fn mock_discovery(server: &MockServer) -> Mock<'_> {
	let body = json!({
		"issuer": server.url("/auth/realms/master"),
		"token_endpoint": server.url(TOKEN_PATH),
		"grant_types_supported": ["authorization_code", "password", "client_credentials"]
	})
	.to_string();

	server
		.mock_async(|when, then| {
			when.method(GET).path(WELL_KNOWN);
			then.status(200).header("content-type", "application/json").body(body);
		})
		.await
}

async fn mock_token_success(server: &MockServer) -> Mock<'_> {
	server
		.mock_async(|when, then| {
			when.method(POST)
				.path(TOKEN_PATH)
				.body_includes("grant_type=password")
				.body_includes("username=admin-user")
				.body_includes("password=admin-password");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"abc\",\"token_type\":\"bearer\",\"expires_in\":60}");
		})
		.await
}

async fn mock_clients<'a>(server: &'a MockServer, status: u16, body: &str) -> Mock<'a> {
	let body = body.to_owned();

	server
		.mock_async(|when, then| {
			when.method(GET)
				.path(CLIENTS_PATH)
				.header("authorization", "Bearer abc")
				.is_true(single_authorization);
			then.status(status).header("content-type", "application/json").body(body);
		})
		.await
}

async fn run(config: &AppConfig) -> (Result<(), Error>, String) {
	let mut out = Vec::new();
	let result = app::run(config, &mut out).await;

	(result, String::from_utf8(out).expect("Listing should be UTF-8."))
}

#[tokio::test]
async fn run_prints_the_default_clients() {
	let server = MockServer::start_async().await;
	let discovery = mock_discovery(&server).await;
	let token = mock_token_success(&server).await;
	let clients = mock_clients(
		&server,
		200,
		"[{\"clientId\":\"account\"},{\"clientId\":\"admin-cli\"}]",
	)
	.await;
	let (result, output) = run(&config_for(&server)).await;

	result.expect("The full flow should succeed.");

	assert_eq!(output, "The default clients:\n  account\n  admin-cli\n");

	discovery.assert_async().await;
	token.assert_async().await;
	clients.assert_async().await;
}

#[tokio::test]
async fn run_with_no_clients_prints_only_the_header() {
	let server = MockServer::start_async().await;
	let _discovery = mock_discovery(&server).await;
	let _token = mock_token_success(&server).await;
	let clients = mock_clients(&server, 200, "[]").await;
	let (result, output) = run(&config_for(&server)).await;

	result.expect("An empty realm should still succeed.");

	assert_eq!(output, "The default clients:\n");

	clients.assert_async().await;
}

#[tokio::test]
async fn rejected_credentials_never_reach_the_admin_api() {
	let server = MockServer::start_async().await;
	let _discovery = mock_discovery(&server).await;
	let token = server
		.mock_async(|when, then| {
			when.method(POST).path(TOKEN_PATH);
			then.status(401).header("content-type", "application/json").body(
				"{\"error\":\"invalid_grant\",\"error_description\":\"Invalid user credentials\"}",
			);
		})
		.await;
	let clients = mock_clients(&server, 200, "[]").await;
	let (result, output) = run(&config_for(&server)).await;
	let err = result.expect_err("Rejected credentials should fail the run.");

	assert!(matches!(err, Error::InvalidGrant { .. }));
	assert!(output.is_empty());

	token.assert_async().await;
	clients.assert_calls_async(0).await;
}

#[tokio::test]
async fn admin_api_failures_abort_without_output() {
	let server = MockServer::start_async().await;
	let _discovery = mock_discovery(&server).await;
	let _token = mock_token_success(&server).await;
	let clients = mock_clients(&server, 500, "{\"error\":\"unknown_error\"}").await;
	let (result, output) = run(&config_for(&server)).await;
	let err = result.expect_err("A failing admin API should fail the run.");

	assert!(matches!(err, Error::Api(ApiError::Status { status: 500, .. })));
	assert!(output.is_empty());

	clients.assert_async().await;
}
