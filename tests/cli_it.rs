#![cfg(feature = "cli")]

// std
use std::process::{Command, Output};
// crates.io
use httpmock::prelude::*;

const WELL_KNOWN: &str = "/auth/realms/master/.well-known/openid-configuration";
const TOKEN_PATH: &str = "/auth/realms/master/protocol/openid-connect/token";

fn run_cli(server: &MockServer) -> Output {
	Command::new(env!("CARGO_BIN_EXE_keycloak-clients"))
		.env_remove("RUST_LOG")
		.env("KEYCLOAK_ISSUER_URL", server.url("/auth/realms/master/"))
		.env("KEYCLOAK_ADMIN_BASE_PATH", server.url("/auth/admin/realms"))
		.output()
		.expect("The binary should start.")
}

#[test]
fn cli_prints_clients_and_exits_zero() {
	let server = MockServer::start();
	let discovery_body = format!(
		"{{\"issuer\":\"{}\",\"token_endpoint\":\"{}\"}}",
		server.url("/auth/realms/master"),
		server.url(TOKEN_PATH)
	);

	server.mock(|when, then| {
		when.method(GET).path(WELL_KNOWN);
		then.status(200).header("content-type", "application/json").body(discovery_body);
	});
	server.mock(|when, then| {
		when.method(POST).path(TOKEN_PATH);
		then.status(200)
			.header("content-type", "application/json")
			.body("{\"access_token\":\"cli-token\",\"token_type\":\"bearer\"}");
	});
	server.mock(|when, then| {
		when.method(GET)
			.path("/auth/admin/realms/master/clients")
			.header("authorization", "Bearer cli-token");
		then.status(200)
			.header("content-type", "application/json")
			.body("[{\"clientId\":\"account\"},{\"clientId\":\"admin-cli\"}]");
	});

	let output = run_cli(&server);

	assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
	assert_eq!(
		String::from_utf8_lossy(&output.stdout),
		"The default clients:\n  account\n  admin-cli\n"
	);
}

#[test]
fn cli_reports_failures_on_stderr_and_exits_one() {
	let server = MockServer::start();

	server.mock(|when, then| {
		when.method(GET).path(WELL_KNOWN);
		then.status(404).body("Realm does not exist");
	});

	let output = run_cli(&server);

	assert_eq!(output.status.code(), Some(1));
	assert!(output.stdout.is_empty());
	assert!(!output.stderr.is_empty());
}
