//! Lists the clients registered in a Keycloak realm.
//!
//! Settings come from `KEYCLOAK_*` environment variables (see [`AppConfig::from_env`]). Logs go to
//! stderr and are filtered through `RUST_LOG`, so stdout carries only the listing.

// std
use std::io;
// crates.io
use color_eyre::Result;
use tracing_subscriber::EnvFilter;
// self
use keycloak_clients::{app, config::AppConfig};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
		.with_writer(io::stderr)
		.init();

	let config = AppConfig::from_env()?;

	app::run(&config, &mut io::stdout().lock()).await?;

	Ok(())
}
