//! Runtime settings for the client listing.
//!
//! Every setting has a literal default pointing at a local Keycloak development server and can be
//! overridden through the environment.

// self
use crate::{
	_prelude::*,
	auth::{OAuthClientId, RealmName, TokenSecret},
	error::ConfigError,
};

const ISSUER_URL: &str = "KEYCLOAK_ISSUER_URL";
const ADMIN_BASE_PATH: &str = "KEYCLOAK_ADMIN_BASE_PATH";
const CLIENT_ID: &str = "KEYCLOAK_CLIENT_ID";
const CLIENT_SECRET: &str = "KEYCLOAK_CLIENT_SECRET";
const USERNAME: &str = "KEYCLOAK_USERNAME";
const PASSWORD: &str = "KEYCLOAK_PASSWORD";
const REALM: &str = "KEYCLOAK_REALM";

/// Settings consumed by [`app::run`](crate::app::run).
#[derive(Clone, Debug)]
pub struct AppConfig {
	/// Issuer whose discovery document is fetched.
	pub issuer_url: Url,
	/// Root of the admin REST API.
	pub admin_base_path: Url,
	/// OAuth client used for the password grant.
	pub client_id: OAuthClientId,
	/// Client secret, sent only when the issuer expects one.
	pub client_secret: Option<TokenSecret>,
	/// Resource owner username.
	pub username: String,
	/// Resource owner password.
	pub password: TokenSecret,
	/// Realm whose clients are listed.
	pub realm: RealmName,
}
impl AppConfig {
	/// Builds the configuration from the process environment.
	///
	/// | Variable                   | Default                                     |
	/// |----------------------------|---------------------------------------------|
	/// | `KEYCLOAK_ISSUER_URL`      | `http://localhost:8080/auth/realms/master/` |
	/// | `KEYCLOAK_ADMIN_BASE_PATH` | `http://localhost:8080/auth/admin/realms`   |
	/// | `KEYCLOAK_CLIENT_ID`       | `admin-cli`                                 |
	/// | `KEYCLOAK_CLIENT_SECRET`   | `unused`                                    |
	/// | `KEYCLOAK_USERNAME`        | `admin-user`                                |
	/// | `KEYCLOAK_PASSWORD`        | `admin-password`                            |
	/// | `KEYCLOAK_REALM`           | `master`                                    |
	///
	/// Unset and empty variables fall back to the default.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Builds the configuration from an arbitrary key lookup.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let value = |key: &str| lookup(key).filter(|value| !value.is_empty());
		let url = |key: &'static str, default: &str| {
			let raw = value(key).unwrap_or_else(|| default.to_owned());

			Url::parse(&raw).map_err(|e| ConfigError::invalid_setting(key, e))
		};
		let client_id = match value(CLIENT_ID) {
			Some(raw) =>
				OAuthClientId::new(raw).map_err(|e| ConfigError::invalid_setting(CLIENT_ID, e))?,
			None => Self::default_client_id()?,
		};
		let realm = match value(REALM) {
			Some(raw) => RealmName::new(raw).map_err(|e| ConfigError::invalid_setting(REALM, e))?,
			None => RealmName::master(),
		};

		Ok(Self {
			issuer_url: url(ISSUER_URL, "http://localhost:8080/auth/realms/master/")?,
			admin_base_path: url(ADMIN_BASE_PATH, "http://localhost:8080/auth/admin/realms")?,
			client_id,
			client_secret: Some(value(CLIENT_SECRET).unwrap_or_else(|| "unused".into()).into()),
			username: value(USERNAME).unwrap_or_else(|| "admin-user".into()),
			password: value(PASSWORD).unwrap_or_else(|| "admin-password".into()).into(),
			realm,
		})
	}

	fn default_client_id() -> Result<OAuthClientId, ConfigError> {
		OAuthClientId::new("admin-cli").map_err(|e| ConfigError::invalid_setting(CLIENT_ID, e))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn lookup(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
		move |key| pairs.iter().find(|(name, _)| *name == key).map(|(_, value)| (*value).to_owned())
	}

	#[test]
	fn defaults_target_a_local_server() {
		let config = AppConfig::from_lookup(lookup(&[])).expect("Defaults should be valid.");

		assert_eq!(config.issuer_url.as_str(), "http://localhost:8080/auth/realms/master/");
		assert_eq!(config.admin_base_path.as_str(), "http://localhost:8080/auth/admin/realms");
		assert_eq!(&*config.client_id, "admin-cli");
		assert_eq!(config.client_secret.as_ref().map(TokenSecret::expose), Some("unused"));
		assert_eq!(config.username, "admin-user");
		assert_eq!(config.password.expose(), "admin-password");
		assert_eq!(config.realm, RealmName::master());
	}

	#[test]
	fn overrides_win_and_empty_values_are_ignored() {
		let config = AppConfig::from_lookup(lookup(&[
			(ISSUER_URL, "https://id.example.com/realms/dev"),
			(USERNAME, ""),
			(REALM, "dev"),
			(PASSWORD, "s3cret"),
		]))
		.expect("Overrides should be valid.");

		assert_eq!(config.issuer_url.as_str(), "https://id.example.com/realms/dev");
		assert_eq!(config.username, "admin-user");
		assert_eq!(&*config.realm, "dev");
		assert_eq!(config.password.expose(), "s3cret");
	}

	#[test]
	fn debug_output_redacts_credentials() {
		let config = AppConfig::from_lookup(lookup(&[
			(CLIENT_SECRET, "s3cr3t-value"),
			(PASSWORD, "hunter2-value"),
		]))
		.expect("Overrides should be valid.");
		let rendered = format!("{config:?}");

		assert!(!rendered.contains("s3cr3t-value"));
		assert!(!rendered.contains("hunter2-value"));
		assert_eq!(config.client_secret.as_ref().map(TokenSecret::expose), Some("s3cr3t-value"));
	}

	#[test]
	fn invalid_settings_name_the_variable() {
		let err = AppConfig::from_lookup(lookup(&[(ADMIN_BASE_PATH, "not a url")]))
			.expect_err("Invalid URL must be rejected.");

		assert!(matches!(err, ConfigError::InvalidSetting { key: ADMIN_BASE_PATH, .. }));

		let err = AppConfig::from_lookup(lookup(&[(REALM, "two words")]))
			.expect_err("Invalid realm must be rejected.");

		assert!(matches!(err, ConfigError::InvalidSetting { key: REALM, .. }));
	}
}
