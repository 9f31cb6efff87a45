// crates.io
use reqwest::{RequestBuilder, header::USER_AGENT};
// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};

/// Connection settings shared by every admin API group.
///
/// Values are fixed at construction; build a new configuration to switch tokens.
#[derive(Clone, Debug)]
pub struct Configuration {
	/// Admin API root, e.g. `http://localhost:8080/auth/admin/realms`.
	pub base_path: Url,
	/// Bearer token presented on every request.
	pub access_token: TokenSecret,
	/// Optional `User-Agent` header value.
	pub user_agent: Option<String>,
}
impl Configuration {
	/// Creates a configuration for `base_path` authenticated with `access_token`.
	pub fn new(base_path: Url, access_token: impl Into<TokenSecret>) -> Self {
		Self { base_path, access_token: access_token.into(), user_agent: None }
	}

	/// Sends `user_agent` with every request.
	pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = Some(user_agent.into());

		self
	}

	/// Appends percent-encoded `segments` to the base path.
	///
	/// A trailing slash on the base path does not produce an empty segment.
	pub fn endpoint<I, S>(&self, segments: I) -> Result<Url, ConfigError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut url = self.base_path.clone();

		url.path_segments_mut()
			.map_err(|_| ConfigError::InvalidBasePath { base_path: self.base_path.to_string() })?
			.pop_if_empty()
			.extend(segments);

		Ok(url)
	}

	pub(crate) fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
		let request = request.bearer_auth(self.access_token.expose());

		match &self.user_agent {
			Some(user_agent) => request.header(USER_AGENT, user_agent),
			None => request,
		}
	}
}
