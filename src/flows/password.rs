//! Resource owner password credentials grant.
//!
//! [`OidcClient::password_grant`] posts the user's credentials to the token endpoint and returns
//! the issued [`TokenRecord`]. Nothing is cached; every call reaches the issuer.

// self
use crate::{
	_prelude::*,
	auth::{ScopeSet, TokenRecord, TokenSecret},
	error::ConfigError,
	flows::OidcClient,
	http::TokenHttpClient,
	oauth::{BasicFacade, OAuth2Facade, TransportErrorMapper},
	obs::{self, FlowKind},
	provider::{GrantType, ProviderStrategy},
};

const OWNED_PARAMS: [&str; 4] = ["grant_type", "username", "password", "scope"];

/// Credentials and scope for a single password grant.
#[derive(Clone, Debug)]
pub struct PasswordGrantRequest {
	/// Resource owner username.
	pub username: String,
	/// Resource owner password.
	pub password: TokenSecret,
	/// Scopes to request; empty omits the `scope` parameter.
	pub scope: ScopeSet,
}
impl PasswordGrantRequest {
	/// Creates a request without explicit scopes.
	pub fn new(username: impl Into<String>, password: impl Into<TokenSecret>) -> Self {
		Self { username: username.into(), password: password.into(), scope: ScopeSet::default() }
	}

	/// Requests `scope` alongside the grant.
	pub fn with_scope(mut self, scope: ScopeSet) -> Self {
		self.scope = scope;

		self
	}
}

impl<C, M> OidcClient<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Exchanges the resource owner's credentials for tokens.
	pub async fn password_grant(&self, request: PasswordGrantRequest) -> Result<TokenRecord> {
		obs::observe(FlowKind::PasswordGrant, "password_grant", &self.client_id, async {
			self.ensure_password_supported()?;

			let mut form = BTreeMap::new();

			<dyn ProviderStrategy>::augment_token_request(
				self.strategy.as_ref(),
				GrantType::Password,
				&mut form,
			);

			let extra_params: Vec<(String, String)> = form
				.into_iter()
				.filter(|(key, _)| !OWNED_PARAMS.contains(&key.as_str()))
				.collect();
			let facade: BasicFacade<C, M> = BasicFacade::from_descriptor(
				&self.descriptor,
				&self.client_id,
				self.client_secret.as_ref().map(TokenSecret::expose),
				self.http_client.clone(),
				self.transport_mapper.clone(),
			)?;

			facade
				.exchange_password(
					self.strategy.as_ref(),
					&request.username,
					&request.password,
					&request.scope,
					extra_params.as_slice(),
				)
				.await
		})
		.await
	}

	fn ensure_password_supported(&self) -> Result<()> {
		if self.descriptor.supports(GrantType::Password) {
			Ok(())
		} else {
			Err(ConfigError::UnsupportedGrant {
				issuer: self.descriptor.issuer.to_string(),
				grant: GrantType::Password.as_str(),
			}
			.into())
		}
	}
}
