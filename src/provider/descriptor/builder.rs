// self
use crate::{
	_prelude::*,
	provider::{
		ClientAuthMethod, GrantType, ProviderDescriptor, ProviderEndpoints, SupportedGrants,
	},
};

/// Errors raised while constructing or validating descriptors.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ProviderDescriptorError {
	/// Token endpoint is mandatory for all flows.
	#[error("Missing token endpoint.")]
	MissingTokenEndpoint,
	/// At least one grant must be supported.
	#[error("Descriptor must enable at least one grant type.")]
	NoSupportedGrants,
	/// Endpoints must use HTTP(S).
	#[error("The {endpoint} endpoint must use http or https: {url}.")]
	UnsupportedScheme {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Endpoints must use HTTPS when the builder requires it.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
}

/// Builder for [`ProviderDescriptor`] values.
#[derive(Debug)]
pub struct ProviderDescriptorBuilder {
	/// Issuer identifier for the descriptor being constructed.
	pub issuer: Url,
	/// Token endpoint used by the password grant.
	pub token_endpoint: Option<Url>,
	/// Optional authorization endpoint.
	pub authorization_endpoint: Option<Url>,
	/// Optional userinfo endpoint.
	pub userinfo_endpoint: Option<Url>,
	/// Grants enabled for the issuer.
	pub supported_grants: SupportedGrants,
	/// Preferred client authentication method for the token endpoint.
	pub preferred_client_auth_method: ClientAuthMethod,
	/// Rejects plain `http` endpoints when set.
	pub require_https: bool,
}
impl ProviderDescriptorBuilder {
	/// Creates a new builder seeded with the provided issuer.
	pub fn new(issuer: Url) -> Self {
		Self {
			issuer,
			token_endpoint: None,
			authorization_endpoint: None,
			userinfo_endpoint: None,
			supported_grants: SupportedGrants::default(),
			preferred_client_auth_method: ClientAuthMethod::default(),
			require_https: false,
		}
	}

	/// Sets the token endpoint.
	pub fn token_endpoint(mut self, url: Url) -> Self {
		self.token_endpoint = Some(url);

		self
	}

	/// Sets the authorization endpoint.
	pub fn authorization_endpoint(mut self, url: Url) -> Self {
		self.authorization_endpoint = Some(url);

		self
	}

	/// Sets the userinfo endpoint.
	pub fn userinfo_endpoint(mut self, url: Url) -> Self {
		self.userinfo_endpoint = Some(url);

		self
	}

	/// Marks a single grant type as supported.
	pub fn support_grant(mut self, grant: GrantType) -> Self {
		self.supported_grants = self.supported_grants.enable(grant);

		self
	}

	/// Replaces the supported grant flags.
	pub fn supported_grants(mut self, grants: SupportedGrants) -> Self {
		self.supported_grants = grants;

		self
	}

	/// Overrides the preferred client authentication method.
	pub fn preferred_client_auth_method(mut self, method: ClientAuthMethod) -> Self {
		self.preferred_client_auth_method = method;

		self
	}

	/// Requires every endpoint to use HTTPS.
	pub fn require_https(mut self, required: bool) -> Self {
		self.require_https = required;

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<ProviderDescriptor, ProviderDescriptorError> {
		let token = self.token_endpoint.ok_or(ProviderDescriptorError::MissingTokenEndpoint)?;
		let endpoints = ProviderEndpoints {
			token,
			authorization: self.authorization_endpoint,
			userinfo: self.userinfo_endpoint,
		};
		let descriptor = ProviderDescriptor {
			issuer: self.issuer,
			endpoints,
			supported_grants: self.supported_grants,
			preferred_client_auth_method: self.preferred_client_auth_method,
		};

		descriptor.validate(self.require_https)?;

		Ok(descriptor)
	}
}

impl ProviderDescriptor {
	fn validate(&self, require_https: bool) -> Result<(), ProviderDescriptorError> {
		if self.supported_grants.is_empty() {
			return Err(ProviderDescriptorError::NoSupportedGrants);
		}

		validate_endpoint("token", &self.endpoints.token, require_https)?;

		if let Some(authorization) = self.endpoints.authorization.as_ref() {
			validate_endpoint("authorization", authorization, require_https)?;
		}
		if let Some(userinfo) = self.endpoints.userinfo.as_ref() {
			validate_endpoint("userinfo", userinfo, require_https)?;
		}

		Ok(())
	}
}

fn validate_endpoint(
	name: &'static str,
	url: &Url,
	require_https: bool,
) -> Result<(), ProviderDescriptorError> {
	match url.scheme() {
		"https" => Ok(()),
		"http" if !require_https => Ok(()),
		"http" => Err(ProviderDescriptorError::InsecureEndpoint { endpoint: name, url: url.to_string() }),
		_ => Err(ProviderDescriptorError::UnsupportedScheme { endpoint: name, url: url.to_string() }),
	}
}
