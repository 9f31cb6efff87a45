//! Provider descriptor data structures shared by all flows.
//!
//! Descriptors are usually derived from discovered metadata with
//! [`ProviderDescriptor::from_metadata`], but can be assembled by hand through the builder when an
//! issuer does not publish a discovery document.

/// Builder API for assembling provider descriptors.
pub mod builder;
/// Grant helpers wired into provider descriptors.
pub mod grant;

pub use builder::*;
pub use grant::*;

// self
use crate::{_prelude::*, provider::ProviderMetadata};

/// Client authentication modes for token endpoint calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientAuthMethod {
	#[default]
	/// HTTP Basic with `client_id`/`client_secret`.
	ClientSecretBasic,
	/// Form POST body parameters for `client_id`/`client_secret`.
	ClientSecretPost,
	/// Public clients that only send `client_id`.
	#[serde(rename = "none")]
	NoSecret,
}
impl ClientAuthMethod {
	/// Returns the identifier used in `token_endpoint_auth_methods_supported`.
	pub fn as_str(self) -> &'static str {
		match self {
			ClientAuthMethod::ClientSecretBasic => "client_secret_basic",
			ClientAuthMethod::ClientSecretPost => "client_secret_post",
			ClientAuthMethod::NoSecret => "none",
		}
	}

	/// Picks the method to use given the issuer's advertised list.
	///
	/// `client_secret_basic` wins unless the issuer advertises a list that excludes it while
	/// including `client_secret_post`.
	pub fn negotiate(advertised: Option<&[String]>) -> Self {
		let Some(advertised) = advertised else {
			return Self::default();
		};
		let offers = |method: Self| advertised.iter().any(|value| value == method.as_str());

		if !offers(Self::ClientSecretBasic) && offers(Self::ClientSecretPost) {
			Self::ClientSecretPost
		} else {
			Self::ClientSecretBasic
		}
	}
}

/// Endpoint set declared by a provider descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
	/// Token endpoint used by the password grant.
	pub token: Url,
	/// Optional authorization endpoint.
	pub authorization: Option<Url>,
	/// Optional userinfo endpoint.
	pub userinfo: Option<Url>,
}

/// Immutable provider descriptor consumed by flows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
	/// Issuer identifier.
	pub issuer: Url,
	/// Endpoint definitions exposed by the issuer.
	pub endpoints: ProviderEndpoints,
	/// Supported grant flags.
	pub supported_grants: SupportedGrants,
	/// Preferred client authentication mechanism.
	pub preferred_client_auth_method: ClientAuthMethod,
}
impl ProviderDescriptor {
	/// Creates a new builder for the provided issuer.
	pub fn builder(issuer: Url) -> ProviderDescriptorBuilder {
		ProviderDescriptorBuilder::new(issuer)
	}

	/// Derives a descriptor from discovered issuer metadata.
	///
	/// When `grant_types_supported` is absent every grant is assumed to be available and the
	/// issuer is left to reject what it cannot serve.
	pub fn from_metadata(
		metadata: &ProviderMetadata,
	) -> Result<ProviderDescriptor, ProviderDescriptorError> {
		let grants = match metadata.grant_types_supported.as_deref() {
			Some(values) => SupportedGrants::from_labels(values),
			None => SupportedGrants::all(),
		};
		let mut builder = Self::builder(metadata.issuer.clone())
			.token_endpoint(metadata.token_endpoint.clone())
			.supported_grants(grants)
			.preferred_client_auth_method(ClientAuthMethod::negotiate(
				metadata.token_endpoint_auth_methods_supported.as_deref(),
			));

		if let Some(url) = &metadata.authorization_endpoint {
			builder = builder.authorization_endpoint(url.clone());
		}
		if let Some(url) = &metadata.userinfo_endpoint {
			builder = builder.userinfo_endpoint(url.clone());
		}

		builder.build()
	}

	/// Checks whether the descriptor supports a given grant.
	pub fn supports(&self, grant: GrantType) -> bool {
		self.supported_grants.supports(grant)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn negotiation_prefers_basic() {
		let both = vec!["client_secret_post".to_owned(), "client_secret_basic".to_owned()];
		let post_only = vec!["client_secret_post".to_owned(), "private_key_jwt".to_owned()];
		let jwt_only = vec!["private_key_jwt".to_owned()];

		assert_eq!(ClientAuthMethod::negotiate(None), ClientAuthMethod::ClientSecretBasic);
		assert_eq!(ClientAuthMethod::negotiate(Some(&both)), ClientAuthMethod::ClientSecretBasic);
		assert_eq!(
			ClientAuthMethod::negotiate(Some(&post_only)),
			ClientAuthMethod::ClientSecretPost
		);
		assert_eq!(ClientAuthMethod::negotiate(Some(&jwt_only)), ClientAuthMethod::ClientSecretBasic);
	}
}
