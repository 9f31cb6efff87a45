//! OpenID Connect discovery: resolve issuer metadata from its well-known document.

// self
use crate::{
	_prelude::*,
	error::{ConfigError, DiscoveryError},
	http::{JsonGetError, ReqwestHttpClient},
	obs::{self, FlowKind},
	provider::ProviderDescriptor,
};

const WELL_KNOWN_SEGMENT: &str = "/.well-known/";
const OPENID_CONFIGURATION: &str = ".well-known/openid-configuration";

/// Subset of the OpenID Provider Metadata document the crate relies on.
///
/// Members the crate does not model are preserved in [`additional`](Self::additional).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProviderMetadata {
	/// Issuer identifier.
	pub issuer: Url,
	/// Token endpoint; the password grant cannot run without it.
	pub token_endpoint: Url,
	/// Authorization endpoint.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub authorization_endpoint: Option<Url>,
	/// Userinfo endpoint.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub userinfo_endpoint: Option<Url>,
	/// JSON Web Key Set location.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub jwks_uri: Option<Url>,
	/// RP-initiated logout endpoint.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub end_session_endpoint: Option<Url>,
	/// Grant types the issuer accepts.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub grant_types_supported: Option<Vec<String>>,
	/// Client authentication methods accepted at the token endpoint.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub token_endpoint_auth_methods_supported: Option<Vec<String>>,
	/// Scopes the issuer advertises.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub scopes_supported: Option<Vec<String>>,
	/// Every other member of the document.
	#[serde(flatten)]
	pub additional: BTreeMap<String, serde_json::Value>,
}

/// A discovered issuer: the raw metadata plus the descriptor flows run against.
#[derive(Clone, Debug)]
pub struct Issuer {
	/// Metadata as published by the issuer.
	pub metadata: ProviderMetadata,
	/// Descriptor derived from [`metadata`](Self::metadata).
	pub descriptor: ProviderDescriptor,
}
impl Issuer {
	/// Fetches the discovery document for `issuer_url` and derives a descriptor from it.
	pub async fn discover(http_client: &ReqwestHttpClient, issuer_url: &Url) -> Result<Self> {
		obs::observe(FlowKind::Discovery, "discover", issuer_url.as_str(), async {
			let metadata = fetch_metadata(http_client, issuer_url).await?;
			let descriptor =
				ProviderDescriptor::from_metadata(&metadata).map_err(ConfigError::from)?;

			Ok(Self { metadata, descriptor })
		})
		.await
	}
}

/// Resolves the discovery document URL for an issuer.
///
/// URLs already pointing below `/.well-known/` are used verbatim. Otherwise
/// `.well-known/openid-configuration` is appended to the issuer path, so a trailing slash on the
/// issuer makes no difference.
pub fn discovery_url(issuer: &Url) -> Url {
	if issuer.path().contains(WELL_KNOWN_SEGMENT) {
		return issuer.clone();
	}

	let mut url = issuer.clone();
	let path = format!("{}/{OPENID_CONFIGURATION}", issuer.path().trim_end_matches('/'));

	url.set_path(&path);

	url
}

/// Fetches and decodes the discovery document without building a descriptor.
pub async fn fetch_metadata(
	http_client: &ReqwestHttpClient,
	issuer_url: &Url,
) -> Result<ProviderMetadata, DiscoveryError> {
	let url = discovery_url(issuer_url);
	let label = url.to_string();

	http_client.get_json(http_client.get(url)).await.map_err(|err| match err {
		JsonGetError::Transport(source) =>
			DiscoveryError::Request { url: label, source: Box::new(source) },
		JsonGetError::Status { status, body } =>
			DiscoveryError::Status { url: label, status, body },
		JsonGetError::Decode(source) => DiscoveryError::InvalidDocument { url: label, source },
	})
}
