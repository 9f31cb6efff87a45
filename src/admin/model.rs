// self
use crate::_prelude::*;

/// Client registration as returned by `GET /{realm}/clients`.
///
/// Only commonly used members are typed; the rest land in [`additional`](Self::additional).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRepresentation {
	/// Internal identifier used in admin API paths.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	/// OAuth client identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub client_id: Option<String>,
	/// Display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Free-form description.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Whether the client may be used.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub enabled: Option<bool>,
	/// Protocol, usually `openid-connect`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub protocol: Option<String>,
	/// Public clients authenticate without a secret.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub public_client: Option<bool>,
	/// Bearer-only clients never initiate a login.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub bearer_only: Option<bool>,
	/// Whether the standard authorization code flow is enabled.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub standard_flow_enabled: Option<bool>,
	/// Whether the password grant is enabled for the client.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub direct_access_grants_enabled: Option<bool>,
	/// Root URL prepended to relative redirect URIs.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub root_url: Option<String>,
	/// Default landing URL.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub base_url: Option<String>,
	/// Allowed redirect URIs.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub redirect_uris: Option<Vec<String>>,
	/// Every other member of the representation.
	#[serde(flatten)]
	pub additional: BTreeMap<String, serde_json::Value>,
}

/// Optional filters for [`ClientsApi::realm_clients_get`](crate::admin::ClientsApi::realm_clients_get).
///
/// The default query sends no parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientQuery {
	/// Restricts results to this `clientId`.
	pub client_id: Option<String>,
	/// Treats `client_id` as a substring search.
	pub search: bool,
	/// Returns only clients the caller may view.
	pub viewable_only: bool,
}
impl ClientQuery {
	/// Filters by `client_id`.
	pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
		self.client_id = Some(client_id.into());

		self
	}

	/// Enables substring matching for the `client_id` filter.
	pub fn search(mut self, search: bool) -> Self {
		self.search = search;

		self
	}

	/// Restricts the listing to viewable clients.
	pub fn viewable_only(mut self, viewable_only: bool) -> Self {
		self.viewable_only = viewable_only;

		self
	}

	pub(crate) fn to_pairs(&self) -> Vec<(&'static str, String)> {
		let mut pairs = Vec::new();

		if let Some(client_id) = &self.client_id {
			pairs.push(("clientId", client_id.clone()));
		}
		if self.search {
			pairs.push(("search", "true".into()));
		}
		if self.viewable_only {
			pairs.push(("viewableOnly", "true".into()));
		}

		pairs
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn representation_tolerates_missing_and_unknown_members() {
		let clients: Vec<ClientRepresentation> = serde_json::from_str(
			r#"[
				{"id":"7f1","clientId":"account","publicClient":true,"attributes":{"pkce":"S256"}},
				{"name":"nameless"}
			]"#,
		)
		.expect("Client fixture should decode.");

		assert_eq!(clients[0].client_id.as_deref(), Some("account"));
		assert_eq!(clients[0].public_client, Some(true));
		assert!(clients[0].additional.contains_key("attributes"));
		assert_eq!(clients[1].client_id, None);
	}

	#[test]
	fn default_query_sends_nothing() {
		assert!(ClientQuery::default().to_pairs().is_empty());

		let pairs =
			ClientQuery::default().client_id("admin").search(true).viewable_only(true).to_pairs();

		assert_eq!(
			pairs,
			vec![
				("clientId", "admin".to_owned()),
				("search", "true".to_owned()),
				("viewableOnly", "true".to_owned()),
			]
		);
	}
}
