// self
use crate::_prelude::*;

/// OAuth 2.0 grant types an issuer may advertise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
	/// Authorization Code grant.
	AuthorizationCode,
	/// Resource Owner Password Credentials grant.
	Password,
	/// Client Credentials grant.
	ClientCredentials,
	/// Refresh Token grant.
	RefreshToken,
}
impl GrantType {
	const ALL: [GrantType; 4] = [
		GrantType::AuthorizationCode,
		GrantType::Password,
		GrantType::ClientCredentials,
		GrantType::RefreshToken,
	];

	/// Returns the RFC 6749 identifier for the grant type.
	pub fn as_str(self) -> &'static str {
		match self {
			GrantType::AuthorizationCode => "authorization_code",
			GrantType::Password => "password",
			GrantType::ClientCredentials => "client_credentials",
			GrantType::RefreshToken => "refresh_token",
		}
	}

	/// Parses an RFC 6749 identifier; unknown and extension grants yield `None`.
	pub fn from_label(label: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|grant| grant.as_str() == label)
	}
}
impl Display for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Collection of grant flags wired into the descriptor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedGrants {
	/// Indicates whether the Authorization Code grant is enabled.
	pub authorization_code: bool,
	/// Indicates whether the Password grant is enabled.
	pub password: bool,
	/// Indicates whether the Client Credentials grant is enabled.
	pub client_credentials: bool,
	/// Indicates whether the Refresh Token grant is enabled.
	pub refresh_token: bool,
}
impl SupportedGrants {
	/// Flags with every known grant enabled.
	pub fn all() -> Self {
		GrantType::ALL.into_iter().fold(Self::default(), Self::enable)
	}

	/// Builds flags from `grant_types_supported` labels, ignoring unknown entries.
	pub fn from_labels<S>(labels: &[S]) -> Self
	where
		S: AsRef<str>,
	{
		labels
			.iter()
			.filter_map(|label| GrantType::from_label(label.as_ref()))
			.fold(Self::default(), Self::enable)
	}

	/// Returns true if the provided grant is supported.
	pub fn supports(self, grant: GrantType) -> bool {
		match grant {
			GrantType::AuthorizationCode => self.authorization_code,
			GrantType::Password => self.password,
			GrantType::ClientCredentials => self.client_credentials,
			GrantType::RefreshToken => self.refresh_token,
		}
	}

	/// Marks a grant as supported.
	pub fn enable(mut self, grant: GrantType) -> Self {
		match grant {
			GrantType::AuthorizationCode => self.authorization_code = true,
			GrantType::Password => self.password = true,
			GrantType::ClientCredentials => self.client_credentials = true,
			GrantType::RefreshToken => self.refresh_token = true,
		}

		self
	}

	/// Returns true when no grants are enabled.
	pub fn is_empty(self) -> bool {
		GrantType::ALL.into_iter().all(|grant| !self.supports(grant))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn labels_map_onto_flags() {
		let grants = SupportedGrants::from_labels(&[
			"authorization_code",
			"implicit",
			"refresh_token",
			"password",
			"urn:ietf:params:oauth:grant-type:device_code",
		]);

		assert!(grants.supports(GrantType::Password));
		assert!(grants.supports(GrantType::RefreshToken));
		assert!(!grants.supports(GrantType::ClientCredentials));
		assert!(SupportedGrants::from_labels::<&str>(&[]).is_empty());
		assert!(!SupportedGrants::all().is_empty());
		assert_eq!(GrantType::from_label("implicit"), None);
	}
}
