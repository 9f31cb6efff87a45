//! Unverified view over the claims carried by an OpenID Connect ID token.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
// self
use crate::_prelude::*;

/// Errors raised while decoding ID token claims.
#[derive(Debug, ThisError)]
pub enum ClaimsError {
	/// The token record carries no ID token.
	#[error("Token response did not include an ID token.")]
	MissingIdToken,
	/// The value is not a three-part compact JWS.
	#[error("ID token is not a compact JWT.")]
	Malformed,
	/// The payload segment is not valid base64url.
	#[error("ID token payload is not valid base64url.")]
	Base64(#[from] base64::DecodeError),
	/// The payload is not a JSON claims object.
	#[error("ID token payload is not a valid claims object.")]
	Json(#[from] serde_json::Error),
}

/// Registered and commonly used ID token claims.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IdTokenClaims {
	/// Issuer identifier.
	pub iss: String,
	/// Subject identifier.
	pub sub: String,
	/// Audience; a single string or an array of strings.
	pub aud: serde_json::Value,
	/// Expiry as seconds since the Unix epoch.
	pub exp: i64,
	/// Issued-at as seconds since the Unix epoch.
	pub iat: i64,
	/// Keycloak's username claim.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub preferred_username: Option<String>,
	/// Any other claims.
	#[serde(flatten)]
	pub additional: BTreeMap<String, serde_json::Value>,
}
impl IdTokenClaims {
	/// Decodes the payload segment of a compact JWT without checking the signature.
	pub fn decode_unverified(jwt: &str) -> Result<Self, ClaimsError> {
		let mut segments = jwt.split('.');
		let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
			(Some(_), Some(payload), Some(_), None) if !payload.is_empty() => payload,
			_ => return Err(ClaimsError::Malformed),
		};
		let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;

		Ok(serde_json::from_slice(&bytes)?)
	}

	/// Returns `true` when `client_id` is one of the token's audiences.
	pub fn has_audience(&self, client_id: &str) -> bool {
		match &self.aud {
			serde_json::Value::String(aud) => aud == client_id,
			serde_json::Value::Array(auds) => auds.iter().any(|aud| aud.as_str() == Some(client_id)),
			_ => false,
		}
	}
}
