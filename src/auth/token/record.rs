//! Immutable token record issued by the password grant.

// self
use crate::{
	_prelude::*,
	auth::{
		ScopeSet,
		token::{
			claims::{ClaimsError, IdTokenClaims},
			secret::TokenSecret,
		},
	},
};

/// Current lifecycle status for a token record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenStatus {
	/// The issued-at instant is in the future (clock skew between host and issuer).
	Pending,
	/// Token is currently valid, or carries no expiry.
	Active,
	/// Token exceeded its expiry instant.
	Expired,
}

/// Errors produced by [`TokenRecordBuilder`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum TokenRecordBuilderError {
	/// Issued when no access token value was provided.
	#[error("Access token is required.")]
	MissingAccessToken,
	/// Issued when the access token value is empty.
	#[error("Access token cannot be empty.")]
	EmptyAccessToken,
}

/// Token material returned by the issuer for a single sign-in.
///
/// The record is owned by the caller for the duration of the API call it authorizes. It is not
/// refreshed and not persisted.
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenRecord {
	/// Access token secret; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// Token type reported by the issuer (`bearer` for Keycloak).
	pub token_type: String,
	/// Scopes the issuer reports as granted, when it reports any.
	pub scope: Option<ScopeSet>,
	/// OpenID Connect ID token, present when the `openid` scope was granted.
	pub id_token: Option<TokenSecret>,
	/// Instant the response was received.
	pub issued_at: OffsetDateTime,
	/// Expiry derived from `expires_in`, when the issuer sent one.
	pub expires_at: Option<OffsetDateTime>,
}
impl TokenRecord {
	/// Returns a builder for assembling a record from a token response.
	pub fn builder() -> TokenRecordBuilder {
		TokenRecordBuilder::default()
	}

	/// Computes the lifecycle status at a given instant.
	pub fn status_at(&self, instant: OffsetDateTime) -> TokenStatus {
		if instant < self.issued_at {
			return TokenStatus::Pending;
		}

		match self.expires_at {
			Some(expires_at) if instant >= expires_at => TokenStatus::Expired,
			_ => TokenStatus::Active,
		}
	}

	/// Returns `true` if the record has expired at the provided instant.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		matches!(self.status_at(instant), TokenStatus::Expired)
	}

	/// Remaining lifetime at `instant`, clamped at zero. `None` when the issuer sent no expiry.
	pub fn expires_in_at(&self, instant: OffsetDateTime) -> Option<Duration> {
		self.expires_at.map(|expires_at| {
			let remaining = expires_at - instant;

			if remaining.is_negative() { Duration::ZERO } else { remaining }
		})
	}

	/// Decodes the ID token payload without verifying its signature.
	///
	/// The claims are informational only (who signed in, which audience); never base an
	/// authorization decision on them.
	pub fn unverified_id_token_claims(&self) -> Result<IdTokenClaims, ClaimsError> {
		let id_token = self.id_token.as_ref().ok_or(ClaimsError::MissingIdToken)?;

		IdTokenClaims::decode_unverified(id_token.expose())
	}
}
impl Debug for TokenRecord {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenRecord")
			.field("access_token", &"<redacted>")
			.field("token_type", &self.token_type)
			.field("scope", &self.scope)
			.field("id_token", &self.id_token.as_ref().map(|_| "<redacted>"))
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}

/// Builder for [`TokenRecord`].
#[derive(Clone, Debug, Default)]
pub struct TokenRecordBuilder {
	access_token: Option<TokenSecret>,
	token_type: Option<String>,
	scope: Option<ScopeSet>,
	id_token: Option<TokenSecret>,
	issued_at: Option<OffsetDateTime>,
	expires_in: Option<Duration>,
}
impl TokenRecordBuilder {
	/// Provides the access token value.
	pub fn access_token(mut self, token: impl Into<String>) -> Self {
		self.access_token = Some(TokenSecret::new(token));

		self
	}

	/// Sets the token type; defaults to `bearer`.
	pub fn token_type(mut self, token_type: impl Into<String>) -> Self {
		self.token_type = Some(token_type.into());

		self
	}

	/// Records the scopes granted by the issuer.
	pub fn scope(mut self, scope: ScopeSet) -> Self {
		self.scope = Some(scope);

		self
	}

	/// Provides the ID token value.
	pub fn id_token(mut self, token: impl Into<String>) -> Self {
		self.id_token = Some(TokenSecret::new(token));

		self
	}

	/// Sets the issued-at instant; defaults to the current clock.
	pub fn issued_at(mut self, instant: OffsetDateTime) -> Self {
		self.issued_at = Some(instant);

		self
	}

	/// Sets the lifetime relative to the issued-at instant.
	pub fn expires_in(mut self, duration: Duration) -> Self {
		self.expires_in = Some(duration);

		self
	}

	/// Consumes the builder and produces a [`TokenRecord`].
	pub fn build(self) -> Result<TokenRecord, TokenRecordBuilderError> {
		let access_token = self.access_token.ok_or(TokenRecordBuilderError::MissingAccessToken)?;

		if access_token.expose().is_empty() {
			return Err(TokenRecordBuilderError::EmptyAccessToken);
		}

		let issued_at = self.issued_at.unwrap_or_else(OffsetDateTime::now_utc);

		Ok(TokenRecord {
			access_token,
			token_type: self.token_type.unwrap_or_else(|| "bearer".into()),
			scope: self.scope,
			id_token: self.id_token,
			issued_at,
			expires_at: self.expires_in.map(|lifetime| issued_at + lifetime),
		})
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn builder_requires_access_token() {
		let err = TokenRecord::builder().build().expect_err("Missing access token must fail.");

		assert_eq!(err, TokenRecordBuilderError::MissingAccessToken);

		let err = TokenRecord::builder()
			.access_token("")
			.build()
			.expect_err("Empty access token must fail.");

		assert_eq!(err, TokenRecordBuilderError::EmptyAccessToken);
	}

	#[test]
	fn builder_handles_relative_expiry() {
		let record = TokenRecord::builder()
			.access_token("secret")
			.issued_at(macros::datetime!(2025-01-01 00:00 UTC))
			.expires_in(Duration::seconds(60))
			.build()
			.expect("Token record builder should support relative expiry calculations.");

		assert_eq!(record.token_type, "bearer");
		assert_eq!(record.expires_at, Some(macros::datetime!(2025-01-01 00:01 UTC)));
		assert_eq!(
			record.expires_in_at(macros::datetime!(2025-01-01 00:00:30 UTC)),
			Some(Duration::seconds(30))
		);
		assert_eq!(
			record.expires_in_at(macros::datetime!(2025-01-01 00:05 UTC)),
			Some(Duration::ZERO)
		);
	}

	#[test]
	fn status_tracks_issue_and_expiry_instants() {
		let issued_at = macros::datetime!(2025-01-01 00:00 UTC);
		let record = TokenRecord::builder()
			.access_token("secret")
			.issued_at(issued_at)
			.expires_in(Duration::minutes(5))
			.build()
			.expect("Token record should build.");

		assert_eq!(record.status_at(issued_at - Duration::seconds(1)), TokenStatus::Pending);
		assert_eq!(record.status_at(issued_at + Duration::minutes(1)), TokenStatus::Active);
		assert!(record.is_expired_at(issued_at + Duration::minutes(5)));

		let unbounded = TokenRecord::builder()
			.access_token("secret")
			.issued_at(issued_at)
			.build()
			.expect("Token record without expiry should build.");

		assert_eq!(unbounded.status_at(issued_at + Duration::days(365)), TokenStatus::Active);
		assert_eq!(unbounded.expires_in_at(issued_at), None);
	}

	#[test]
	fn debug_output_redacts_secrets() {
		let record = TokenRecord::builder()
			.access_token("very-secret-access")
			.id_token("very-secret-id")
			.build()
			.expect("Token record should build.");
		let rendered = format!("{record:?}");

		assert!(!rendered.contains("very-secret"));
		assert!(rendered.contains("<redacted>"));
	}

	#[test]
	fn missing_id_token_is_reported() {
		let record = TokenRecord::builder()
			.access_token("secret")
			.build()
			.expect("Token record should build.");

		assert!(matches!(record.unverified_id_token_claims(), Err(ClaimsError::MissingIdToken)));
	}
}
