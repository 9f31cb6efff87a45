//! Provider strategy hooks that customize token exchanges.
//!
//! Implementations decorate outgoing token requests and classify token endpoint errors without
//! tying flows to any particular HTTP client.

// self
use crate::{_prelude::*, http, provider::descriptor::GrantType};

/// Strategy hook that allows issuers to decorate requests and classify errors.
pub trait ProviderStrategy: Send + Sync {
	/// Maps an OAuth error response onto the crate's error categories.
	fn classify_token_error(&self, ctx: &ProviderErrorContext) -> ProviderErrorKind;

	/// Adds issuer-specific form parameters before a token request is dispatched.
	///
	/// The default does nothing. Keycloak deployments with mandatory OTP, for instance, can add a
	/// `totp` field here. `grant_type`, `username`, `password`, and `scope` are owned by the flow
	/// and are ignored if set.
	fn augment_token_request(&self, _grant: GrantType, _form: &mut BTreeMap<String, String>) {}
}

/// Canonical error categories produced by strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderErrorKind {
	/// The issuer rejected the credentials or the grant itself.
	InvalidGrant,
	/// Client authentication failed or the client may not use the grant.
	InvalidClient,
	/// Requested scopes exceed what the client may obtain.
	InsufficientScope,
	/// Anything else the issuer reported.
	Unexpected,
}

/// Context passed to strategies when classifying token errors.
///
/// Only primitive data is kept here so strategies never depend on the HTTP client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderErrorContext {
	/// Grant type associated with the failing request.
	pub grant_type: GrantType,
	/// HTTP status code returned by the issuer, when available.
	pub http_status: Option<u16>,
	/// Issuer-supplied OAuth `error` field.
	pub oauth_error: Option<String>,
	/// Issuer-supplied OAuth `error_description` field.
	pub error_description: Option<String>,
	/// Preview of the response body for non-JSON payloads.
	pub body_preview: Option<String>,
}
impl ProviderErrorContext {
	/// Creates a new context scoped to the provided grant type.
	pub fn new(grant_type: GrantType) -> Self {
		Self {
			grant_type,
			http_status: None,
			oauth_error: None,
			error_description: None,
			body_preview: None,
		}
	}

	/// Adds an HTTP status code (e.g., 400, 401, 500).
	pub fn with_http_status(mut self, status: u16) -> Self {
		self.http_status = Some(status);

		self
	}

	/// Adds the OAuth error code string returned by the issuer.
	pub fn with_oauth_error(mut self, error: impl Into<String>) -> Self {
		self.oauth_error = Some(error.into());

		self
	}

	/// Adds the OAuth `error_description` field.
	pub fn with_error_description(mut self, description: impl Into<String>) -> Self {
		self.error_description = Some(description.into());

		self
	}

	/// Adds a body preview for issuers that return non-JSON payloads.
	pub fn with_body_preview(mut self, body: impl AsRef<str>) -> Self {
		self.body_preview = Some(http::body_preview(body.as_ref()));

		self
	}
}

/// Default strategy tuned for Keycloak's token endpoint.
///
/// Structured OAuth fields win over body hints, which win over the HTTP status. Keycloak answers
/// bad user credentials with `401 invalid_grant` and a client without direct access grants with
/// `400 unauthorized_client`, so the status alone is never trusted when a code is present.
#[derive(Debug, Default)]
pub struct DefaultProviderStrategy;
impl Display for DefaultProviderStrategy {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("default-provider-strategy")
	}
}
impl ProviderStrategy for DefaultProviderStrategy {
	fn classify_token_error(&self, ctx: &ProviderErrorContext) -> ProviderErrorKind {
		ctx.oauth_error
			.as_deref()
			.and_then(classify_code)
			.or_else(|| ctx.error_description.as_deref().and_then(classify_text))
			.or_else(|| ctx.body_preview.as_deref().and_then(classify_text))
			.unwrap_or_else(|| classify_status(ctx.http_status))
	}
}

fn classify_code(value: &str) -> Option<ProviderErrorKind> {
	const GRANT: [&str; 2] = ["invalid_grant", "access_denied"];
	const CLIENT: [&str; 2] = ["invalid_client", "unauthorized_client"];
	const SCOPE: [&str; 2] = ["invalid_scope", "insufficient_scope"];

	let matches = |codes: &[&str]| codes.iter().any(|code| value.eq_ignore_ascii_case(code));

	if matches(&GRANT) {
		Some(ProviderErrorKind::InvalidGrant)
	} else if matches(&CLIENT) {
		Some(ProviderErrorKind::InvalidClient)
	} else if matches(&SCOPE) {
		Some(ProviderErrorKind::InsufficientScope)
	} else {
		None
	}
}

fn classify_text(text: &str) -> Option<ProviderErrorKind> {
	let lowered = text.to_ascii_lowercase();

	match lowered.as_str() {
		text if text.contains("invalid_grant") || text.contains("invalid user credentials") =>
			Some(ProviderErrorKind::InvalidGrant),
		text if text.contains("invalid_client") || text.contains("unauthorized_client") =>
			Some(ProviderErrorKind::InvalidClient),
		text if text.contains("insufficient_scope") || text.contains("invalid_scope") =>
			Some(ProviderErrorKind::InsufficientScope),
		_ => None,
	}
}

fn classify_status(status: Option<u16>) -> ProviderErrorKind {
	match status {
		Some(400) => ProviderErrorKind::InvalidGrant,
		Some(401) => ProviderErrorKind::InvalidClient,
		Some(403) => ProviderErrorKind::InsufficientScope,
		_ => ProviderErrorKind::Unexpected,
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn oauth_code_beats_status() {
		let strategy = DefaultProviderStrategy;
		let ctx = ProviderErrorContext::new(GrantType::Password)
			.with_http_status(401)
			.with_oauth_error("invalid_grant")
			.with_error_description("Invalid user credentials");

		assert_eq!(strategy.classify_token_error(&ctx), ProviderErrorKind::InvalidGrant);

		let ctx = ProviderErrorContext::new(GrantType::Password)
			.with_http_status(400)
			.with_oauth_error("unauthorized_client");

		assert_eq!(strategy.classify_token_error(&ctx), ProviderErrorKind::InvalidClient);
	}

	#[test]
	fn falls_back_to_description_body_and_status() {
		let strategy = DefaultProviderStrategy;
		let ctx = ProviderErrorContext::new(GrantType::Password)
			.with_oauth_error("custom_error")
			.with_error_description("Invalid user credentials");

		assert_eq!(strategy.classify_token_error(&ctx), ProviderErrorKind::InvalidGrant);

		let ctx =
			ProviderErrorContext::new(GrantType::Password).with_body_preview("error=invalid_scope");

		assert_eq!(strategy.classify_token_error(&ctx), ProviderErrorKind::InsufficientScope);

		let ctx = ProviderErrorContext::new(GrantType::Password).with_http_status(401);

		assert_eq!(strategy.classify_token_error(&ctx), ProviderErrorKind::InvalidClient);

		let ctx = ProviderErrorContext::new(GrantType::Password).with_http_status(503);

		assert_eq!(strategy.classify_token_error(&ctx), ProviderErrorKind::Unexpected);
	}

	#[test]
	fn custom_strategy_can_augment_token_requests() {
		struct OtpStrategy;
		impl ProviderStrategy for OtpStrategy {
			fn classify_token_error(&self, _ctx: &ProviderErrorContext) -> ProviderErrorKind {
				ProviderErrorKind::Unexpected
			}

			fn augment_token_request(&self, grant: GrantType, form: &mut BTreeMap<String, String>) {
				if grant == GrantType::Password {
					form.insert("totp".into(), "123456".into());
				}
			}
		}

		let mut form = BTreeMap::new();

		OtpStrategy.augment_token_request(GrantType::Password, &mut form);

		assert_eq!(form.get("totp").map(String::as_str), Some("123456"));
	}
}
