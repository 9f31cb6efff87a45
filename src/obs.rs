//! Optional observability around discovery, token, and admin API calls.
//!
//! Every outbound call runs through [`observe`], which opens one span, counts the attempt, and
//! records how the call ended.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit spans named `keycloak_clients.flow` carrying `flow`, `stage`, and
//!   `resource` (issuer URL, client id, or realm). Failed calls also record `error` (the
//!   [`Error::category`] label) and `status` when an HTTP status is known.
//! - Enable `metrics` to increment the `keycloak_clients_flow_total` counter labeled by `flow`
//!   and `outcome`; failures add the `error` label.

mod counter;
mod span;

pub use counter::*;
pub use span::*;

// self
use crate::_prelude::*;

/// Runs `call` inside a [`FlowSpan`] and records its attempt and outcome.
pub async fn observe<T, F>(
	kind: FlowKind,
	stage: &'static str,
	resource: &str,
	call: F,
) -> Result<T>
where
	F: Future<Output = Result<T>>,
{
	let span = FlowSpan::new(kind, stage, resource);

	record_flow_outcome(kind, FlowOutcome::Attempt, None);

	let result = span.run(call).await;

	match &result {
		Ok(_) => record_flow_outcome(kind, FlowOutcome::Success, None),
		Err(err) => {
			span.record_failure(err);
			record_flow_outcome(kind, FlowOutcome::Failure, Some(err.category()));
		},
	}

	result
}

/// Outbound interactions observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Fetching the OpenID discovery document.
	Discovery,
	/// Resource owner password grant against the token endpoint.
	PasswordGrant,
	/// Authenticated call to the admin REST API.
	AdminApi,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::Discovery => "discovery",
			FlowKind::PasswordGrant => "password",
			FlowKind::AdminApi => "admin_api",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to an instrumented call.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
