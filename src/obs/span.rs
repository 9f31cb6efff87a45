// self
use crate::{_prelude::*, obs::FlowKind};

/// Span opened around a single discovery, token, or admin API call.
///
/// Without the `tracing` feature this is a zero-sized placeholder.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Opens a span for `stage` of `kind`, acting on `resource`.
	pub fn new(kind: FlowKind, stage: &'static str, resource: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			Self {
				span: tracing::info_span!(
					"keycloak_clients.flow",
					flow = kind.as_str(),
					stage,
					resource,
					error = tracing::field::Empty,
					status = tracing::field::Empty,
				),
			}
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage, resource);

			Self {}
		}
	}

	/// Polls `call` with the span entered on every poll.
	pub async fn run<F>(&self, call: F) -> F::Output
	where
		F: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			call.instrument(self.span.clone()).await
		}
		#[cfg(not(feature = "tracing"))]
		{
			call.await
		}
	}

	/// Stores the error category and HTTP status of a failed call on the span.
	pub fn record_failure(&self, err: &Error) {
		#[cfg(feature = "tracing")]
		{
			self.span.record("error", err.category());

			if let Some(status) = err.http_status() {
				self.span.record("status", status);
			}

			tracing::debug!(parent: &self.span, error = %err, "call failed");
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = err;
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::DiscoveryError;

	#[tokio::test]
	async fn run_yields_the_call_output() {
		let span = FlowSpan::new(FlowKind::PasswordGrant, "password_grant", "admin-cli");

		assert_eq!(span.run(async { "token" }).await, "token");
	}

	#[test]
	fn failures_can_be_recorded_on_any_build() {
		let span = FlowSpan::new(FlowKind::Discovery, "discover", "http://localhost/");
		let err = Error::from(DiscoveryError::Status {
			url: "http://localhost/.well-known/openid-configuration".into(),
			status: 404,
			body: String::new(),
		});

		span.record_failure(&err);
	}
}
