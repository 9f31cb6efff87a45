// self
use crate::obs::{FlowKind, FlowOutcome};

/// Increments `keycloak_clients_flow_total` when the `metrics` feature is on.
///
/// `error` is the [`Error::category`](crate::error::Error::category) of a failed call and becomes
/// an extra label.
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome, error: Option<&'static str>) {
	#[cfg(feature = "metrics")]
	match error {
		Some(error) => metrics::counter!(
			"keycloak_clients_flow_total",
			"flow" => kind.as_str(),
			"outcome" => outcome.as_str(),
			"error" => error
		)
		.increment(1),
		None => metrics::counter!(
			"keycloak_clients_flow_total",
			"flow" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1),
	}

	#[cfg(not(feature = "metrics"))]
	let _ = (kind, outcome, error);
}
