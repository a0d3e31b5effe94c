// self
use crate::{
	connectivity::ConnectivityState,
	obs::{self, BootstrapOutcome},
};

/// Records a bootstrap outcome via the global metrics recorder (when enabled).
pub fn record_bootstrap_outcome(outcome: BootstrapOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("dex_connect_bootstrap_total", "outcome" => outcome.as_str()).increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}

/// Records a connectivity transition in both the trace and the metrics pipelines.
pub fn record_transition(host: &str, from: ConnectivityState, to: ConnectivityState) {
	obs::trace_transition(host, from, to);

	#[cfg(feature = "metrics")]
	{
		metrics::counter!("dex_connect_connectivity_transitions_total", "state" => to.as_str())
			.increment(1);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn recorders_are_noops_without_a_global_recorder() {
		record_bootstrap_outcome(BootstrapOutcome::Failure);
		record_transition("dex:5557", ConnectivityState::Connecting, ConnectivityState::Ready);
	}
}
