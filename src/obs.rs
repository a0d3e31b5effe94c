//! Optional observability helpers for bootstrap attempts.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit a `dex_connect.bootstrap` span carrying the `host` and `transport`
//!   fields, plus a `debug` event for every connectivity transition.
//! - Enable `metrics` to increment `dex_connect_bootstrap_total` (labeled by `outcome`) for every
//!   attempt/success/failure and `dex_connect_connectivity_transitions_total` (labeled by
//!   `state`) for every transition.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each bootstrap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BootstrapOutcome {
	/// Entry to the bootstrapper.
	Attempt,
	/// A ready client was returned.
	Success,
	/// An error was returned to the caller.
	Failure,
}
impl BootstrapOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			BootstrapOutcome::Attempt => "attempt",
			BootstrapOutcome::Success => "success",
			BootstrapOutcome::Failure => "failure",
		}
	}
}
impl Display for BootstrapOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
