// self
use crate::{_prelude::*, connectivity::ConnectivityState};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedBootstrap<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedBootstrap<F> = F;

/// Span wrapping a single bootstrap.
#[derive(Clone, Debug)]
pub struct BootstrapSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl BootstrapSpan {
	/// Creates a new span for `host`; the transport is recorded once selected.
	pub fn new(host: &str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"dex_connect.bootstrap",
				host,
				transport = tracing::field::Empty
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = host;

			Self {}
		}
	}

	/// Records the selected transport label.
	pub fn record_transport(&self, transport: &'static str) {
		#[cfg(feature = "tracing")]
		{
			self.span.record("transport", transport);
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = transport;
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedBootstrap<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Emits a debug event for a connectivity transition.
pub fn trace_transition(host: &str, from: ConnectivityState, to: ConnectivityState) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(host, from = from.as_str(), to = to.as_str(), "connectivity state changed");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (host, from, to);
	}
}

/// Emits an event describing how a bootstrap ended.
pub fn trace_result<T>(result: &Result<T>) {
	#[cfg(feature = "tracing")]
	{
		match result {
			Ok(_) => tracing::info!("channel ready"),
			Err(e) => tracing::warn!(error = %e, kind = ?e.kind(), "bootstrap failed"),
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = result;
	}
}
