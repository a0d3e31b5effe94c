//! Connectivity state tracking and the bounded readiness wait.
//!
//! A bootstrap drives one channel through `Idle → Connecting → {Ready | TransientFailure}`,
//! re-entering `Connecting` after each transient failure once the backoff elapses. Every
//! transition is published on a [`tokio::sync::watch`] channel owned by a
//! [`ConnectivityMonitor`], so callers can observe progress without polling. The whole wait is
//! bounded by a single deadline; when it expires the monitor moves to `Shutdown` and the caller
//! receives [`Error::Timeout`].

// crates.io
use rand::Rng;
use tokio::sync::watch;
// self
use crate::{
	_prelude::*,
	error::BoxError,
	obs,
	transport::{Dialer, Target},
};

/// Lifecycle status of a channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConnectivityState {
	/// No connection attempt has started.
	Idle,
	/// A connection attempt is in flight.
	Connecting,
	/// The transport is established and usable.
	Ready,
	/// The last attempt failed; another follows after backoff.
	TransientFailure,
	/// The channel was abandoned.
	Shutdown,
}
impl ConnectivityState {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ConnectivityState::Idle => "idle",
			ConnectivityState::Connecting => "connecting",
			ConnectivityState::Ready => "ready",
			ConnectivityState::TransientFailure => "transient_failure",
			ConnectivityState::Shutdown => "shutdown",
		}
	}
}
impl Display for ConnectivityState {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Publishes connectivity transitions for a single bootstrap.
#[derive(Debug)]
pub struct ConnectivityMonitor(watch::Sender<ConnectivityState>);
impl ConnectivityMonitor {
	/// Creates a monitor in the `Idle` state.
	pub fn new() -> Self {
		Self(watch::Sender::new(ConnectivityState::Idle))
	}

	/// Subscribes to state changes. The receiver starts at the current state.
	pub fn subscribe(&self) -> watch::Receiver<ConnectivityState> {
		self.0.subscribe()
	}

	/// Current state.
	pub fn state(&self) -> ConnectivityState {
		*self.0.borrow()
	}

	fn transition(&self, host: &str, next: ConnectivityState) {
		let previous = self.0.send_replace(next);

		obs::record_transition(host, previous, next);
	}
}
impl Default for ConnectivityMonitor {
	fn default() -> Self {
		Self::new()
	}
}

const MAX_JITTER: f64 = 0.99;

/// Delay schedule between connection attempts.
///
/// Defaults follow gRPC's connection-backoff parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Backoff {
	/// Delay after the first failure.
	pub base: Duration,
	/// Growth factor per subsequent failure; values up to `1` keep the delay at `base`.
	pub multiplier: f64,
	/// Relative jitter applied to every delay, in `[0, 1)`.
	pub jitter: f64,
	/// Upper bound before jitter.
	pub max: Duration,
}
impl Backoff {
	/// Delay before the attempt that follows `failures` consecutive failures.
	///
	/// Jitter is clamped to `[0, 1)` so a delay never collapses to zero, and values that do not
	/// fit a [`Duration`] saturate at `max`.
	pub fn delay(&self, failures: u32) -> Duration {
		let max = self.max.as_secs_f64();
		let grows = self.multiplier > 1.;
		let mut delay = self.base.as_secs_f64().min(max);

		for _ in 1..failures {
			if !grows || delay >= max {
				break;
			}

			delay = (delay * self.multiplier).min(max);
		}

		let jitter = if self.jitter.is_finite() { self.jitter.clamp(0., MAX_JITTER) } else { 0. };

		if jitter > 0. {
			delay *= 1. + jitter * rand::rng().random_range(-1. ..=1.);
		}

		Duration::try_from_secs_f64(delay.max(0.)).unwrap_or(self.max)
	}
}
impl Default for Backoff {
	fn default() -> Self {
		Self {
			base: Duration::from_secs(1),
			multiplier: 1.6,
			jitter: 0.2,
			max: Duration::from_secs(120),
		}
	}
}

/// Dials `target` until the channel is ready or `timeout` elapses.
///
/// The deadline bounds the whole wait, including backoff sleeps, so the call returns no
/// earlier than `timeout` on failure and never sleeps past it.
pub async fn wait_for_ready<D>(
	dialer: &D,
	target: &Target,
	timeout: Duration,
	backoff: &Backoff,
	monitor: &ConnectivityMonitor,
) -> Result<Channel>
where
	D: ?Sized + Dialer,
{
	let host = target.host();
	let mut last_error: Option<BoxError> = None;
	let attempts = async {
		let mut failures = 0_u32;

		loop {
			monitor.transition(host, ConnectivityState::Connecting);

			match dialer.dial(target).await {
				Ok(channel) => {
					monitor.transition(host, ConnectivityState::Ready);

					return channel;
				},
				Err(e) => {
					monitor.transition(host, ConnectivityState::TransientFailure);
					failures = failures.saturating_add(1);
					last_error = Some(e);

					tokio::time::sleep(backoff.delay(failures)).await;
				},
			}
		}
	};
	let outcome = tokio::time::timeout(timeout, attempts).await;

	match outcome {
		Ok(channel) => Ok(channel),
		Err(_) => {
			monitor.transition(host, ConnectivityState::Shutdown);

			Err(Error::Timeout { host: host.to_owned(), timeout, last_error })
		},
	}
}
