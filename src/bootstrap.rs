//! Connection bootstrapper for the Dex gRPC API.
//!
//! [`Bootstrapper::bootstrap`] validates a [`ConnectionConfig`], selects plaintext, TLS, or
//! mutual TLS from the supplied material, and drives a new channel to the ready state within
//! the configured timeout. Validation and certificate parsing both finish before the first
//! dial, so configuration mistakes never cost a network round trip.

// self
use crate::{
	_prelude::*,
	api::DexClient,
	config::ConnectionConfig,
	connectivity::{self, Backoff, ConnectivityMonitor},
	obs::{self, BootstrapOutcome, BootstrapSpan},
	tls::TransportSecurity,
	transport::{Dialer, Target, TonicDialer},
};

/// Builds ready-checked [`DexClient`] handles from connection configurations.
///
/// A bootstrapper holds no per-connection state; each call to
/// [`bootstrap`](Self::bootstrap) creates an independent channel.
#[derive(Clone, Debug, Default)]
pub struct Bootstrapper<D = TonicDialer> {
	dialer: D,
	backoff: Backoff,
}
impl Bootstrapper {
	/// Creates a bootstrapper backed by [`TonicDialer`].
	pub fn new() -> Self {
		Self::default()
	}
}
impl<D> Bootstrapper<D>
where
	D: Dialer,
{
	/// Replaces the dialer, keeping the backoff schedule.
	pub fn with_dialer<D2>(self, dialer: D2) -> Bootstrapper<D2>
	where
		D2: Dialer,
	{
		Bootstrapper { dialer, backoff: self.backoff }
	}

	/// Overrides the delay schedule between connection attempts.
	pub fn with_backoff(mut self, backoff: Backoff) -> Self {
		self.backoff = backoff;

		self
	}

	/// Dialer used for connection attempts.
	pub fn dialer(&self) -> &D {
		&self.dialer
	}

	/// Backoff schedule between connection attempts.
	pub fn backoff(&self) -> &Backoff {
		&self.backoff
	}

	/// Creates a client whose channel is ready, or explains why it could not.
	pub async fn bootstrap(&self, config: &ConnectionConfig) -> Result<DexClient<Channel>> {
		self.bootstrap_observed(config, &ConnectivityMonitor::new()).await
	}

	/// Same as [`bootstrap`](Self::bootstrap), publishing every connectivity transition on
	/// `monitor`.
	pub async fn bootstrap_observed(
		&self,
		config: &ConnectionConfig,
		monitor: &ConnectivityMonitor,
	) -> Result<DexClient<Channel>> {
		let span = BootstrapSpan::new(&config.host);

		obs::record_bootstrap_outcome(BootstrapOutcome::Attempt);

		let result = span
			.instrument(async {
				let target = prepare(config)?;

				span.record_transport(target.security().as_str());

				let channel = connectivity::wait_for_ready(
					&self.dialer,
					&target,
					config.timeout(),
					&self.backoff,
					monitor,
				)
				.await?;

				Ok(DexClient::new(channel))
			})
			.await;

		obs::trace_result(&result);

		match &result {
			Ok(_) => obs::record_bootstrap_outcome(BootstrapOutcome::Success),
			Err(_) => obs::record_bootstrap_outcome(BootstrapOutcome::Failure),
		}

		result
	}
}

/// Bootstraps a client with the default [`Bootstrapper`].
pub async fn bootstrap(config: &ConnectionConfig) -> Result<DexClient<Channel>> {
	Bootstrapper::new().bootstrap(config).await
}

/// Validates `config` and resolves its transport security and channel target without dialing.
pub fn prepare(config: &ConnectionConfig) -> Result<Target> {
	config.validate()?;

	let security = TransportSecurity::from_config(config)?;

	Target::new(&config.host, security, config.timeout())
}
