//! Bootstraps a client against a running Dex gRPC API and prints its version.
//!
//! Pass a TOML config path as the first argument, or a bare `host:port` to connect over
//! plaintext:
//!
//! ```sh
//! cargo run --example connect -- dex.toml
//! cargo run --example connect -- 127.0.0.1:5557
//! ```

// std
use std::{env, path::Path};
// crates.io
use color_eyre::Result;
// self
use dex_connect::{
	Bootstrapper, ConnectionConfig,
	api::VersionReq,
	connectivity::{ConnectivityMonitor, ConnectivityState},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let arg = env::args().nth(1).unwrap_or_else(|| "127.0.0.1:5557".into());
	let config = if Path::new(&arg).is_file() {
		ConnectionConfig::load(&arg)?
	} else {
		ConnectionConfig::new(arg)
	};
	let monitor = ConnectivityMonitor::new();
	let mut states = monitor.subscribe();
	let watcher = tokio::spawn(async move {
		while states.changed().await.is_ok() {
			let state = *states.borrow_and_update();

			println!("connectivity: {state}");

			if matches!(state, ConnectivityState::Ready | ConnectivityState::Shutdown) {
				break;
			}
		}
	});

	println!("connecting to {} with timeout {:?}", config.host, config.timeout());

	let result = Bootstrapper::new().bootstrap_observed(&config, &monitor).await;

	// Closing the sender ends the watcher when validation failed before any transition.
	drop(monitor);
	watcher.await?;

	let mut client = result?;
	let version = client.get_version(VersionReq {}).await?.into_inner();

	println!("dex server {} (api v{})", version.server, version.api);

	Ok(())
}
