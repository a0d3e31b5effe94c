//! Bounded, ready-checked gRPC channels to the Dex identity provider: plaintext, TLS, or
//! mutual TLS selected from PEM material, with typed errors for every way a bootstrap can fail.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod bootstrap;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod obs;
pub mod tls;
pub mod transport;

mod _prelude {
	pub use std::{
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
		time::Duration,
	};

	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use tonic::transport::Channel;

	pub use crate::error::{Error, Result};
}

pub use tonic;

pub use api::DexClient;
pub use bootstrap::{Bootstrapper, bootstrap, prepare};
pub use config::{ConnectionConfig, PemSecret};
pub use error::{Error, ErrorKind, Result};

#[cfg(test)] use {color_eyre as _, rcgen as _};
