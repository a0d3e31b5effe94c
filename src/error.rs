//! Bootstrap error types shared across configuration, TLS, and transport stages.

// std
use std::path::PathBuf;
// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boxed error used for transport and parser failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical bootstrap error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Missing or contradictory configuration input.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Malformed certificate or key material.
	#[error(transparent)]
	Tls(#[from] TlsError),

	/// The channel could not be constructed for the target address.
	#[error("Failed to connect to {host}.")]
	Connection {
		/// Target address as configured.
		host: String,
		/// Underlying construction failure.
		#[source]
		source: BoxError,
	},
	/// The channel never reached the ready state within the configured bound.
	#[error("Timed out connecting to {host} after {}s.", timeout.as_secs())]
	Timeout {
		/// Target address as configured.
		host: String,
		/// Bound that expired.
		timeout: Duration,
		/// Last dial failure observed before the deadline, if any.
		#[source]
		last_error: Option<BoxError>,
	},
}
impl Error {
	/// Wraps a channel construction failure for `host`.
	pub fn connection(host: impl Into<String>, src: impl Into<BoxError>) -> Self {
		Self::Connection { host: host.into(), source: src.into() }
	}

	/// Returns the coarse error classification.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::Config(_) => ErrorKind::Configuration,
			Self::Tls(_) => ErrorKind::TlsConfiguration,
			Self::Connection { .. } => ErrorKind::Connection,
			Self::Timeout { .. } => ErrorKind::Timeout,
		}
	}

	/// Whether calling bootstrap again may succeed without changing the configuration.
	pub fn is_retryable(&self) -> bool {
		matches!(self.kind(), ErrorKind::Timeout)
	}
}

/// Coarse classification of [`Error`] values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// Missing or contradictory input, raised before any network activity.
	Configuration,
	/// Certificate or key material could not be parsed.
	TlsConfiguration,
	/// Channel construction failed.
	Connection,
	/// Readiness was not reached before the deadline.
	Timeout,
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// `host` is empty.
	#[error("Host is required.")]
	MissingHost,
	/// Only one half of the client certificate/key pair is set.
	#[error("Both client cert and key required for mutual TLS.")]
	IncompleteClientIdentity,
	/// `timeoutSeconds` is zero or negative.
	#[error("Timeout must be positive, got {seconds}s.")]
	InvalidTimeout {
		/// Rejected value.
		seconds: i64,
	},
	/// Configuration file could not be read.
	#[error("Failed to read configuration from {}.", path.display())]
	Load {
		/// File that failed to load.
		path: PathBuf,
		/// Underlying IO failure.
		#[source]
		source: std::io::Error,
	},
	/// TOML document does not describe a connection config.
	#[error("Configuration TOML is invalid.")]
	Toml(#[from] toml::de::Error),
	/// JSON document does not describe a connection config.
	#[error("Configuration JSON is invalid.")]
	Json(#[from] serde_path_to_error::Error<serde_json::Error>),
}

/// TLS material failures.
#[derive(Debug, ThisError)]
pub enum TlsError {
	/// CA PEM is malformed or holds no usable certificate.
	#[error("Failed to parse CA certificate.")]
	InvalidCaCertificate {
		/// Parser failure, absent when the PEM simply held no certificate.
		#[source]
		source: Option<BoxError>,
	},
	/// Client certificate/key pair could not be loaded.
	#[error("Failed to load client certificate/key.")]
	InvalidClientIdentity {
		/// Underlying parsing failure.
		#[source]
		source: BoxError,
	},
	/// Parsed material was rejected while assembling the client config.
	#[error("Failed to build the TLS client configuration.")]
	Build(#[from] rustls::Error),
}
impl TlsError {
	pub(crate) fn invalid_ca(src: impl Into<BoxError>) -> Self {
		Self::InvalidCaCertificate { source: Some(src.into()) }
	}

	pub(crate) fn invalid_identity(src: impl Into<BoxError>) -> Self {
		Self::InvalidClientIdentity { source: src.into() }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn only_timeouts_are_retryable() {
		let timeout = Error::Timeout {
			host: "dex:5557".into(),
			timeout: Duration::from_secs(5),
			last_error: None,
		};

		assert_eq!(timeout.kind(), ErrorKind::Timeout);
		assert!(timeout.is_retryable());
		assert_eq!(timeout.to_string(), "Timed out connecting to dex:5557 after 5s.");

		let config: Error = ConfigError::MissingHost.into();

		assert_eq!(config.kind(), ErrorKind::Configuration);
		assert!(!config.is_retryable());

		let connection = Error::connection("bad host", "invalid authority");

		assert_eq!(connection.kind(), ErrorKind::Connection);
		assert_eq!(connection.to_string(), "Failed to connect to bad host.");
		assert!(!connection.is_retryable());
	}
}
