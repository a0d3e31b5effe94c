//! Connection configuration for the Dex gRPC API.
//!
//! [`ConnectionConfig`] is the single user-facing entity: it carries the target address, the
//! optional PEM material used to select plaintext, TLS, or mutual TLS, and, once
//! [`ConnectionConfig::configure`] succeeds, the ready-checked [`DexClient`] every downstream
//! operation reuses. The serialized form uses the camelCase keys `host`, `caCert`,
//! `clientCert`, `clientKey`, `insecureSkipVerify`, and `timeoutSeconds`; the client handle is
//! runtime-only and never serialized.

pub mod secret;

pub use secret::PemSecret;

// std
use std::{fs, path::Path};
// self
use crate::{
	_prelude::*,
	api::DexClient,
	bootstrap::Bootstrapper,
	error::ConfigError,
	transport::Dialer,
};

/// Timeout applied when `timeoutSeconds` is unset.
pub const DEFAULT_TIMEOUT_SECONDS: i64 = 5;

/// Resolves an optional field to its value or the provided default.
pub fn value_or<T>(value: &Option<T>, default: T) -> T
where
	T: Clone,
{
	value.as_ref().map_or(default, T::clone)
}

/// Provider-level connection settings for a Dex gRPC endpoint.
///
/// Cloning copies the settings only; the clone starts unconfigured so every stored client
/// belongs to exactly one configuration.
#[derive(Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConnectionConfig {
	/// Dex gRPC `host:port`, e.g. `dex.internal.example.com:5557`.
	pub host: String,
	/// PEM-encoded CA certificate for validating Dex's TLS certificate.
	#[serde(default, rename = "caCert", skip_serializing_if = "Option::is_none")]
	pub ca_cert_pem: Option<PemSecret>,
	/// PEM-encoded client certificate for mutual TLS.
	#[serde(default, rename = "clientCert", skip_serializing_if = "Option::is_none")]
	pub client_cert_pem: Option<PemSecret>,
	/// PEM-encoded private key for the client certificate.
	#[serde(default, rename = "clientKey", skip_serializing_if = "Option::is_none")]
	pub client_key_pem: Option<PemSecret>,
	/// Disables server certificate verification. Development only.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub insecure_skip_verify: Option<bool>,
	/// Bound on the connection-establishment wait, in seconds.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub timeout_seconds: Option<i64>,
	#[serde(skip)]
	client: Option<DexClient<Channel>>,
}
impl ConnectionConfig {
	/// Creates a plaintext configuration targeting `host`.
	pub fn new(host: impl Into<String>) -> Self {
		Self { host: host.into(), ..Default::default() }
	}

	/// Reads a TOML configuration file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let content = fs::read_to_string(path)
			.map_err(|source| ConfigError::Load { path: path.to_path_buf(), source })?;

		Self::from_toml_str(&content)
	}

	/// Parses a TOML document.
	pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(content)?)
	}

	/// Parses a JSON document, reporting the offending field path on failure.
	pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
		let mut de = serde_json::Deserializer::from_str(content);

		Ok(serde_path_to_error::deserialize(&mut de)?)
	}

	/// Sets the CA certificate used to validate the server.
	pub fn with_ca_cert(mut self, pem: impl Into<PemSecret>) -> Self {
		self.ca_cert_pem = Some(pem.into());

		self
	}

	/// Sets the mutual-TLS client certificate and key.
	pub fn with_client_identity(
		mut self,
		cert_pem: impl Into<PemSecret>,
		key_pem: impl Into<PemSecret>,
	) -> Self {
		self.client_cert_pem = Some(cert_pem.into());
		self.client_key_pem = Some(key_pem.into());

		self
	}

	/// Toggles server certificate verification.
	pub fn with_insecure_skip_verify(mut self, skip: bool) -> Self {
		self.insecure_skip_verify = Some(skip);

		self
	}

	/// Overrides the connection-establishment bound.
	pub fn with_timeout_seconds(mut self, seconds: i64) -> Self {
		self.timeout_seconds = Some(seconds);

		self
	}

	/// Checks the inputs that must hold before any network activity.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.host.is_empty() {
			return Err(ConfigError::MissingHost);
		}
		if self.client_cert().is_some() != self.client_key().is_some() {
			return Err(ConfigError::IncompleteClientIdentity);
		}

		let seconds = value_or(&self.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);

		if seconds <= 0 {
			return Err(ConfigError::InvalidTimeout { seconds });
		}

		Ok(())
	}

	/// Connection-establishment bound; non-positive values clamp to zero and are rejected by
	/// [`validate`](Self::validate).
	pub fn timeout(&self) -> Duration {
		let seconds = value_or(&self.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);

		Duration::from_secs(u64::try_from(seconds).unwrap_or_default())
	}

	/// Whether server certificate verification is disabled.
	pub fn insecure_skip_verify(&self) -> bool {
		value_or(&self.insecure_skip_verify, false)
	}

	/// Non-empty CA certificate, if configured.
	pub fn ca_cert(&self) -> Option<&PemSecret> {
		non_empty(&self.ca_cert_pem)
	}

	/// Non-empty client certificate, if configured.
	pub fn client_cert(&self) -> Option<&PemSecret> {
		non_empty(&self.client_cert_pem)
	}

	/// Non-empty client key, if configured.
	pub fn client_key(&self) -> Option<&PemSecret> {
		non_empty(&self.client_key_pem)
	}

	/// Whether any input calls for a TLS transport instead of plaintext.
	pub fn has_tls_material(&self) -> bool {
		self.ca_cert().is_some()
			|| self.client_cert().is_some()
			|| self.client_key().is_some()
			|| self.insecure_skip_verify()
	}

	/// Bootstraps a client with the default dialer and stores it on success.
	///
	/// A previously stored client is dropped and replaced when the new bootstrap succeeds;
	/// on failure the existing client, if any, is left in place.
	pub async fn configure(&mut self) -> Result<()> {
		self.configure_with(&Bootstrapper::new()).await
	}

	/// Same as [`configure`](Self::configure) but dials through `bootstrapper`.
	pub async fn configure_with<D>(&mut self, bootstrapper: &Bootstrapper<D>) -> Result<()>
	where
		D: Dialer,
	{
		let client = bootstrapper.bootstrap(self).await?;

		self.client = Some(client);

		Ok(())
	}

	/// Ready-checked client stored by the last successful [`configure`](Self::configure).
	pub fn client(&self) -> Option<&DexClient<Channel>> {
		self.client.as_ref()
	}

	/// Whether a client has been stored.
	pub fn is_configured(&self) -> bool {
		self.client.is_some()
	}
}
impl Clone for ConnectionConfig {
	fn clone(&self) -> Self {
		Self {
			host: self.host.clone(),
			ca_cert_pem: self.ca_cert_pem.clone(),
			client_cert_pem: self.client_cert_pem.clone(),
			client_key_pem: self.client_key_pem.clone(),
			insecure_skip_verify: self.insecure_skip_verify,
			timeout_seconds: self.timeout_seconds,
			client: None,
		}
	}
}
impl Debug for ConnectionConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ConnectionConfig")
			.field("host", &self.host)
			.field("ca_cert_pem", &self.ca_cert_pem)
			.field("client_cert_pem", &self.client_cert_pem)
			.field("client_key_pem", &self.client_key_pem)
			.field("insecure_skip_verify", &self.insecure_skip_verify)
			.field("timeout_seconds", &self.timeout_seconds)
			.field("client_set", &self.client.is_some())
			.finish()
	}
}

fn non_empty(value: &Option<PemSecret>) -> Option<&PemSecret> {
	value.as_ref().filter(|pem| !pem.is_empty())
}
