//! Transport-security selection for the Dex channel.
//!
//! [`TransportSecurity::from_config`] turns the PEM inputs on a [`ConnectionConfig`] into either
//! a plaintext (h2c) plan or a rustls client configuration. TLS is chosen whenever any CA,
//! client certificate, client key, or `insecureSkipVerify = true` is present; all parsing
//! happens here so malformed material fails before any socket is opened.

// crates.io
use rustls::{
	ClientConfig, DigitallySignedStruct, RootCertStore, SignatureScheme,
	client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier},
	crypto::{CryptoProvider, ring},
	pki_types::{CertificateDer, PrivateKeyDer, ServerName, UnixTime},
};
// self
use crate::{
	_prelude::*,
	config::{ConnectionConfig, PemSecret},
	error::TlsError,
};

const ALPN_H2: &[u8] = b"h2";

/// Transport credentials selected for a channel.
#[derive(Clone, Debug)]
pub enum TransportSecurity {
	/// No transport encryption.
	Plaintext,
	/// TLS with the prepared client configuration.
	Tls(TlsSettings),
}
impl TransportSecurity {
	/// Selects and prepares the transport credentials for `config`.
	pub fn from_config(config: &ConnectionConfig) -> Result<Self, TlsError> {
		if !config.has_tls_material() {
			return Ok(Self::Plaintext);
		}

		let provider = Arc::new(ring::default_provider());
		let roots = match config.ca_cert() {
			Some(pem) => parse_roots(pem)?,
			None => system_roots(),
		};
		let verify_server = !config.insecure_skip_verify();
		let builder = ClientConfig::builder_with_provider(provider.clone())
			.with_safe_default_protocol_versions()?;
		let builder = if verify_server {
			builder.with_root_certificates(roots)
		} else {
			builder
				.dangerous()
				.with_custom_certificate_verifier(Arc::new(AcceptAnyServerCert(provider)))
		};
		let (mut client_config, client_auth) =
			match (config.client_cert(), config.client_key()) {
				(Some(cert), Some(key)) => {
					let (chain, key) = parse_identity(cert, key)?;
					let client_config = builder
						.with_client_auth_cert(chain, key)
						.map_err(TlsError::invalid_identity)?;

					(client_config, true)
				},
				_ => (builder.with_no_client_auth(), false),
			};

		client_config.alpn_protocols = vec![ALPN_H2.to_vec()];

		Ok(Self::Tls(TlsSettings {
			client_config: Arc::new(client_config),
			verify_server,
			client_auth,
		}))
	}

	/// Whether the channel negotiates TLS.
	pub fn is_tls(&self) -> bool {
		matches!(self, Self::Tls(_))
	}

	/// Whether the server certificate is verified. Always false for plaintext.
	pub fn verifies_server(&self) -> bool {
		match self {
			Self::Plaintext => false,
			Self::Tls(settings) => settings.verify_server,
		}
	}

	/// Returns a stable label suitable for span or metric fields.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Plaintext => "plaintext",
			Self::Tls(TlsSettings { client_auth: true, .. }) => "mtls",
			Self::Tls(_) => "tls",
		}
	}
}

/// Prepared rustls client configuration.
#[derive(Clone)]
pub struct TlsSettings {
	client_config: Arc<ClientConfig>,
	verify_server: bool,
	client_auth: bool,
}
impl TlsSettings {
	/// Shared rustls configuration used for every handshake on the channel.
	pub fn client_config(&self) -> Arc<ClientConfig> {
		self.client_config.clone()
	}

	/// Whether a client certificate is presented.
	pub fn presents_client_cert(&self) -> bool {
		self.client_auth
	}
}
impl Debug for TlsSettings {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TlsSettings")
			.field("verify_server", &self.verify_server)
			.field("client_auth", &self.client_auth)
			.finish()
	}
}

/// Accepts any server certificate while still checking handshake signatures.
#[derive(Debug)]
struct AcceptAnyServerCert(Arc<CryptoProvider>);
impl ServerCertVerifier for AcceptAnyServerCert {
	fn verify_server_cert(
		&self,
		_: &CertificateDer<'_>,
		_: &[CertificateDer<'_>],
		_: &ServerName<'_>,
		_: &[u8],
		_: UnixTime,
	) -> Result<ServerCertVerified, rustls::Error> {
		Ok(ServerCertVerified::assertion())
	}

	fn verify_tls12_signature(
		&self,
		message: &[u8],
		cert: &CertificateDer<'_>,
		dss: &DigitallySignedStruct,
	) -> Result<HandshakeSignatureValid, rustls::Error> {
		rustls::crypto::verify_tls12_signature(
			message,
			cert,
			dss,
			&self.0.signature_verification_algorithms,
		)
	}

	fn verify_tls13_signature(
		&self,
		message: &[u8],
		cert: &CertificateDer<'_>,
		dss: &DigitallySignedStruct,
	) -> Result<HandshakeSignatureValid, rustls::Error> {
		rustls::crypto::verify_tls13_signature(
			message,
			cert,
			dss,
			&self.0.signature_verification_algorithms,
		)
	}

	fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
		self.0.signature_verification_algorithms.supported_schemes()
	}
}

fn parse_roots(pem: &PemSecret) -> Result<RootCertStore, TlsError> {
	let certs = rustls_pemfile::certs(&mut pem.expose().as_bytes())
		.collect::<Result<Vec<_>, _>>()
		.map_err(TlsError::invalid_ca)?;
	let mut roots = RootCertStore::empty();
	let (added, _) = roots.add_parsable_certificates(certs);

	if added == 0 {
		return Err(TlsError::InvalidCaCertificate { source: None });
	}

	Ok(roots)
}

/// Trust anchors from the platform store, or the bundled Mozilla roots when the platform
/// yields none.
fn system_roots() -> RootCertStore {
	let native = rustls_native_certs::load_native_certs();

	#[cfg(feature = "tracing")]
	for e in &native.errors {
		tracing::debug!(error = %e, "skipped part of the platform trust store");
	}

	roots_or_bundled(native.certs)
}

fn roots_or_bundled(certs: Vec<CertificateDer<'static>>) -> RootCertStore {
	let mut roots = RootCertStore::empty();

	roots.add_parsable_certificates(certs);

	if roots.is_empty() {
		roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
	}

	roots
}

fn parse_identity(
	cert: &PemSecret,
	key: &PemSecret,
) -> Result<(Vec<CertificateDer<'static>>, PrivateKeyDer<'static>), TlsError> {
	let chain = rustls_pemfile::certs(&mut cert.expose().as_bytes())
		.collect::<Result<Vec<_>, _>>()
		.map_err(TlsError::invalid_identity)?;

	if chain.is_empty() {
		return Err(TlsError::invalid_identity("client certificate PEM holds no certificate"));
	}

	let key = rustls_pemfile::private_key(&mut key.expose().as_bytes())
		.map_err(TlsError::invalid_identity)?
		.ok_or_else(|| TlsError::invalid_identity("client key PEM holds no private key"))?;

	Ok((chain, key))
}

#[cfg(test)]
mod tests {
	// crates.io
	use rcgen::{CertificateParams, KeyPair};
	// self
	use super::*;

	fn self_signed(name: &str) -> (String, String) {
		let key = KeyPair::generate().expect("Key pair generation should succeed.");
		let cert = CertificateParams::new(vec![name.to_owned()])
			.expect("Certificate params should accept a DNS name.")
			.self_signed(&key)
			.expect("Self-signing should succeed.");

		(cert.pem(), key.serialize_pem())
	}

	#[test]
	fn plaintext_without_material() {
		let security = TransportSecurity::from_config(&ConnectionConfig::new("dex:5557"))
			.expect("Plaintext selection should not fail.");

		assert!(!security.is_tls());
		assert!(!security.verifies_server());
		assert_eq!(security.as_str(), "plaintext");
	}

	#[test]
	fn insecure_skip_verify_selects_unverified_tls() {
		let config = ConnectionConfig::new("dex:5557").with_insecure_skip_verify(true);
		let security =
			TransportSecurity::from_config(&config).expect("Insecure TLS should build.");

		assert!(security.is_tls());
		assert!(!security.verifies_server());
		assert_eq!(security.as_str(), "tls");
	}

	#[test]
	fn ca_certificate_enables_verified_tls_with_h2_alpn() {
		let (ca, _) = self_signed("dex.internal");
		let config = ConnectionConfig::new("dex.internal:5557").with_ca_cert(ca);
		let security = TransportSecurity::from_config(&config).expect("CA should parse.");
		let TransportSecurity::Tls(settings) = &security else {
			panic!("Expected TLS when a CA certificate is configured.");
		};

		assert!(security.verifies_server());
		assert!(!settings.presents_client_cert());
		assert_eq!(settings.client_config().alpn_protocols, vec![b"h2".to_vec()]);
	}

	#[test]
	fn platform_roots_take_precedence_over_bundled_roots() {
		let key = KeyPair::generate().expect("Key pair generation should succeed.");
		let cert = CertificateParams::new(vec!["dex.internal".to_owned()])
			.expect("Certificate params should accept a DNS name.")
			.self_signed(&key)
			.expect("Self-signing should succeed.");
		let platform = roots_or_bundled(vec![cert.der().clone()]);

		assert_eq!(platform.len(), 1);

		let bundled = roots_or_bundled(Vec::new());

		assert_eq!(bundled.len(), webpki_roots::TLS_SERVER_ROOTS.len());
	}

	#[test]
	fn verification_without_ca_uses_default_roots() {
		let (cert, key) = self_signed("provisioner");
		let config =
			ConnectionConfig::new("dex.internal:5557").with_client_identity(cert, key);
		let security =
			TransportSecurity::from_config(&config).expect("Default roots should always load.");

		assert!(security.verifies_server());
		assert_eq!(security.as_str(), "mtls");
		assert!(!system_roots().is_empty());
	}

	#[test]
	fn malformed_ca_is_rejected() {
		for pem in [
			"not a pem",
			"-----BEGIN CERTIFICATE-----\n!!!!\n-----END CERTIFICATE-----\n",
			"-----BEGIN CERTIFICATE-----\naGVsbG8=\n-----END CERTIFICATE-----\n",
		] {
			let config = ConnectionConfig::new("dex:5557").with_ca_cert(pem);
			let err = TransportSecurity::from_config(&config)
				.expect_err("Malformed CA material must be rejected.");

			assert!(matches!(err, TlsError::InvalidCaCertificate { .. }), "{pem:?} gave {err:?}");
			assert_eq!(err.to_string(), "Failed to parse CA certificate.");
		}
	}

	#[test]
	fn client_identity_enables_mutual_tls() {
		let (ca, _) = self_signed("dex.internal");
		let (cert, key) = self_signed("provisioner");
		let config = ConnectionConfig::new("dex.internal:5557")
			.with_ca_cert(ca)
			.with_client_identity(cert, key);
		let security = TransportSecurity::from_config(&config).expect("Identity should load.");

		assert!(security.verifies_server());
		assert_eq!(security.as_str(), "mtls");
	}

	#[test]
	fn malformed_client_identity_is_rejected() {
		let (cert, key) = self_signed("provisioner");

		for (cert, key) in [
			(cert.as_str(), "garbage"),
			("garbage", key.as_str()),
			(cert.as_str(), cert.as_str()),
		] {
			let config = ConnectionConfig::new("dex:5557")
				.with_insecure_skip_verify(true)
				.with_client_identity(cert, key);
			let err = TransportSecurity::from_config(&config)
				.expect_err("Malformed identity material must be rejected.");

			assert!(matches!(err, TlsError::InvalidClientIdentity { .. }), "{err:?}");
			assert_eq!(err.to_string(), "Failed to load client certificate/key.");
		}
	}

	#[test]
	fn ca_is_still_parsed_when_verification_is_skipped() {
		let config =
			ConnectionConfig::new("dex:5557").with_insecure_skip_verify(true).with_ca_cert("junk");

		assert!(matches!(
			TransportSecurity::from_config(&config),
			Err(TlsError::InvalidCaCertificate { .. })
		));
	}
}
