//! Channel targets and the dialer seam.
//!
//! [`Target`] is the fully prepared description of one channel: the tonic [`Endpoint`] built
//! from `host`, the selected [`TransportSecurity`], and the TLS server name. A [`Dialer`]
//! performs exactly one connection attempt against a target; the readiness loop in
//! [`connectivity`](crate::connectivity) decides when to try again.
//!
//! The default [`TonicDialer`] connects eagerly. Plaintext targets go through
//! [`Endpoint::connect`]; TLS targets go through [`Endpoint::connect_with_connector`] with a
//! tokio-rustls connector so the rustls configuration (custom roots, client identity, or the
//! permissive verifier) is applied exactly as prepared.

// crates.io
use hyper_util::rt::TokioIo;
use rustls::pki_types::ServerName;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tonic::transport::{Endpoint, Uri};
// self
use crate::{_prelude::*, error::BoxError, tls::TransportSecurity};

/// Future returned by [`Dialer::dial`].
pub type DialFuture<'a> = Pin<Box<dyn Future<Output = Result<Channel, BoxError>> + 'a + Send>>;

/// Performs single connection attempts against a [`Target`].
///
/// A successful dial must return a channel whose transport is established, because the
/// bootstrapper reports it as ready. Failures are treated as transient and retried until the
/// configured deadline.
pub trait Dialer
where
	Self: Send + Sync,
{
	/// Attempts to establish the channel once.
	fn dial<'a>(&'a self, target: &'a Target) -> DialFuture<'a>;
}
impl<D> Dialer for Arc<D>
where
	D: ?Sized + Dialer,
{
	fn dial<'a>(&'a self, target: &'a Target) -> DialFuture<'a> {
		<D as Dialer>::dial(self.as_ref(), target)
	}
}

/// Prepared channel target.
#[derive(Clone, Debug)]
pub struct Target {
	host: String,
	endpoint: Endpoint,
	security: TransportSecurity,
	server_name: Option<ServerName<'static>>,
}
impl Target {
	/// Parses `host` (`host:port`) into a channel target.
	///
	/// Fails with [`Error::Connection`] when the address cannot form a valid endpoint.
	pub fn new(host: &str, security: TransportSecurity, connect_timeout: Duration) -> Result<Self> {
		let endpoint = Endpoint::from_shared(format!("http://{host}"))
			.map_err(|e| Error::connection(host, e))?
			.connect_timeout(connect_timeout);
		let uri = endpoint.uri();

		if uri.path() != "/" || uri.query().is_some() {
			return Err(Error::connection(host, "address must be host:port"));
		}

		let Some(hostname) = uri.host() else {
			return Err(Error::connection(host, "address has no host"));
		};

		if uri.port_u16().is_none() {
			return Err(Error::connection(host, "address has no port"));
		}

		let server_name = if security.is_tls() {
			let bare = hostname.trim_start_matches('[').trim_end_matches(']').to_owned();

			Some(ServerName::try_from(bare).map_err(|e| Error::connection(host, e))?)
		} else {
			None
		};

		Ok(Self { host: host.to_owned(), endpoint, security, server_name })
	}

	/// Address as configured.
	pub fn host(&self) -> &str {
		&self.host
	}

	/// tonic endpoint for the target.
	pub fn endpoint(&self) -> &Endpoint {
		&self.endpoint
	}

	/// Transport credentials for the target.
	pub fn security(&self) -> &TransportSecurity {
		&self.security
	}

	/// Name checked against the server certificate; `None` for plaintext.
	pub fn server_name(&self) -> Option<&ServerName<'static>> {
		self.server_name.as_ref()
	}
}

/// Default dialer backed by tonic, hyper, and tokio-rustls.
#[derive(Clone, Copy, Debug, Default)]
pub struct TonicDialer;
impl TonicDialer {
	async fn dial_tls(target: &Target) -> Result<Channel, BoxError> {
		let TransportSecurity::Tls(settings) = target.security() else {
			return Err("TLS dial requested for a plaintext target".into());
		};
		let server_name =
			target.server_name().cloned().ok_or("TLS target is missing a server name")?;
		let authority = target
			.endpoint()
			.uri()
			.authority()
			.map(|authority| authority.as_str().to_owned())
			.ok_or("TLS target is missing an authority")?;
		let connector = TlsConnector::from(settings.client_config());
		let connect = tower::service_fn(move |_: Uri| {
			let connector = connector.clone();
			let server_name = server_name.clone();
			let authority = authority.clone();

			async move {
				let tcp = TcpStream::connect(authority.as_str()).await?;

				tcp.set_nodelay(true)?;

				let tls = connector.connect(server_name, tcp).await?;

				Ok::<_, std::io::Error>(TokioIo::new(tls))
			}
		});

		Ok(target.endpoint().connect_with_connector(connect).await?)
	}
}
impl Dialer for TonicDialer {
	fn dial<'a>(&'a self, target: &'a Target) -> DialFuture<'a> {
		Box::pin(async move {
			match target.security() {
				TransportSecurity::Plaintext => Ok(target.endpoint().connect().await?),
				TransportSecurity::Tls(_) => Self::dial_tls(target).await,
			}
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{config::ConnectionConfig, error::ErrorKind};

	fn plaintext(host: &str) -> Result<Target> {
		Target::new(host, TransportSecurity::Plaintext, Duration::from_secs(1))
	}

	#[test]
	fn parses_host_and_port() {
		let target = plaintext("dex.internal:5557").expect("host:port should parse.");

		assert_eq!(target.host(), "dex.internal:5557");
		assert_eq!(target.endpoint().uri().port_u16(), Some(5557));
		assert!(target.server_name().is_none());
	}

	#[test]
	fn malformed_addresses_are_connection_errors() {
		for host in ["not a host", "dex:port", "dex:5557/path", "dex", "https://dex:5557"] {
			let err = plaintext(host).expect_err("Malformed addresses must be rejected.");

			assert_eq!(err.kind(), ErrorKind::Connection, "{host}");
			assert_eq!(err.to_string(), format!("Failed to connect to {host}."));
		}
	}

	#[test]
	fn tls_targets_carry_a_server_name() {
		let security = TransportSecurity::from_config(
			&ConnectionConfig::new("[::1]:5557").with_insecure_skip_verify(true),
		)
		.expect("Insecure TLS should build.");
		let target = Target::new("[::1]:5557", security, Duration::from_secs(1))
			.expect("Bracketed IPv6 should parse.");

		assert!(matches!(target.server_name(), Some(ServerName::IpAddress(_))));
	}
}
