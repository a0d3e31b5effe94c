#![allow(dead_code)]

// std
use std::{
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
	time::Duration,
};
// crates.io
use rcgen::CertifiedKey;
// self
use dex_connect::{
	Bootstrapper,
	connectivity::Backoff,
	transport::{DialFuture, Dialer, Target},
};

/// Dialer that counts attempts and either hands out lazy channels or refuses every dial.
#[derive(Debug, Default)]
pub struct FakeDialer {
	dials: AtomicUsize,
	refuse: bool,
}
impl FakeDialer {
	pub fn ready() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub fn refusing() -> Arc<Self> {
		Arc::new(Self { refuse: true, ..Default::default() })
	}

	pub fn dials(&self) -> usize {
		self.dials.load(Ordering::SeqCst)
	}
}
impl Dialer for FakeDialer {
	fn dial<'a>(&'a self, target: &'a Target) -> DialFuture<'a> {
		self.dials.fetch_add(1, Ordering::SeqCst);

		Box::pin(async move {
			if self.refuse {
				Err("connection refused".into())
			} else {
				Ok(target.endpoint().connect_lazy())
			}
		})
	}
}

pub fn bootstrapper_with(dialer: &Arc<FakeDialer>) -> Bootstrapper<Arc<FakeDialer>> {
	Bootstrapper::new()
		.with_dialer(dialer.clone())
		.with_backoff(Backoff { base: Duration::from_millis(100), jitter: 0., ..Default::default() })
}

/// Self-signed certificate and key for `localhost`, PEM-encoded.
pub fn self_signed_pem() -> (String, String) {
	let CertifiedKey { cert, key_pair } =
		rcgen::generate_simple_self_signed(vec!["localhost".into()])
			.expect("Self-signed fixture certificate should generate.");

	(cert.pem(), key_pair.serialize_pem())
}
