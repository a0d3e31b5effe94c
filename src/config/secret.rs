//! PEM secret wrapper that redacts sensitive material.

// self
use crate::_prelude::*;

/// Redacted PEM wrapper keeping certificates and keys out of logs.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PemSecret(String);
impl PemSecret {
	/// Wraps a PEM document.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the PEM text. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Whether the secret is the empty string.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl From<String> for PemSecret {
	fn from(value: String) -> Self {
		Self(value)
	}
}
impl From<&str> for PemSecret {
	fn from(value: &str) -> Self {
		Self(value.to_owned())
	}
}
impl Debug for PemSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("PemSecret").field(&"<redacted>").finish()
	}
}
impl Display for PemSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
