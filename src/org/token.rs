//! Per-organization verification token that redacts its value from logs.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::Rng;
use sha2::{Digest, Sha256};
// self
use crate::_prelude::*;

/// Number of random bytes behind every generated token.
pub const TOKEN_BYTES: usize = 32;

/// Hex-encoded random token an organization publishes to prove domain control.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerificationToken(String);
impl VerificationToken {
	/// Generates a fresh token from [`TOKEN_BYTES`] bytes of OS-seeded randomness.
	pub fn generate() -> Self {
		let mut bytes = [0_u8; TOKEN_BYTES];

		rand::rng().fill(&mut bytes);

		Self(hex::encode(bytes))
	}

	/// Wraps a token previously persisted in organization metadata.
	///
	/// Returns `None` for empty or whitespace-bearing values, which cannot be published as a
	/// single TXT value.
	pub fn from_stored(value: impl Into<String>) -> Option<Self> {
		let value = value.into();

		if value.is_empty() || value.chars().any(char::is_whitespace) {
			return None;
		}

		Some(Self(value))
	}

	/// Returns the raw token. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Short, log-safe SHA-256 fingerprint (base64, no padding) of the token.
	pub fn fingerprint(&self) -> String {
		let digest = Sha256::digest(self.0.as_bytes());

		URL_SAFE_NO_PAD.encode(&digest[..12])
	}

	/// Renders the TXT value `<record_identifier>=<token>`.
	pub fn txt_value(&self, record_identifier: &str) -> String {
		format!("{record_identifier}={}", self.0)
	}
}
impl Debug for VerificationToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("VerificationToken").field(&"<redacted>").finish()
	}
}
impl Display for VerificationToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// DNS record an administrator has to publish for a verification to succeed.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct TxtInstructions {
	/// Record type; always `TXT`.
	pub record_type: &'static str,
	/// Record host; always the zone root (`@`).
	pub name: &'static str,
	/// Record value, `<record_identifier>=<token>`.
	pub value: String,
}
impl TxtInstructions {
	/// Builds the instructions for the given token.
	pub fn new(record_identifier: &str, token: &VerificationToken) -> Self {
		Self { record_type: "TXT", name: "@", value: token.txt_value(record_identifier) }
	}
}
impl Debug for TxtInstructions {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TxtInstructions")
			.field("record_type", &self.record_type)
			.field("name", &self.name)
			.field("value", &"<redacted>")
			.finish()
	}
}
