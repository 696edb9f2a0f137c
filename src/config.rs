//! Verifier configuration passed explicitly to every [`Verifier`](crate::verify::Verifier).
//!
//! Nothing is read from ambient process state: callers decide how to source the record
//! identifier, execution mode, and resolver timeout (environment, JSON file, flags) and hand
//! the validated [`VerifierConfig`] to the verifier.

pub mod builder;

pub use builder::*;

// self
use crate::{
	_prelude::*,
	org::{DomainName, VerificationToken},
};

/// Record identifier used in `<record-identifier>=<token>` when none is configured.
pub const DEFAULT_RECORD_IDENTIFIER: &str = "domain-verification";
/// Domain treated as verified in [`ExecutionMode::Development`] unless overridden.
pub const PLACEHOLDER_DOMAIN: &str = "example.com";
/// Upper bound applied to each TXT lookup when none is configured.
pub const DEFAULT_RESOLUTION_TIMEOUT: StdDuration = StdDuration::from_secs(5);

/// Deployment mode; only [`ExecutionMode::Development`] honors the placeholder bypass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum ExecutionMode {
	#[default]
	/// Real DNS lookups for every domain.
	Production,
	/// Local development; the placeholder domain skips DNS.
	Development,
}
impl ExecutionMode {
	/// Returns a stable label suitable for config files and span fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ExecutionMode::Production => "production",
			ExecutionMode::Development => "development",
		}
	}

	/// Returns true for [`ExecutionMode::Development`].
	pub const fn is_development(self) -> bool {
		matches!(self, ExecutionMode::Development)
	}
}
impl Display for ExecutionMode {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl FromStr for ExecutionMode {
	type Err = VerifierConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"production" | "prod" => Ok(ExecutionMode::Production),
			"development" | "dev" | "local" => Ok(ExecutionMode::Development),
			_ => Err(VerifierConfigError::UnknownMode { value: s.to_owned() }),
		}
	}
}
impl TryFrom<String> for ExecutionMode {
	type Error = VerifierConfigError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

/// Validated verifier configuration.
///
/// Fields are private so a bypass domain can only exist in development mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifierConfig {
	record_identifier: String,
	mode: ExecutionMode,
	bypass_domain: Option<DomainName>,
	resolution_timeout: StdDuration,
}
impl VerifierConfig {
	/// Creates a builder seeded with production defaults.
	pub fn builder() -> VerifierConfigBuilder {
		VerifierConfigBuilder::new()
	}

	/// Production defaults: `domain-verification` identifier, no bypass, 5 s timeout.
	pub fn production() -> Self {
		Self {
			record_identifier: DEFAULT_RECORD_IDENTIFIER.into(),
			mode: ExecutionMode::Production,
			bypass_domain: None,
			resolution_timeout: DEFAULT_RESOLUTION_TIMEOUT,
		}
	}

	/// Development defaults: like [`production`](Self::production) plus the
	/// [`PLACEHOLDER_DOMAIN`] bypass.
	pub fn development() -> Self {
		Self {
			mode: ExecutionMode::Development,
			bypass_domain: Some(DomainName::from_static(PLACEHOLDER_DOMAIN)),
			..Self::production()
		}
	}

	/// Parses a JSON document such as
	/// `{"record_identifier":"acme-verify","mode":"development","resolution_timeout_ms":2000}`.
	///
	/// Every key is optional; unknown keys are rejected and errors carry the failing path.
	pub fn from_json_str(json: &str) -> Result<Self, VerifierConfigError> {
		let mut deserializer = serde_json::Deserializer::from_str(json);
		let raw: RawVerifierConfig = serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|e| VerifierConfigError::Parse {
				path: e.path().to_string(),
				message: e.inner().to_string(),
			})?;
		let mut builder = Self::builder();

		if let Some(identifier) = raw.record_identifier {
			builder = builder.record_identifier(identifier);
		}
		if let Some(mode) = raw.mode {
			builder = builder.mode(mode);
		}
		if let Some(domain) = raw.bypass_domain {
			builder = builder.bypass_domain(domain);
		}
		if let Some(ms) = raw.resolution_timeout_ms {
			builder = builder.resolution_timeout(StdDuration::from_millis(ms));
		}

		builder.build()
	}

	/// Identifier placed before `=` in the published TXT value.
	pub fn record_identifier(&self) -> &str {
		&self.record_identifier
	}

	/// Configured execution mode.
	pub fn mode(&self) -> ExecutionMode {
		self.mode
	}

	/// Placeholder domain that skips DNS; always `None` in production.
	pub fn bypass_domain(&self) -> Option<&DomainName> {
		self.bypass_domain.as_ref()
	}

	/// Upper bound applied to each TXT lookup.
	pub fn resolution_timeout(&self) -> StdDuration {
		self.resolution_timeout
	}

	/// Exact TXT value that proves ownership for `token`.
	pub fn expected_txt_value(&self, token: &VerificationToken) -> String {
		token.txt_value(&self.record_identifier)
	}

	/// Returns true when `domain` must be treated as verified without a DNS lookup.
	pub fn bypass_applies(&self, domain: &DomainName) -> bool {
		self.mode.is_development() && self.bypass_domain.as_ref() == Some(domain)
	}
}
impl Default for VerifierConfig {
	fn default() -> Self {
		Self::production()
	}
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawVerifierConfig {
	record_identifier: Option<String>,
	mode: Option<ExecutionMode>,
	bypass_domain: Option<DomainName>,
	resolution_timeout_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn domain(value: &str) -> DomainName {
		DomainName::new(value).expect("Domain fixture should be valid.")
	}

	#[test]
	fn production_never_bypasses() {
		let config = VerifierConfig::default();

		assert_eq!(config.mode(), ExecutionMode::Production);
		assert!(config.bypass_domain().is_none());
		assert!(!config.bypass_applies(&domain(PLACEHOLDER_DOMAIN)));
		assert_eq!(config.resolution_timeout(), StdDuration::from_secs(5));
	}

	#[test]
	fn development_bypasses_only_the_placeholder() {
		let config = VerifierConfig::development();

		assert!(config.bypass_applies(&domain("example.com")));
		assert!(config.bypass_applies(&domain("EXAMPLE.com.")));
		assert!(!config.bypass_applies(&domain("customer.com")));
		assert!(!config.bypass_applies(&domain("sub.example.com")));
	}

	#[test]
	fn json_config_parses_and_validates() {
		let config = VerifierConfig::from_json_str(
			r#"{"record_identifier":"acme-verify","mode":"development","resolution_timeout_ms":250}"#,
		)
		.expect("JSON config should parse.");

		assert_eq!(config.record_identifier(), "acme-verify");
		assert_eq!(config.bypass_domain(), Some(&domain(PLACEHOLDER_DOMAIN)));
		assert_eq!(config.resolution_timeout(), StdDuration::from_millis(250));

		let err = VerifierConfig::from_json_str(r#"{"bypass_domain":"example.com"}"#)
			.expect_err("Production configs must reject a bypass domain.");

		assert!(matches!(err, VerifierConfigError::BypassInProduction { .. }));

		let err = VerifierConfig::from_json_str(r#"{"mode":"staging"}"#)
			.expect_err("Unknown modes must be rejected.");

		assert!(matches!(err, VerifierConfigError::Parse { ref path, .. } if path == "mode"));
	}

	#[test]
	fn json_mode_accepts_the_same_spellings_as_from_str() {
		for (raw, expected) in [
			("dev", ExecutionMode::Development),
			("local", ExecutionMode::Development),
			("Development", ExecutionMode::Development),
			("prod", ExecutionMode::Production),
		] {
			let config = VerifierConfig::from_json_str(&format!(r#"{{"mode":"{raw}"}}"#))
				.expect("Mode spellings accepted by FromStr should parse from JSON.");

			assert_eq!(config.mode(), expected);
			assert_eq!(raw.parse::<ExecutionMode>(), Ok(expected));
		}
	}

	#[test]
	fn execution_mode_parses_common_spellings() {
		assert_eq!("DEV".parse::<ExecutionMode>(), Ok(ExecutionMode::Development));
		assert_eq!(" production ".parse::<ExecutionMode>(), Ok(ExecutionMode::Production));
		assert!("staging".parse::<ExecutionMode>().is_err());
	}

	#[test]
	fn expected_value_uses_record_identifier() {
		let token = VerificationToken::from_stored("T").expect("Token fixture should be valid.");

		assert_eq!(VerifierConfig::default().expected_txt_value(&token), "domain-verification=T");
	}
}
