//! Validating builder for [`VerifierConfig`].

// self
use crate::{
	_prelude::*,
	config::{
		DEFAULT_RECORD_IDENTIFIER, DEFAULT_RESOLUTION_TIMEOUT, ExecutionMode, PLACEHOLDER_DOMAIN,
		VerifierConfig,
	},
	org::DomainName,
};

/// Errors raised while constructing or validating a [`VerifierConfig`].
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum VerifierConfigError {
	/// Record identifier is empty.
	#[error("Record identifier cannot be empty.")]
	EmptyRecordIdentifier,
	/// Record identifier contains `=`, whitespace, or non-printable characters.
	#[error("Record identifier `{identifier}` must be printable ASCII without `=` or whitespace.")]
	InvalidRecordIdentifier {
		/// Identifier that failed validation.
		identifier: String,
	},
	/// A bypass domain was configured for a production deployment.
	#[error("Bypass domain {domain} is only allowed in development mode.")]
	BypassInProduction {
		/// Offending bypass domain.
		domain: String,
	},
	/// The resolver timeout is zero.
	#[error("Resolution timeout must be greater than zero.")]
	ZeroTimeout,
	/// Execution mode string is not recognized.
	#[error("Unknown execution mode `{value}`.")]
	UnknownMode {
		/// Unrecognized input.
		value: String,
	},
	/// JSON configuration could not be parsed.
	#[error("Invalid configuration at `{path}`: {message}.")]
	Parse {
		/// Path of the failing key.
		path: String,
		/// Parser message.
		message: String,
	},
}

/// Builder for [`VerifierConfig`] values.
#[derive(Debug)]
pub struct VerifierConfigBuilder {
	/// Identifier placed before `=` in the TXT value.
	pub record_identifier: String,
	/// Execution mode.
	pub mode: ExecutionMode,
	/// Explicit bypass domain (development only).
	pub bypass_domain: Option<DomainName>,
	/// Upper bound applied to each TXT lookup.
	pub resolution_timeout: StdDuration,
}
impl VerifierConfigBuilder {
	/// Creates a builder seeded with production defaults.
	pub fn new() -> Self {
		Self {
			record_identifier: DEFAULT_RECORD_IDENTIFIER.into(),
			mode: ExecutionMode::Production,
			bypass_domain: None,
			resolution_timeout: DEFAULT_RESOLUTION_TIMEOUT,
		}
	}

	/// Overrides the record identifier.
	pub fn record_identifier(mut self, identifier: impl Into<String>) -> Self {
		self.record_identifier = identifier.into();

		self
	}

	/// Sets the execution mode.
	pub fn mode(mut self, mode: ExecutionMode) -> Self {
		self.mode = mode;

		self
	}

	/// Overrides the development bypass domain (defaults to [`PLACEHOLDER_DOMAIN`]).
	pub fn bypass_domain(mut self, domain: DomainName) -> Self {
		self.bypass_domain = Some(domain);

		self
	}

	/// Overrides the per-lookup timeout.
	pub fn resolution_timeout(mut self, timeout: StdDuration) -> Self {
		self.resolution_timeout = timeout;

		self
	}

	/// Validates the builder and produces a [`VerifierConfig`].
	pub fn build(self) -> Result<VerifierConfig, VerifierConfigError> {
		validate_record_identifier(&self.record_identifier)?;

		if self.resolution_timeout.is_zero() {
			return Err(VerifierConfigError::ZeroTimeout);
		}

		let bypass_domain = match (self.mode, self.bypass_domain) {
			(ExecutionMode::Production, Some(domain)) =>
				return Err(VerifierConfigError::BypassInProduction { domain: domain.to_string() }),
			(ExecutionMode::Production, None) => None,
			(ExecutionMode::Development, domain) =>
				Some(domain.unwrap_or_else(|| DomainName::from_static(PLACEHOLDER_DOMAIN))),
		};

		Ok(VerifierConfig {
			record_identifier: self.record_identifier,
			mode: self.mode,
			bypass_domain,
			resolution_timeout: self.resolution_timeout,
		})
	}
}
impl Default for VerifierConfigBuilder {
	fn default() -> Self {
		Self::new()
	}
}

fn validate_record_identifier(identifier: &str) -> Result<(), VerifierConfigError> {
	if identifier.is_empty() {
		return Err(VerifierConfigError::EmptyRecordIdentifier);
	}
	if !identifier.chars().all(|c| c.is_ascii_graphic() && c != '=') {
		return Err(VerifierConfigError::InvalidRecordIdentifier { identifier: identifier.into() });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn builder_rejects_bad_identifiers_and_timeouts() {
		assert_eq!(
			VerifierConfig::builder().record_identifier("").build(),
			Err(VerifierConfigError::EmptyRecordIdentifier)
		);
		assert!(matches!(
			VerifierConfig::builder().record_identifier("acme=verify").build(),
			Err(VerifierConfigError::InvalidRecordIdentifier { .. })
		));
		assert!(matches!(
			VerifierConfig::builder().record_identifier("acme verify").build(),
			Err(VerifierConfigError::InvalidRecordIdentifier { .. })
		));
		assert_eq!(
			VerifierConfig::builder().resolution_timeout(StdDuration::ZERO).build(),
			Err(VerifierConfigError::ZeroTimeout)
		);
	}

	#[test]
	fn bypass_is_gated_on_mode() {
		let custom = DomainName::new("dev.local").expect("Domain fixture should be valid.");
		let err = VerifierConfig::builder()
			.bypass_domain(custom.clone())
			.build()
			.expect_err("Production configs must reject a bypass domain.");

		assert_eq!(err, VerifierConfigError::BypassInProduction { domain: "dev.local".into() });

		let config = VerifierConfig::builder()
			.mode(ExecutionMode::Development)
			.bypass_domain(custom.clone())
			.build()
			.expect("Development configs accept a custom bypass domain.");

		assert!(config.bypass_applies(&custom));

		let defaulted = VerifierConfig::builder()
			.mode(ExecutionMode::Development)
			.build()
			.expect("Development configs default the bypass domain.");

		assert_eq!(defaulted, VerifierConfig::development());
	}
}
