//! Crate-level error types shared across the token store, verifier, and claim flow.

// self
use crate::{_prelude::*, config::VerifierConfigError};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical error exposed by public APIs.
///
/// DNS failures never surface here; the verifier folds them into an unverified outcome.
#[derive(Debug, ThisError)]
pub enum Error {
	/// The organization record could not be read or written.
	#[error("{0}")]
	StoreUnavailable(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// A domain or identifier was rejected before any I/O happened.
	#[error(transparent)]
	InvalidInput(#[from] crate::org::IdentifierError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// A check tracker was driven through an invalid transition.
	#[error(transparent)]
	CheckTransition(#[from] crate::verify::CheckTransitionError),

	/// The domain failed the re-verification performed right before a claim.
	#[error("Domain {domain} is not verified for organization {organization}.")]
	DomainUnverified {
		/// Domain that failed verification.
		domain: String,
		/// Organization attempting the claim.
		organization: String,
	},
	/// Another connection already holds the domain.
	#[error("Domain {domain} is already claimed by connection {connection}.")]
	DomainAlreadyClaimed {
		/// Contested domain.
		domain: String,
		/// Connection that currently holds the claim.
		connection: String,
	},
}

/// Configuration failures raised while assembling a verifier.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Verifier configuration failed validation.
	#[error(transparent)]
	Verifier(#[from] VerifierConfigError),
	/// The claim flow was used without a registry attached.
	#[error("No claim registry is attached to the verifier.")]
	MissingClaimRegistry,
}
