//! Verifier facade tying the token store, TXT resolver, and claim registry together.

pub mod check;
pub mod claim;
pub mod metrics;
pub mod state;

pub use claim::*;
pub use self::metrics::VerificationMetrics;
pub use state::*;

// self
use crate::{
	_prelude::*,
	claim::ClaimRegistry,
	config::VerifierConfig,
	dns::{ResolutionError, TxtResolver},
	error::ConfigError,
	org::{DomainName, IdentifierError, OrganizationId, TxtInstructions, VerificationToken},
	store::OrganizationStore,
	tokens::TokenStore,
};
#[cfg(feature = "hickory")] use crate::dns::HickoryTxtResolver;

/// Decides whether an organization controls a domain.
///
/// The verifier owns the token store, the resolver, and the configuration so each check runs
/// to completion inside one call: a token read, one bounded TXT lookup, and a comparison.
/// Nothing is cached; every check re-resolves DNS.
#[derive(Clone)]
pub struct Verifier {
	/// Token store backed by organization metadata.
	pub tokens: TokenStore,
	/// Resolver used for TXT lookups.
	pub resolver: Arc<dyn TxtResolver>,
	/// Explicit configuration (record identifier, mode, timeout).
	pub config: VerifierConfig,
	/// In-process counters for verification outcomes.
	pub metrics: Arc<VerificationMetrics>,
	claims: Option<Arc<dyn ClaimRegistry>>,
}
impl Verifier {
	/// Creates a verifier over the provided organization store and resolver.
	pub fn new(
		store: Arc<dyn OrganizationStore>,
		resolver: Arc<dyn TxtResolver>,
		config: VerifierConfig,
	) -> Self {
		Self {
			tokens: TokenStore::new(store),
			resolver,
			config,
			metrics: Default::default(),
			claims: None,
		}
	}

	/// Attaches the registry used by [`Verifier::claim_domain`].
	pub fn with_claim_registry(mut self, registry: Arc<dyn ClaimRegistry>) -> Self {
		self.claims = Some(registry);

		self
	}

	/// Returns the organization's token, creating it when absent.
	pub async fn get_or_create_token(&self, organization: &str) -> Result<VerificationToken> {
		let organization = OrganizationId::new(organization)?;

		self.tokens.get_or_create_token(&organization).await
	}

	/// Rotates the organization's token.
	pub async fn reset_token(&self, organization: &str) -> Result<VerificationToken> {
		let organization = OrganizationId::new(organization)?;

		self.tokens.reset_token(&organization).await
	}

	/// Returns the TXT record the organization has to publish, creating the token if needed.
	pub async fn txt_instructions(&self, organization: &str) -> Result<TxtInstructions> {
		let organization = OrganizationId::new(organization)?;

		self.tokens.txt_instructions(&organization, self.config.record_identifier()).await
	}

	fn claim_registry(&self) -> Result<&Arc<dyn ClaimRegistry>> {
		self.claims.as_ref().ok_or_else(|| ConfigError::MissingClaimRegistry.into())
	}
}
#[cfg(feature = "hickory")]
impl Verifier {
	/// Creates a verifier that resolves TXT records through the host's system resolver.
	pub fn with_system_resolver(
		store: Arc<dyn OrganizationStore>,
		config: VerifierConfig,
	) -> Result<Self, hickory_resolver::ResolveError> {
		let resolver: Arc<dyn TxtResolver> = Arc::new(HickoryTxtResolver::system()?);

		Ok(Self::new(store, resolver, config))
	}
}
impl Debug for Verifier {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Verifier")
			.field("config", &self.config)
			.field("claim_registry_set", &self.claims.is_some())
			.finish()
	}
}

/// A single verification request; validated before any I/O.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DomainVerificationRequest {
	/// Candidate domain.
	pub domain: DomainName,
	/// Organization attempting to prove control.
	pub organization: OrganizationId,
}
impl DomainVerificationRequest {
	/// Validates raw user input into a request.
	pub fn new(domain: &str, organization: &str) -> Result<Self, IdentifierError> {
		Ok(Self {
			domain: DomainName::new(domain)?,
			organization: OrganizationId::new(organization)?,
		})
	}
}

/// Why a check did not verify the domain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnverifiedReason {
	/// The organization never created a token, so nothing can match.
	MissingToken,
	/// TXT records were found but none carried the expected value.
	NoMatchingRecord {
		/// Number of TXT records inspected.
		records_seen: usize,
	},
	/// The TXT lookup failed or timed out.
	ResolutionFailed(ResolutionError),
}

/// Outcome of a single check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationOutcome {
	/// A TXT record matched the organization's token.
	Verified,
	/// The development bypass treated the placeholder domain as verified.
	Bypassed,
	/// The domain is not (yet) verified.
	Unverified(UnverifiedReason),
}
impl VerificationOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(&self) -> &'static str {
		match self {
			Self::Verified => "verified",
			Self::Bypassed => "bypassed",
			Self::Unverified(_) => "unverified",
		}
	}

	/// Returns true for [`Verified`](Self::Verified) and [`Bypassed`](Self::Bypassed).
	pub const fn is_verified(&self) -> bool {
		matches!(self, Self::Verified | Self::Bypassed)
	}
}

/// Result of [`Verifier::check`]. Advisory only: re-check before attaching the domain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainVerificationResult {
	/// Checked domain.
	pub domain: DomainName,
	/// Organization the check ran for.
	pub organization: OrganizationId,
	/// What the check concluded.
	pub outcome: VerificationOutcome,
	/// Instant the check completed.
	pub checked_at: OffsetDateTime,
}
impl DomainVerificationResult {
	/// Returns true when the domain counts as verified.
	pub fn verified(&self) -> bool {
		self.outcome.is_verified()
	}
}
