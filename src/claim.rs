//! Registry of domains bound to SSO connections.
//!
//! Each domain belongs to at most one connection. The registry only stores claims; the
//! verifier's claim flow decides whether a claim may be written.

pub mod memory;

pub use memory::MemoryClaimRegistry;

// self
use crate::{
	_prelude::*,
	org::{ConnectionId, DomainName, OrganizationId},
	store::StoreError,
};

/// Boxed future returned by [`ClaimRegistry`] operations.
pub type ClaimFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Storage contract for domain-to-connection bindings.
pub trait ClaimRegistry
where
	Self: Send + Sync,
{
	/// Returns the claim currently held on `domain`, if any.
	fn fetch<'a>(&'a self, domain: &'a DomainName) -> ClaimFuture<'a, Option<DomainClaim>>;

	/// Atomically stores `claim` unless the domain is already claimed.
	fn insert_if_absent(&self, claim: DomainClaim) -> ClaimFuture<'_, ClaimOutcome>;

	/// Removes the claim on `domain` if `connection` holds it, returning the removed claim.
	fn release<'a>(
		&'a self,
		domain: &'a DomainName,
		connection: &'a ConnectionId,
	) -> ClaimFuture<'a, Option<DomainClaim>>;

	/// Lists the claims held by `connection`, ordered by domain.
	fn list_for_connection<'a>(
		&'a self,
		connection: &'a ConnectionId,
	) -> ClaimFuture<'a, Vec<DomainClaim>>;
}

/// A domain bound to a connection of an organization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainClaim {
	/// Organization that verified the domain.
	pub organization: OrganizationId,
	/// Connection the domain routes to.
	pub connection: ConnectionId,
	/// Claimed domain.
	pub domain: DomainName,
	/// Instant the claim was written.
	pub claimed_at: OffsetDateTime,
}
impl DomainClaim {
	/// Returns true when the claim belongs to the given organization + connection pair.
	pub fn is_held_by(&self, organization: &OrganizationId, connection: &ConnectionId) -> bool {
		&self.organization == organization && &self.connection == connection
	}
}

/// Result of [`ClaimRegistry::insert_if_absent`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClaimOutcome {
	/// The claim was written.
	Inserted,
	/// The domain was already claimed; the existing claim is returned untouched.
	Existing(DomainClaim),
}
