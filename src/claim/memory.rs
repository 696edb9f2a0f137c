//! Thread-safe in-memory [`ClaimRegistry`].

// self
use crate::{
	_prelude::*,
	claim::{ClaimFuture, ClaimOutcome, ClaimRegistry, DomainClaim},
	org::{ConnectionId, DomainName},
};

type ClaimMap = Arc<RwLock<HashMap<DomainName, DomainClaim>>>;

/// Registry that keeps claims in-process for tests and single-node deployments.
#[derive(Clone, Debug, Default)]
pub struct MemoryClaimRegistry(ClaimMap);
impl MemoryClaimRegistry {
	fn insert_now(map: ClaimMap, claim: DomainClaim) -> ClaimOutcome {
		let mut guard = map.write();

		match guard.get(&claim.domain) {
			Some(existing) => ClaimOutcome::Existing(existing.clone()),
			None => {
				guard.insert(claim.domain.clone(), claim);

				ClaimOutcome::Inserted
			},
		}
	}

	fn release_now(
		map: ClaimMap,
		domain: DomainName,
		connection: ConnectionId,
	) -> Option<DomainClaim> {
		let mut guard = map.write();

		match guard.get(&domain) {
			Some(existing) if existing.connection == connection => guard.remove(&domain),
			_ => None,
		}
	}

	fn list_now(map: ClaimMap, connection: ConnectionId) -> Vec<DomainClaim> {
		let mut claims: Vec<_> =
			map.read().values().filter(|claim| claim.connection == connection).cloned().collect();

		claims.sort_by(|a, b| a.domain.cmp(&b.domain));

		claims
	}
}
impl ClaimRegistry for MemoryClaimRegistry {
	fn fetch<'a>(&'a self, domain: &'a DomainName) -> ClaimFuture<'a, Option<DomainClaim>> {
		let map = self.0.clone();

		Box::pin(async move { Ok(map.read().get(domain).cloned()) })
	}

	fn insert_if_absent(&self, claim: DomainClaim) -> ClaimFuture<'_, ClaimOutcome> {
		let map = self.0.clone();

		Box::pin(async move { Ok(Self::insert_now(map, claim)) })
	}

	fn release<'a>(
		&'a self,
		domain: &'a DomainName,
		connection: &'a ConnectionId,
	) -> ClaimFuture<'a, Option<DomainClaim>> {
		let map = self.0.clone();
		let domain = domain.to_owned();
		let connection = connection.to_owned();

		Box::pin(async move { Ok(Self::release_now(map, domain, connection)) })
	}

	fn list_for_connection<'a>(
		&'a self,
		connection: &'a ConnectionId,
	) -> ClaimFuture<'a, Vec<DomainClaim>> {
		let map = self.0.clone();
		let connection = connection.to_owned();

		Box::pin(async move { Ok(Self::list_now(map, connection)) })
	}
}
