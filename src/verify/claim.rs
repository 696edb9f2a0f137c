//! Claim flow: bind a verified domain to an SSO connection.
//!
//! The check is re-run immediately before the registry write so an earlier advisory result
//! cannot be replayed after the TXT record was removed.

// self
use crate::{
	_prelude::*,
	claim::{ClaimOutcome, DomainClaim},
	obs::{self, OperationKind, OperationOutcome, OperationSpan},
	org::{ConnectionId, DomainName, IdentifierError, OrganizationId},
	verify::{DomainVerificationRequest, Verifier},
};

/// Request to bind `domain` to `connection` on behalf of `organization`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClaimRequest {
	/// Organization that owns the connection.
	pub organization: OrganizationId,
	/// Connection the domain should route to.
	pub connection: ConnectionId,
	/// Domain to claim.
	pub domain: DomainName,
}
impl ClaimRequest {
	/// Validates raw input into a claim request.
	pub fn new(
		organization: &str,
		connection: &str,
		domain: &str,
	) -> Result<Self, IdentifierError> {
		Ok(Self {
			organization: OrganizationId::new(organization)?,
			connection: ConnectionId::new(connection)?,
			domain: DomainName::new(domain)?,
		})
	}

	fn verification(&self) -> DomainVerificationRequest {
		DomainVerificationRequest {
			domain: self.domain.clone(),
			organization: self.organization.clone(),
		}
	}
}

impl Verifier {
	/// Re-verifies the domain and records the claim.
	///
	/// Claiming a domain the same connection already holds returns the existing claim.
	pub async fn claim_domain(&self, request: &ClaimRequest) -> Result<DomainClaim> {
		const KIND: OperationKind = OperationKind::Claim;

		let span = OperationSpan::new(KIND, "claim_domain");

		obs::record_operation_outcome(KIND, OperationOutcome::Attempt);

		let result = span.instrument(self.claim_inner(request)).await;

		obs::record_operation_outcome(
			KIND,
			if result.is_ok() { OperationOutcome::Success } else { OperationOutcome::Failure },
		);

		result
	}

	/// Removes the claim `connection` holds on `domain`; returns `None` when it held none.
	pub async fn release_domain(
		&self,
		domain: &DomainName,
		connection: &ConnectionId,
	) -> Result<Option<DomainClaim>> {
		Ok(self.claim_registry()?.release(domain, connection).await?)
	}

	/// Lists the domains bound to `connection`.
	pub async fn claimed_domains(&self, connection: &ConnectionId) -> Result<Vec<DomainClaim>> {
		Ok(self.claim_registry()?.list_for_connection(connection).await?)
	}

	async fn claim_inner(&self, request: &ClaimRequest) -> Result<DomainClaim> {
		let registry = self.claim_registry()?;

		if let Some(existing) = registry.fetch(&request.domain).await? {
			return Self::reuse_or_reject(request, existing);
		}

		let checked = self.check(&request.verification()).await?;

		if !checked.verified() {
			return Err(Error::DomainUnverified {
				domain: request.domain.to_string(),
				organization: request.organization.to_string(),
			});
		}

		let claim = DomainClaim {
			organization: request.organization.clone(),
			connection: request.connection.clone(),
			domain: request.domain.clone(),
			claimed_at: checked.checked_at,
		};

		match registry.insert_if_absent(claim.clone()).await? {
			ClaimOutcome::Inserted => Ok(claim),
			ClaimOutcome::Existing(existing) => Self::reuse_or_reject(request, existing),
		}
	}

	fn reuse_or_reject(request: &ClaimRequest, existing: DomainClaim) -> Result<DomainClaim> {
		if existing.is_held_by(&request.organization, &request.connection) {
			Ok(existing)
		} else {
			Err(Error::DomainAlreadyClaimed {
				domain: existing.domain.to_string(),
				connection: existing.connection.to_string(),
			})
		}
	}
}
