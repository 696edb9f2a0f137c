#![allow(dead_code)]

// std
use std::sync::Arc;
// self
use domain_ownership::{
	claim::MemoryClaimRegistry,
	config::VerifierConfig,
	dns::{StaticTxtResolver, TxtRecord},
	org::{DomainName, OrganizationId, OrganizationRecord},
	store::{MemoryStore, OrganizationStore},
	verify::Verifier,
};

pub struct Harness {
	pub store: MemoryStore,
	pub zone: StaticTxtResolver,
	pub claims: MemoryClaimRegistry,
	pub verifier: Verifier,
}
impl Harness {
	pub async fn new(config: VerifierConfig, organizations: &[&str]) -> Self {
		let store = MemoryStore::default();
		let zone = StaticTxtResolver::default();
		let claims = MemoryClaimRegistry::default();

		for organization in organizations {
			store
				.save(OrganizationRecord::new(org_id(organization)).with_name(*organization))
				.await
				.expect("Seeding organization fixtures should succeed.");
		}

		let verifier = Verifier::new(Arc::new(store.clone()), Arc::new(zone.clone()), config)
			.with_claim_registry(Arc::new(claims.clone()));

		Self { store, zone, claims, verifier }
	}

	pub async fn production(organizations: &[&str]) -> Self {
		Self::new(VerifierConfig::production(), organizations).await
	}

	/// Publishes `<domain-verification>=<token>` for `organization` at `domain`.
	pub async fn publish_token(&self, domain: &str, organization: &str) {
		let instructions = self
			.verifier
			.txt_instructions(organization)
			.await
			.expect("TXT instructions should be available for seeded organizations.");

		self.zone.publish(&domain_name(domain), TxtRecord::single(instructions.value));
	}
}

pub fn org_id(value: &str) -> OrganizationId {
	OrganizationId::new(value).expect("Organization fixture should be valid.")
}

pub fn domain_name(value: &str) -> DomainName {
	DomainName::new(value).expect("Domain fixture should be valid.")
}
