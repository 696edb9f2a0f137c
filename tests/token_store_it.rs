mod common;

// std
use std::sync::Arc;
// crates.io
use serde_json::json;
// self
use common::{Harness, org_id};
use domain_ownership::{
	error::Error,
	org::{OrganizationRecord, TOKEN_METADATA_KEY},
	store::{OrganizationStore, StoreError},
	tokens::TokenStore,
};

#[tokio::test]
async fn get_or_create_is_idempotent() {
	let harness = Harness::production(&["org_123"]).await;
	let first = harness
		.verifier
		.get_or_create_token("org_123")
		.await
		.expect("First token request should succeed.");
	let second = harness
		.verifier
		.get_or_create_token("org_123")
		.await
		.expect("Second token request should succeed.");

	assert_eq!(first, second);
	assert_eq!(first.expose().len(), 64);
	assert!(first.expose().chars().all(|c| c.is_ascii_hexdigit()));
}

#[tokio::test]
async fn token_creation_preserves_unrelated_metadata() {
	let harness = Harness::production(&[]).await;

	harness
		.store
		.save(
			OrganizationRecord::new(org_id("org_meta"))
				.with_metadata("plan", "enterprise")
				.with_metadata("seats", 42),
		)
		.await
		.expect("Seeding organization with metadata should succeed.");

	let token = harness
		.verifier
		.get_or_create_token("org_meta")
		.await
		.expect("Token creation should succeed.");
	let record = harness
		.store
		.fetch(&org_id("org_meta"))
		.await
		.expect("Fetching the organization should succeed.")
		.expect("Organization should still exist.");

	assert_eq!(record.metadata.get("plan"), Some(&json!("enterprise")));
	assert_eq!(record.metadata.get("seats"), Some(&json!(42)));
	assert_eq!(record.metadata.get(TOKEN_METADATA_KEY), Some(&json!(token.expose())));
}

#[tokio::test]
async fn reset_rotates_the_token() {
	let harness = Harness::production(&["org_reset"]).await;
	let original = harness
		.verifier
		.get_or_create_token("org_reset")
		.await
		.expect("Token creation should succeed.");
	let rotated =
		harness.verifier.reset_token("org_reset").await.expect("Token reset should succeed.");
	let current = harness
		.verifier
		.get_or_create_token("org_reset")
		.await
		.expect("Token lookup after reset should succeed.");

	assert_ne!(original, rotated);
	assert_eq!(rotated, current);
}

#[tokio::test]
async fn concurrent_first_creation_converges_on_one_token() {
	let harness = Harness::production(&["org_race"]).await;
	let tokens = TokenStore::new(Arc::new(harness.store.clone()));
	let organization = org_id("org_race");
	let mut handles = Vec::new();

	for _ in 0..8 {
		let tokens = tokens.clone();
		let organization = organization.clone();

		handles.push(tokio::spawn(async move { tokens.get_or_create_token(&organization).await }));
	}

	let mut issued = Vec::new();

	for handle in handles {
		issued.push(
			handle
				.await
				.expect("Token task should not panic.")
				.expect("Concurrent token creation should succeed."),
		);
	}

	assert!(issued.windows(2).all(|pair| pair[0] == pair[1]));
}

#[tokio::test]
async fn missing_organization_is_a_store_failure() {
	let harness = Harness::production(&[]).await;
	let err = harness
		.verifier
		.get_or_create_token("org_ghost")
		.await
		.expect_err("Unknown organizations must not get a token.");

	assert!(matches!(err, Error::StoreUnavailable(StoreError::MissingOrganization { .. })));
}

#[tokio::test]
async fn txt_instructions_point_at_the_zone_root() {
	let harness = Harness::production(&["org_txt"]).await;
	let instructions =
		harness.verifier.txt_instructions("org_txt").await.expect("Instructions should build.");
	let token = harness
		.verifier
		.get_or_create_token("org_txt")
		.await
		.expect("Token lookup should succeed.");

	assert_eq!(instructions.record_type, "TXT");
	assert_eq!(instructions.name, "@");
	assert_eq!(instructions.value, format!("domain-verification={}", token.expose()));
}
