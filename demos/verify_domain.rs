//! Demonstrates issuing a verification token and checking a domain against live DNS.
//!
//! Usage: `cargo run --example verify_domain -- <domain> [development]`. In development mode the
//! placeholder domain `example.com` verifies without a lookup.

// std
use std::{env, sync::Arc};
// crates.io
use color_eyre::Result;
// self
use domain_ownership::{
	config::{ExecutionMode, VerifierConfig},
	org::{OrganizationId, OrganizationRecord},
	store::{MemoryStore, OrganizationStore},
	verify::{DomainVerificationRequest, Verifier},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let mut args = env::args().skip(1);
	let domain = args.next().unwrap_or_else(|| "example.com".into());
	let mode = args.next().map(|mode| mode.parse::<ExecutionMode>()).transpose()?;
	let config = match mode.unwrap_or_default() {
		ExecutionMode::Production => VerifierConfig::production(),
		ExecutionMode::Development => VerifierConfig::development(),
	};
	let store = Arc::new(MemoryStore::default());

	store.save(OrganizationRecord::new(OrganizationId::new("org_demo")?).with_name("Demo")).await?;

	let verifier = Verifier::with_system_resolver(store, config)?;
	let instructions = verifier.txt_instructions("org_demo").await?;

	println!(
		"Publish a {} record at {} ({domain}) with value {}.",
		instructions.record_type, instructions.name, instructions.value
	);

	let request = DomainVerificationRequest::new(&domain, "org_demo")?;
	let result = verifier.check(&request).await?;

	println!("Domain {domain}: {} ({:?}).", result.outcome.as_str(), result.outcome);

	Ok(())
}
