//! Token store that guarantees each organization carries one verification token.
//!
//! Tokens live in the organization's metadata under
//! [`TOKEN_METADATA_KEY`](crate::org::TOKEN_METADATA_KEY). [`TokenStore::get_or_create_token`]
//! creates one lazily and is also the explicit "ensure" step callers may run when an
//! organization is created; [`TokenStore::get_token`] is a pure read and is what the verifier
//! uses. Concurrent first-time creation inside one process is serialized per organization;
//! across processes the last write wins. A guard entry lives only while a call for that
//! organization is in flight.

// self
use crate::{
	_prelude::*,
	obs::{self, OperationKind, OperationOutcome, OperationSpan},
	org::{self, OrganizationId, OrganizationRecord, TxtInstructions, VerificationToken},
	store::{OrganizationStore, StoreError},
};

type GuardMap = Arc<Mutex<HashMap<OrganizationId, Arc<AsyncMutex<()>>>>>;

/// Reads, creates, and rotates verification tokens on top of an [`OrganizationStore`].
#[derive(Clone)]
pub struct TokenStore {
	store: Arc<dyn OrganizationStore>,
	guards: GuardMap,
}
impl TokenStore {
	/// Wraps the organization store that holds token metadata.
	pub fn new(store: Arc<dyn OrganizationStore>) -> Self {
		Self { store, guards: Default::default() }
	}

	/// Underlying organization store.
	pub fn backend(&self) -> &Arc<dyn OrganizationStore> {
		&self.store
	}

	/// Returns the organization's token without creating one.
	pub async fn get_token(
		&self,
		organization: &OrganizationId,
	) -> Result<Option<VerificationToken>> {
		let record = self.load(organization).await?;

		Self::read_token(&record)
	}

	/// Returns the organization's token, generating and persisting one when absent.
	///
	/// Unrelated metadata keys are preserved. Repeated calls return the same token.
	pub async fn get_or_create_token(
		&self,
		organization: &OrganizationId,
	) -> Result<VerificationToken> {
		const KIND: OperationKind = OperationKind::TokenIssue;

		let span = OperationSpan::new(KIND, "get_or_create_token");

		obs::record_operation_outcome(KIND, OperationOutcome::Attempt);

		let result = span
			.instrument(async move {
				let guard = self.guard(organization);
				let result = {
					let _singleflight = guard.lock().await;

					self.load_or_issue(organization).await
				};

				self.release_guard(organization, guard);

				result
			})
			.await;

		Self::record(KIND, &result);

		result
	}

	/// Replaces the organization's token with a freshly generated one.
	///
	/// Previously published TXT records stop verifying once this returns.
	pub async fn reset_token(&self, organization: &OrganizationId) -> Result<VerificationToken> {
		const KIND: OperationKind = OperationKind::TokenIssue;

		let span = OperationSpan::new(KIND, "reset_token");

		obs::record_operation_outcome(KIND, OperationOutcome::Attempt);

		let result = span
			.instrument(async move {
				let guard = self.guard(organization);
				let result = {
					let _singleflight = guard.lock().await;

					self.persist(organization, VerificationToken::generate(), true).await
				};

				self.release_guard(organization, guard);

				result
			})
			.await;

		Self::record(KIND, &result);

		result
	}

	/// Returns the TXT record the organization has to publish, creating the token if needed.
	pub async fn txt_instructions(
		&self,
		organization: &OrganizationId,
		record_identifier: &str,
	) -> Result<TxtInstructions> {
		let token = self.get_or_create_token(organization).await?;

		Ok(TxtInstructions::new(record_identifier, &token))
	}

	async fn load_or_issue(&self, organization: &OrganizationId) -> Result<VerificationToken> {
		let record = self.load(organization).await?;

		if let Some(token) = Self::read_token(&record)? {
			return Ok(token);
		}

		self.persist(organization, VerificationToken::generate(), false).await
	}

	async fn load(&self, organization: &OrganizationId) -> Result<OrganizationRecord> {
		<dyn OrganizationStore>::fetch(self.store.as_ref(), organization)
			.await?
			.ok_or_else(|| StoreError::missing(organization).into())
	}

	async fn persist(
		&self,
		organization: &OrganizationId,
		token: VerificationToken,
		reset: bool,
	) -> Result<VerificationToken> {
		<dyn OrganizationStore>::merge_metadata(
			self.store.as_ref(),
			organization,
			org::token_patch(&token),
		)
		.await?;
		obs::info_token_issued(organization, &token.fingerprint(), reset);

		Ok(token)
	}

	fn read_token(record: &OrganizationRecord) -> Result<Option<VerificationToken>> {
		record.verification_token().map_err(|_| {
			StoreError::MalformedToken { organization: record.id.to_string() }.into()
		})
	}

	fn guard(&self, organization: &OrganizationId) -> Arc<AsyncMutex<()>> {
		let mut guards = self.guards.lock();

		guards.entry(organization.clone()).or_insert_with(|| Arc::new(AsyncMutex::new(()))).clone()
	}

	/// Drops the caller's handle and prunes the entry once no other caller holds it.
	fn release_guard(&self, organization: &OrganizationId, guard: Arc<AsyncMutex<()>>) {
		drop(guard);

		let mut guards = self.guards.lock();

		if guards.get(organization).is_some_and(|entry| Arc::strong_count(entry) == 1) {
			guards.remove(organization);
		}
	}

	fn record<T>(kind: OperationKind, result: &Result<T>) {
		match result {
			Ok(_) => obs::record_operation_outcome(kind, OperationOutcome::Success),
			Err(_) => obs::record_operation_outcome(kind, OperationOutcome::Failure),
		}
	}
}
impl Debug for TokenStore {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenStore").field("guards", &self.guards.lock().len()).finish()
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::{env, fs, process};
	// self
	use super::*;
	use crate::{
		org::TOKEN_METADATA_KEY,
		store::{FileStore, MemoryStore},
	};

	fn organization() -> OrganizationId {
		OrganizationId::new("org_tokens").expect("Organization fixture should be valid.")
	}

	async fn seeded() -> (TokenStore, MemoryStore) {
		let backend = MemoryStore::default();

		backend
			.save(OrganizationRecord::new(organization()).with_metadata("plan", "enterprise"))
			.await
			.expect("Seeding the organization should succeed.");

		(TokenStore::new(Arc::new(backend.clone())), backend)
	}

	#[tokio::test]
	async fn get_token_never_creates() {
		let (tokens, backend) = seeded().await;

		assert!(tokens.get_token(&organization()).await.expect("Read should succeed.").is_none());

		let record = backend
			.fetch(&organization())
			.await
			.expect("Fetch should succeed.")
			.expect("Organization should exist.");

		assert!(!record.metadata.contains_key(TOKEN_METADATA_KEY));
	}

	#[tokio::test]
	async fn malformed_token_surfaces_as_store_failure() {
		let (tokens, backend) = seeded().await;
		let mut patch = JsonMap::new();

		patch.insert(TOKEN_METADATA_KEY.into(), JsonValue::from(7));
		backend
			.merge_metadata(&organization(), patch)
			.await
			.expect("Corrupting the token slot should succeed.");

		let err = tokens
			.get_or_create_token(&organization())
			.await
			.expect_err("A malformed token must not be silently replaced.");

		assert!(matches!(err, Error::StoreUnavailable(StoreError::MalformedToken { .. })));
	}

	#[tokio::test]
	async fn guards_are_pruned_after_each_call() {
		let (tokens, _) = seeded().await;
		let first =
			tokens.get_or_create_token(&organization()).await.expect("Issue should succeed.");
		let rotated = tokens.reset_token(&organization()).await.expect("Reset should succeed.");

		assert_ne!(first, rotated);
		assert!(tokens.guards.lock().is_empty());

		let missing =
			OrganizationId::new("org_missing").expect("Organization fixture should be valid.");

		tokens.get_or_create_token(&missing).await.expect_err("Unknown organizations must fail.");

		assert!(tokens.guards.lock().is_empty());
	}

	#[tokio::test]
	async fn unpersisted_token_is_never_handed_out() {
		let dir = env::temp_dir().join(format!(
			"domain_ownership_tokens_{}_{}",
			process::id(),
			OffsetDateTime::now_utc().unix_timestamp_nanos(),
		));
		let backend = FileStore::open(dir.join("organizations.json"))
			.expect("Opening the file store should succeed.");

		backend
			.save(OrganizationRecord::new(organization()))
			.await
			.expect("Seeding the organization should succeed.");
		fs::remove_dir_all(&dir).expect("Removing the store directory should succeed.");
		fs::write(&dir, b"blocked").expect("Blocking the store directory should succeed.");

		let tokens = TokenStore::new(Arc::new(backend));

		for _ in 0..2 {
			let err = tokens
				.get_or_create_token(&organization())
				.await
				.expect_err("A token that cannot be written must not be returned.");

			assert!(matches!(err, Error::StoreUnavailable(StoreError::Backend { .. })));
		}

		assert!(tokens.get_token(&organization()).await.expect("Read should succeed.").is_none());

		fs::remove_file(&dir).expect("Removing the blocking file should succeed.");
	}

	#[tokio::test]
	async fn txt_instructions_reuse_the_token() {
		let (tokens, _) = seeded().await;
		let instructions = tokens
			.txt_instructions(&organization(), "domain-verification")
			.await
			.expect("Instructions should be produced.");
		let token = tokens
			.get_token(&organization())
			.await
			.expect("Read should succeed.")
			.expect("Instructions should have created the token.");

		assert_eq!(instructions.value, format!("domain-verification={}", token.expose()));
	}
}
