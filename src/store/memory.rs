//! Thread-safe in-memory [`OrganizationStore`] for local development and tests.

// self
use crate::{
	_prelude::*,
	org::{OrganizationId, OrganizationRecord},
	store::{OrganizationStore, StoreError, StoreFuture},
};

type StoreMap = Arc<RwLock<HashMap<OrganizationId, OrganizationRecord>>>;

/// Storage backend that keeps organization records in-process.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);
impl MemoryStore {
	/// Number of stored organizations.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns true when no organizations are stored.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}

	fn save_now(map: StoreMap, record: OrganizationRecord) {
		map.write().insert(record.id.clone(), record);
	}

	fn fetch_now(map: StoreMap, organization: OrganizationId) -> Option<OrganizationRecord> {
		map.read().get(&organization).cloned()
	}

	fn merge_now(
		map: StoreMap,
		organization: OrganizationId,
		patch: JsonMap<String, JsonValue>,
	) -> Result<OrganizationRecord, StoreError> {
		let mut guard = map.write();
		let record =
			guard.get_mut(&organization).ok_or_else(|| StoreError::missing(&organization))?;

		record.merge_metadata(patch);

		Ok(record.clone())
	}
}
impl OrganizationStore for MemoryStore {
	fn save(&self, record: OrganizationRecord) -> StoreFuture<'_, ()> {
		let map = self.0.clone();

		Box::pin(async move {
			Self::save_now(map, record);

			Ok(())
		})
	}

	fn fetch<'a>(
		&'a self,
		organization: &'a OrganizationId,
	) -> StoreFuture<'a, Option<OrganizationRecord>> {
		let map = self.0.clone();
		let organization = organization.to_owned();

		Box::pin(async move { Ok(Self::fetch_now(map, organization)) })
	}

	fn merge_metadata<'a>(
		&'a self,
		organization: &'a OrganizationId,
		patch: JsonMap<String, JsonValue>,
	) -> StoreFuture<'a, OrganizationRecord> {
		let map = self.0.clone();
		let organization = organization.to_owned();

		Box::pin(async move { Self::merge_now(map, organization, patch) })
	}
}
