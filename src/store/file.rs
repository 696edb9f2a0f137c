//! File-backed [`OrganizationStore`] for single-node deployments and local tooling.

// std
use std::{
	fs::{self, File},
	io::Write,
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	org::{OrganizationId, OrganizationRecord},
	store::{OrganizationStore, StoreError, StoreFuture},
};

/// Persists organization records to a JSON file after each mutation.
#[derive(Clone, Debug)]
pub struct FileStore {
	path: PathBuf,
	inner: Arc<RwLock<HashMap<OrganizationId, OrganizationRecord>>>,
}
impl FileStore {
	/// Opens (or creates) a store at the provided path, eagerly loading existing data.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
		let path = path.into();

		Self::ensure_parent_exists(&path)?;

		let snapshot = Self::load_snapshot(&path)?;

		Ok(Self { path, inner: Arc::new(RwLock::new(snapshot)) })
	}

	/// Location of the JSON snapshot.
	pub fn path(&self) -> &Path {
		&self.path
	}

	fn load_snapshot(
		path: &Path,
	) -> Result<HashMap<OrganizationId, OrganizationRecord>, StoreError> {
		if !path.exists() {
			return Ok(HashMap::new());
		}

		let bytes = fs::read(path).map_err(|e| StoreError::Backend {
			message: format!("Failed to read {}: {e}", path.display()),
		})?;

		if bytes.is_empty() {
			return Ok(HashMap::new());
		}

		let records: Vec<OrganizationRecord> =
			serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization {
				message: format!("Failed to parse {}: {e}", path.display()),
			})?;

		Ok(records.into_iter().map(|record| (record.id.clone(), record)).collect())
	}

	fn ensure_parent_exists(path: &Path) -> Result<(), StoreError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|e| StoreError::Backend {
				message: format!("Failed to create store directory {}: {e}", parent.display()),
			})?;
		}

		Ok(())
	}

	/// Writes `record` into the map and the snapshot; the map is restored if the write fails.
	fn commit_locked(
		&self,
		contents: &mut HashMap<OrganizationId, OrganizationRecord>,
		record: OrganizationRecord,
	) -> Result<(), StoreError> {
		let id = record.id.clone();
		let previous = contents.insert(id.clone(), record);

		if let Err(e) = self.persist_locked(contents) {
			match previous {
				Some(previous) => contents.insert(id, previous),
				None => contents.remove(&id),
			};

			return Err(e);
		}

		Ok(())
	}

	fn persist_locked(
		&self,
		contents: &HashMap<OrganizationId, OrganizationRecord>,
	) -> Result<(), StoreError> {
		Self::ensure_parent_exists(&self.path)?;

		let mut snapshot: Vec<_> = contents.values().collect();

		snapshot.sort_by(|a, b| a.id.cmp(&b.id));

		let serialized =
			serde_json::to_vec_pretty(&snapshot).map_err(|e| StoreError::Serialization {
				message: format!("Failed to serialize store snapshot: {e}"),
			})?;
		let mut tmp_path = self.path.clone();

		tmp_path.set_extension("tmp");

		{
			let mut file = File::create(&tmp_path).map_err(|e| StoreError::Backend {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(&serialized).map_err(|e| StoreError::Backend {
				message: format!("Failed to write {}: {e}", tmp_path.display()),
			})?;
			file.sync_all().map_err(|e| StoreError::Backend {
				message: format!("Failed to sync {}: {e}", tmp_path.display()),
			})?;
		}

		fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::Backend {
			message: format!("Failed to replace {}: {e}", self.path.display()),
		})
	}
}
impl OrganizationStore for FileStore {
	fn save(&self, record: OrganizationRecord) -> StoreFuture<'_, ()> {
		Box::pin(async move {
			let mut guard = self.inner.write();

			self.commit_locked(&mut guard, record)
		})
	}

	fn fetch<'a>(
		&'a self,
		organization: &'a OrganizationId,
	) -> StoreFuture<'a, Option<OrganizationRecord>> {
		Box::pin(async move { Ok(self.inner.read().get(organization).cloned()) })
	}

	fn merge_metadata<'a>(
		&'a self,
		organization: &'a OrganizationId,
		patch: JsonMap<String, JsonValue>,
	) -> StoreFuture<'a, OrganizationRecord> {
		Box::pin(async move {
			let mut guard = self.inner.write();
			let mut updated = guard
				.get(organization)
				.cloned()
				.ok_or_else(|| StoreError::missing(organization))?;

			updated.merge_metadata(patch);
			self.commit_locked(&mut guard, updated.clone())?;

			Ok(updated)
		})
	}
}
