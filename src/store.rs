//! Organization-record storage contracts and built-in backends.
//!
//! The identity provider owns organization records in production; these backends model the
//! read/partial-update capability the token store relies on.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::{
	_prelude::*,
	org::{OrganizationId, OrganizationRecord},
};

/// Boxed future returned by [`OrganizationStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Read/merge access to organization records keyed by organization identifier.
pub trait OrganizationStore
where
	Self: Send + Sync,
{
	/// Persists or replaces a full organization record.
	fn save(&self, record: OrganizationRecord) -> StoreFuture<'_, ()>;

	/// Fetches the record for the organization, if present.
	fn fetch<'a>(
		&'a self,
		organization: &'a OrganizationId,
	) -> StoreFuture<'a, Option<OrganizationRecord>>;

	/// Shallow-merges `patch` into the organization's metadata and returns the updated record.
	///
	/// Keys absent from `patch` must be left untouched. Fails with
	/// [`StoreError::MissingOrganization`] when no record exists.
	fn merge_metadata<'a>(
		&'a self,
		organization: &'a OrganizationId,
		patch: JsonMap<String, JsonValue>,
	) -> StoreFuture<'a, OrganizationRecord>;
}

/// Error type produced by [`OrganizationStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
	/// No record exists for the organization.
	#[error("Organization {organization} does not exist.")]
	MissingOrganization {
		/// Organization identifier that was looked up.
		organization: String,
	},
	/// The organization's token slot holds an unusable value.
	#[error("Organization {organization} carries a malformed verification token.")]
	MalformedToken {
		/// Organization identifier whose metadata is malformed.
		organization: String,
	},
}
impl StoreError {
	pub(crate) fn missing(organization: &OrganizationId) -> Self {
		Self::MissingOrganization { organization: organization.to_string() }
	}
}
