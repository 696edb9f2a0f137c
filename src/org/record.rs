//! Organization records and the metadata slot that carries the verification token.

// self
use crate::{
	_prelude::*,
	org::{OrganizationId, VerificationToken},
};

/// Metadata key under which the verification token is stored.
pub const TOKEN_METADATA_KEY: &str = "domain_verification_token";

/// The token slot holds a value that cannot be used as a verification token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ThisError)]
#[error("Stored verification token is malformed.")]
pub struct MalformedToken;

/// Organization record as held by the identity provider or local store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrganizationRecord {
	/// Organization identifier.
	pub id: OrganizationId,
	/// Optional display name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Free-form metadata shared with other features of the application.
	#[serde(default)]
	pub metadata: JsonMap<String, JsonValue>,
}
impl OrganizationRecord {
	/// Creates a record without metadata.
	pub fn new(id: OrganizationId) -> Self {
		Self { id, name: None, metadata: JsonMap::new() }
	}

	/// Sets the display name.
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());

		self
	}

	/// Inserts a single metadata entry.
	pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
		self.metadata.insert(key.into(), value.into());

		self
	}

	/// Reads the stored verification token; `Ok(None)` means no token was ever created.
	pub fn verification_token(&self) -> Result<Option<VerificationToken>, MalformedToken> {
		match self.metadata.get(TOKEN_METADATA_KEY) {
			None | Some(JsonValue::Null) => Ok(None),
			Some(JsonValue::String(value)) =>
				VerificationToken::from_stored(value.as_str()).map(Some).ok_or(MalformedToken),
			Some(_) => Err(MalformedToken),
		}
	}

	/// Shallow-merges `patch` into the metadata, leaving keys absent from the patch untouched.
	pub fn merge_metadata(&mut self, patch: JsonMap<String, JsonValue>) {
		for (key, value) in patch {
			self.metadata.insert(key, value);
		}
	}
}

/// Builds the metadata patch that stores `token`.
pub fn token_patch(token: &VerificationToken) -> JsonMap<String, JsonValue> {
	let mut patch = JsonMap::new();

	patch.insert(TOKEN_METADATA_KEY.into(), JsonValue::String(token.expose().into()));

	patch
}
