//! Strongly typed identifiers enforced across the verification domain.

// std
use std::{borrow::Borrow, ops::Deref};
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $doc:literal, $kind:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Creates a new identifier after validation.
			pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
				let view = value.as_ref();

				validate_view($kind, view, IDENTIFIER_MAX_LEN)?;

				Ok(Self(view.to_owned()))
			}
		}
		impl Deref for $name {
			type Target = str;

			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				validate_view($kind, &value, IDENTIFIER_MAX_LEN)?;

				Ok(Self(value))
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, concat!($kind, "({})"), self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
		impl FromStr for $name {
			type Err = IdentifierError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Self::new(s)
			}
		}
	};
}

const IDENTIFIER_MAX_LEN: usize = 128;

/// Error returned when identifier or domain validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier (organization, connection, domain).
		kind: &'static str,
	},
	/// The identifier contains whitespace characters.
	#[error("{kind} identifier contains whitespace.")]
	ContainsWhitespace {
		/// Kind of identifier (organization, connection, domain).
		kind: &'static str,
	},
	/// The identifier exceeded the allowed character count.
	#[error("{kind} identifier exceeds {max} characters.")]
	TooLong {
		/// Kind of identifier (organization, connection, domain).
		kind: &'static str,
		/// Maximum permitted character count.
		max: usize,
	},
}

def_id! { OrganizationId, "Identifier of the organization that owns a verification token.", "Organization" }
def_id! { ConnectionId, "Identifier of an SSO connection that domains are bound to.", "Connection" }

pub(crate) fn validate_view(
	kind: &'static str,
	view: &str,
	max: usize,
) -> Result<(), IdentifierError> {
	if view.is_empty() {
		return Err(IdentifierError::Empty { kind });
	}
	if view.chars().any(char::is_whitespace) {
		return Err(IdentifierError::ContainsWhitespace { kind });
	}
	if view.len() > max {
		return Err(IdentifierError::TooLong { kind, max });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn identifiers_reject_whitespace_and_empty_values() {
		assert!(OrganizationId::new(" org_123").is_err(), "Leading whitespace must be rejected.");
		assert!(OrganizationId::new("org_123 ").is_err(), "Trailing whitespace must be rejected.");

		let organization =
			OrganizationId::new("org_123").expect("Organization fixture should be valid.");

		assert_eq!(organization.as_ref(), "org_123");
		assert_eq!(
			ConnectionId::new("").expect_err("Empty connection identifiers must be rejected."),
			IdentifierError::Empty { kind: "Connection" }
		);
	}

	#[test]
	fn serde_round_trip_enforces_validation() {
		let organization: OrganizationId = serde_json::from_str("\"org_42\"")
			.expect("Organization should deserialize successfully.");

		assert_eq!(organization.as_ref(), "org_42");
		assert!(serde_json::from_str::<OrganizationId>("\"with space\"").is_err());
		assert_eq!(
			serde_json::to_string(&organization).expect("Organization should serialize."),
			"\"org_42\""
		);
	}

	#[test]
	fn length_limit_is_inclusive() {
		OrganizationId::new("a".repeat(IDENTIFIER_MAX_LEN)).expect("Exact length should succeed.");

		assert!(matches!(
			OrganizationId::new("a".repeat(IDENTIFIER_MAX_LEN + 1)),
			Err(IdentifierError::TooLong { max: IDENTIFIER_MAX_LEN, .. })
		));
	}

	#[test]
	fn borrow_supports_fast_lookup() {
		let map: HashMap<OrganizationId, u8> = HashMap::from_iter([(
			OrganizationId::new("org_lookup").expect("Lookup organization should be valid."),
			7_u8,
		)]);

		assert_eq!(map.get("org_lookup"), Some(&7));
	}
}
