//! Candidate DNS names supplied by administrators.

// std
use std::ops::Deref;
// self
use crate::{
	_prelude::*,
	org::{IdentifierError, id},
};

const DOMAIN_MAX_LEN: usize = 253;

/// A user-supplied domain name, lowercased and stripped of one trailing root dot.
///
/// Only emptiness, whitespace, and length are checked; anything else is left to the
/// resolver, which simply fails to find a matching record for malformed names.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DomainName(String);
impl DomainName {
	/// Validates and normalizes a domain name.
	pub fn new(value: impl AsRef<str>) -> Result<Self, IdentifierError> {
		let view = value.as_ref();
		let view = view.strip_suffix('.').unwrap_or(view);

		id::validate_view("Domain", view, DOMAIN_MAX_LEN)?;

		Ok(Self(view.to_ascii_lowercase()))
	}

	/// Wraps a compile-time constant that is known to be a valid, lowercase domain.
	pub(crate) fn from_static(value: &'static str) -> Self {
		Self(value.to_owned())
	}

	/// Returns the fully-qualified form (with the trailing root dot) used for DNS queries.
	pub fn to_fqdn(&self) -> String {
		format!("{}.", self.0)
	}
}
impl Deref for DomainName {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for DomainName {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl From<DomainName> for String {
	fn from(value: DomainName) -> Self {
		value.0
	}
}
impl TryFrom<String> for DomainName {
	type Error = IdentifierError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl Debug for DomainName {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Domain({})", self.0)
	}
}
impl Display for DomainName {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl FromStr for DomainName {
	type Err = IdentifierError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}
