//! In-memory zone that answers TXT lookups without touching the network.

// self
use crate::{
	_prelude::*,
	dns::{ResolutionError, TxtFuture, TxtRecord, TxtResolver},
	org::DomainName,
};

#[derive(Clone, Debug)]
enum ZoneEntry {
	Records(Vec<TxtRecord>),
	Failure(String),
}

/// Resolver backed by a mutable in-memory zone, for tests and local development.
///
/// Domains without records answer [`ResolutionError::NotFound`], mirroring NXDOMAIN.
#[derive(Clone, Debug, Default)]
pub struct StaticTxtResolver(Arc<RwLock<HashMap<DomainName, ZoneEntry>>>);
impl StaticTxtResolver {
	/// Appends a record to the domain's record set.
	pub fn publish(&self, domain: &DomainName, record: TxtRecord) {
		let mut zone = self.0.write();
		let entry = zone.entry(domain.clone()).or_insert_with(|| ZoneEntry::Records(Vec::new()));

		match entry {
			ZoneEntry::Records(records) => records.push(record),
			ZoneEntry::Failure(_) => *entry = ZoneEntry::Records(vec![record]),
		}
	}

	/// Replaces the domain's record set.
	pub fn replace(&self, domain: &DomainName, records: Vec<TxtRecord>) {
		self.0.write().insert(domain.clone(), ZoneEntry::Records(records));
	}

	/// Removes every record for the domain.
	pub fn remove(&self, domain: &DomainName) {
		self.0.write().remove(domain);
	}

	/// Makes lookups for the domain fail with [`ResolutionError::Failed`].
	pub fn fail(&self, domain: &DomainName, message: impl Into<String>) {
		self.0.write().insert(domain.clone(), ZoneEntry::Failure(message.into()));
	}

	fn lookup_now(&self, domain: &DomainName) -> Result<Vec<TxtRecord>, ResolutionError> {
		match self.0.read().get(domain) {
			Some(ZoneEntry::Records(records)) if !records.is_empty() => Ok(records.clone()),
			Some(ZoneEntry::Failure(message)) => Err(ResolutionError::Failed {
				domain: domain.to_string(),
				message: message.clone(),
			}),
			_ => Err(ResolutionError::NotFound { domain: domain.to_string() }),
		}
	}
}
impl TxtResolver for StaticTxtResolver {
	fn resolve_txt<'a>(&'a self, domain: &'a DomainName) -> TxtFuture<'a> {
		Box::pin(async move { self.lookup_now(domain) })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn domain() -> DomainName {
		DomainName::new("customer.com").expect("Domain fixture should be valid.")
	}

	#[tokio::test]
	async fn zone_mutations_are_visible_to_lookups() {
		let resolver = StaticTxtResolver::default();
		let domain = domain();

		assert_eq!(
			resolver.resolve_txt(&domain).await,
			Err(ResolutionError::NotFound { domain: "customer.com".into() })
		);

		resolver.publish(&domain, TxtRecord::single("v=spf1 -all"));
		resolver.publish(&domain, TxtRecord::single("domain-verification=T"));

		let records =
			resolver.resolve_txt(&domain).await.expect("Published records should resolve.");

		assert_eq!(records.len(), 2);

		resolver.fail(&domain, "SERVFAIL");

		assert!(matches!(
			resolver.resolve_txt(&domain).await,
			Err(ResolutionError::Failed { message, .. }) if message == "SERVFAIL"
		));

		resolver.replace(&domain, Vec::new());

		assert!(matches!(
			resolver.resolve_txt(&domain).await,
			Err(ResolutionError::NotFound { .. })
		));
	}
}
