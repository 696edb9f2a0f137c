//! [`TxtResolver`] backed by `hickory-resolver` on the tokio runtime.

// crates.io
use hickory_resolver::{
	ResolveError, TokioResolver, config::ResolverConfig, name_server::TokioConnectionProvider,
	proto::rr::rdata::TXT,
};
// self
use crate::{
	_prelude::*,
	dns::{ResolutionError, TxtFuture, TxtRecord, TxtResolver},
	org::DomainName,
};

/// Resolver that issues real TXT queries.
///
/// Queries use the fully-qualified form of the domain so search-domain expansion from the
/// host configuration never applies.
#[derive(Clone)]
pub struct HickoryTxtResolver(TokioResolver);
impl HickoryTxtResolver {
	/// Builds a resolver from the host's system configuration (`/etc/resolv.conf` on Unix).
	pub fn system() -> Result<Self, ResolveError> {
		Ok(Self(TokioResolver::builder_tokio()?.build()))
	}

	/// Builds a resolver that uses an explicit upstream configuration.
	pub fn with_config(config: ResolverConfig) -> Self {
		Self(TokioResolver::builder_with_config(config, TokioConnectionProvider::default()).build())
	}

	/// Wraps an already configured resolver.
	pub fn with_resolver(resolver: TokioResolver) -> Self {
		Self(resolver)
	}
}
impl Debug for HickoryTxtResolver {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("HickoryTxtResolver(..)")
	}
}
impl TxtResolver for HickoryTxtResolver {
	fn resolve_txt<'a>(&'a self, domain: &'a DomainName) -> TxtFuture<'a> {
		Box::pin(async move {
			match self.0.txt_lookup(domain.to_fqdn()).await {
				Ok(lookup) => Ok(lookup.iter().map(to_record).collect()),
				Err(e) if e.is_no_records_found() =>
					Err(ResolutionError::NotFound { domain: domain.to_string() }),
				Err(e) => Err(ResolutionError::Failed {
					domain: domain.to_string(),
					message: e.to_string(),
				}),
			}
		})
	}
}

fn to_record(txt: &TXT) -> TxtRecord {
	TxtRecord::from_segments(txt.txt_data().iter().map(|segment| segment.to_vec()))
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn multi_segment_answers_are_joined() {
		let txt = TXT::new(vec!["ident".into(), "ifier=tok".into(), "en123".into()]);
		let record = to_record(&txt);

		assert_eq!(record.segments().len(), 3);
		assert!(record.matches("identifier=token123"));
		assert!(!record.matches("ident"));
	}
}
