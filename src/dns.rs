//! TXT lookups behind a resolver-agnostic contract.
//!
//! [`TxtResolver`] is the verifier's only dependency on a DNS stack. The `hickory` feature
//! (enabled by default) provides [`HickoryTxtResolver`], which uses the system resolver
//! configuration, while [`StaticTxtResolver`] serves an in-memory zone for tests and local
//! development.

mod fixed;
#[cfg(feature = "hickory")] mod hickory;
mod record;

pub use fixed::*;
#[cfg(feature = "hickory")] pub use hickory::*;
pub use record::*;

// self
use crate::{_prelude::*, org::DomainName};

/// Boxed future returned by [`TxtResolver::resolve_txt`].
pub type TxtFuture<'a> =
	Pin<Box<dyn Future<Output = Result<Vec<TxtRecord>, ResolutionError>> + 'a + Send>>;

/// Looks up the TXT records published at a domain.
pub trait TxtResolver
where
	Self: Send + Sync,
{
	/// Resolves every TXT record at `domain`, keeping the character-string segments of each
	/// record in wire order.
	///
	/// Implementations do not validate DNS syntax; malformed names surface as lookup failures.
	fn resolve_txt<'a>(&'a self, domain: &'a DomainName) -> TxtFuture<'a>;
}

/// DNS lookup failures. The verifier treats all of them as "not verified".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ResolutionError {
	/// The name does not exist or carries no TXT records.
	#[error("No TXT records were found for {domain}.")]
	NotFound {
		/// Queried domain.
		domain: String,
	},
	/// The query itself failed (network, server failure, refused).
	#[error("TXT lookup for {domain} failed: {message}.")]
	Failed {
		/// Queried domain.
		domain: String,
		/// Resolver-supplied reason.
		message: String,
	},
	/// The query did not complete within the configured bound.
	#[error("TXT lookup for {domain} timed out after {timeout_ms} ms.")]
	TimedOut {
		/// Queried domain.
		domain: String,
		/// Timeout that elapsed, in milliseconds.
		timeout_ms: u64,
	},
}
impl ResolutionError {
	/// Stable label suitable for span or metric fields.
	pub const fn as_str(&self) -> &'static str {
		match self {
			Self::NotFound { .. } => "not_found",
			Self::Failed { .. } => "failed",
			Self::TimedOut { .. } => "timed_out",
		}
	}
}
