// self
use crate::{_prelude::*, dns::ResolutionError, obs::OperationKind, org::DomainName};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedOperation<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedOperation<F> = F;

/// A span builder used by token, verification, and claim operations.
#[derive(Clone, Debug)]
pub struct OperationSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl OperationSpan {
	/// Creates a new span tagged with the provided operation kind + stage.
	pub fn new(kind: OperationKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span =
				tracing::info_span!("domain_ownership.operation", operation = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedOperation<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Logs a TXT lookup failure that is being folded into an unverified result.
pub fn warn_resolution_failure(domain: &DomainName, error: &ResolutionError) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(
			domain = %domain,
			kind = error.as_str(),
			error = %error,
			"TXT lookup failed"
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (domain, error);
	}
}

/// Logs that a development bypass short-circuited DNS for `domain`.
pub fn debug_bypass(domain: &DomainName) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(domain = %domain, "development bypass treated domain as verified");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = domain;
	}
}

/// Logs a newly issued token by fingerprint only.
pub fn info_token_issued(organization: &str, fingerprint: &str, reset: bool) {
	#[cfg(feature = "tracing")]
	{
		tracing::info!(organization, fingerprint, reset, "issued domain verification token");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (organization, fingerprint, reset);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn instrument_wraps_future() {
		let span = OperationSpan::new(OperationKind::Verify, "instrument_wraps_future");
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}

	#[test]
	fn log_helpers_accept_any_failure() {
		let domain = DomainName::new("customer.com").expect("Domain fixture should be valid.");

		warn_resolution_failure(&domain, &ResolutionError::TimedOut {
			domain: domain.to_string(),
			timeout_ms: 5_000,
		});
		debug_bypass(&domain);
		info_token_issued("org_123", "fingerprint", false);
	}
}
