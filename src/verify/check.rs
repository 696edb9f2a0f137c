//! The verification check: bypass gate, token read, bounded TXT lookup, exact comparison.
//!
//! A check never writes. A missing token and every lookup failure (NXDOMAIN, SERVFAIL,
//! timeout) end as an unverified outcome; only store failures surface as errors. No
//! retries happen here; callers re-run the check after DNS propagation.

// self
use crate::{
	_prelude::*,
	dns::{ResolutionError, TxtRecord},
	obs::{self, OperationKind, OperationOutcome, OperationSpan},
	org::DomainName,
	verify::{
		CheckState, DomainCheck, DomainVerificationRequest, DomainVerificationResult,
		UnverifiedReason, VerificationOutcome, Verifier,
	},
};

impl Verifier {
	/// Returns whether `organization` has proven control of `domain`.
	///
	/// Empty or whitespace-bearing input fails with [`Error::InvalidInput`] before any I/O.
	pub async fn verify(&self, domain: &str, organization: &str) -> Result<bool> {
		let request = DomainVerificationRequest::new(domain, organization)?;

		Ok(self.check(&request).await?.verified())
	}

	/// Runs one check and reports the detailed outcome.
	pub async fn check(
		&self,
		request: &DomainVerificationRequest,
	) -> Result<DomainVerificationResult> {
		const KIND: OperationKind = OperationKind::Verify;

		let span = OperationSpan::new(KIND, "check");

		obs::record_operation_outcome(KIND, OperationOutcome::Attempt);
		self.metrics.record_attempt();

		let result = span
			.instrument(async move {
				let outcome = self.evaluate(request).await?;

				Ok(DomainVerificationResult {
					domain: request.domain.clone(),
					organization: request.organization.clone(),
					outcome,
					checked_at: OffsetDateTime::now_utc(),
				})
			})
			.await;

		match &result {
			Ok(checked) => {
				self.metrics.record_outcome(&checked.outcome);
				obs::record_verification_result(checked.outcome.as_str());
				obs::record_operation_outcome(KIND, OperationOutcome::Success);
			},
			Err(_) => {
				self.metrics.record_error();
				obs::record_operation_outcome(KIND, OperationOutcome::Failure);
			},
		}

		result
	}

	/// Drives a [`DomainCheck`] through one `Checking` cycle and returns the new state.
	///
	/// On error the tracker moves to [`CheckState::Unverified`] so the caller can retry.
	pub async fn run_check(&self, tracker: &mut DomainCheck) -> Result<CheckState> {
		tracker.begin()?;

		match self.check(tracker.request()).await {
			Ok(result) => Ok(tracker.complete(result)?),
			Err(e) => {
				tracker.abort()?;

				Err(e)
			},
		}
	}

	async fn evaluate(&self, request: &DomainVerificationRequest) -> Result<VerificationOutcome> {
		if self.config.bypass_applies(&request.domain) {
			obs::debug_bypass(&request.domain);

			return Ok(VerificationOutcome::Bypassed);
		}

		let Some(token) = self.tokens.get_token(&request.organization).await? else {
			return Ok(VerificationOutcome::Unverified(UnverifiedReason::MissingToken));
		};
		let records = match self.resolve(&request.domain).await {
			Ok(records) => records,
			Err(e) => {
				obs::warn_resolution_failure(&request.domain, &e);

				return Ok(VerificationOutcome::Unverified(UnverifiedReason::ResolutionFailed(e)));
			},
		};
		let expected = self.config.expected_txt_value(&token);

		if records.iter().any(|record| record.matches(&expected)) {
			Ok(VerificationOutcome::Verified)
		} else {
			Ok(VerificationOutcome::Unverified(UnverifiedReason::NoMatchingRecord {
				records_seen: records.len(),
			}))
		}
	}

	async fn resolve(&self, domain: &DomainName) -> Result<Vec<TxtRecord>, ResolutionError> {
		let timeout = self.config.resolution_timeout();
		let lookup = self.resolver.resolve_txt(domain);

		match tokio::time::timeout(timeout, lookup).await {
			Ok(result) => result,
			Err(_) => Err(ResolutionError::TimedOut {
				domain: domain.to_string(),
				timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
			}),
		}
	}
}
