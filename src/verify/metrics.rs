//! In-process counters for verification checks.

// std
use std::sync::atomic::{AtomicU64, Ordering};
// self
use crate::verify::{UnverifiedReason, VerificationOutcome};

/// Thread-safe counters for verification checks.
#[derive(Debug, Default)]
pub struct VerificationMetrics {
	attempts: AtomicU64,
	verified: AtomicU64,
	bypassed: AtomicU64,
	unverified: AtomicU64,
	resolution_failures: AtomicU64,
	errors: AtomicU64,
}
impl VerificationMetrics {
	/// Returns the total number of checks started.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of checks that matched a TXT record.
	pub fn verified(&self) -> u64 {
		self.verified.load(Ordering::Relaxed)
	}

	/// Returns the number of checks answered by the development bypass.
	pub fn bypassed(&self) -> u64 {
		self.bypassed.load(Ordering::Relaxed)
	}

	/// Returns the number of checks that ended unverified, for any reason.
	pub fn unverified(&self) -> u64 {
		self.unverified.load(Ordering::Relaxed)
	}

	/// Returns the number of unverified checks caused by a failed or timed-out lookup.
	pub fn resolution_failures(&self) -> u64 {
		self.resolution_failures.load(Ordering::Relaxed)
	}

	/// Returns the number of checks that failed with an error (store failures).
	pub fn errors(&self) -> u64 {
		self.errors.load(Ordering::Relaxed)
	}

	pub(crate) fn record_attempt(&self) {
		self.attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_outcome(&self, outcome: &VerificationOutcome) {
		match outcome {
			VerificationOutcome::Verified => {
				self.verified.fetch_add(1, Ordering::Relaxed);
			},
			VerificationOutcome::Bypassed => {
				self.bypassed.fetch_add(1, Ordering::Relaxed);
			},
			VerificationOutcome::Unverified(reason) => {
				self.unverified.fetch_add(1, Ordering::Relaxed);

				if matches!(reason, UnverifiedReason::ResolutionFailed(_)) {
					self.resolution_failures.fetch_add(1, Ordering::Relaxed);
				}
			},
		}
	}

	pub(crate) fn record_error(&self) {
		self.errors.fetch_add(1, Ordering::Relaxed);
	}
}
