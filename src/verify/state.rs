//! Caller-side lifecycle of a domain verification: `Idle → Checking → Verified | Unverified`.

// self
use crate::{
	_prelude::*,
	verify::{DomainVerificationRequest, DomainVerificationResult},
};

/// Lifecycle state of a [`DomainCheck`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckState {
	/// Token created, TXT record not yet checked.
	#[default]
	Idle,
	/// A check is in flight.
	Checking,
	/// The last check matched. Advisory: claims re-verify anyway.
	Verified,
	/// The last check did not match or failed; the caller may retry.
	Unverified,
}
impl CheckState {
	/// Returns a stable label suitable for span fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Idle => "idle",
			Self::Checking => "checking",
			Self::Verified => "verified",
			Self::Unverified => "unverified",
		}
	}
}

/// Invalid transitions of a [`DomainCheck`].
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum CheckTransitionError {
	/// `begin` was called while a check was already running.
	#[error("A check for {domain} is already running.")]
	AlreadyChecking {
		/// Domain being tracked.
		domain: String,
	},
	/// `begin` was called after the domain was verified.
	#[error("Domain {domain} is already verified.")]
	AlreadyVerified {
		/// Domain being tracked.
		domain: String,
	},
	/// A check was completed or aborted without being started.
	#[error("No check for {domain} is running.")]
	NotChecking {
		/// Domain being tracked.
		domain: String,
	},
}

/// Tracks repeated verification attempts for one domain and organization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainCheck {
	request: DomainVerificationRequest,
	state: CheckState,
	attempts: u32,
	last_result: Option<DomainVerificationResult>,
}
impl DomainCheck {
	/// Starts tracking `request` in [`CheckState::Idle`].
	pub fn new(request: DomainVerificationRequest) -> Self {
		Self { request, state: CheckState::Idle, attempts: 0, last_result: None }
	}

	/// Request being tracked.
	pub fn request(&self) -> &DomainVerificationRequest {
		&self.request
	}

	/// Current state.
	pub fn state(&self) -> CheckState {
		self.state
	}

	/// Number of checks started so far.
	pub fn attempts(&self) -> u32 {
		self.attempts
	}

	/// Result of the last completed check.
	pub fn last_result(&self) -> Option<&DomainVerificationResult> {
		self.last_result.as_ref()
	}

	/// Moves to [`CheckState::Checking`]; allowed from `Idle` and `Unverified`.
	pub fn begin(&mut self) -> Result<CheckState, CheckTransitionError> {
		match self.state {
			CheckState::Idle | CheckState::Unverified => {
				self.state = CheckState::Checking;
				self.attempts = self.attempts.saturating_add(1);

				Ok(self.state)
			},
			CheckState::Checking =>
				Err(CheckTransitionError::AlreadyChecking { domain: self.domain_label() }),
			CheckState::Verified =>
				Err(CheckTransitionError::AlreadyVerified { domain: self.domain_label() }),
		}
	}

	/// Records a finished check and moves to `Verified` or `Unverified`.
	pub fn complete(
		&mut self,
		result: DomainVerificationResult,
	) -> Result<CheckState, CheckTransitionError> {
		self.ensure_checking()?;

		self.state = if result.verified() { CheckState::Verified } else { CheckState::Unverified };
		self.last_result = Some(result);

		Ok(self.state)
	}

	/// Moves a running check to `Unverified` after a failure.
	pub fn abort(&mut self) -> Result<CheckState, CheckTransitionError> {
		self.ensure_checking()?;

		self.state = CheckState::Unverified;

		Ok(self.state)
	}

	fn ensure_checking(&self) -> Result<(), CheckTransitionError> {
		if self.state == CheckState::Checking {
			Ok(())
		} else {
			Err(CheckTransitionError::NotChecking { domain: self.domain_label() })
		}
	}

	fn domain_label(&self) -> String {
		self.request.domain.to_string()
	}
}
