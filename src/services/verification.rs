//! Verification service seam and its tagged outcome types.
//!
//! A verification call always resolves to a definite value; what varies
//! is whether that value came from the endpoint or from the simulation
//! fallback. The tag keeps the two distinguishable all the way up to
//! callers and tests, instead of collapsing them into one boolean.

use async_trait::async_trait;

use crate::errors::AppResult;

/// Verdict of a face match attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// The endpoint produced this verdict
    Confirmed(bool),
    /// Placeholder verdict drawn locally because the endpoint could not answer
    Simulated(bool),
}

impl VerificationOutcome {
    pub fn is_match(&self) -> bool {
        matches!(
            self,
            VerificationOutcome::Confirmed(true) | VerificationOutcome::Simulated(true)
        )
    }

    pub fn is_simulated(&self) -> bool {
        matches!(self, VerificationOutcome::Simulated(_))
    }
}

/// Result of a face enrollment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollmentOutcome {
    /// The endpoint accepted the enrollment
    Accepted,
    /// The endpoint could not be reached; enrollment was only pretended
    Simulated,
}

/// Verification service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait VerificationService: Send + Sync {
    /// Attempt a face match for the given user
    async fn verify(&self, image: &str, user_id: &str) -> AppResult<VerificationOutcome>;

    /// Enroll a reference image for the given user
    async fn enroll(&self, image: &str, user_id: &str) -> AppResult<EnrollmentOutcome>;
}
