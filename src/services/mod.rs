//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

pub mod container;
mod dashboard;
mod session;
mod verification;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use dashboard::{DashboardService, DemoRecords};
pub use session::{Session, SessionService, SessionState, SessionStore};
pub use verification::{EnrollmentOutcome, VerificationOutcome, VerificationService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
#[cfg(any(test, feature = "test-utils"))]
pub use dashboard::MockDashboardService;
#[cfg(any(test, feature = "test-utils"))]
pub use session::MockSessionStore;
#[cfg(any(test, feature = "test-utils"))]
pub use verification::MockVerificationService;
