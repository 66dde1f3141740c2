//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Backend
// =============================================================================

/// Default identity backend base URL (for development)
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";

/// Default face verification endpoint base URL (for development)
pub const DEFAULT_VERIFICATION_URL: &str = "http://localhost:9090";

/// Default timeout applied to every outbound request, in seconds.
/// Bounds how long a credential or verification call can keep the
/// session in its loading state.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// Verification fallback
// =============================================================================

/// Success probability of a simulated verification outcome.
///
/// Only consulted when the fallback policy is set to simulate; a real
/// deployment runs with the strict policy and never draws from this.
pub const SIMULATED_SUCCESS_RATE: f64 = 0.8;

// =============================================================================
// User Roles
// =============================================================================

/// Role assigned to enrolled students
pub const ROLE_STUDENT: &str = "student";

/// Role assigned to teaching staff
pub const ROLE_FACULTY: &str = "faculty";

/// Administrator role with elevated privileges
pub const ROLE_ADMIN: &str = "admin";

/// All valid role values
pub const VALID_ROLES: &[&str] = &[ROLE_STUDENT, ROLE_FACULTY, ROLE_ADMIN];

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 8;

// =============================================================================
// Session cache
// =============================================================================

/// Directory under the platform data dir holding local state
pub const DATA_DIR_NAME: &str = "classtrack";

/// File name of the persisted session record
pub const SESSION_CACHE_FILE: &str = "session.json";

// =============================================================================
// Dashboard
// =============================================================================

/// Minutes a QR attendance token stays valid after issuance
pub const QR_TOKEN_VALID_MINUTES: i64 = 5;
