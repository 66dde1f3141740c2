//! Centralized error handling.
//!
//! Provides a unified error type for the entire application. Credential
//! errors carry stable codes and user-facing messages; infrastructure
//! errors hide their details behind generic messages and a log line.

use thiserror::Error;

/// Application error types
/// SOLID - Open/Closed: Extend via new variants without modifying behavior
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email address is not valid")]
    InvalidEmail,

    #[error("An account with this email already exists")]
    EmailAlreadyRegistered,

    #[error("Password does not meet the minimum requirements")]
    WeakPassword,

    // Session lifecycle
    #[error("Another credential operation is already in progress")]
    SessionBusy,

    // Verification
    #[error("Face verification service is unavailable")]
    VerificationUnavailable,

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    // Validation
    #[error("{0}")]
    Validation(String),

    // External service errors
    #[error("Backend request failed")]
    Backend(String),

    #[error("Session cache error")]
    SessionCache(#[from] std::io::Error),

    // Internal
    #[error("Internal error")]
    Internal(String),
}

impl AppError {
    /// Get error code for telemetry and client display
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::InvalidEmail => "INVALID_EMAIL",
            AppError::EmailAlreadyRegistered => "EMAIL_EXISTS",
            AppError::WeakPassword => "WEAK_PASSWORD",
            AppError::SessionBusy => "SESSION_BUSY",
            AppError::VerificationUnavailable => "VERIFICATION_UNAVAILABLE",
            AppError::NotFound => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Backend(_) => "BACKEND_ERROR",
            AppError::SessionCache(_) => "SESSION_CACHE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            // Show full message for caller errors
            AppError::Validation(msg) => msg.clone(),

            // Hide details for infrastructure errors
            AppError::Backend(msg) => {
                tracing::error!("Backend error: {}", msg);
                "Could not reach the attendance service".to_string()
            }
            AppError::SessionCache(e) => {
                tracing::error!("Session cache error: {:?}", e);
                "Could not access the local session store".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            // Use default message for others
            _ => self.to_string(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Backend(e.to_string())
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        AppError::Backend(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
