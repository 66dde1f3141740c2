//! Registration request value and its validation rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::{ProfileDocument, Role};
use crate::errors::{AppError, AppResult};

/// Input to account registration. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegistrationRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faculty_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl RegistrationRequest {
    /// Run validation and map the outcome onto the application error type.
    pub fn validated(self) -> AppResult<Self> {
        self.validate()
            .map_err(|e| AppError::validation(format_validation_errors(&e)))?;
        self.check_role_identifiers()?;
        Ok(self)
    }

    /// An identifier belonging to a different role is a caller mistake
    /// and fails loudly instead of being silently dropped.
    fn check_role_identifiers(&self) -> AppResult<()> {
        let mismatch = match self.role {
            Role::Student => self.faculty_id.is_some(),
            Role::Faculty => self.student_id.is_some(),
            Role::Admin => self.student_id.is_some() || self.faculty_id.is_some(),
        };

        if mismatch {
            return Err(AppError::validation(format!(
                "A {} registration cannot carry an identifier for another role",
                self.role
            )));
        }
        Ok(())
    }

    /// Build the per-user document this registration creates, stamped with
    /// the given creation and last-login time.
    pub fn document(&self, now: DateTime<Utc>) -> ProfileDocument {
        ProfileDocument {
            name: self.name.clone(),
            role: self.role,
            department: self.department.clone(),
            student_id: self.student_id.clone(),
            faculty_id: self.faculty_id.clone(),
            phone: self.phone.clone(),
            profile_image: self.profile_image.clone(),
            created_at: Some(now),
            last_login: Some(now),
        }
    }
}

/// Format validation errors into a user-friendly string
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RegistrationRequest {
        RegistrationRequest {
            email: "student1@example.com".to_string(),
            password: "correctpass".to_string(),
            name: "Alice Johnson".to_string(),
            role: Role::Student,
            department: Some("Computer Science".to_string()),
            student_id: Some("CS2024001".to_string()),
            faculty_id: None,
            phone: None,
            profile_image: None,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(request().validated().is_ok());
    }

    #[test]
    fn test_malformed_email_rejected() {
        let mut req = request();
        req.email = "not-an-email".to_string();
        let err = req.validated().unwrap_err();
        assert!(err.user_message().contains("Invalid email"));
    }

    #[test]
    fn test_short_password_rejected() {
        let mut req = request();
        req.password = "short".to_string();
        assert!(req.validated().is_err());
    }

    #[test]
    fn test_off_role_identifier_rejected() {
        let mut req = request();
        req.faculty_id = Some("FAC001".to_string());
        let err = req.validated().unwrap_err();
        assert!(err.user_message().contains("another role"));
    }

    #[test]
    fn test_document_round_trips_optional_fields() {
        let now = Utc::now();
        let doc = request().document(now);

        assert_eq!(doc.student_id.as_deref(), Some("CS2024001"));
        assert_eq!(doc.phone, None);
        assert_eq!(doc.created_at, Some(now));
    }
}
