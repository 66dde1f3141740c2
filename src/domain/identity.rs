//! Identity domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{ROLE_ADMIN, ROLE_FACULTY, ROLE_STUDENT, VALID_ROLES};
use crate::errors::AppError;

/// Principal roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Faculty,
    Admin,
}

impl Role {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => ROLE_STUDENT,
            Role::Faculty => ROLE_FACULTY,
            Role::Admin => ROLE_ADMIN,
        }
    }
}

impl std::str::FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_STUDENT => Ok(Role::Student),
            ROLE_FACULTY => Ok(Role::Faculty),
            ROLE_ADMIN => Ok(Role::Admin),
            other => Err(AppError::validation(format!(
                "Unknown role '{}', expected one of: {}",
                other,
                VALID_ROLES.join(", ")
            ))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The per-user document mirrored to and from the identity backend.
///
/// Optional fields that were never supplied stay absent; they are not
/// flattened into empty strings on either side of the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileDocument {
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

/// Authenticated principal record.
///
/// Owned by the session store; presentation code only ever holds clones
/// received through the session watch channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque backend account identifier
    pub id: String,
    pub email: String,
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
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

impl Identity {
    /// Assemble an Identity from a backend account id and its per-user
    /// document.
    ///
    /// A document without a creation timestamp gets one generated here.
    /// At most the role-selected one of {student_id, faculty_id} survives;
    /// an admin keeps neither.
    pub fn from_document(id: String, email: &str, document: ProfileDocument) -> Self {
        let (student_id, faculty_id) = match document.role {
            Role::Student => (document.student_id, None),
            Role::Faculty => (None, document.faculty_id),
            Role::Admin => (None, None),
        };

        Self {
            id,
            email: email.to_string(),
            name: document.name,
            role: document.role,
            department: document.department,
            student_id,
            faculty_id,
            phone: document.phone,
            profile_image: document.profile_image,
            created_at: document.created_at.unwrap_or_else(Utc::now),
            last_login: document.last_login,
        }
    }

    /// The role-selected identifier, if any.
    pub fn role_identifier(&self) -> Option<&str> {
        match self.role {
            Role::Student => self.student_id.as_deref(),
            Role::Faculty => self.faculty_id.as_deref(),
            Role::Admin => None,
        }
    }
}

impl From<&Identity> for ProfileDocument {
    fn from(identity: &Identity) -> Self {
        Self {
            name: identity.name.clone(),
            role: identity.role,
            department: identity.department.clone(),
            student_id: identity.student_id.clone(),
            faculty_id: identity.faculty_id.clone(),
            phone: identity.phone.clone(),
            profile_image: identity.profile_image.clone(),
            created_at: Some(identity.created_at),
            last_login: identity.last_login,
        }
    }
}
