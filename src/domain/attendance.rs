//! Attendance record types shown on the role dashboards.
//!
//! Every value flowing through these types is demo data served by
//! `services::dashboard`; nothing here is produced by real scheduling or
//! tracking.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Traffic-light standing of a subject's attendance percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Standing {
    Good,
    Warning,
    Danger,
}

impl Standing {
    /// Standing thresholds used across the product: 85% and up is good,
    /// below 75% is danger.
    pub fn for_percentage(percentage: u8) -> Self {
        match percentage {
            85.. => Standing::Good,
            75..=84 => Standing::Warning,
            _ => Standing::Danger,
        }
    }
}

/// Per-subject attendance line on the student dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectAttendance {
    pub name: String,
    pub percentage: u8,
    pub present: u32,
    pub total: u32,
    pub standing: Standing,
}

/// Student dashboard overview numbers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceStats {
    pub overall: u8,
    pub present: u32,
    pub absent: u32,
    pub late: u32,
    pub subjects: Vec<SubjectAttendance>,
}

/// Lifecycle of a scheduled class session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Completed,
    Upcoming,
}

/// One scheduled class on the faculty dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSession {
    pub id: String,
    pub subject: String,
    pub date: NaiveDate,
    pub time: String,
    pub students_present: u32,
    pub total_students: u32,
    pub qr_issued: bool,
    pub status: SessionStatus,
}

/// Attendance mark of a single student in a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceMark {
    Present,
    Absent,
    Late,
}

/// Row of the live attendance roster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub student_id: String,
    pub mark: AttendanceMark,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub face_verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Attendance token handed to students as a QR payload.
///
/// Only the token string exists here; rendering it as an image is a
/// presentation concern outside this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrToken {
    pub token: String,
    pub class_id: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standing_thresholds() {
        assert_eq!(Standing::for_percentage(92), Standing::Good);
        assert_eq!(Standing::for_percentage(85), Standing::Good);
        assert_eq!(Standing::for_percentage(76), Standing::Warning);
        assert_eq!(Standing::for_percentage(68), Standing::Danger);
    }
}
