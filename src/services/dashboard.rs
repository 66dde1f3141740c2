//! Dashboard data provider.
//!
//! Serves the records the role dashboards display. Every value here is
//! demo data: fixed rosters, fixed percentages, and generated QR tokens.
//! Nothing is backed by real scheduling or tracking, and the provider is
//! named accordingly so no caller mistakes it for live data.

use chrono::{Duration, NaiveDate, Utc};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::config::QR_TOKEN_VALID_MINUTES;
use crate::domain::{
    AttendanceMark, AttendanceStats, ClassSession, QrToken, RosterEntry, SessionStatus, Standing,
    SubjectAttendance,
};
use crate::errors::{AppError, AppResult};

/// Dashboard service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
pub trait DashboardService: Send + Sync {
    /// Student dashboard overview numbers
    fn student_overview(&self) -> AttendanceStats;

    /// Today's class sessions for the faculty dashboard
    fn today_sessions(&self) -> Vec<ClassSession>;

    /// Live attendance roster of one class session
    fn live_attendance(&self, class_id: &str) -> AppResult<Vec<RosterEntry>>;

    /// Issue a QR attendance token for a class and mark it issued
    fn issue_qr_token(&self, class_id: &str) -> AppResult<QrToken>;
}

/// Demo implementation of [`DashboardService`].
pub struct DemoRecords {
    sessions: RwLock<Vec<ClassSession>>,
}

impl Default for DemoRecords {
    fn default() -> Self {
        Self::new()
    }
}

fn subject(name: &str, percentage: u8, present: u32, total: u32) -> SubjectAttendance {
    SubjectAttendance {
        name: name.to_string(),
        percentage,
        present,
        total,
        standing: Standing::for_percentage(percentage),
    }
}

fn roster_entry(
    name: &str,
    student_id: &str,
    mark: AttendanceMark,
    timestamp: Option<&str>,
    face_verified: bool,
    location: Option<&str>,
) -> RosterEntry {
    RosterEntry {
        name: name.to_string(),
        student_id: student_id.to_string(),
        mark,
        timestamp: timestamp.map(str::to_string),
        face_verified,
        location: location.map(str::to_string),
    }
}

impl DemoRecords {
    pub fn new() -> Self {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid demo date");
        let sessions = vec![
            ClassSession {
                id: "1".to_string(),
                subject: "Data Structures".to_string(),
                date,
                time: "09:00 AM".to_string(),
                students_present: 28,
                total_students: 32,
                qr_issued: true,
                status: SessionStatus::Completed,
            },
            ClassSession {
                id: "2".to_string(),
                subject: "Database Systems".to_string(),
                date,
                time: "11:00 AM".to_string(),
                students_present: 15,
                total_students: 30,
                qr_issued: true,
                status: SessionStatus::Active,
            },
            ClassSession {
                id: "3".to_string(),
                subject: "Software Engineering".to_string(),
                date,
                time: "02:00 PM".to_string(),
                students_present: 0,
                total_students: 25,
                qr_issued: false,
                status: SessionStatus::Upcoming,
            },
        ];

        Self {
            sessions: RwLock::new(sessions),
        }
    }
}

impl DashboardService for DemoRecords {
    fn student_overview(&self) -> AttendanceStats {
        AttendanceStats {
            overall: 85,
            present: 68,
            absent: 8,
            late: 4,
            subjects: vec![
                subject("Data Structures", 92, 23, 25),
                subject("Database Systems", 88, 22, 25),
                subject("Software Engineering", 76, 19, 25),
                subject("Computer Networks", 68, 17, 25),
            ],
        }
    }

    fn today_sessions(&self) -> Vec<ClassSession> {
        self.sessions.read().clone()
    }

    fn live_attendance(&self, class_id: &str) -> AppResult<Vec<RosterEntry>> {
        if !self.sessions.read().iter().any(|s| s.id == class_id) {
            return Err(AppError::NotFound);
        }

        Ok(vec![
            roster_entry(
                "Alice Johnson",
                "CS2024001",
                AttendanceMark::Present,
                Some("11:05 AM"),
                true,
                Some("Room 203"),
            ),
            roster_entry(
                "Bob Smith",
                "CS2024002",
                AttendanceMark::Present,
                Some("11:03 AM"),
                true,
                Some("Room 203"),
            ),
            roster_entry(
                "Carol Davis",
                "CS2024003",
                AttendanceMark::Late,
                Some("11:12 AM"),
                true,
                Some("Room 203"),
            ),
            roster_entry(
                "David Wilson",
                "CS2024004",
                AttendanceMark::Absent,
                None,
                false,
                None,
            ),
        ])
    }

    fn issue_qr_token(&self, class_id: &str) -> AppResult<QrToken> {
        let mut sessions = self.sessions.write();
        let session = sessions
            .iter_mut()
            .find(|s| s.id == class_id)
            .ok_or(AppError::NotFound)?;
        session.qr_issued = true;

        let issued_at = Utc::now();
        Ok(QrToken {
            token: format!("QR-{}-{}", class_id, Uuid::new_v4().simple()),
            class_id: class_id.to_string(),
            issued_at,
            expires_at: issued_at + Duration::minutes(QR_TOKEN_VALID_MINUTES),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overview_standings_follow_percentages() {
        let stats = DemoRecords::new().student_overview();
        assert_eq!(stats.overall, 85);
        assert_eq!(stats.subjects.len(), 4);
        assert_eq!(stats.subjects[0].standing, Standing::Good);
        assert_eq!(stats.subjects[2].standing, Standing::Warning);
        assert_eq!(stats.subjects[3].standing, Standing::Danger);
    }

    #[test]
    fn test_issue_qr_token_marks_session() {
        let records = DemoRecords::new();
        assert!(!records.today_sessions()[2].qr_issued);

        let token = records.issue_qr_token("3").unwrap();
        assert!(token.token.starts_with("QR-3-"));
        assert!(token.expires_at > token.issued_at);
        assert!(records.today_sessions()[2].qr_issued);
    }

    #[test]
    fn test_tokens_are_unique() {
        let records = DemoRecords::new();
        let a = records.issue_qr_token("2").unwrap();
        let b = records.issue_qr_token("2").unwrap();
        assert_ne!(a.token, b.token);
    }

    #[test]
    fn test_unknown_class_is_not_found() {
        let records = DemoRecords::new();
        assert!(matches!(
            records.live_attendance("99"),
            Err(AppError::NotFound)
        ));
        assert!(matches!(records.issue_qr_token("99"), Err(AppError::NotFound)));
    }
}
