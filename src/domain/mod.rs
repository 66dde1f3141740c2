//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod attendance;
pub mod identity;
pub mod password;
pub mod registration;

pub use attendance::{
    AttendanceMark, AttendanceStats, ClassSession, QrToken, RosterEntry, SessionStatus, Standing,
    SubjectAttendance,
};
pub use identity::{Identity, ProfileDocument, Role};
pub use password::Password;
pub use registration::RegistrationRequest;
