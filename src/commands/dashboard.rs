//! Dashboard command - Prints the dashboard for the signed-in role.

use crate::cli::DashboardArgs;
use crate::config::Config;
use crate::domain::{AttendanceStats, ClassSession, Identity, RosterEntry, Role};
use crate::errors::{AppError, AppResult};
use crate::services::{ServiceContainer, Services};

/// Execute the dashboard command
pub async fn execute(args: DashboardArgs, config: Config) -> AppResult<()> {
    let services = Services::from_config(&config)?;
    let store = services.session();
    let session = super::settled_session(&store).await;
    let identity = session.identity.ok_or(AppError::Unauthorized)?;
    let dashboards = services.dashboards();

    match identity.role {
        Role::Student => {
            if args.live.is_some() || args.issue_qr.is_some() {
                return Err(AppError::validation(
                    "Live rosters and QR issuance are faculty features",
                ));
            }
            print_student(&identity, &dashboards.student_overview());
        }
        Role::Faculty | Role::Admin => {
            print_sessions(&identity, &dashboards.today_sessions());
            if let Some(class_id) = &args.live {
                print_roster(class_id, &dashboards.live_attendance(class_id)?);
            }
            if let Some(class_id) = &args.issue_qr {
                let token = dashboards.issue_qr_token(class_id)?;
                println!();
                println!(
                    "QR token for class {}: {} (valid until {})",
                    token.class_id,
                    token.token,
                    token.expires_at.format("%H:%M:%S UTC")
                );
            }
        }
    }

    services.shutdown();
    Ok(())
}

fn print_student(identity: &Identity, stats: &AttendanceStats) {
    println!("Attendance overview for {}", identity.name);
    println!(
        "  overall {}%  ({} present, {} absent, {} late)",
        stats.overall, stats.present, stats.absent, stats.late
    );
    println!();
    for subject in &stats.subjects {
        println!(
            "  {:<24} {:>3}%  {:>2}/{:<2}  {:?}",
            subject.name, subject.percentage, subject.present, subject.total, subject.standing
        );
    }
}

fn print_sessions(identity: &Identity, sessions: &[ClassSession]) {
    println!("Today's classes for {}", identity.name);
    for session in sessions {
        println!(
            "  [{}] {:<24} {}  {:>2}/{:<2} present  qr:{}  {:?}",
            session.id,
            session.subject,
            session.time,
            session.students_present,
            session.total_students,
            if session.qr_issued { "yes" } else { "no" },
            session.status
        );
    }
}

fn print_roster(class_id: &str, roster: &[RosterEntry]) {
    println!();
    println!("Live attendance for class {}", class_id);
    for entry in roster {
        println!(
            "  {:<16} {:<10} {:?}{}{}",
            entry.name,
            entry.student_id,
            entry.mark,
            entry
                .timestamp
                .as_deref()
                .map(|t| format!("  at {}", t))
                .unwrap_or_default(),
            if entry.face_verified {
                "  face-verified"
            } else {
                ""
            }
        );
    }
}
