//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// classtrack - Role-aware session and attendance shell
#[derive(Parser, Debug)]
#[command(name = "classtrack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in with an existing account
    Login(LoginArgs),

    /// Create a new account and sign in
    Register(RegisterArgs),

    /// Sign out and return to anonymous
    Logout,

    /// Show the current session state
    Status,

    /// Run a face match against the verification endpoint
    Verify(VerifyArgs),

    /// Enroll a reference face image
    Enroll(EnrollArgs),

    /// Show the dashboard for the signed-in role
    Dashboard(DashboardArgs),
}

/// Arguments for the login command
#[derive(Parser, Debug)]
pub struct LoginArgs {
    /// Account email address
    #[arg(short, long)]
    pub email: String,

    /// Account password
    #[arg(short, long)]
    pub password: String,
}

/// Arguments for the register command
#[derive(Parser, Debug)]
pub struct RegisterArgs {
    /// Account email address
    #[arg(short, long)]
    pub email: String,

    /// Account password (minimum 8 characters)
    #[arg(short, long)]
    pub password: String,

    /// Display name
    #[arg(short, long)]
    pub name: String,

    /// Account role: student, faculty or admin
    #[arg(short, long, default_value = "student")]
    pub role: String,

    /// Department name
    #[arg(long)]
    pub department: Option<String>,

    /// Student identifier (student role only)
    #[arg(long)]
    pub student_id: Option<String>,

    /// Faculty identifier (faculty role only)
    #[arg(long)]
    pub faculty_id: Option<String>,

    /// Contact phone number
    #[arg(long)]
    pub phone: Option<String>,
}

/// Arguments for the verify command
#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Path to the face image to match
    #[arg(short, long)]
    pub image: PathBuf,

    /// Account to match against (defaults to the signed-in identity)
    #[arg(short, long)]
    pub user: Option<String>,
}

/// Arguments for the enroll command
#[derive(Parser, Debug)]
pub struct EnrollArgs {
    /// Path to the reference face image
    #[arg(short, long)]
    pub image: PathBuf,

    /// Account to enroll for (defaults to the signed-in identity)
    #[arg(short, long)]
    pub user: Option<String>,
}

/// Arguments for the dashboard command
#[derive(Parser, Debug)]
pub struct DashboardArgs {
    /// Show the live attendance roster of a class session
    #[arg(long, value_name = "CLASS_ID")]
    pub live: Option<String>,

    /// Issue a QR attendance token for a class session
    #[arg(long, value_name = "CLASS_ID")]
    pub issue_qr: Option<String>,
}
