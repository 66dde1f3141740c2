//! classtrack - Role-aware session and attendance shell.
//!
//! The core of a classroom attendance product: an observable session
//! store over a swappable identity backend, a best-effort face
//! verification client, and the demo data behind the role dashboards.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and logic
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (identity backend, verification
//!   endpoint, session cache)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Sign in against the demo backend
//! cargo run -- login --email student1@example.com --password correctpass
//!
//! # Show the role dashboard
//! cargo run -- dashboard
//!
//! # Run a face match
//! cargo run -- verify --image face.png
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use config::Config;
pub use domain::{Identity, ProfileDocument, RegistrationRequest, Role};
pub use errors::{AppError, AppResult};
pub use services::{Session, SessionService, SessionState, SessionStore};
