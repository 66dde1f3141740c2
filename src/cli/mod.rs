//! Command-line interface definitions.

mod args;

pub use args::{
    Cli, Commands, DashboardArgs, EnrollArgs, LoginArgs, RegisterArgs, VerifyArgs,
};
