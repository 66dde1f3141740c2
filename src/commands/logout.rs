//! Logout command - Returns the session to anonymous.

use crate::config::Config;
use crate::errors::AppResult;
use crate::services::{ServiceContainer, Services};

/// Execute the logout command.
///
/// The local session always ends; a backend sign-out failure is reported
/// but never turns the command into an error.
pub async fn execute(config: Config) -> AppResult<()> {
    let services = Services::from_config(&config)?;

    match services.session().logout().await {
        Ok(()) => println!("Signed out."),
        Err(e) => println!(
            "Signed out locally; backend sign-out failed: {}",
            e.user_message()
        ),
    }

    services.shutdown();
    Ok(())
}
