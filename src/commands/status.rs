//! Status command - Shows the current session state.

use crate::config::Config;
use crate::errors::AppResult;
use crate::services::{ServiceContainer, Services, SessionState};

/// Execute the status command
pub async fn execute(config: Config) -> AppResult<()> {
    let services = Services::from_config(&config)?;
    let store = services.session();
    let session = super::settled_session(&store).await;

    match session.state() {
        SessionState::Authenticated => {
            println!("Signed in.");
            if let Some(identity) = &session.identity {
                super::print_identity(identity);
            }
        }
        SessionState::Anonymous => println!("Not signed in."),
        SessionState::Restoring => println!("Session is still restoring."),
    }

    services.shutdown();
    Ok(())
}
