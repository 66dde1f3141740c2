//! Verify command - Runs a face match against the verification endpoint.

use crate::cli::VerifyArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::services::{ServiceContainer, Services, VerificationOutcome};

/// Execute the verify command
pub async fn execute(args: VerifyArgs, config: Config) -> AppResult<()> {
    let image = super::read_image(&args.image)?;
    let services = Services::from_config(&config)?;

    let user_id = match args.user {
        Some(id) => id,
        None => {
            let store = services.session();
            let session = super::settled_session(&store).await;
            session
                .identity
                .map(|identity| identity.id)
                .ok_or(AppError::Unauthorized)?
        }
    };

    match services.verification().verify(&image, &user_id).await? {
        VerificationOutcome::Confirmed(true) => println!("Face match confirmed."),
        VerificationOutcome::Confirmed(false) => println!("Face did not match."),
        VerificationOutcome::Simulated(verdict) => {
            let label = if verdict { "accepted" } else { "rejected" };
            println!(
                "Face match {} (simulated outcome, verification service unreachable).",
                label
            );
        }
    }

    services.shutdown();
    Ok(())
}
