//! Enroll command - Registers a reference face image.

use crate::cli::EnrollArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::services::{EnrollmentOutcome, ServiceContainer, Services};

/// Execute the enroll command
pub async fn execute(args: EnrollArgs, config: Config) -> AppResult<()> {
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

    match services.verification().enroll(&image, &user_id).await? {
        EnrollmentOutcome::Accepted => println!("Face enrolled."),
        EnrollmentOutcome::Simulated => {
            println!("Enrollment simulated, verification service unreachable.")
        }
    }

    services.shutdown();
    Ok(())
}
