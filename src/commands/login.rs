//! Login command - Signs in with an existing account.

use crate::cli::LoginArgs;
use crate::config::Config;
use crate::errors::AppResult;
use crate::services::{ServiceContainer, Services};

/// Execute the login command
pub async fn execute(args: LoginArgs, config: Config) -> AppResult<()> {
    let services = Services::from_config(&config)?;

    let identity = services
        .session()
        .login(&args.email, &args.password)
        .await?;

    println!("Signed in as {} ({})", identity.name, identity.role);
    super::print_identity(&identity);

    services.shutdown();
    Ok(())
}
