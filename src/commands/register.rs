//! Register command - Creates an account and signs it in.

use crate::cli::RegisterArgs;
use crate::config::Config;
use crate::domain::{RegistrationRequest, Role};
use crate::errors::AppResult;
use crate::services::{ServiceContainer, Services};

/// Execute the register command
pub async fn execute(args: RegisterArgs, config: Config) -> AppResult<()> {
    let role: Role = args.role.parse()?;
    let request = RegistrationRequest {
        email: args.email,
        password: args.password,
        name: args.name,
        role,
        department: args.department,
        student_id: args.student_id,
        faculty_id: args.faculty_id,
        phone: args.phone,
        profile_image: None,
    };

    let services = Services::from_config(&config)?;
    let identity = services.session().register(request).await?;

    println!("Registered {} ({})", identity.name, identity.role);
    super::print_identity(&identity);

    services.shutdown();
    Ok(())
}
