//! classtrack - Application entry point
//!
//! CLI-based entry point that dispatches to various commands.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use classtrack::{
    cli::{Cli, Commands},
    commands,
    config::Config,
};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing (verbose mode sets debug level)
    init_tracing(cli.verbose);

    // Load configuration
    let config = Config::from_env();
    tracing::debug!("Configuration loaded: {:?}", config);

    // Execute command
    let result = match cli.command {
        Commands::Login(args) => commands::login::execute(args, config).await,
        Commands::Register(args) => commands::register::execute(args, config).await,
        Commands::Logout => commands::logout::execute(config).await,
        Commands::Status => commands::status::execute(config).await,
        Commands::Verify(args) => commands::verify::execute(args, config).await,
        Commands::Enroll(args) => commands::enroll::execute(args, config).await,
        Commands::Dashboard(args) => commands::dashboard::execute(args, config).await,
    };

    // Handle errors
    if let Err(e) = result {
        tracing::error!(code = e.code(), "Command failed: {}", e.user_message());
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
