//! Ebasi CLI - database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! ebasi migrate run
//!
//! # Create (or repair) the bootstrap admin account from environment
//! # variables EBASI_ADMIN_USERNAME / EBASI_ADMIN_EMAIL / EBASI_ADMIN_PASSWORD
//! ebasi admin bootstrap
//!
//! # Seed the catalog with demo data
//! ebasi seed
//! ```
//!
//! All commands read the database URL from `EBASI_DATABASE_URL`
//! (falling back to `DATABASE_URL`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ebasi")]
#[command(author, version, about = "Ebasi store CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
    /// Manage admin accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Seed the catalog with demo data
    Seed,
}

#[derive(Subcommand)]
enum MigrateAction {
    /// Apply all pending migrations
    Run,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Idempotently create the staff account configured in the environment
    Bootstrap,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Migrate {
            action: MigrateAction::Run,
        } => commands::migrate::run().await,
        Commands::Admin {
            action: AdminAction::Bootstrap,
        } => commands::admin::bootstrap().await,
        Commands::Seed => commands::seed::run().await,
    }
}
