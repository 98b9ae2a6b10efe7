//! Catalog Admin CLI - Command-line dashboard for the catalog REST API.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (the session is saved for later commands)
//! catalog login -e admin@example.com
//!
//! # Browse and manage categories
//! catalog categories list --all
//! catalog categories create -n Shoes -d "Things for feet"
//!
//! # Browse and manage products
//! catalog products list --category 3
//! catalog products show blue-shoe
//! catalog products update 12 --price 24.50
//!
//! # Interactive search: one query per line, blank line clears
//! catalog products browse
//!
//! # Catalog overview
//! catalog dashboard
//! ```
//!
//! # Configuration
//!
//! Read from the environment (or `.env`): `CATALOG_API_URL` is required,
//! see `ClientConfig::from_env` for the rest. Log verbosity follows
//! `RUST_LOG` and defaults to `warn`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use catalog_admin_client::{ClientConfig, Dashboard};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::CliError;
use commands::categories::CategoryAction;
use commands::products::ProductAction;

#[derive(Parser)]
#[command(name = "catalog")]
#[command(author, version, about = "Catalog Admin dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and save the session
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,
    },
    /// Sign out and forget the saved session
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Manage categories
    Categories {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Show catalog statistics
    Dashboard,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = ClientConfig::from_env()?;
    let dashboard = Dashboard::from_config(&config)?;
    dashboard.hydrate().await;

    match cli.command {
        Commands::Login { email } => commands::auth::login(&dashboard, &email).await,
        Commands::Logout => commands::auth::logout(&dashboard).await,
        Commands::Whoami => commands::auth::whoami(&dashboard).await,
        Commands::Categories { action } => {
            commands::require_session(&dashboard).await?;
            commands::categories::run(&dashboard, &config, action).await
        }
        Commands::Products { action } => {
            commands::require_session(&dashboard).await?;
            commands::products::run(&dashboard, &config, action).await
        }
        Commands::Dashboard => {
            commands::require_session(&dashboard).await?;
            commands::dashboard::overview(&dashboard).await
        }
    }
}
