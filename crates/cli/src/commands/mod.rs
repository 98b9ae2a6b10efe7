//! Subcommand implementations.

pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod products;

use catalog_admin_client::{ClientError, ConfigError, Dashboard, Guard};
use thiserror::Error;
use tracing::debug;

/// Errors surfaced to the user by a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Not signed in. Run `catalog login --email <address>` first")]
    NotLoggedIn,

    #[error("Failed to read input: {0}")]
    Input(#[from] std::io::Error),
}

/// Fail unless a hydrated session with a token is present.
///
/// # Errors
///
/// Returns [`CliError::NotLoggedIn`] when the guard would redirect to login.
pub async fn require_session(dashboard: &Dashboard) -> Result<(), CliError> {
    match dashboard.guard().await {
        Guard::Allow => Ok(()),
        guard => {
            debug!(?guard, "Protected command refused");
            Err(CliError::NotLoggedIn)
        }
    }
}
