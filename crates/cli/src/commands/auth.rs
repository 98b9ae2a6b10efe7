//! Session commands.

use catalog_admin_client::Dashboard;

use super::CliError;
use crate::output;

/// Verify an email with the API and save the session.
pub async fn login(dashboard: &Dashboard, email: &str) -> Result<(), CliError> {
    let grant = dashboard.login(email).await?;
    output::message(&format!("Signed in as {}", grant.email));
    Ok(())
}

pub async fn logout(dashboard: &Dashboard) -> Result<(), CliError> {
    dashboard.logout().await?;
    output::message("Signed out.");
    Ok(())
}

pub async fn whoami(dashboard: &Dashboard) -> Result<(), CliError> {
    let state = dashboard.store().read().await;
    if !state.auth.is_authenticated {
        return Err(CliError::NotLoggedIn);
    }
    match &state.auth.email {
        Some(email) => output::message(&format!("Signed in as {email}")),
        None => output::message("Signed in (email not recorded)"),
    }
    Ok(())
}
