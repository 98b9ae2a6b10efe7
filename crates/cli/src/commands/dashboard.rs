//! Catalog overview.

use catalog_admin_client::Dashboard;

use super::CliError;
use crate::output;

/// Load products and categories and print summary statistics.
pub async fn overview(dashboard: &Dashboard) -> Result<(), CliError> {
    let stats = dashboard.overview().await?;
    if let Some(email) = &dashboard.store().read().await.auth.email {
        output::message(&format!("Signed in as {email}\n"));
    }
    output::stats(&stats);
    Ok(())
}
