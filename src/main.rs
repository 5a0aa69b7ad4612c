//! GhostShield Console
//!
//! Main application entry point

use anyhow::Context;
use tracing::info;

use ghostshield::{
    config::Settings,
    database::{self, DatabaseService},
    middleware::build_guard,
    server::{self, AppState},
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration; missing secrets stop the process here
    let settings = Settings::new().context("Failed to load configuration")?;
    settings.validate().context("Invalid configuration")?;

    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", ghostshield::info());

    info!("Connecting to document store...");
    let store = database::create_store(&settings.store)?;
    database::health_check(store.as_ref())
        .await
        .context("Document store is unreachable")?;

    let state = AppState::new(DatabaseService::new(store), build_guard(&settings)?);

    server::serve(&settings, state).await?;

    info!("GhostShield console has been shut down.");
    Ok(())
}
