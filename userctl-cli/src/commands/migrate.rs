//! Apply the embedded schema migrations

use anyhow::{Context, Result};
use tracing::info;
use userctl_store::{Backend, PgUserStore, StoreConfig, UserStore};

pub async fn run_migrate(config: &StoreConfig) -> Result<()> {
    if config.backend()? == Backend::Memory {
        info!("memory store has no schema to migrate");
        return Ok(());
    }

    let store = PgUserStore::connect_eager(config)
        .await
        .context("Failed to connect to database")?;
    let outcome = store.migrate().await;
    store.disconnect().await;

    outcome.context("Migration failed")?;
    info!("Migrations applied");
    Ok(())
}
