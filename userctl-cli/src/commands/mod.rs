//! Command implementations for userctl CLI

pub mod migrate;
pub mod run;
pub mod users;

// Re-export main dispatcher functions for flat access from main.rs
pub use migrate::run_migrate;
pub use run::{run_demo, RunArgs};
pub use users::{run_create, run_list};

use anyhow::{Context, Result};
use userctl_store::{open_store, StoreConfig, UserRepositoryFacade};

/// Open the configured store and hand it to a facade.
pub(crate) fn open_facade(config: &StoreConfig) -> Result<UserRepositoryFacade> {
    let store = open_store(config).context("Failed to open user store")?;
    Ok(UserRepositoryFacade::open(store))
}
