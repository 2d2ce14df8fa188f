//! Default command: create one user, then list every user.

use anyhow::{Context, Result};
use clap::Parser;
use futures::FutureExt;
use tracing::error;
use userctl_store::{StoreConfig, StoreError};

use super::open_facade;
use super::users::Json;

pub const DEFAULT_NAME: &str = "Leonardo Porto";
pub const DEFAULT_EMAIL: &str = "leo@email.com";

#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Name of the user to create
    #[arg(long, default_value = DEFAULT_NAME)]
    pub name: String,

    /// Email of the user to create
    #[arg(long, default_value = DEFAULT_EMAIL)]
    pub email: String,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_owned(),
            email: DEFAULT_EMAIL.to_owned(),
        }
    }
}

/// Create the user, print it, list all users, print them.
///
/// The store is released before this returns, on success and on failure.
pub async fn run_demo(args: RunArgs, config: &StoreConfig) -> Result<()> {
    let RunArgs { name, email } = args;

    open_facade(config)?
        .scoped(|users| {
            async move {
                let created = users.create_user(&name, &email).await?;
                println!("New user: {}", Json(&created));

                let all = users.list_users().await?;
                println!("All users: {}", Json(&all));
                Ok::<_, StoreError>(())
            }
            .boxed()
        })
        .await
        .inspect_err(|err| error!(error = %err, "store operation failed"))
        .context("Create-then-list failed")
}
