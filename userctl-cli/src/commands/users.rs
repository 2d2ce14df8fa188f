//! Single-operation user commands (create, list)

use std::fmt;

use anyhow::{Context, Result};
use clap::Parser;
use futures::FutureExt;
use serde::Serialize;
use userctl_store::{StoreConfig, User};

use super::open_facade;

/// Compact JSON rendering for `Display` contexts.
pub struct Json<'a, T: Serialize>(pub &'a T);

impl<T: Serialize> fmt::Display for Json<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = serde_json::to_string(self.0).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Name of the user
    #[arg(long)]
    pub name: String,

    /// Email of the user (must be unique)
    #[arg(long)]
    pub email: String,
}

#[derive(Parser, Debug, Default)]
pub struct ListArgs {
    /// Print a single JSON array instead of one object per line
    #[arg(long)]
    pub json: bool,
}

pub async fn run_create(args: CreateArgs, config: &StoreConfig) -> Result<()> {
    let CreateArgs { name, email } = args;

    let user = open_facade(config)?
        .scoped(|users| async move { users.create_user(&name, &email).await }.boxed())
        .await
        .context("Failed to create user")?;

    println!("{}", Json(&user));
    Ok(())
}

pub async fn run_list(args: ListArgs, config: &StoreConfig) -> Result<()> {
    let all = open_facade(config)?
        .scoped(|users| users.list_users().boxed())
        .await
        .context("Failed to list users")?;

    print!("{}", render_list(&all, args.json));
    Ok(())
}

fn render_list(users: &[User], as_array: bool) -> String {
    if as_array {
        return format!("{}\n", Json(&users));
    }
    users.iter().map(|u| format!("{}\n", Json(u))).collect()
}
