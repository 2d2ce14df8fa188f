//! userctl CLI - create and list user records
//!
//! With no subcommand, creates the default user and prints it, then prints
//! every user in the store. The store is released before the process exits,
//! and any store failure exits non-zero.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use userctl_store::config::redact;

mod commands;
mod config;
mod tracing_setup;

use commands::users::{CreateArgs, ListArgs};
use commands::RunArgs;
use config::StoreArgs;

#[derive(Parser, Debug)]
#[command(
    name = "userctl",
    author,
    version,
    about = "Create and list users in a relational store",
    long_about = "Create and list records in the \"user\" table. Without a subcommand, \
                  creates the default user and prints every user in the store."
)]
struct Cli {
    /// Enable debug logging (ignored when RUST_LOG is set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(flatten)]
    store: StoreArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a user then list all users (default)
    Run(RunArgs),
    /// Create one user and print it as JSON
    Create(CreateArgs),
    /// Print all users
    List(ListArgs),
    /// Apply schema migrations (Postgres only)
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    let store_config = config::load_store_config(&cli.store)?;
    debug!(url = %redact(&store_config.database_url), "resolved store configuration");

    match cli.command.unwrap_or_else(|| Commands::Run(RunArgs::default())) {
        Commands::Run(args) => commands::run_demo(args, &store_config).await?,
        Commands::Create(args) => commands::run_create(args, &store_config).await?,
        Commands::List(args) => commands::run_list(args, &store_config).await?,
        Commands::Migrate => commands::run_migrate(&store_config).await?,
    }
    Ok(())
}
