//! Configuration loading for userctl
//!
//! Resolution order for each store setting (highest first):
//! 1. Command-line flag
//! 2. Environment variable (after loading `./.env` and `~/.userctl/.env`)
//! 3. `~/.userctl/config.toml` (or the file given by `--config`)
//! 4. Built-in defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use serde::Deserialize;
use tracing::{debug, info};
use userctl_store::StoreConfig;

/// Store connection flags shared by every subcommand
#[derive(Args, Debug, Clone, Default)]
pub struct StoreArgs {
    /// Database URL (postgres://... or memory://); overrides DATABASE_URL
    #[arg(long, global = true, value_name = "URL")]
    pub database_url: Option<String>,

    /// Maximum pooled connections
    #[arg(long, global = true, value_name = "N")]
    pub max_connections: Option<u32>,

    /// Seconds to wait for a connection before failing
    #[arg(long, global = true, value_name = "SECS")]
    pub acquire_timeout: Option<u64>,

    /// Config file path (default: ~/.userctl/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Contents of config.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub store: StoreSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreSection {
    pub database_url: Option<String>,
    pub max_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
}

/// Get the userctl config directory path (~/.userctl)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".userctl"))
}

/// Load environment variables from `./.env`, then `~/.userctl/.env`.
///
/// dotenvy never overwrites variables that are already set, so the current
/// directory wins over the home file and the real environment wins over both.
pub fn load_dotenv() {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded .env from current directory: {}", path.display());
        loaded_from.push(path);
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() {
            match dotenvy::from_path(&env_file) {
                Ok(()) => {
                    debug!("Loaded .env from ~/.userctl: {}", env_file.display());
                    loaded_from.push(env_file);
                }
                Err(e) => debug!("Failed to load {}: {}", env_file.display(), e),
            }
        }
    }

    if loaded_from.is_empty() {
        debug!("No .env files found (current dir or ~/.userctl)");
    }
}

/// Read config.toml. A missing default file is not an error; a missing
/// explicit `--config` file is.
pub fn load_file(explicit: Option<&Path>) -> Result<FileConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match config_dir() {
            Some(dir) => dir.join("config.toml"),
            None => return Ok(FileConfig::default()),
        },
    };

    if explicit.is_none() && !path.exists() {
        return Ok(FileConfig::default());
    }

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let file = parse_file(&raw)
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    info!("Loaded configuration from {}", path.display());
    Ok(file)
}

pub fn parse_file(raw: &str) -> Result<FileConfig> {
    Ok(toml::from_str(raw)?)
}

/// Merge flags, environment and file into a store configuration.
pub fn resolve(
    args: &StoreArgs,
    env_url: Option<String>,
    file: &FileConfig,
) -> Result<StoreConfig> {
    let database_url = args
        .database_url
        .clone()
        .or(env_url)
        .or_else(|| file.store.database_url.clone())
        .context(
            "DATABASE_URL not set. Set via --database-url, DATABASE_URL env, ~/.userctl/.env, \
             or [store] database_url in ~/.userctl/config.toml",
        )?;

    let mut config = StoreConfig::new(database_url);
    if let Some(n) = args.max_connections.or(file.store.max_connections) {
        config = config.with_max_connections(n);
    }
    if let Some(secs) = args.acquire_timeout.or(file.store.acquire_timeout_secs) {
        config = config.with_acquire_timeout(Duration::from_secs(secs));
    }

    config.backend()?;
    Ok(config)
}

/// Full resolution: dotenv files, environment, config file, flags.
pub fn load_store_config(args: &StoreArgs) -> Result<StoreConfig> {
    load_dotenv();
    let file = load_file(args.config.as_deref())?;
    resolve(args, std::env::var("DATABASE_URL").ok(), &file)
}
