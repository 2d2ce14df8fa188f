//! Store connection configuration

use std::time::Duration;

use crate::error::{Result, StoreError};

/// Default maximum connections for the pool.
/// Kept low: the CLI runs one sequence of queries per invocation.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default time to wait for a pooled connection before giving up.
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// URL scheme selecting the in-memory store.
pub const MEMORY_SCHEME: &str = "memory://";

/// Which store implementation a URL points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    Memory,
}

/// Connection settings for a user store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl StoreConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// Resolve the backend from the URL scheme.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Config` for an empty URL, an unknown scheme, or a
    /// zero-sized pool.
    pub fn backend(&self) -> Result<Backend> {
        let url = self.database_url.trim();
        if url.is_empty() {
            return Err(StoreError::Config("database URL is empty".to_owned()));
        }
        if self.max_connections == 0 {
            return Err(StoreError::Config(
                "max_connections must be at least 1".to_owned(),
            ));
        }

        if url.starts_with(MEMORY_SCHEME) {
            Ok(Backend::Memory)
        } else if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(Backend::Postgres)
        } else {
            Err(StoreError::Config(format!(
                "unsupported database URL scheme: {}",
                redact(url)
            )))
        }
    }
}

/// Strip credentials from a connection string for logging.
pub fn redact(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***@{}", &url[..scheme_end], &url[at + 1..])
        }
        _ => url.to_owned(),
    }
}
