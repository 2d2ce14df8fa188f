//! Store implementations behind the facade
//!
//! Each store follows these patterns:
//! - Relies on store constraints for uniqueness (no check-then-insert)
//! - Returns fully populated records from the insert itself
//! - Releases its connections in `disconnect`

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::config::{Backend, StoreConfig};
use crate::error::Result;
use crate::models::{NewUser, User};

pub use memory::MemoryUserStore;
pub use postgres::{PgUserStore, MIGRATOR};

/// Narrow interface to the relational store holding the `"user"` table.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert one record and return it with its store-assigned id.
    async fn insert(&self, user: &NewUser) -> Result<User>;

    /// All records, in store-defined order.
    async fn select_all(&self) -> Result<Vec<User>>;

    /// Release every connection held by this store.
    async fn disconnect(&self);
}

/// Open the store the configured URL points at.
///
/// Postgres stores connect lazily: an unreachable server is reported by the
/// first operation, not here.
pub fn open_store(config: &StoreConfig) -> Result<Box<dyn UserStore>> {
    match config.backend()? {
        Backend::Postgres => Ok(Box::new(PgUserStore::connect(config)?)),
        Backend::Memory => Ok(Box::new(MemoryUserStore::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn opens_memory_store() {
        let store = open_store(&StoreConfig::new("memory://")).unwrap();
        assert!(store.select_all().await.unwrap().is_empty());
        store.disconnect().await;
    }

    #[test]
    fn rejects_unknown_backend() {
        assert!(open_store(&StoreConfig::new("sqlite://users.db")).is_err());
    }
}
