//! In-memory user store
//!
//! Same observable behaviour as the Postgres store: ids start at 1 and
//! increase, emails are unique, records come back in insertion order.
//! Clones share state, so a test can keep a handle after giving one away.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::UserStore;
use crate::error::{Result, StoreError};
use crate::models::{NewUser, User};

/// Name of the constraint reported on duplicate emails, matching the
/// Postgres default for `email TEXT UNIQUE` on `"user"`.
pub const EMAIL_CONSTRAINT: &str = "user_email_key";

#[derive(Debug, Default)]
struct Table {
    rows: Vec<User>,
    next_id: i32,
}

#[derive(Debug, Default)]
struct Inner {
    table: Mutex<Table>,
    unreachable: bool,
    disconnects: AtomicUsize,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    inner: Arc<Inner>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation fails with `StoreError::Unavailable`.
    pub fn unreachable() -> Self {
        Self {
            inner: Arc::new(Inner {
                unreachable: true,
                ..Inner::default()
            }),
        }
    }

    /// Number of times `disconnect` has been called on any clone.
    pub fn disconnect_count(&self) -> usize {
        self.inner.disconnects.load(Ordering::SeqCst)
    }

    fn ensure_reachable(&self) -> Result<()> {
        if self.inner.unreachable {
            return Err(StoreError::unavailable("memory store is unreachable"));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: &NewUser) -> Result<User> {
        self.ensure_reachable()?;
        let mut table = self.inner.table.lock().await;

        if table.rows.iter().any(|u| u.email == user.email.as_str()) {
            return Err(StoreError::conflict(EMAIL_CONSTRAINT));
        }

        table.next_id += 1;
        let created = User {
            id: table.next_id,
            name: user.name.as_str().to_owned(),
            email: user.email.as_str().to_owned(),
        };
        table.rows.push(created.clone());
        Ok(created)
    }

    async fn select_all(&self) -> Result<Vec<User>> {
        self.ensure_reachable()?;
        Ok(self.inner.table.lock().await.rows.clone())
    }

    async fn disconnect(&self) {
        self.inner.disconnects.fetch_add(1, Ordering::SeqCst);
    }
}
