//! User repository facade
//!
//! Owns one store handle for its whole lifetime and exposes the two
//! operations the CLI needs. Release happens through [`UserRepositoryFacade::close`]
//! or, on every exit path, through [`UserRepositoryFacade::scoped`].

use std::panic::AssertUnwindSafe;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::error::Result;
use crate::models::{NewUser, User};
use crate::store::UserStore;

pub struct UserRepositoryFacade {
    store: Box<dyn UserStore>,
    closed: bool,
}

impl UserRepositoryFacade {
    /// Take exclusive ownership of an opened store.
    pub fn open(store: Box<dyn UserStore>) -> Self {
        Self {
            store,
            closed: false,
        }
    }

    /// Create one user.
    ///
    /// Input is validated before the store is touched. Store rejections
    /// (duplicate email, lost connection) are returned unchanged.
    pub async fn create_user(&self, name: &str, email: &str) -> Result<User> {
        let new_user = NewUser::new(name, email)?;
        let user = self.store.insert(&new_user).await?;
        tracing::info!(id = user.id, "created user");
        Ok(user)
    }

    /// All users, in store-defined order.
    pub async fn list_users(&self) -> Result<Vec<User>> {
        let users = self.store.select_all().await?;
        tracing::debug!(count = users.len(), "listed users");
        Ok(users)
    }

    /// Release the store. Consumes the facade, so it runs at most once.
    pub async fn close(mut self) {
        self.store.disconnect().await;
        self.closed = true;
        tracing::debug!("user store released");
    }

    /// Run `body` against this facade, then close it.
    ///
    /// The store is released exactly once whether `body` returns `Ok`,
    /// returns `Err`, or panics. A panic is resumed after release.
    ///
    /// ```ignore
    /// let users = UserRepositoryFacade::open(store)
    ///     .scoped(|users| async move { users.list_users().await }.boxed())
    ///     .await?;
    /// ```
    pub async fn scoped<F, T>(self, body: F) -> Result<T>
    where
        F: for<'c> FnOnce(&'c Self) -> BoxFuture<'c, Result<T>>,
    {
        let outcome = AssertUnwindSafe(body(&self)).catch_unwind().await;
        self.close().await;

        match outcome {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}

impl Drop for UserRepositoryFacade {
    fn drop(&mut self) {
        if !self.closed {
            tracing::warn!("user repository dropped without close; connections released on drop only");
        }
    }
}
