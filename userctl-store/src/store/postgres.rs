//! PostgreSQL user store
//!
//! Uses sqlx PgPool with explicit connection limits. The schema lives in
//! `migrations/` and is embedded as [`MIGRATOR`].

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::UserStore;
use crate::config::{redact, StoreConfig};
use crate::error::Result;
use crate::models::{NewUser, User};

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// User store backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Build a pool without opening any connection yet.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Config` if the connection string cannot be parsed.
    pub fn connect(config: &StoreConfig) -> Result<Self> {
        tracing::debug!(
            url = %redact(&config.database_url),
            max_connections = config.max_connections,
            "creating lazy postgres pool"
        );

        let pool = pool_options(config).connect_lazy(&config.database_url)?;
        Ok(Self { pool })
    }

    /// Build a pool and open its first connection immediately.
    pub async fn connect_eager(config: &StoreConfig) -> Result<Self> {
        let pool = pool_options(config)
            .connect(&config.database_url)
            .await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool (used by `#[sqlx::test]`).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply the embedded schema migrations.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running user migrations...");
        MIGRATOR.run(&self.pool).await.map_err(|e| match e {
            sqlx::migrate::MigrateError::Execute(err) => err.into(),
            other => sqlx::Error::from(other).into(),
        })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn pool_options(config: &StoreConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, user: &NewUser) -> Result<User> {
        let created: User = sqlx::query_as(
            r#"
            INSERT INTO "user" (name, email)
            VALUES ($1, $2)
            RETURNING id, name, email
            "#,
        )
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = created.id, "inserted user");
        Ok(created)
    }

    async fn select_all(&self) -> Result<Vec<User>> {
        let users: Vec<User> = sqlx::query_as(r#"SELECT id, name, email FROM "user" ORDER BY id"#)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(count = users.len(), "selected users");
        Ok(users)
    }

    async fn disconnect(&self) {
        self.pool.close().await;
        tracing::debug!("postgres pool closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StoreError;
    use std::time::Duration;

    // Integration tests - run with DATABASE_URL set
    // cargo test -p userctl-store -- --ignored

    #[test]
    fn malformed_url_fails_at_connect() {
        let err = PgUserStore::connect(&StoreConfig::new("postgres://host:notaport/db"))
            .unwrap_err();
        assert!(matches!(err, StoreError::Config(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn unreachable_server_fails_on_first_operation() {
        // Port 1 on localhost: nothing listens there.
        let config = StoreConfig::new("postgres://userctl@127.0.0.1:1/userctl")
            .with_acquire_timeout(Duration::from_millis(500));
        let store = PgUserStore::connect(&config).unwrap();

        let err = store.select_all().await.unwrap_err();
        assert!(err.is_unavailable(), "got {err:?}");

        store.disconnect().await;
        assert!(store.pool().is_closed());
    }

    #[sqlx::test(migrator = "MIGRATOR")]
    #[ignore = "requires database"]
    async fn insert_assigns_sequential_ids(pool: PgPool) -> Result<()> {
        let store = PgUserStore::from_pool(pool);

        let first = store
            .insert(&NewUser::new("Leonardo Porto", "leo@email.com")?)
            .await?;
        let second = store.insert(&NewUser::new("Ana", "ana@email.com")?).await?;

        assert_eq!(first.id, 1);
        assert_eq!(first.name, "Leonardo Porto");
        assert_eq!(first.email, "leo@email.com");
        assert!(second.id > first.id);
        assert_eq!(store.select_all().await?, vec![first, second]);
        Ok(())
    }

    #[sqlx::test(migrator = "MIGRATOR")]
    #[ignore = "requires database"]
    async fn duplicate_email_is_conflict(pool: PgPool) -> Result<()> {
        let store = PgUserStore::from_pool(pool);

        let first = store.insert(&NewUser::new("A", "dup@email.com")?).await?;
        let err = store
            .insert(&NewUser::new("B", "dup@email.com")?)
            .await
            .unwrap_err();

        assert!(err.is_conflict(), "got {err:?}");
        assert_eq!(store.select_all().await?, vec![first]);
        Ok(())
    }

    #[sqlx::test(migrator = "MIGRATOR")]
    #[ignore = "requires database"]
    async fn migrate_is_repeatable(pool: PgPool) -> Result<()> {
        let store = PgUserStore::from_pool(pool);
        store.migrate().await?;
        assert!(store.select_all().await?.is_empty());
        Ok(())
    }
}
