//! Error type for userctl-store
//!
//! Every failure coming out of a store, together with input validated on its
//! way in, is reported as a [`StoreError`]. The facade never recovers from it.

use thiserror::Error;

use crate::models::ValidationError;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Input rejected before reaching the store
    #[error("invalid input: {0}")]
    Invalid(#[from] ValidationError),

    /// Unique constraint violated (e.g. duplicate email)
    #[error("conflict: unique constraint '{constraint}' violated")]
    Conflict { constraint: String },

    /// Store could not be reached (refused, timed out, closed)
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Bad connection string or store options
    #[error("configuration error: {0}")]
    Config(String),

    /// Any other database failure
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl StoreError {
    pub fn conflict(constraint: impl Into<String>) -> Self {
        Self::Conflict {
            constraint: constraint.into(),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                Self::conflict(db.constraint().unwrap_or("unique"))
            }
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => Self::Unavailable(err.to_string()),
            sqlx::Error::Configuration(e) => Self::Config(e.to_string()),
            other => Self::Database(other),
        }
    }
}
