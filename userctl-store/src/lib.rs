//! userctl-store: user records behind a narrow facade
//!
//! Wraps a relational store holding the `"user"` table and exposes
//! `create_user` / `list_users` through [`UserRepositoryFacade`], with
//! guaranteed release of the store's connections.

pub mod config;
pub mod error;
pub mod facade;
pub mod models;
pub mod store;

pub use config::{Backend, StoreConfig};
pub use error::{Result, StoreError};
pub use facade::UserRepositoryFacade;
pub use models::{NewUser, User, ValidationError};
pub use store::{open_store, MemoryUserStore, PgUserStore, UserStore, MIGRATOR};
