//! SQLite storage bootstrap and connection provisioning.
//!
//! # Responsibility
//! - Define the connection-provider seam injected into repositories.
//! - Build pooled SQLite connections and provision the `users` table.
//!
//! # Invariants
//! - Every connection handed out by `open_pool` has `foreign_keys=ON` and a
//!   busy timeout configured.
//! - Pools built by `open_pool` are returned only after `ensure_schema`
//!   succeeded; injected providers are responsible for their own schema.

use crate::config::ConfigError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod pool;
pub mod schema;

pub use pool::{open_pool, ConnectionProvider, SqlitePool};
pub use schema::{ensure_schema, TABLE_NAME};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    /// Statement preparation or execution failed.
    Sqlite(rusqlite::Error),
    /// No connection could be acquired from the provider.
    Pool(r2d2::Error),
    /// Pool settings were rejected before opening.
    Config(ConfigError),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Pool(err) => write!(f, "connection acquisition failed: {err}"),
            Self::Config(err) => write!(f, "invalid database config: {err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Pool(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<r2d2::Error> for DbError {
    fn from(value: r2d2::Error) -> Self {
        Self::Pool(value)
    }
}

impl From<ConfigError> for DbError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}
