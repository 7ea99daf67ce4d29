//! Core data-access layer for the user store.
//! Repository and service over a pooled SQLite `users` table.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, DbConfig, DbLocation, LogConfig};
pub use db::{
    ensure_schema, open_pool, ConnectionProvider, DbError, DbResult, SqlitePool, TABLE_NAME,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::user::{User, UserId, UNSAVED_USER_ID};
pub use repo::user_repo::{RepoError, RepoResult, SqliteUserRepository, UserRepository};
pub use service::user_service::UserService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
