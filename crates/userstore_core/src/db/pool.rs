//! Pooled SQLite connections.
//!
//! # Responsibility
//! - Define `ConnectionProvider`, the seam repositories acquire connections
//!   through.
//! - Build an `r2d2` pool over file or `memdb` in-memory databases.
//!
//! # Invariants
//! - A connection returns to its pool when the handle is dropped, on every
//!   exit path.
//! - `open_pool` returns only after the `users` table is provisioned.
//!
//! # See also
//! - `crate::config::DbConfig`

use super::schema::ensure_schema;
use super::{DbError, DbResult};
use crate::config::DbConfig;
use log::{error, info};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::ops::Deref;
use std::time::Instant;

/// Pool type produced by `open_pool`.
pub type SqlitePool = Pool<SqliteConnectionManager>;

/// Supplies ready-to-use SQLite connections.
///
/// Implementations may fail to acquire; callers treat that as a store-access
/// error. The returned handle releases the connection when dropped.
pub trait ConnectionProvider {
    type Conn: Deref<Target = Connection>;

    fn connection(&self) -> DbResult<Self::Conn>;
}

impl ConnectionProvider for SqlitePool {
    type Conn = PooledConnection<SqliteConnectionManager>;

    fn connection(&self) -> DbResult<Self::Conn> {
        Ok(self.get()?)
    }
}

impl<P: ConnectionProvider + ?Sized> ConnectionProvider for &P {
    type Conn = P::Conn;

    fn connection(&self) -> DbResult<Self::Conn> {
        (**self).connection()
    }
}

/// Opens a connection pool and provisions the `users` table.
///
/// # Side effects
/// - Opens up to `max_connections` SQLite connections eagerly.
/// - Emits `db_open` logging events with duration and status.
pub fn open_pool(config: &DbConfig) -> DbResult<SqlitePool> {
    let started_at = Instant::now();
    let mode = config.mode();
    info!("event=db_open module=db status=start mode={mode}");

    match build_pool(config) {
        Ok(pool) => {
            info!(
                "event=db_open module=db status=ok mode={mode} max_connections={} duration_ms={}",
                config.max_connections,
                started_at.elapsed().as_millis()
            );
            Ok(pool)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code={} error={}",
                started_at.elapsed().as_millis(),
                open_error_code(&err),
                err
            );
            Err(err)
        }
    }
}

fn build_pool(config: &DbConfig) -> DbResult<SqlitePool> {
    config.validate()?;

    let busy_timeout = config.busy_timeout;
    let manager = SqliteConnectionManager::file(config.open_target()).with_init(move |conn| {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.busy_timeout(busy_timeout)
    });

    let pool = Pool::builder()
        .max_size(config.max_connections)
        .connection_timeout(config.acquire_timeout)
        .build(manager)?;

    let conn = pool.get()?;
    ensure_schema(&conn)?;
    Ok(pool)
}

fn open_error_code(err: &DbError) -> &'static str {
    match err {
        DbError::Config(_) => "db_config_invalid",
        DbError::Pool(_) => "db_open_failed",
        DbError::Sqlite(_) => "db_bootstrap_failed",
    }
}

#[cfg(test)]
mod tests {
    use super::{open_pool, ConnectionProvider};
    use crate::config::DbConfig;
    use crate::db::DbError;

    #[test]
    fn pooled_connections_share_one_memory_database() {
        let pool = open_pool(&DbConfig::in_memory().with_max_connections(2)).unwrap();

        let first = pool.connection().unwrap();
        first
            .execute(
                "INSERT INTO users (name, email, created_at) VALUES ('a', 'a@x', 1);",
                [],
            )
            .unwrap();

        let second = pool.connection().unwrap();
        let count: i64 = second
            .query_row("SELECT COUNT(*) FROM users;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn connections_have_foreign_keys_enabled() {
        let pool = open_pool(&DbConfig::in_memory()).unwrap();
        let conn = pool.connection().unwrap();
        let enabled: i64 = conn
            .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn invalid_config_is_rejected_before_opening() {
        let err = open_pool(&DbConfig::in_memory().with_max_connections(0)).unwrap_err();
        assert!(matches!(err, DbError::Config(_)));
    }
}
