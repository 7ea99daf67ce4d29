//! Runtime configuration for storage and logging.
//!
//! # Responsibility
//! - Describe where the database lives and how the pool is sized.
//! - Bundle logging level and directory for one-shot initialization.
//!
//! # Invariants
//! - A validated `DbConfig` has a non-empty location and a pool size >= 1.
//! - In-memory databases use a unique `memdb` VFS name so every pooled
//!   connection sees the same data and waits on locks through the busy
//!   timeout instead of failing with `SQLITE_LOCKED`.

use crate::logging::{default_log_level, init_logging};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

pub const DEFAULT_MAX_CONNECTIONS: u32 = 4;
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Backing store for a connection pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    /// SQLite database file on disk.
    File(PathBuf),
    /// Named `memdb` in-memory database, alive while the pool holds a
    /// connection.
    Memory(String),
}

/// Database connection settings consumed by `db::open_pool`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub location: DbLocation,
    pub max_connections: u32,
    /// SQLite busy handler timeout applied to every pooled connection.
    pub busy_timeout: Duration,
    /// How long a caller waits for a free pooled connection.
    pub acquire_timeout: Duration,
}

/// Rejected configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyPath,
    EmptyMemoryName,
    ZeroPoolSize,
    ZeroAcquireTimeout,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPath => write!(f, "database path cannot be empty"),
            Self::EmptyMemoryName => write!(f, "in-memory database name cannot be empty"),
            Self::ZeroPoolSize => write!(f, "max_connections must be at least 1"),
            Self::ZeroAcquireTimeout => write!(f, "acquire_timeout must be non-zero"),
        }
    }
}

impl Error for ConfigError {}

impl DbConfig {
    /// Targets a database file with default pool settings.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            location: DbLocation::File(path.into()),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }

    /// Targets a fresh in-memory database private to this config value.
    pub fn in_memory() -> Self {
        Self {
            location: DbLocation::Memory(format!("userstore-{}", Uuid::new_v4())),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }

    pub fn with_acquire_timeout(mut self, acquire_timeout: Duration) -> Self {
        self.acquire_timeout = acquire_timeout;
        self
    }

    /// Checks settings before any connection is opened.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.location {
            DbLocation::File(path) if path.as_os_str().is_empty() => {
                return Err(ConfigError::EmptyPath)
            }
            DbLocation::Memory(name) if name.trim().is_empty() => {
                return Err(ConfigError::EmptyMemoryName)
            }
            _ => {}
        }
        if self.max_connections == 0 {
            return Err(ConfigError::ZeroPoolSize);
        }
        if self.acquire_timeout.is_zero() {
            return Err(ConfigError::ZeroAcquireTimeout);
        }
        Ok(())
    }

    /// SQLite open target understood by `rusqlite` with URI parsing enabled.
    pub(crate) fn open_target(&self) -> PathBuf {
        match &self.location {
            DbLocation::File(path) => path.clone(),
            DbLocation::Memory(name) => {
                // Leading `/` makes the memdb database visible to every
                // connection in the process.
                PathBuf::from(format!("file:/{name}?vfs=memdb"))
            }
        }
    }

    pub(crate) fn mode(&self) -> &'static str {
        match self.location {
            DbLocation::File(_) => "file",
            DbLocation::Memory(_) => "memory",
        }
    }
}

/// Logging settings forwarded to `logging::init_logging`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    pub log_dir: String,
}

impl LogConfig {
    /// Uses the build-mode default level.
    pub fn new(log_dir: impl Into<String>) -> Self {
        Self {
            level: default_log_level().to_string(),
            log_dir: log_dir.into(),
        }
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Starts process-wide logging. See `init_logging` for idempotency rules.
    pub fn init(&self) -> Result<(), String> {
        init_logging(&self.level, &self.log_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, DbConfig, DbLocation, LogConfig};
    use std::path::PathBuf;

    #[test]
    fn in_memory_configs_get_distinct_names() {
        let first = DbConfig::in_memory();
        let second = DbConfig::in_memory();
        assert_ne!(first.location, second.location);
        assert_eq!(first.mode(), "memory");
    }

    #[test]
    fn memory_target_is_process_wide_memdb_uri() {
        let config = DbConfig {
            location: DbLocation::Memory("unit".to_string()),
            ..DbConfig::in_memory()
        };
        assert_eq!(
            config.open_target(),
            PathBuf::from("file:/unit?vfs=memdb")
        );
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert_eq!(
            DbConfig::file("").validate(),
            Err(ConfigError::EmptyPath)
        );
        assert_eq!(
            DbConfig::in_memory().with_max_connections(0).validate(),
            Err(ConfigError::ZeroPoolSize)
        );
        assert!(DbConfig::file("users.db").validate().is_ok());
    }

    #[test]
    fn log_config_defaults_to_build_level() {
        let config = LogConfig::new("/tmp/userstore-logs");
        assert_eq!(config.level, crate::logging::default_log_level());
        assert_eq!(config.with_level("warn").level, "warn");
    }
}
