//! User repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `users` table.
//! - Keep SQL and row mapping inside the persistence boundary.
//!
//! # Invariants
//! - Every statement binds values as parameters; only the table name is
//!   formatted into SQL, and it is a compile-time constant.
//! - Read paths reject rows with a non-positive id instead of masking them.
//! - `update` never touches `created_at`.
//! - Connection, statement and cursor handles are dropped on every exit path.

use crate::db::{ConnectionProvider, DbError, TABLE_NAME};
use crate::model::user::{User, UserId};
use log::warn;
use rusqlite::{params, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const USER_COLUMNS: &str = "id, name, email, created_at";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for user persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Connection acquisition or statement execution failed.
    Db(DbError),
    /// Update matched no row with this id.
    NotFound(UserId),
    /// Insert reported zero affected rows.
    NoRowsAffected,
    /// Insert succeeded but the store returned no generated id.
    MissingGeneratedKey,
    /// Stored row violates entity invariants.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "user not found: {id}"),
            Self::NoRowsAffected => write!(f, "creating user failed, no rows affected"),
            Self::MissingGeneratedKey => write!(f, "creating user failed, no id obtained"),
            Self::InvalidData(message) => write!(f, "invalid persisted user data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for user CRUD operations.
///
/// Implementors provide the fallible `try_*` operations. The remaining
/// methods keep the collapse-on-failure contract: a caller of `find_by_id`
/// cannot tell a missing row from an unreachable store, and a caller of
/// `save` gets the unsaved entity back when the insert fails. Use the
/// `try_*` twins when that difference matters.
pub trait UserRepository {
    fn try_find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;
    fn try_find_all(&self) -> RepoResult<Vec<User>>;
    fn try_save(&self, user: &User) -> RepoResult<User>;
    fn try_update(&self, user: &User) -> RepoResult<()>;
    fn try_delete_by_id(&self, id: UserId) -> RepoResult<bool>;

    /// Returns the user with `id`, or `None` when absent or unreadable.
    fn find_by_id(&self, id: UserId) -> Option<User> {
        self.try_find_by_id(id).unwrap_or_else(|err| {
            log_collapsed("user_find", id, &err);
            None
        })
    }

    /// Returns every stored user in store-native order, or an empty list on
    /// read failure.
    fn find_all(&self) -> Vec<User> {
        self.try_find_all().unwrap_or_else(|err| {
            log_collapsed("user_list", 0, &err);
            Vec::new()
        })
    }

    /// Inserts `user` and returns it with the generated id.
    ///
    /// On failure the original, unsaved `user` is returned unchanged.
    fn save(&self, user: &User) -> User {
        self.try_save(user).unwrap_or_else(|err| {
            log_collapsed("user_save", user.id(), &err);
            user.clone()
        })
    }

    /// Updates name and email of the row matching `user.id()`.
    fn update(&self, user: &User) {
        if let Err(err) = self.try_update(user) {
            log_collapsed("user_update", user.id(), &err);
        }
    }

    /// Returns whether a row was removed. Failures read as `false`.
    fn delete_by_id(&self, id: UserId) -> bool {
        self.try_delete_by_id(id).unwrap_or_else(|err| {
            log_collapsed("user_delete", id, &err);
            false
        })
    }
}

fn log_collapsed(event: &str, id: UserId, err: &RepoError) {
    warn!(
        "event={event} module=repo status=error user_id={id} error_code={} error={err}",
        error_code(err)
    );
}

fn error_code(err: &RepoError) -> &'static str {
    match err {
        RepoError::Db(DbError::Pool(_)) => "connection_unavailable",
        RepoError::Db(_) => "statement_failed",
        RepoError::NotFound(_) => "not_found",
        RepoError::NoRowsAffected => "no_rows_affected",
        RepoError::MissingGeneratedKey => "missing_generated_key",
        RepoError::InvalidData(_) => "invalid_data",
    }
}

/// SQLite-backed user repository.
///
/// Holds only its connection provider; each call acquires one connection
/// and releases it before returning.
pub struct SqliteUserRepository<P: ConnectionProvider> {
    provider: P,
}

impl<P: ConnectionProvider> SqliteUserRepository<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P: ConnectionProvider> UserRepository for SqliteUserRepository<P> {
    fn try_find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        let conn = self.provider.connection()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {USER_COLUMNS} FROM {TABLE_NAME} WHERE id = ?1;"
        ))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }

        Ok(None)
    }

    fn try_find_all(&self) -> RepoResult<Vec<User>> {
        let conn = self.provider.connection()?;
        let mut stmt = conn.prepare(&format!("SELECT {USER_COLUMNS} FROM {TABLE_NAME};"))?;

        let mut rows = stmt.query([])?;
        let mut users = Vec::new();
        while let Some(row) = rows.next()? {
            users.push(parse_user_row(row)?);
        }

        Ok(users)
    }

    fn try_save(&self, user: &User) -> RepoResult<User> {
        let conn = self.provider.connection()?;

        let changed = conn.execute(
            &format!("INSERT INTO {TABLE_NAME} (name, email, created_at) VALUES (?1, ?2, ?3);"),
            params![user.name(), user.email(), user.created_at()],
        )?;
        if changed == 0 {
            return Err(RepoError::NoRowsAffected);
        }

        // Same connection as the insert, so the rowid belongs to this row.
        let id = conn.last_insert_rowid();
        if id <= 0 {
            return Err(RepoError::MissingGeneratedKey);
        }

        Ok(user.persisted_as(id))
    }

    fn try_update(&self, user: &User) -> RepoResult<()> {
        let conn = self.provider.connection()?;

        let changed = conn.execute(
            &format!("UPDATE {TABLE_NAME} SET name = ?1, email = ?2 WHERE id = ?3;"),
            params![user.name(), user.email(), user.id()],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(user.id()));
        }

        Ok(())
    }

    fn try_delete_by_id(&self, id: UserId) -> RepoResult<bool> {
        let conn = self.provider.connection()?;

        let changed = conn.execute(&format!("DELETE FROM {TABLE_NAME} WHERE id = ?1;"), [id])?;
        Ok(changed > 0)
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    let id: UserId = row.get("id")?;
    if id <= 0 {
        return Err(RepoError::InvalidData(format!(
            "non-positive id `{id}` in {TABLE_NAME}.id"
        )));
    }

    Ok(User::from_parts(
        id,
        row.get::<_, String>("name")?,
        row.get::<_, String>("email")?,
        row.get::<_, i64>("created_at")?,
    ))
}
