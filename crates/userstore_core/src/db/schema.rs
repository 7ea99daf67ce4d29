//! `users` table provisioning.
//!
//! # Responsibility
//! - Own the table name shared by repository SQL and provisioning code.
//! - Create the table when it is missing.
//!
//! # Invariants
//! - Provisioning is idempotent and never alters an existing table.

use super::DbResult;
use rusqlite::Connection;

/// Name of the table backing `User` rows.
pub const TABLE_NAME: &str = "users";

/// Creates the `users` table if it does not exist yet.
///
/// `AUTOINCREMENT` keeps ids of deleted rows from being handed out again.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS {TABLE_NAME} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            created_at INTEGER NOT NULL
        );"
    ))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ensure_schema, TABLE_NAME};
    use rusqlite::Connection;

    #[test]
    fn ensure_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        conn.execute(
            &format!("INSERT INTO {TABLE_NAME} (name, email, created_at) VALUES ('a', 'b', 1);"),
            [],
        )
        .unwrap();

        ensure_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM {TABLE_NAME};"), [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, 1);
    }
}
