use rusqlite::Connection;
use std::path::PathBuf;
use userstore_core::{
    ensure_schema, open_pool, ConnectionProvider, DbConfig, DbError, DbResult, RepoError,
    SqliteUserRepository, User, UserRepository, TABLE_NAME,
};

/// Unpooled provider opening a fresh connection to one file per call.
struct FileProvider {
    path: PathBuf,
}

impl ConnectionProvider for FileProvider {
    type Conn = Box<Connection>;

    fn connection(&self) -> DbResult<Self::Conn> {
        Ok(Box::new(Connection::open(&self.path)?))
    }
}

#[test]
fn open_pool_provisions_users_table() {
    let pool = open_pool(&DbConfig::in_memory()).unwrap();
    let conn = pool.get().unwrap();
    assert_table_exists(&conn, TABLE_NAME);
}

#[test]
fn file_database_survives_reopening() {
    let dir = tempfile::tempdir().unwrap();
    let config = DbConfig::file(dir.path().join("users.db")).with_max_connections(2);

    let saved = {
        let repo = SqliteUserRepository::new(open_pool(&config).unwrap());
        repo.save(&User::new("John Doe", "john.doe@example.com"))
    };

    let repo = SqliteUserRepository::new(open_pool(&config).unwrap());
    assert_eq!(repo.find_by_id(saved.id()), Some(saved));
}

#[test]
fn separate_memory_configs_do_not_share_data() {
    let first = SqliteUserRepository::new(open_pool(&DbConfig::in_memory()).unwrap());
    let second = SqliteUserRepository::new(open_pool(&DbConfig::in_memory()).unwrap());

    first.save(&User::new("only here", "here@example.com"));
    assert_eq!(first.find_all().len(), 1);
    assert!(second.find_all().is_empty());
}

#[test]
fn ensure_schema_accepts_existing_table() {
    let conn = Connection::open_in_memory().unwrap();
    ensure_schema(&conn).unwrap();
    ensure_schema(&conn).unwrap();
    assert_table_exists(&conn, TABLE_NAME);
}

#[test]
fn empty_file_path_is_rejected() {
    let err = open_pool(&DbConfig::file("")).unwrap_err();
    assert!(matches!(err, DbError::Config(_)));
}

#[test]
fn injected_provider_needs_its_own_schema() {
    let dir = tempfile::tempdir().unwrap();
    let provider = FileProvider {
        path: dir.path().join("users.db"),
    };
    let repo = SqliteUserRepository::new(provider);

    assert!(matches!(
        repo.try_find_all(),
        Err(RepoError::Db(DbError::Sqlite(_)))
    ));

    ensure_schema(&repo.provider().connection().unwrap()).unwrap();
    let saved = repo.save(&User::new("John Doe", "john.doe@example.com"));
    assert!(saved.is_persisted());
    assert_eq!(repo.find_by_id(saved.id()), Some(saved));
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
