// src/db/connection.rs
//
// Database connection management
//
// PRINCIPLES:
// - One connection per repository call
// - Connections are released on drop, on every exit path
// - Clear error propagation
// - Foreign keys enforced on every connection

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::ops::Deref;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{AppError, AppResult};

/// Environment variable that overrides the default database location
pub const DATABASE_ENV_VAR: &str = "TABLOID_DATABASE";

/// Pragmas applied to every freshly opened connection
const CONNECTION_PRAGMAS: &str = "PRAGMA foreign_keys = ON;
     PRAGMA busy_timeout = 5000;";

/// Type alias for connection pool
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled connection
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Hands out an open connection to the store.
///
/// Every call yields a connection the caller owns for the duration of a
/// single operation. Dropping it releases the connection.
#[cfg_attr(test, mockall::automock(type Conn = ScopedConnection;))]
pub trait ConnectionProvider: Send + Sync {
    type Conn: Deref<Target = Connection>;

    fn connect(&self) -> AppResult<Self::Conn>;
}

/// A connection opened for one operation and closed when dropped.
#[derive(Debug)]
pub struct ScopedConnection(Connection);

impl Deref for ScopedConnection {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        &self.0
    }
}

/// Opens a fresh SQLite connection from a connection string on every call.
///
/// The connection string is a file path or a `file:` URI. `:memory:` is
/// accepted but every call then sees its own empty database.
#[derive(Debug, Clone)]
pub struct DatabaseConnector {
    connection_string: String,
}

impl DatabaseConnector {
    pub fn new(connection_string: impl Into<String>) -> Self {
        Self {
            connection_string: connection_string.into(),
        }
    }

    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }
}

impl ConnectionProvider for DatabaseConnector {
    type Conn = ScopedConnection;

    fn connect(&self) -> AppResult<ScopedConnection> {
        let conn = Connection::open(&self.connection_string)?;
        conn.execute_batch(CONNECTION_PRAGMAS)?;
        Ok(ScopedConnection(conn))
    }
}

/// Hands out connections from an r2d2 pool.
///
/// A pooled connection goes back to the pool when dropped instead of closing.
#[derive(Clone)]
pub struct PoolConnector {
    pool: Arc<ConnectionPool>,
}

impl PoolConnector {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

impl ConnectionProvider for PoolConnector {
    type Conn = PooledConn;

    fn connect(&self) -> AppResult<PooledConn> {
        get_connection(&self.pool)
    }
}

/// Get the default database file path
///
/// Path structure: {APP_DATA}/tabloid/tabloid.db
pub fn get_database_path() -> AppResult<PathBuf> {
    let app_data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Other("Could not determine app data directory".to_string()))?;

    let tabloid_dir = app_data_dir.join("tabloid");

    std::fs::create_dir_all(&tabloid_dir)?;

    Ok(tabloid_dir.join("tabloid.db"))
}

/// Resolve the connection string for this process.
///
/// `TABLOID_DATABASE` wins when set and non-empty, otherwise the default
/// data directory path is used.
pub fn resolve_connection_string() -> AppResult<String> {
    connection_string_from(std::env::var(DATABASE_ENV_VAR).ok())
}

fn connection_string_from(override_value: Option<String>) -> AppResult<String> {
    match override_value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Ok(get_database_path()?.to_string_lossy().into_owned()),
    }
}

/// Create a connection pool
///
/// Pool configuration:
/// - Max 15 connections
/// - Foreign keys enabled
/// - Busy timeout set to avoid immediate errors
pub fn create_connection_pool(connection_string: &str) -> AppResult<ConnectionPool> {
    let manager = SqliteConnectionManager::file(connection_string).with_init(|conn| {
        conn.execute_batch(CONNECTION_PRAGMAS)?;
        Ok(())
    });

    let pool = Pool::builder()
        .max_size(15)
        .build(manager)
        .map_err(|e| AppError::Pool(format!("Failed to create connection pool: {}", e)))?;

    Ok(pool)
}

/// Get a connection from the pool
pub fn get_connection(pool: &ConnectionPool) -> AppResult<PooledConn> {
    pool.get()
        .map_err(|e| AppError::Pool(format!("Failed to get database connection: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_database_path_creation() {
        let path = get_database_path().unwrap();
        assert!(path.ends_with("tabloid/tabloid.db"));
    }

    #[test]
    fn test_override_wins_when_present() {
        let resolved = connection_string_from(Some("/tmp/blogs.db".to_string())).unwrap();
        assert_eq!(resolved, "/tmp/blogs.db");
    }

    #[test]
    fn test_blank_override_falls_back_to_default_path() {
        let resolved = connection_string_from(Some("   ".to_string())).unwrap();
        assert!(resolved.ends_with("tabloid.db"));
    }

    #[test]
    fn test_connector_enables_foreign_keys() {
        let dir = TempDir::new().unwrap();
        let connector = DatabaseConnector::new(dir.path().join("fk.db").to_string_lossy());
        let conn = connector.connect().unwrap();

        let fk_enabled: i32 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk_enabled, 1);
    }

    #[test]
    fn test_connector_opens_fresh_connection_per_call() {
        let connector = DatabaseConnector::new(":memory:");

        let first = connector.connect().unwrap();
        first.execute_batch("CREATE TABLE scratch (x INTEGER)").unwrap();

        // A second in-memory connection is an unrelated database.
        let second = connector.connect().unwrap();
        let exists: bool = second
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE name = 'scratch')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(!exists);
    }

    #[test]
    fn test_unopenable_path_is_a_database_error() {
        let connector = DatabaseConnector::new("/definitely/not/a/dir/tabloid.db");
        let result = connector.connect();
        assert!(matches!(result, Err(AppError::Database(_))));
    }

    #[test]
    fn test_pool_connector_enables_foreign_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pool.db");
        let pool = create_connection_pool(&path.to_string_lossy()).unwrap();
        let connector = PoolConnector::new(Arc::new(pool));

        let conn = connector.connect().unwrap();
        let fk_enabled: i32 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk_enabled, 1);
    }
}
