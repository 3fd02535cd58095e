// src/db/connection.rs
//
// Database connection management
//
// PRINCIPLES:
// - Explicit connection pooling
// - No hidden connection creation
// - Every open failure is StorageUnavailable
// - Thread-safe access

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Type alias for connection pool
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled connection
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

const APP_DIR: &str = "imaginex";
const DB_FILE: &str = "vault.db";

/// Where the Vault lives and how the pool is sized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultConfig {
    pub database_path: PathBuf,
    pub max_connections: u32,
    pub busy_timeout_ms: u32,
    /// How long the pool waits for a connection before giving up
    pub open_timeout_ms: u64,
}

impl VaultConfig {
    /// Max 8 connections, 5s busy timeout, 2s open timeout
    pub fn at(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
            max_connections: 8,
            busy_timeout_ms: 5000,
            open_timeout_ms: 2000,
        }
    }

    /// Config pointing at {DATA_DIR}/imaginex/vault.db
    pub fn from_default_location() -> AppResult<Self> {
        Ok(Self::at(get_database_path()?))
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections.max(1);
        self
    }

    pub fn with_open_timeout_ms(mut self, open_timeout_ms: u64) -> Self {
        self.open_timeout_ms = open_timeout_ms.max(1);
        self
    }
}

/// Get the default database file path
///
/// Path structure: {APP_DATA}/imaginex/vault.db
pub fn get_database_path() -> AppResult<PathBuf> {
    let app_data_dir = dirs::data_dir().ok_or_else(|| {
        AppError::StorageUnavailable("Could not determine app data directory".to_string())
    })?;

    Ok(app_data_dir.join(APP_DIR).join(DB_FILE))
}

fn ensure_parent_dir(path: &Path) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::StorageUnavailable(format!(
                    "Cannot create vault directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}

fn init_connection(conn: &Connection, busy_timeout_ms: u32) -> rusqlite::Result<()> {
    conn.execute_batch(&format!(
        "PRAGMA foreign_keys = ON;
         PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA busy_timeout = {};",
        busy_timeout_ms
    ))
}

/// Open one connection directly so a corrupt or foreign file fails at once
/// instead of inside the pool's retry loop.
fn check_database_file(config: &VaultConfig) -> AppResult<()> {
    let unusable = |e: rusqlite::Error| {
        AppError::StorageUnavailable(format!(
            "Vault at {} is not a usable database: {}",
            config.database_path.display(),
            e
        ))
    };

    let conn = Connection::open(&config.database_path).map_err(unusable)?;
    init_connection(&conn, config.busy_timeout_ms).map_err(unusable)?;
    conn.query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))
        .map_err(unusable)?;
    Ok(())
}

/// Create a connection pool
///
/// - SQLite in WAL mode
/// - Foreign keys enabled (sources cascade with their record)
/// - Busy timeout and open timeout from config
pub fn create_connection_pool(config: &VaultConfig) -> AppResult<ConnectionPool> {
    ensure_parent_dir(&config.database_path)?;
    check_database_file(config)?;

    let busy_timeout = config.busy_timeout_ms;
    let manager = SqliteConnectionManager::file(&config.database_path)
        .with_init(move |conn| init_connection(conn, busy_timeout));

    let pool = Pool::builder()
        .max_size(config.max_connections)
        .connection_timeout(Duration::from_millis(config.open_timeout_ms))
        .build(manager)
        .map_err(|e| {
            AppError::StorageUnavailable(format!(
                "Failed to open vault at {}: {}",
                config.database_path.display(),
                e
            ))
        })?;

    log::debug!(
        "Opened vault pool at {} (max {} connections)",
        config.database_path.display(),
        config.max_connections
    );

    Ok(pool)
}

/// Single-connection pool over an in-memory database.
///
/// Every r2d2 connection to `:memory:` is a separate database, so the
/// pool is capped at one connection.
pub fn create_in_memory_pool() -> AppResult<ConnectionPool> {
    let manager = SqliteConnectionManager::memory()
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

    Pool::builder()
        .max_size(1)
        .build(manager)
        .map_err(|e| AppError::StorageUnavailable(format!("Failed to open in-memory vault: {}", e)))
}

/// Get a connection from the pool
pub fn get_connection(pool: &ConnectionPool) -> AppResult<PooledConn> {
    pool.get().map_err(|e| {
        AppError::StorageUnavailable(format!("Failed to get database connection: {}", e))
    })
}

/// Create a standalone in-memory connection (for testing)
pub fn create_test_connection() -> AppResult<Connection> {
    let conn = Connection::open_in_memory().map_err(AppError::unavailable)?;

    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(AppError::unavailable)?;

    Ok(conn)
}
