use crate::{
    error::{Result, TabulaError},
    storage::KeyValueSlot,
};
use async_trait::async_trait;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// SQLite-backed slot keeping every key in a single `slots` table
///
/// Useful when a host wants board state inside an existing database file
/// instead of loose JSON files.
pub struct SqliteSlot {
    connection: Mutex<Connection>,
}

impl SqliteSlot {
    /// Opens (or creates) the database at the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_connection(Connection::open(path).map_err(sqlite_error)?)
    }

    /// Opens an in-memory database, mainly for tests
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory().map_err(sqlite_error)?)
    }

    fn from_connection(connection: Connection) -> Result<Self> {
        connection
            .execute(
                "CREATE TABLE IF NOT EXISTS slots (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
                [],
            )
            .map_err(sqlite_error)?;

        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>> {
        self.connection
            .lock()
            .map_err(|_| TabulaError::StorageError("sqlite connection lock poisoned".to_string()))
    }
}

fn sqlite_error(err: rusqlite::Error) -> TabulaError {
    TabulaError::StorageError(err.to_string())
}

#[async_trait]
impl KeyValueSlot for SqliteSlot {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let connection = self.connection()?;

        match connection.query_row("SELECT value FROM slots WHERE key = ?1", [key], |row| {
            row.get(0)
        }) {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(err) => Err(sqlite_error(err)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let connection = self.connection()?;

        connection
            .execute(
                "INSERT OR REPLACE INTO slots (key, value) VALUES (?1, ?2)",
                [key, value],
            )
            .map_err(sqlite_error)?;
        Ok(())
    }
}
