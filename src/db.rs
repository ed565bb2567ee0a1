// SQLite key-value backend - durable stand-in for browser local storage

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::storage::{StorageBackend, StorageError};

/// `StorageBackend` over a single-table SQLite database.
///
/// The whole substrate is one `kv` table; each key holds the JSON-encoded
/// list for a category (or the theme preference), exactly as the in-memory
/// backend does. rusqlite serializes access through the connection, which
/// is all the synchronization the single-writer model needs.
pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    /// Open (or create) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;

        // Enable WAL mode for crash recovery
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Self::from_connection(conn)
    }

    /// Open a throwaway in-memory database.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;

        Ok(SqliteBackend { conn })
    }
}

impl StorageBackend for SqliteBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;

        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;

        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
