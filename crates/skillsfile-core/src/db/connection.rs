//! Database connection management

use crate::error::Result;
use rusqlite::Connection;
use std::path::Path;

use super::migrations;

/// Owns the `SQLite` connection for the local store.
///
/// There is no process-wide handle: construct one and pass it (or a
/// `SyncService` wrapping it) to whatever needs the store.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open a database at the given path, creating it if it doesn't exist
    ///
    /// Runs migrations automatically.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open an in-memory database (useful for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let database = Self { conn };
        database.configure()?;
        database.migrate()?;
        Ok(database)
    }

    /// Configure `SQLite` for the local store
    fn configure(&self) -> Result<()> {
        // In-memory databases report "memory" instead of switching to WAL.
        let journal_mode = self
            .conn
            .query_row("PRAGMA journal_mode = WAL", [], |row| row.get::<_, String>(0));
        match journal_mode {
            Ok(mode) => tracing::debug!("Journal mode: {mode}"),
            Err(error) => tracing::debug!("Could not enable WAL journal mode: {error}"),
        }
        self.conn.execute_batch(
            "PRAGMA synchronous = NORMAL;
             PRAGMA foreign_keys = ON;",
        )?;
        Ok(())
    }

    /// Run database migrations
    fn migrate(&self) -> Result<()> {
        migrations::run(&self.conn)
    }

    /// Get a reference to the underlying connection
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        let foreign_keys: i64 = db
            .connection()
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(foreign_keys, 1);
    }

    #[test]
    fn test_journal_mode_per_backing() {
        let tmp = tempdir().unwrap();
        let journal_mode = |db: &Database| -> String {
            db.connection()
                .query_row("PRAGMA journal_mode", [], |row| row.get(0))
                .unwrap()
        };

        let file = Database::open(tmp.path().join("skillsfile.db")).unwrap();
        assert_eq!(journal_mode(&file), "wal");

        let memory = Database::open_in_memory().unwrap();
        assert_eq!(journal_mode(&memory), "memory");
    }

    #[test]
    fn test_open_file_twice_keeps_schema() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("skillsfile.db");

        {
            let db = Database::open(&path).unwrap();
            db.connection()
                .execute(
                    "INSERT INTO companies (uid, name, status, creator, updator, synced)
                     VALUES ('C1', 'Acme', 0, '', '', 1)",
                    [],
                )
                .unwrap();
        }

        let db = Database::open(&path).unwrap();
        let count: i64 = db
            .connection()
            .query_row("SELECT COUNT(*) FROM companies", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
