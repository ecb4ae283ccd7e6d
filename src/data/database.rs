use std::path::Path;
use std::sync::Arc;

use rusqlite::Connection;
use tracing::{debug, info};

use super::dao::TaskDao;
use crate::error::Result;

const SCHEMA_VERSION: i64 = 1;

const SCHEMA_V1: &str = "
CREATE TABLE IF NOT EXISTS todos (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    title        TEXT    NOT NULL,
    description  TEXT    NOT NULL,
    is_completed INTEGER NOT NULL DEFAULT 0,
    created_at   INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_todos_created_at ON todos(created_at);
";

/// Owns the SQLite connection and hands out the DAO built on it.
pub struct TaskDatabase {
    dao: Arc<TaskDao>,
}

impl TaskDatabase {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "opening task database");
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        migrate(&conn)?;
        Ok(Self {
            dao: Arc::new(TaskDao::new(conn)),
        })
    }

    pub fn dao(&self) -> Arc<TaskDao> {
        Arc::clone(&self.dao)
    }
}

fn migrate(conn: &Connection) -> Result<()> {
    let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    if version < SCHEMA_VERSION {
        debug!(from = version, to = SCHEMA_VERSION, "migrating schema");
        conn.execute_batch(SCHEMA_V1)?;
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migration_sets_user_version() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        let version: i64 = conn
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, SCHEMA_VERSION);
        // second run is a no-op
        migrate(&conn).unwrap();
    }

    #[test]
    fn reopening_a_file_keeps_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todos.db");
        {
            let conn = Connection::open(&path).unwrap();
            migrate(&conn).unwrap();
            conn.execute(
                "INSERT INTO todos (title, description, is_completed, created_at) VALUES ('a', '', 0, 1)",
                [],
            )
            .unwrap();
        }
        let conn = Connection::open(&path).unwrap();
        migrate(&conn).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM todos", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
