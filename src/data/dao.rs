use std::sync::Arc;

use futures::stream::{BoxStream, StreamExt};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::debug;

use super::entity::TaskEntity;
use crate::error::Result;

/// Row-level access to the `todos` table.
///
/// Every write that changes at least one row bumps an invalidation counter;
/// [`TaskDao::observe_all`] re-queries on each bump so subscribers always see
/// a full, fresh snapshot.
pub struct TaskDao {
    conn: Arc<Mutex<Connection>>,
    invalidations: watch::Sender<u64>,
}

impl TaskDao {
    pub(crate) fn new(conn: Connection) -> Self {
        let (invalidations, _) = watch::channel(0);
        Self {
            conn: Arc::new(Mutex::new(conn)),
            invalidations,
        }
    }

    /// Runs `f` against the connection on the blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let result = tokio::task::spawn_blocking(move || {
            let conn = conn.lock();
            f(&conn)
        })
        .await?;
        Ok(result?)
    }

    fn invalidate(&self) {
        self.invalidations.send_modify(|generation| *generation += 1);
    }

    pub async fn get_all(&self) -> Result<Vec<TaskEntity>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {} FROM todos ORDER BY created_at DESC, id DESC",
                TaskEntity::COLUMNS
            );
            let mut stmt = conn.prepare_cached(&sql)?;
            let rows = stmt
                .query_map([], TaskEntity::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        })
        .await
    }

    /// Current snapshot first, then a new snapshot after every change.
    pub fn observe_all(self: &Arc<Self>) -> BoxStream<'static, Result<Vec<TaskEntity>>> {
        let dao = Arc::clone(self);
        WatchStream::new(self.invalidations.subscribe())
            .then(move |_| {
                let dao = Arc::clone(&dao);
                async move { dao.get_all().await }
            })
            .boxed()
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<TaskEntity>> {
        self.with_conn(move |conn| {
            let sql = format!("SELECT {} FROM todos WHERE id = ?1", TaskEntity::COLUMNS);
            conn.query_row(&sql, params![id], TaskEntity::from_row)
                .optional()
        })
        .await
    }

    /// Inserts `row` and returns its id. `id == 0` lets SQLite assign one.
    pub async fn insert(&self, row: TaskEntity) -> Result<i64> {
        let id = self
            .with_conn(move |conn| {
                if row.id == 0 {
                    conn.execute(
                        "INSERT INTO todos (title, description, is_completed, created_at)
                         VALUES (?1, ?2, ?3, ?4)",
                        params![row.title, row.description, row.is_completed, row.created_at],
                    )?;
                } else {
                    conn.execute(
                        "INSERT INTO todos (id, title, description, is_completed, created_at)
                         VALUES (?1, ?2, ?3, ?4, ?5)",
                        params![
                            row.id,
                            row.title,
                            row.description,
                            row.is_completed,
                            row.created_at
                        ],
                    )?;
                }
                Ok(conn.last_insert_rowid())
            })
            .await?;
        debug!(id, "inserted task");
        self.invalidate();
        Ok(id)
    }

    /// Rewrites the editable columns of the row with the same id. `created_at`
    /// is fixed at insert. Missing rows are left alone.
    pub async fn update(&self, row: TaskEntity) -> Result<()> {
        let id = row.id;
        let changed = self
            .with_conn(move |conn| {
                conn.execute(
                    "UPDATE todos
                     SET title = ?2, description = ?3, is_completed = ?4
                     WHERE id = ?1",
                    params![row.id, row.title, row.description, row.is_completed],
                )
            })
            .await?;
        debug!(id, changed, "updated task");
        if changed > 0 {
            self.invalidate();
        }
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let changed = self
            .with_conn(move |conn| conn.execute("DELETE FROM todos WHERE id = ?1", params![id]))
            .await?;
        debug!(id, changed, "deleted task");
        if changed > 0 {
            self.invalidate();
        }
        Ok(())
    }
}
