use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use tokio::sync::watch;

use crate::data::{SqliteTaskRepository, TaskDatabase};
use crate::domain::{TaskRepository, TaskStream, TaskUseCases};
use crate::error::{Result, TodoError};
use crate::task::Task;

/// Use cases over a fresh in-memory database, plus the repository behind them.
pub(crate) fn in_memory_use_cases() -> (TaskUseCases, Arc<dyn TaskRepository>) {
    let database = TaskDatabase::open_in_memory().expect("in-memory database");
    let repository: Arc<dyn TaskRepository> = Arc::new(SqliteTaskRepository::new(database.dao()));
    (TaskUseCases::new(Arc::clone(&repository)), repository)
}

pub(crate) fn failing_use_cases() -> TaskUseCases {
    TaskUseCases::new(Arc::new(FailingRepository))
}

fn failure() -> TodoError {
    TodoError::Database(rusqlite::Error::InvalidQuery)
}

/// Every call fails, as a broken database would.
pub(crate) struct FailingRepository;

#[async_trait]
impl TaskRepository for FailingRepository {
    fn observe_all(&self) -> TaskStream {
        stream::once(async { Err(failure()) }).boxed()
    }

    async fn get_by_id(&self, _id: i64) -> Result<Option<Task>> {
        Err(failure())
    }

    async fn insert(&self, _task: &Task) -> Result<i64> {
        Err(failure())
    }

    async fn update(&self, _task: &Task) -> Result<()> {
        Err(failure())
    }

    async fn delete(&self, _id: i64) -> Result<()> {
        Err(failure())
    }
}

/// Waits (bounded) until the published state satisfies `done`.
pub(crate) async fn wait_until<T: Clone>(
    rx: &mut watch::Receiver<T>,
    done: impl FnMut(&T) -> bool,
) -> T {
    let state = tokio::time::timeout(Duration::from_secs(2), rx.wait_for(done))
        .await
        .expect("state did not settle in time")
        .expect("state holder dropped");
    T::clone(&state)
}
