use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::Result;
use crate::task::Task;

/// Live list of every task, newest first.
pub type TaskStream = BoxStream<'static, Result<Vec<Task>>>;

/// Domain-facing storage for tasks.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Emits the current list immediately and again after every change.
    fn observe_all(&self) -> TaskStream;

    async fn get_by_id(&self, id: i64) -> Result<Option<Task>>;

    /// Returns the id assigned to the new task.
    async fn insert(&self, task: &Task) -> Result<i64>;

    async fn update(&self, task: &Task) -> Result<()>;

    async fn delete(&self, id: i64) -> Result<()>;
}
