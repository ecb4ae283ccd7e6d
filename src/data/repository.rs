use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::StreamExt;

use super::dao::TaskDao;
use super::entity::TaskEntity;
use super::mapper::to_domain_list;
use crate::domain::repository::{TaskRepository, TaskStream};
use crate::error::Result;
use crate::task::Task;

/// [`TaskRepository`] backed by the SQLite DAO.
pub struct SqliteTaskRepository {
    dao: Arc<TaskDao>,
}

impl SqliteTaskRepository {
    pub fn new(dao: Arc<TaskDao>) -> Self {
        Self { dao }
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    fn observe_all(&self) -> TaskStream {
        self.dao
            .observe_all()
            .map(|rows| rows.map(to_domain_list))
            .boxed()
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Task>> {
        Ok(self.dao.get_by_id(id).await?.map(Task::from))
    }

    async fn insert(&self, task: &Task) -> Result<i64> {
        self.dao.insert(TaskEntity::from(task)).await
    }

    async fn update(&self, task: &Task) -> Result<()> {
        self.dao.update(TaskEntity::from(task)).await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.dao.delete(id).await
    }
}
