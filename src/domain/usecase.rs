//! One type per operation the screens can ask for.

use std::sync::Arc;

use super::repository::{TaskRepository, TaskStream};
use crate::error::Result;
use crate::task::Task;

#[derive(Clone)]
pub struct AddTask {
    repository: Arc<dyn TaskRepository>,
}

impl AddTask {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, task: &Task) -> Result<i64> {
        self.repository.insert(task).await
    }
}

#[derive(Clone)]
pub struct UpdateTask {
    repository: Arc<dyn TaskRepository>,
}

impl UpdateTask {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, task: &Task) -> Result<()> {
        self.repository.update(task).await
    }
}

#[derive(Clone)]
pub struct DeleteTask {
    repository: Arc<dyn TaskRepository>,
}

impl DeleteTask {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: i64) -> Result<()> {
        self.repository.delete(id).await
    }
}

#[derive(Clone)]
pub struct GetTaskById {
    repository: Arc<dyn TaskRepository>,
}

impl GetTaskById {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: i64) -> Result<Option<Task>> {
        self.repository.get_by_id(id).await
    }
}

#[derive(Clone)]
pub struct ObserveTasks {
    repository: Arc<dyn TaskRepository>,
}

impl ObserveTasks {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    pub fn execute(&self) -> TaskStream {
        self.repository.observe_all()
    }
}

/// Every use case, built over one repository.
#[derive(Clone)]
pub struct TaskUseCases {
    pub add: AddTask,
    pub update: UpdateTask,
    pub delete: DeleteTask,
    pub get_by_id: GetTaskById,
    pub observe: ObserveTasks,
}

impl TaskUseCases {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self {
            add: AddTask::new(Arc::clone(&repository)),
            update: UpdateTask::new(Arc::clone(&repository)),
            delete: DeleteTask::new(Arc::clone(&repository)),
            get_by_id: GetTaskById::new(Arc::clone(&repository)),
            observe: ObserveTasks::new(repository),
        }
    }
}
