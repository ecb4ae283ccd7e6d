use std::sync::Arc;

use crate::data::{SqliteTaskRepository, TaskDatabase};
use crate::domain::{TaskRepository, TaskUseCases};

/// Builds the object graph once at startup.
pub struct AppContainer {
    use_cases: TaskUseCases,
}

impl AppContainer {
    pub fn new(database: &TaskDatabase) -> Self {
        let repository: Arc<dyn TaskRepository> =
            Arc::new(SqliteTaskRepository::new(database.dao()));
        Self {
            use_cases: TaskUseCases::new(repository),
        }
    }

    pub fn use_cases(&self) -> TaskUseCases {
        self.use_cases.clone()
    }
}
