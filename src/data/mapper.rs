//! Conversions between storage rows and domain tasks.

use super::entity::TaskEntity;
use crate::task::Task;

impl From<TaskEntity> for Task {
    fn from(row: TaskEntity) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            is_completed: row.is_completed,
            created_at: row.created_at,
        }
    }
}

impl From<&Task> for TaskEntity {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            is_completed: task.is_completed,
            created_at: task.created_at,
        }
    }
}

pub fn to_domain_list(rows: Vec<TaskEntity>) -> Vec<Task> {
    rows.into_iter().map(Task::from).collect()
}
