use chrono::Utc;

/// A to-do item as the rest of the app sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// 0 until the task has been inserted.
    pub id: i64,
    pub title: String,
    pub description: String,
    pub is_completed: bool,
    /// Epoch milliseconds, fixed when the task is first built.
    pub created_at: i64,
}

impl Task {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            description: description.into(),
            is_completed: false,
            created_at: now_millis(),
        }
    }

    /// Same task with the completion flag flipped.
    pub fn toggled(&self) -> Self {
        Self {
            is_completed: !self.is_completed,
            ..self.clone()
        }
    }
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
