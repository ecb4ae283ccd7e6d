use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, warn};

use super::scope::ViewModelScope;
use crate::domain::TaskUseCases;
use crate::error::TodoError;
use crate::task::Task;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEditState {
    pub title: String,
    pub description: String,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl TaskEditState {
    /// The screen only offers save once the title has visible text and no
    /// load or save is in flight.
    pub fn can_save(&self) -> bool {
        !self.is_loading && !self.title.trim().is_empty()
    }
}

#[derive(Debug, Clone)]
pub enum TaskEditEvent {
    EnteredTitle(String),
    EnteredDescription(String),
    Save,
}

/// State for the create/edit screen.
///
/// `task_id == None` creates a new task on save. `Some(id)` loads that task
/// first and updates it on save, keeping its id, creation time and
/// completion flag. Until that task has loaded, field edits and saves are
/// ignored.
pub struct TaskEditViewModel {
    use_cases: TaskUseCases,
    task_id: Option<i64>,
    state: Arc<watch::Sender<TaskEditState>>,
    original: Arc<Mutex<Option<Task>>>,
    scope: ViewModelScope,
}

impl TaskEditViewModel {
    /// In edit mode this spawns the load; call from within a tokio runtime.
    pub fn new(use_cases: TaskUseCases, task_id: Option<i64>) -> Self {
        let (state, _) = watch::channel(TaskEditState::default());
        let view_model = Self {
            use_cases,
            task_id,
            state: Arc::new(state),
            original: Arc::new(Mutex::new(None)),
            scope: ViewModelScope::new(),
        };
        if let Some(id) = task_id {
            view_model.load(id);
        }
        view_model
    }

    pub fn task_id(&self) -> Option<i64> {
        self.task_id
    }

    pub fn is_edit_mode(&self) -> bool {
        self.task_id.is_some()
    }

    pub fn state(&self) -> watch::Receiver<TaskEditState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> TaskEditState {
        self.state.borrow().clone()
    }

    /// True once nothing this holder started is still running.
    pub fn is_idle(&self) -> bool {
        self.scope.is_idle()
    }

    pub fn scope(&self) -> &ViewModelScope {
        &self.scope
    }

    /// Whether a save dispatched now would be carried out.
    pub fn can_save(&self) -> bool {
        self.snapshot().can_save() && self.is_editable()
    }

    /// Create mode is always editable; edit mode only once the task is loaded.
    fn is_editable(&self) -> bool {
        self.task_id.is_none() || self.original.lock().is_some()
    }

    pub fn on_event(&self, event: TaskEditEvent) {
        if !self.is_editable() {
            debug!(id = ?self.task_id, ?event, "task not loaded, ignoring edit");
            return;
        }
        match event {
            TaskEditEvent::EnteredTitle(title) => {
                self.state.send_modify(|state| state.title = title);
            }
            TaskEditEvent::EnteredDescription(description) => {
                self.state.send_modify(|state| state.description = description);
            }
            TaskEditEvent::Save => self.save(),
        }
    }

    fn load(&self, id: i64) {
        self.state.send_modify(|state| state.is_loading = true);
        let get_by_id = self.use_cases.get_by_id.clone();
        let state = Arc::clone(&self.state);
        let original = Arc::clone(&self.original);
        self.scope.launch(async move {
            match get_by_id.execute(id).await {
                Ok(Some(task)) => {
                    let (title, description) = (task.title.clone(), task.description.clone());
                    *original.lock() = Some(task);
                    state.send_modify(|state| {
                        state.title = title;
                        state.description = description;
                        state.is_loading = false;
                    });
                }
                Ok(None) => {
                    debug!(id, "task to edit no longer exists");
                    state.send_modify(|state| state.is_loading = false);
                }
                Err(err) => report(&state, "load", err),
            }
        });
    }

    fn save(&self) {
        let current = self.snapshot();
        if current.is_loading {
            debug!(id = ?self.task_id, "save already in flight");
            return;
        }
        let (task, edit_mode) = match self.original.lock().as_ref() {
            Some(original) => (
                Task {
                    title: current.title,
                    description: current.description,
                    ..original.clone()
                },
                true,
            ),
            None => (Task::new(current.title, current.description), false),
        };

        self.state.send_modify(|state| state.is_loading = true);
        let use_cases = self.use_cases.clone();
        let state = Arc::clone(&self.state);
        self.scope.launch(async move {
            let saved = if edit_mode {
                use_cases.update.execute(&task).await
            } else {
                use_cases.add.execute(&task).await.map(|_| ())
            };
            match saved {
                Ok(()) => state.send_modify(|state| state.is_loading = false),
                Err(err) => report(&state, "save", err),
            }
        });
    }
}

fn report(state: &watch::Sender<TaskEditState>, action: &str, err: TodoError) {
    warn!(action, error = %err, "task edit operation failed");
    state.send_modify(|state| {
        state.is_loading = false;
        state.error = Some(err.to_string());
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::test_support::{failing_use_cases, in_memory_use_cases, wait_until};

    #[tokio::test]
    async fn create_mode_starts_blank_and_inserts_on_save() {
        let (use_cases, repository) = in_memory_use_cases();
        let view_model = TaskEditViewModel::new(use_cases, None);
        assert!(!view_model.is_edit_mode());
        assert_eq!(view_model.snapshot(), TaskEditState::default());

        view_model.on_event(TaskEditEvent::EnteredTitle("Buy milk".into()));
        view_model.on_event(TaskEditEvent::EnteredDescription("2%".into()));
        view_model.on_event(TaskEditEvent::Save);

        let mut rx = view_model.state();
        let state = wait_until(&mut rx, |s| !s.is_loading).await;
        assert_eq!(state.error, None);

        let mut stream = repository.observe_all();
        let tasks = futures::StreamExt::next(&mut stream).await.unwrap().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Buy milk");
        assert_eq!(tasks[0].description, "2%");
        assert!(!tasks[0].is_completed);
        assert_ne!(tasks[0].id, 0);
    }

    #[tokio::test]
    async fn edit_mode_loads_fields() {
        let (use_cases, _repository) = in_memory_use_cases();
        let id = use_cases
            .add
            .execute(&Task::new("Call mom", "Sunday"))
            .await
            .unwrap();

        let view_model = TaskEditViewModel::new(use_cases, Some(id));
        assert!(view_model.is_edit_mode());
        let mut rx = view_model.state();
        let state = wait_until(&mut rx, |s| !s.is_loading).await;

        assert_eq!(state.title, "Call mom");
        assert_eq!(state.description, "Sunday");
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn edit_save_keeps_id_creation_time_and_completion() {
        let (use_cases, repository) = in_memory_use_cases();
        let mut task = Task::new("Draft", "");
        task.created_at = 1_000;
        task.is_completed = true;
        let id = use_cases.add.execute(&task).await.unwrap();

        let view_model = TaskEditViewModel::new(use_cases, Some(id));
        let mut rx = view_model.state();
        wait_until(&mut rx, |s| !s.is_loading).await;

        view_model.on_event(TaskEditEvent::EnteredTitle("Final".into()));
        view_model.on_event(TaskEditEvent::Save);
        wait_until(&mut rx, |s| !s.is_loading).await;

        let stored = repository.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.id, id);
        assert_eq!(stored.title, "Final");
        assert_eq!(stored.created_at, 1_000);
        assert!(stored.is_completed);
    }

    #[tokio::test]
    async fn save_before_load_finishes_leaves_the_stored_task_alone() {
        let (use_cases, repository) = in_memory_use_cases();
        let mut task = Task::new("Draft", "notes");
        task.created_at = 1_000;
        task.is_completed = true;
        let id = use_cases.add.execute(&task).await.unwrap();

        let view_model = TaskEditViewModel::new(use_cases, Some(id));
        assert!(!view_model.can_save());
        view_model.on_event(TaskEditEvent::EnteredTitle("typed fast".into()));
        view_model.on_event(TaskEditEvent::Save);
        view_model.scope().drain().await;

        let stored = repository.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Draft");
        assert_eq!(stored.created_at, 1_000);
        assert!(stored.is_completed);

        let state = view_model.snapshot();
        assert_eq!(state.title, "Draft");
        assert!(view_model.can_save());
    }

    #[tokio::test]
    async fn failed_load_never_saves() {
        let view_model = TaskEditViewModel::new(failing_use_cases(), Some(1));
        let mut rx = view_model.state();
        wait_until(&mut rx, |s| s.error.is_some()).await;

        view_model.on_event(TaskEditEvent::EnteredTitle("anything".into()));
        view_model.on_event(TaskEditEvent::Save);
        assert!(!view_model.snapshot().is_loading);
        assert!(!view_model.can_save());
        assert!(view_model.snapshot().title.is_empty());
    }

    #[tokio::test]
    async fn missing_task_leaves_fields_blank() {
        let (use_cases, _repository) = in_memory_use_cases();
        let view_model = TaskEditViewModel::new(use_cases, Some(99));
        let mut rx = view_model.state();
        let state = wait_until(&mut rx, |s| !s.is_loading).await;

        assert!(state.title.is_empty());
        assert_eq!(state.error, None);
        assert!(!state.can_save());
    }

    #[tokio::test]
    async fn load_failure_surfaces_as_error() {
        let view_model = TaskEditViewModel::new(failing_use_cases(), Some(1));
        let mut rx = view_model.state();
        let state = wait_until(&mut rx, |s| s.error.is_some()).await;
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn save_failure_surfaces_as_error() {
        let view_model = TaskEditViewModel::new(failing_use_cases(), None);
        view_model.on_event(TaskEditEvent::EnteredTitle("doomed".into()));
        view_model.on_event(TaskEditEvent::Save);

        let mut rx = view_model.state();
        let state = wait_until(&mut rx, |s| !s.is_loading).await;
        assert!(state.error.is_some());
        assert_eq!(state.title, "doomed");
    }

    #[test]
    fn blank_titles_cannot_be_saved() {
        let mut state = TaskEditState::default();
        assert!(!state.can_save());
        state.title = "   ".into();
        assert!(!state.can_save());
        state.title = " x ".into();
        assert!(state.can_save());
        state.is_loading = true;
        assert!(!state.can_save());
    }
}
