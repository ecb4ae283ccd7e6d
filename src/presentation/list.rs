use std::sync::Arc;

use futures::stream::StreamExt;
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use super::scope::ViewModelScope;
use crate::domain::TaskUseCases;
use crate::error::TodoError;
use crate::task::Task;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListState {
    pub items: Vec<Task>,
    pub is_loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum TaskListEvent {
    Reload,
    Delete(Task),
    ToggleComplete(Task),
}

/// Keeps the list screen's state in sync with storage.
///
/// Items only change when the live query re-emits; delete and toggle never
/// touch `items` directly.
pub struct TaskListViewModel {
    use_cases: TaskUseCases,
    state: Arc<watch::Sender<TaskListState>>,
    subscription: Mutex<CancellationToken>,
    scope: ViewModelScope,
}

impl TaskListViewModel {
    /// Starts observing tasks right away; call from within a tokio runtime.
    pub fn new(use_cases: TaskUseCases) -> Self {
        let (state, _) = watch::channel(TaskListState::default());
        let scope = ViewModelScope::new();
        let view_model = Self {
            use_cases,
            state: Arc::new(state),
            subscription: Mutex::new(scope.child_token()),
            scope,
        };
        view_model.subscribe();
        view_model
    }

    pub fn state(&self) -> watch::Receiver<TaskListState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> TaskListState {
        self.state.borrow().clone()
    }

    pub fn on_event(&self, event: TaskListEvent) {
        match event {
            TaskListEvent::Reload => self.subscribe(),
            TaskListEvent::Delete(task) => {
                let delete = self.use_cases.delete.clone();
                let state = Arc::clone(&self.state);
                self.scope.launch(async move {
                    if let Err(err) = delete.execute(task.id).await {
                        report(&state, "delete", err);
                    }
                });
            }
            TaskListEvent::ToggleComplete(task) => {
                let update = self.use_cases.update.clone();
                let state = Arc::clone(&self.state);
                self.scope.launch(async move {
                    if let Err(err) = update.execute(&task.toggled()).await {
                        report(&state, "toggle", err);
                    }
                });
            }
        }
    }

    /// Replaces any running subscription with a fresh one.
    fn subscribe(&self) {
        let token = self.scope.child_token();
        let previous = std::mem::replace(&mut *self.subscription.lock(), token.clone());
        previous.cancel();

        self.state.send_modify(|state| state.is_loading = true);
        let mut tasks = self.use_cases.observe.execute();
        let state = Arc::clone(&self.state);
        self.scope.launch_until(token, async move {
            while let Some(snapshot) = tasks.next().await {
                match snapshot {
                    Ok(items) => state.send_modify(|state| {
                        state.items = items;
                        state.is_loading = false;
                        state.error = None;
                    }),
                    Err(err) => {
                        report(&state, "observe", err);
                        break;
                    }
                }
            }
        });
    }
}

fn report(state: &watch::Sender<TaskListState>, action: &str, err: TodoError) {
    warn!(action, error = %err, "task list operation failed");
    state.send_modify(|state| {
        state.is_loading = false;
        state.error = Some(err.to_string());
    });
}
