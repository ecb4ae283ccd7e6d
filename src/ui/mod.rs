//! Terminal screens and the navigator that switches between them.

pub mod edit_screen;
pub mod list_screen;
pub mod route;

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Frame, Terminal};
use tracing::info;

use crate::domain::TaskUseCases;
use crate::presentation::{TaskEditViewModel, TaskListViewModel};
use edit_screen::{EditAction, EditScreen};
use list_screen::{ListAction, ListScreen};
pub use route::Route;

/// How often the screen is redrawn while no key is pressed, so storage
/// updates show up without input.
const TICK: Duration = Duration::from_millis(200);
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Navigation state: the list screen always sits underneath, the edit
/// screen is pushed on top of it.
pub struct App {
    use_cases: TaskUseCases,
    list: TaskListViewModel,
    list_screen: ListScreen,
    edit: Option<EditScreen>,
    /// Edit holders that were navigated away from while a save was running.
    retired: Vec<TaskEditViewModel>,
}

impl App {
    /// Must be called from within a tokio runtime.
    pub fn new(use_cases: TaskUseCases, start: Route) -> Self {
        let mut app = Self {
            list: TaskListViewModel::new(use_cases.clone()),
            use_cases,
            list_screen: ListScreen::new(),
            edit: None,
            retired: Vec::new(),
        };
        app.navigate(start);
        app
    }

    pub fn route(&self) -> Route {
        match &self.edit {
            None => Route::List,
            Some(screen) => Route::Edit {
                task_id: screen.view_model().task_id(),
            },
        }
    }

    pub fn list(&self) -> &TaskListViewModel {
        &self.list
    }

    pub fn navigate(&mut self, route: Route) {
        info!(%route, "navigate");
        match route {
            Route::List => self.pop_edit(),
            Route::Edit { task_id } => {
                self.pop_edit();
                let view_model = TaskEditViewModel::new(self.use_cases.clone(), task_id);
                self.edit = Some(EditScreen::new(view_model));
            }
        }
    }

    fn pop_edit(&mut self) {
        if let Some(screen) = self.edit.take() {
            let view_model = screen.into_view_model();
            if !view_model.is_idle() {
                self.retired.push(view_model);
            }
        }
    }

    /// Drops retired edit holders whose work has finished.
    pub fn collect_retired(&mut self) {
        self.retired.retain(|view_model| !view_model.is_idle());
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if let Some(screen) = self.edit.as_mut() {
            match screen.handle_key(key) {
                EditAction::None => {}
                EditAction::Back | EditAction::Saved => self.navigate(Route::List),
            }
            return Flow::Continue;
        }

        let state = self.list.snapshot();
        match self.list_screen.handle_key(key, &state) {
            ListAction::None => {}
            ListAction::Quit => return Flow::Quit,
            ListAction::AddNew => self.navigate(Route::create()),
            ListAction::Edit(id) => self.navigate(Route::edit(id)),
            ListAction::Dispatch(event) => self.list.on_event(event),
        }
        Flow::Continue
    }

    pub fn render(&mut self, f: &mut Frame) {
        let area = f.area();
        match &self.edit {
            Some(screen) => screen.render(f, area),
            None => {
                let state = self.list.snapshot();
                self.list_screen.render(f, area, &state);
            }
        }
    }

    /// Lets outstanding saves finish (bounded) before the app exits.
    pub async fn shutdown(mut self) {
        self.pop_edit();
        let pending = std::mem::take(&mut self.retired);
        let drain = futures::future::join_all(
            pending.iter().map(|view_model| view_model.scope().drain()),
        );
        if tokio::time::timeout(SHUTDOWN_GRACE, drain).await.is_err() {
            info!(count = pending.len(), "abandoning unfinished saves");
        }
    }
}

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        app.collect_retired();
        terminal.draw(|f| app.render(f))?;

        if !event::poll(TICK)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && app.handle_key(key) == Flow::Quit {
                return Ok(());
            }
        }
    }
}
