use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::presentation::{TaskListEvent, TaskListState};

/// What the navigator should do after a key press on the list screen.
#[derive(Debug, Clone)]
pub enum ListAction {
    None,
    Quit,
    AddNew,
    Edit(i64),
    Dispatch(TaskListEvent),
}

/// Cursor position over the task list.
#[derive(Debug, Default)]
pub struct ListScreen {
    selection: ListState,
}

impl ListScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selection.selected()
    }

    /// Keeps the cursor on an existing row as the list grows and shrinks.
    fn clamp(&mut self, len: usize) {
        let selected = match (len, self.selection.selected()) {
            (0, _) => None,
            (_, None) => Some(0),
            (len, Some(i)) => Some(i.min(len - 1)),
        };
        self.selection.select(selected);
    }

    pub fn handle_key(&mut self, key: KeyEvent, state: &TaskListState) -> ListAction {
        self.clamp(state.items.len());
        let current = self.selection.selected().and_then(|i| state.items.get(i));

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => ListAction::Quit,
            KeyCode::Char('a') => ListAction::AddNew,
            KeyCode::Char('r') => ListAction::Dispatch(TaskListEvent::Reload),
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(i) = self.selection.selected() {
                    self.selection.select(Some(i.saturating_sub(1)));
                }
                ListAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(i) = self.selection.selected() {
                    if i + 1 < state.items.len() {
                        self.selection.select(Some(i + 1));
                    }
                }
                ListAction::None
            }
            KeyCode::Enter | KeyCode::Char('e') => match current {
                Some(task) => ListAction::Edit(task.id),
                None => ListAction::None,
            },
            KeyCode::Char(' ') | KeyCode::Char('x') => match current {
                Some(task) => ListAction::Dispatch(TaskListEvent::ToggleComplete(task.clone())),
                None => ListAction::None,
            },
            KeyCode::Char('d') | KeyCode::Delete => match current {
                Some(task) => ListAction::Dispatch(TaskListEvent::Delete(task.clone())),
                None => ListAction::None,
            },
            _ => ListAction::None,
        }
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, state: &TaskListState) {
        self.clamp(state.items.len());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        let header = Line::from(vec![
            Span::styled("To-do list", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("   "),
            Span::styled("[a] add", Style::default().fg(Color::Cyan)),
        ]);
        f.render_widget(Paragraph::new(header), chunks[0]);

        let block = Block::default().borders(Borders::ALL);
        if state.is_loading {
            let loading = Paragraph::new("Loading…")
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(loading, chunks[1]);
        } else if state.items.is_empty() {
            let empty = Paragraph::new("No tasks yet.\nPress 'a' to add one!")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray))
                .block(block);
            f.render_widget(empty, chunks[1]);
        } else {
            let items: Vec<ListItem> = state
                .items
                .iter()
                .map(|t| {
                    let mark = if t.is_completed { "[x] " } else { "[ ] " };
                    let title_style = if t.is_completed {
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::CROSSED_OUT)
                    } else {
                        Style::default().fg(Color::White)
                    };
                    let mut spans =
                        vec![Span::raw(mark), Span::styled(t.title.as_str(), title_style)];
                    if !t.description.is_empty() {
                        let first_line = t.description.lines().next().unwrap_or_default();
                        spans.push(Span::styled(
                            format!("  {first_line}"),
                            Style::default().fg(Color::DarkGray),
                        ));
                    }
                    ListItem::new(Line::from(spans))
                })
                .collect();

            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().add_modifier(Modifier::BOLD))
                .highlight_symbol("> ");
            f.render_stateful_widget(list, chunks[1], &mut self.selection);
        }

        let footer = match &state.error {
            Some(error) => Line::from(Span::styled(
                format!("Error: {error}"),
                Style::default().fg(Color::Red),
            )),
            None => Line::from(Span::styled(
                "↑/↓ move  space toggle  e edit  d delete  r reload  q quit",
                Style::default().fg(Color::DarkGray),
            )),
        };
        f.render_widget(Paragraph::new(footer), chunks[2]);
    }
}
