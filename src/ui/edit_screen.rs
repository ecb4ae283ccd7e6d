use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::presentation::{TaskEditEvent, TaskEditState, TaskEditViewModel};

const MAX_DESCRIPTION_LINES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    None,
    Back,
    /// Save was dispatched; the navigator goes back without waiting for it.
    Saved,
}

pub struct EditScreen {
    view_model: TaskEditViewModel,
    focus: Field,
}

impl EditScreen {
    pub fn new(view_model: TaskEditViewModel) -> Self {
        Self {
            view_model,
            focus: Field::Title,
        }
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn view_model(&self) -> &TaskEditViewModel {
        &self.view_model
    }

    pub fn into_view_model(self) -> TaskEditViewModel {
        self.view_model
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> EditAction {
        let state = self.view_model.snapshot();
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => EditAction::Back,
            KeyCode::Char('s') if ctrl => {
                if self.view_model.can_save() {
                    self.view_model.on_event(TaskEditEvent::Save);
                    EditAction::Saved
                } else {
                    EditAction::None
                }
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.focus = match self.focus {
                    Field::Title => Field::Description,
                    Field::Description => Field::Title,
                };
                EditAction::None
            }
            KeyCode::Enter => {
                match self.focus {
                    Field::Title => self.focus = Field::Description,
                    Field::Description => {
                        if state.description.split('\n').count() < MAX_DESCRIPTION_LINES {
                            self.edit(&state, |text| text.push('\n'));
                        }
                    }
                }
                EditAction::None
            }
            KeyCode::Backspace => {
                self.edit(&state, |text| {
                    text.pop();
                });
                EditAction::None
            }
            KeyCode::Char(c) if !ctrl => {
                self.edit(&state, |text| text.push(c));
                EditAction::None
            }
            _ => EditAction::None,
        }
    }

    /// Applies `change` to the focused field and sends the result.
    fn edit(&self, state: &TaskEditState, change: impl FnOnce(&mut String)) {
        let event = match self.focus {
            Field::Title => {
                let mut title = state.title.clone();
                change(&mut title);
                TaskEditEvent::EnteredTitle(title)
            }
            Field::Description => {
                let mut description = state.description.clone();
                change(&mut description);
                TaskEditEvent::EnteredDescription(description)
            }
        };
        self.view_model.on_event(event);
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let state = self.view_model.snapshot();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(MAX_DESCRIPTION_LINES as u16 + 2),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        let heading = if self.view_model.is_edit_mode() {
            "Edit task"
        } else {
            "Add task"
        };
        let save_style = if self.view_model.can_save() {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let header = Line::from(vec![
            Span::styled(heading, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("   "),
            Span::styled("[Ctrl+S] save", save_style),
            Span::raw("  "),
            Span::styled("[Esc] back", Style::default().fg(Color::Cyan)),
        ]);
        f.render_widget(Paragraph::new(header), chunks[0]);

        let title =
            Paragraph::new(state.title.as_str()).block(self.field_block("Title", Field::Title));
        f.render_widget(title, chunks[1]);

        let description = Paragraph::new(state.description.as_str())
            .wrap(Wrap { trim: false })
            .block(self.field_block("Description", Field::Description));
        f.render_widget(description, chunks[2]);

        let status = if let Some(error) = &state.error {
            Span::styled(format!("Error: {error}"), Style::default().fg(Color::Red))
        } else if state.is_loading {
            Span::styled("Working…", Style::default().fg(Color::Yellow))
        } else {
            Span::raw("")
        };
        f.render_widget(Paragraph::new(Line::from(status)), chunks[3]);

        let (field_area, text, wraps) = match self.focus {
            Field::Title => (chunks[1], state.title.as_str(), false),
            Field::Description => (chunks[2], state.description.as_str(), true),
        };
        f.set_cursor_position(cursor_position(field_area, text, wraps));
    }

    fn field_block(&self, label: &'static str, field: Field) -> Block<'static> {
        Block::default()
            .title(label)
            .borders(Borders::ALL)
            .border_style(if self.focus == field {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            })
    }
}

/// Where the cursor sits after `text` inside a bordered `field`, kept inside
/// the border. Wrapping is approximated per character.
fn cursor_position(field: Rect, text: &str, wraps: bool) -> Position {
    let inner_width = usize::from(field.width.saturating_sub(2)).max(1);
    let inner_height = usize::from(field.height.saturating_sub(2)).max(1);

    let mut row = 0;
    let mut col = 0;
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            row += 1;
        }
        let len = line.chars().count();
        if wraps {
            row += len / inner_width;
            col = len % inner_width;
        } else {
            col = len;
        }
    }
    let row = row.min(inner_height - 1);
    let col = col.min(inner_width - 1);
    Position::new(
        field.x + 1 + u16::try_from(col).unwrap_or(u16::MAX),
        field.y + 1 + u16::try_from(row).unwrap_or(u16::MAX),
    )
}
