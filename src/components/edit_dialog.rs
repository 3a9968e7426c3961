//! Edit dialog for a single record
//!
//! Keystrokes become `UpdateEdit` patches carrying the full new value of the
//! focused field. The dialog keeps a draft in step with the engine's edit
//! buffer so it can build those values.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::{EditField, Record, RecordPatch};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

#[derive(Default)]
pub struct EditDialog {
    pub focus: EditField,
    draft: Option<Record>,
}

impl EditDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing with focus on the first field
    pub fn open(&mut self, buffer: &Record) {
        self.focus = EditField::Name;
        self.draft = Some(buffer.clone());
    }

    /// Mirror the engine's buffer after it changed
    pub fn sync(&mut self, buffer: Option<&Record>) {
        self.draft = buffer.cloned();
    }

    pub fn close(&mut self) {
        self.draft = None;
    }

    fn edit_text(&mut self, change: impl FnOnce(&mut String)) -> Option<Action> {
        let draft = self.draft.as_mut()?;
        let patch = match self.focus {
            EditField::Name => {
                change(&mut draft.name);
                RecordPatch::name(draft.name.clone())
            }
            EditField::Email => {
                change(&mut draft.email);
                RecordPatch::email(draft.email.clone())
            }
            EditField::Role => return None,
        };
        Some(Action::UpdateEdit(patch))
    }

    fn cycle_role(&mut self, forward: bool) -> Option<Action> {
        let draft = self.draft.as_mut()?;
        draft.role = if forward {
            draft.role.next()
        } else {
            draft.role.previous()
        };
        Some(Action::UpdateEdit(RecordPatch::role(draft.role.clone())))
    }

    fn field_line(&self, field: EditField, value: String) -> Line<'static> {
        let focused = self.focus == field;
        let label_style = if focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let value_style = if focused {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };
        let cursor = if focused && field != EditField::Role {
            "▏"
        } else {
            ""
        };
        Line::from(vec![
            Span::styled(format!(" {:<6} ", field.label()), label_style),
            Span::styled(format!("{}{}", value, cursor), value_style),
        ])
    }

    fn role_line(&self, draft: &Record) -> Line<'static> {
        let focused = self.focus == EditField::Role;
        let mut spans = vec![Span::styled(
            format!(" {:<6} ", EditField::Role.label()),
            if focused {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            },
        )];
        for role in crate::model::Role::selectable() {
            let style = if role == draft.role {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            spans.push(Span::styled(format!(" {} ", role.label()), style));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }
}

impl Component for EditDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CancelEdit),
            KeyCode::Enter => Some(Action::SaveEdit),
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::SaveEdit)
            }
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.previous();
                None
            }
            KeyCode::Left if self.focus == EditField::Role => self.cycle_role(false),
            KeyCode::Right | KeyCode::Char(' ') if self.focus == EditField::Role => {
                self.cycle_role(true)
            }
            KeyCode::Backspace => self.edit_text(|s| {
                s.pop();
            }),
            KeyCode::Char(c) => self.edit_text(|s| s.push(c)),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let Some(draft) = self.draft.clone() else {
            return Ok(());
        };

        let popup_area = centered_popup(area, 64, 12);
        frame.render_widget(Clear, popup_area);

        let content = vec![
            Line::from(""),
            self.field_line(EditField::Name, draft.name.clone()),
            Line::from(""),
            self.field_line(EditField::Email, draft.email.clone()),
            Line::from(""),
            self.role_line(&draft),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    " Enter ",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Save Changes  "),
                Span::styled(
                    " Esc ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::raw("Close  "),
                Span::styled(" Tab ", Style::default().fg(Color::Cyan)),
                Span::raw("Next field"),
            ]),
        ];

        let paragraph = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!(" Edit User {} ", draft.id))
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        );

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}
