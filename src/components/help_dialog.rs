//! Help dialog listing the keyboard shortcuts

use crate::action::Action;
use crate::component::Component;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Rows",
        &[
            ("j / ↓", "Next row"),
            ("k / ↑", "Previous row"),
            ("Space", "Select / unselect row"),
            ("a", "Select / unselect the whole page"),
            ("e / Enter", "Edit row"),
            ("d / Delete", "Delete row"),
            ("D", "Delete selected rows"),
        ],
    ),
    (
        "Pages",
        &[
            ("g / Home", "First page"),
            ("h / ←", "Previous page"),
            ("l / →", "Next page"),
            ("G / End", "Last page"),
            ("1-9", "Go to page"),
        ],
    ),
    (
        "Search",
        &[
            ("/", "Type a search term"),
            ("Enter", "Apply search"),
            ("Esc", "Stop typing, keep previous results"),
        ],
    ),
    (
        "Edit dialog",
        &[
            ("Tab / ↓", "Next field"),
            ("Shift+Tab / ↑", "Previous field"),
            ("← / → / Space", "Change role"),
            ("Enter / Ctrl+s", "Save changes"),
            ("Esc", "Close without saving"),
        ],
    ),
    ("General", &[("?", "Show this help"), ("q", "Quit")]),
];

/// Help dialog showing all keyboard shortcuts
#[derive(Default)]
pub struct HelpDialog {
    pub scroll_offset: usize,
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_offset = self.scroll_offset.saturating_add(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let dialog_area = crate::components::centered_popup(area, 56, area.height.saturating_sub(4));
        frame.render_widget(Clear, dialog_area);

        let content = build_help_content();
        let total = content.len();
        let visible_height = dialog_area.height.saturating_sub(2) as usize;
        let max_scroll = total.saturating_sub(visible_height);
        self.scroll_offset = self.scroll_offset.min(max_scroll);

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Keyboard Shortcuts ")
                    .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .scroll((self.scroll_offset as u16, 0));
        frame.render_widget(paragraph, dialog_area);

        if total > visible_height {
            let mut scrollbar_state = ScrollbarState::new(max_scroll).position(self.scroll_offset);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                dialog_area.inner(ratatui::layout::Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        Ok(())
    }
}

fn build_help_content() -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (title, shortcuts) in SECTIONS {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", title),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        for (key, description) in *shortcuts {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:16}", key),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::styled(*description, Style::default().fg(Color::White)),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Changes live in memory only and are lost on exit",
        Style::default().fg(Color::DarkGray),
    )));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    #[test]
    fn test_close_keys() {
        let mut dialog = HelpDialog::default();
        for code in [KeyCode::Esc, KeyCode::Char('q'), KeyCode::Char('?')] {
            let action = dialog
                .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
                .unwrap();
            assert_eq!(action, Some(Action::CloseModal));
        }
    }

    #[test]
    fn test_every_section_is_rendered() {
        let text: String = build_help_content()
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect();
        for (title, _) in SECTIONS {
            assert!(text.contains(title));
        }
    }
}
