//! Table component for the user records
//!
//! Renders the current page window with a checkbox column and tracks a
//! row cursor. The cursor is presentation state only; the engine never
//! sees it.

use crate::action::Action;
use crate::component::Component;
use crate::model::Record;
use anyhow::Result;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const CHECKBOX_WIDTH: usize = 3;
const MAX_COLUMN_WIDTH: usize = 40;

/// One rendered row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub selected: bool,
}

impl TableRow {
    pub fn from_record(record: &Record, selected: bool) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            email: record.email.clone(),
            role: record.role_label().to_string(),
            selected,
        }
    }
}

/// Table of the visible page
pub struct TableComponent {
    rows: Vec<TableRow>,
    all_selected: bool,
    /// Placeholder shown instead of rows, e.g. while loading
    placeholder: Option<String>,
    cursor: usize,
}

impl Default for TableComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl TableComponent {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            all_selected: false,
            placeholder: None,
            cursor: 0,
        }
    }

    /// Replace the rows to display, keeping the cursor on the page
    pub fn set_rows(&mut self, rows: Vec<TableRow>, all_selected: bool) {
        self.rows = rows;
        self.all_selected = all_selected;
        self.cursor = self.cursor.min(self.rows.len().saturating_sub(1));
    }

    pub fn set_placeholder(&mut self, placeholder: Option<String>) {
        self.placeholder = placeholder;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
    }

    /// Id of the row under the cursor
    pub fn cursor_id(&self) -> Option<&str> {
        self.rows.get(self.cursor).map(|r| r.id.as_str())
    }

    fn fit(text: &str, width: usize) -> String {
        if text.width() <= width {
            return format!("{}{}", text, " ".repeat(width - text.width()));
        }
        let mut out = String::new();
        for c in text.chars() {
            if out.width() + 3 + c.to_string().width() > width {
                break;
            }
            out.push(c);
        }
        out.push_str("...");
        let pad = width.saturating_sub(out.width());
        out.push_str(&" ".repeat(pad));
        out
    }

    fn checkbox(checked: bool) -> &'static str {
        if checked {
            "[x]"
        } else {
            "[ ]"
        }
    }

    /// Build table lines: header, separator, one line per row
    pub fn build_table_lines(&self) -> Vec<Line<'static>> {
        let headers = ["Name", "Email", "Role"];
        let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
        for row in &self.rows {
            widths[0] = widths[0].max(row.name.width());
            widths[1] = widths[1].max(row.email.width());
            widths[2] = widths[2].max(row.role.width());
        }
        for width in &mut widths {
            *width = (*width).min(MAX_COLUMN_WIDTH);
        }

        let header_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let mut header = vec![
            Span::styled(Self::checkbox(self.all_selected), header_style),
            Span::raw(" │ "),
        ];
        for (h, w) in headers.iter().zip(&widths) {
            header.push(Span::styled(Self::fit(h, *w), header_style));
            header.push(Span::raw(" │ "));
        }

        let mut lines = vec![Line::from(header)];

        let separator = std::iter::once(CHECKBOX_WIDTH)
            .chain(widths.iter().copied())
            .map(|w| "─".repeat(w))
            .collect::<Vec<_>>()
            .join("─┼─");
        lines.push(Line::from(Span::styled(
            separator,
            Style::default().fg(Color::DarkGray),
        )));

        if let Some(placeholder) = &self.placeholder {
            lines.push(Line::from(Span::styled(
                placeholder.clone(),
                Style::default().fg(Color::Yellow),
            )));
            return lines;
        }

        if self.rows.is_empty() {
            lines.push(Line::from(Span::styled(
                "No matching users",
                Style::default().fg(Color::DarkGray),
            )));
            return lines;
        }

        for (i, row) in self.rows.iter().enumerate() {
            let mut style = if row.selected {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };
            if i == self.cursor {
                style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
            }

            let cells = [&row.name, &row.email, &row.role];
            let mut spans = vec![
                Span::styled(Self::checkbox(row.selected), style),
                Span::styled(" │ ", style),
            ];
            for (cell, w) in cells.iter().zip(&widths) {
                spans.push(Span::styled(Self::fit(cell, *w), style));
                spans.push(Span::styled(" │ ", style));
            }
            lines.push(Line::from(spans));
        }

        lines
    }
}

impl Component for TableComponent {
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::NextRow => {
                if self.cursor + 1 < self.rows.len() {
                    self.cursor += 1;
                }
            }
            Action::PrevRow => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let paragraph = Paragraph::new(self.build_table_lines()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Users ")
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(paragraph, area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;

    fn rows(n: usize) -> Vec<TableRow> {
        (1..=n)
            .map(|i| {
                let record = Record::new(
                    i.to_string(),
                    &format!("User {}", i),
                    &format!("user{}@example.com", i),
                    Role::Member,
                );
                TableRow::from_record(&record, i == 2)
            })
            .collect()
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_cursor_moves_within_rows() {
        let mut table = TableComponent::new();
        table.set_rows(rows(3), false);

        table.update(Action::PrevRow).unwrap();
        assert_eq!(table.cursor(), 0);

        for _ in 0..5 {
            table.update(Action::NextRow).unwrap();
        }
        assert_eq!(table.cursor(), 2);
        assert_eq!(table.cursor_id(), Some("3"));
    }

    #[test]
    fn test_cursor_is_clamped_when_rows_shrink() {
        let mut table = TableComponent::new();
        table.set_rows(rows(5), false);
        table.update(Action::NextRow).unwrap();
        table.update(Action::NextRow).unwrap();
        table.update(Action::NextRow).unwrap();

        table.set_rows(rows(2), false);
        assert_eq!(table.cursor(), 1);

        table.set_rows(Vec::new(), false);
        assert_eq!(table.cursor(), 0);
        assert_eq!(table.cursor_id(), None);
    }

    #[test]
    fn test_lines_show_checkboxes() {
        let mut table = TableComponent::new();
        table.set_rows(rows(2), false);
        let lines = table.build_table_lines();

        assert_eq!(lines.len(), 4);
        assert!(text(&lines[0]).starts_with("[ ]"));
        assert!(text(&lines[2]).starts_with("[ ]"));
        assert!(text(&lines[3]).starts_with("[x]"));
        assert!(text(&lines[3]).contains("user2@example.com"));
    }

    #[test]
    fn test_placeholder_replaces_rows() {
        let mut table = TableComponent::new();
        table.set_rows(rows(2), false);
        table.set_placeholder(Some("Loading...".to_string()));
        let lines = table.build_table_lines();

        assert_eq!(lines.len(), 3);
        assert_eq!(text(&lines[2]), "Loading...");
    }

    #[test]
    fn test_long_cells_are_truncated() {
        let fitted = TableComponent::fit(&"x".repeat(60), 10);
        assert_eq!(fitted, format!("{}...", "x".repeat(7)));
        assert_eq!(TableComponent::fit("ab", 4), "ab  ");
    }
}
