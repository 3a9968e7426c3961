//! Pagination footer
//!
//! Selection count on the left, page position and the page controls on the right.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Numbered page buttons shown at once; more pages collapse around the current one
const MAX_PAGE_BUTTONS: usize = 9;

/// Values the footer needs from the table engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page: usize,
    pub total_pages: usize,
    pub selected: usize,
    pub filtered: usize,
}

pub fn selection_summary(info: &PageInfo) -> String {
    format!("{} of {} row(s) selected.", info.selected, info.filtered)
}

/// Page numbers to render as buttons, windowed around the current page
pub fn page_buttons(info: &PageInfo) -> Vec<usize> {
    let total = info.total_pages.max(1);
    if total <= MAX_PAGE_BUTTONS {
        return (1..=total).collect();
    }
    let half = MAX_PAGE_BUTTONS / 2;
    let start = info
        .page
        .saturating_sub(half)
        .clamp(1, total - MAX_PAGE_BUTTONS + 1);
    (start..start + MAX_PAGE_BUTTONS).collect()
}

fn control(label: &str, enabled: bool) -> Span<'static> {
    let style = if enabled {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(format!(" {} ", label), style)
}

pub fn controls_line(info: &PageInfo) -> Line<'static> {
    let at_start = info.page <= 1;
    let at_end = info.page >= info.total_pages;

    let mut spans = vec![
        control("« First", !at_start),
        control("‹ Prev", !at_start),
    ];
    for n in page_buttons(info) {
        if n == info.page {
            spans.push(Span::styled(
                format!("[{}]", n),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(
                format!(" {} ", n),
                Style::default().fg(Color::White),
            ));
        }
    }
    spans.push(control("Next ›", !at_end));
    spans.push(control("Last »", !at_end));
    Line::from(spans)
}

pub fn draw_pagination(frame: &mut Frame, area: Rect, info: &PageInfo) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(16),
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(
            selection_summary(info),
            Style::default().fg(Color::DarkGray),
        )),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("Page {} of {}", info.page, info.total_pages),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(controls_line(info)).alignment(ratatui::layout::Alignment::Right),
        chunks[2],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(page: usize, total_pages: usize) -> PageInfo {
        PageInfo {
            page,
            total_pages,
            selected: 0,
            filtered: total_pages * 10,
        }
    }

    #[test]
    fn test_all_pages_listed_when_few() {
        assert_eq!(page_buttons(&info(2, 3)), vec![1, 2, 3]);
        assert_eq!(page_buttons(&info(1, 1)), vec![1]);
    }

    #[test]
    fn test_buttons_window_around_current_page() {
        assert_eq!(page_buttons(&info(1, 20)), (1..=9).collect::<Vec<_>>());
        assert_eq!(page_buttons(&info(10, 20)), (6..=14).collect::<Vec<_>>());
        assert_eq!(page_buttons(&info(20, 20)), (12..=20).collect::<Vec<_>>());
    }

    #[test]
    fn test_selection_summary() {
        let info = PageInfo {
            page: 1,
            total_pages: 1,
            selected: 3,
            filtered: 6,
        };
        assert_eq!(selection_summary(&info), "3 of 6 row(s) selected.");
    }

    #[test]
    fn test_prev_disabled_on_first_page() {
        let line = controls_line(&info(1, 3));
        assert_eq!(line.spans[1].style.fg, Some(Color::DarkGray));
        let last = line.spans.last().unwrap();
        assert_eq!(last.style.fg, Some(Color::Cyan));
    }
}
