//! Home component - Main application screen
//!
//! Search bar, user table, pagination footer, status line and help bar.
//! Owns the search-mode flag; everything about the records themselves
//! lives in the table engine and is passed in for rendering.

use crate::action::Action;
use crate::component::Component;
use crate::components::pagination::{draw_pagination, PageInfo};
use crate::components::{calculate_main_layout, TableComponent};
use crate::model::LoadState;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Home component for the main application view
#[derive(Default)]
pub struct HomeComponent {
    /// Whether keystrokes currently go to the search bar
    pub search_mode: bool,
}

impl HomeComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter_search_mode(&mut self) {
        self.search_mode = true;
    }

    pub fn exit_search_mode(&mut self) {
        self.search_mode = false;
    }

    /// Keys while the search bar has focus
    pub fn handle_search_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::ExitSearchMode),
            KeyCode::Enter => Some(Action::Search),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char(c) => Some(Action::SearchInput(c)),
            _ => None,
        };
        Ok(action)
    }
}

impl Component for HomeComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.search_mode {
            return self.handle_search_key_event(key);
        }

        let action = match key.code {
            // Rows
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextRow),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevRow),
            KeyCode::Char(' ') => Some(Action::ToggleRow),
            KeyCode::Char('a') => Some(Action::TogglePage),
            KeyCode::Char('e') | KeyCode::Enter => Some(Action::BeginEdit),
            KeyCode::Char('d') | KeyCode::Delete => Some(Action::DeleteRow),
            KeyCode::Char('D') => Some(Action::DeleteSelected),

            // Pages
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstPage),
            KeyCode::Char('h') | KeyCode::Left => Some(Action::PrevPage),
            KeyCode::Char('l') | KeyCode::Right => Some(Action::NextPage),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastPage),
            KeyCode::Char(c @ '1'..='9') => c
                .to_digit(10)
                .map(|n| Action::GoToPage(n as usize)),

            // Search
            KeyCode::Char('/') => Some(Action::EnterSearchMode),

            // Modals
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::OpenQuitDialog),

            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::EnterSearchMode => self.enter_search_mode(),
            Action::ExitSearchMode | Action::Search => self.exit_search_mode(),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing goes through draw_home_screen, which needs engine context
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering Functions
// ═══════════════════════════════════════════════════════════════════════════════

/// Context needed for rendering the home screen
pub struct HomeRenderContext<'a> {
    pub search_term: &'a str,
    pub page: PageInfo,
    pub load_state: &'a LoadState,
    pub status_message: Option<&'a str>,
}

/// Draw the home screen
pub fn draw_home_screen(
    frame: &mut Frame,
    area: Rect,
    home: &HomeComponent,
    table: &mut TableComponent,
    ctx: &HomeRenderContext,
) -> Result<()> {
    let layout = calculate_main_layout(area);

    frame.render_widget(
        Paragraph::new(Span::styled(
            " User Admin Table",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        layout.header,
    );
    render_search_bar(frame, layout.search, home, ctx);
    table.draw(frame, layout.table)?;
    draw_pagination(frame, layout.footer, &ctx.page);
    render_status_bar(frame, layout.status, ctx);
    render_help_bar(frame, layout.help, home, ctx);

    Ok(())
}

fn render_search_bar(frame: &mut Frame, area: Rect, home: &HomeComponent, ctx: &HomeRenderContext) {
    let (border, text) = if home.search_mode {
        (
            Style::default().fg(Color::Yellow),
            Line::from(vec![
                Span::styled(ctx.search_term.to_string(), Style::default().fg(Color::White)),
                Span::styled("▏", Style::default().fg(Color::Yellow)),
            ]),
        )
    } else if ctx.search_term.is_empty() {
        (
            Style::default().fg(Color::DarkGray),
            Line::from(Span::styled(
                "Search...  (press / to type, Enter to search)",
                Style::default().fg(Color::DarkGray),
            )),
        )
    } else {
        (
            Style::default().fg(Color::DarkGray),
            Line::from(Span::styled(
                ctx.search_term.to_string(),
                Style::default().fg(Color::White),
            )),
        )
    };

    let paragraph = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search ")
            .border_style(border),
    );
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, ctx: &HomeRenderContext) {
    let mut spans = vec![];

    match ctx.load_state {
        LoadState::Pending => spans.push(Span::styled(
            " Loading users... ",
            Style::default().fg(Color::Yellow),
        )),
        LoadState::Failed(error) => spans.push(Span::styled(
            format!(" Could not load users: {} ", error),
            Style::default().fg(Color::Red),
        )),
        LoadState::Loaded => {}
    }

    if let Some(status) = ctx.status_message {
        spans.push(Span::styled(
            format!(" {} ", status),
            Style::default().fg(Color::Yellow),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help_bar(frame: &mut Frame, area: Rect, home: &HomeComponent, ctx: &HomeRenderContext) {
    let key_style = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);

    let help_spans = if home.search_mode {
        vec![
            Span::styled(" Enter ", key_style(Color::Green)),
            Span::raw("Search  "),
            Span::styled(" Esc ", key_style(Color::Yellow)),
            Span::raw("Stop typing"),
        ]
    } else {
        let bulk_color = if ctx.page.selected == 0 {
            Color::DarkGray
        } else {
            Color::Red
        };
        vec![
            Span::styled(" q ", key_style(Color::Yellow)),
            Span::raw("Quit "),
            Span::styled(" / ", key_style(Color::Cyan)),
            Span::raw("Search "),
            Span::styled(" Space ", key_style(Color::Green)),
            Span::raw("Select "),
            Span::styled(" a ", key_style(Color::Green)),
            Span::raw("Select page "),
            Span::styled(" e ", key_style(Color::Cyan)),
            Span::raw("Edit "),
            Span::styled(" d ", key_style(Color::Red)),
            Span::raw("Delete "),
            Span::styled(" D ", key_style(bulk_color)),
            Span::styled("Delete selected ", Style::default().fg(bulk_color)),
            Span::styled(" ? ", key_style(Color::White)),
            Span::raw("Help"),
        ]
    };

    frame.render_widget(Paragraph::new(Line::from(help_spans)), area);
}
