//! Root application component
//!
//! The App owns the table engine and routes Actions either to it or to the
//! child components. It holds no record logic of its own.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_home_screen, EditDialog, HelpDialog, HomeComponent, HomeRenderContext, PageInfo,
    QuitDialog, TableComponent, TableRow,
};
use crate::config::Config;
use crate::model::modal::{Modal, ModalStack};
use crate::model::{LoadState, TableError, TableState};
use crate::services::{LoadOutcome, RecordLoader};
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// The record collection and its derived views
    pub table: TableState,

    /// Progress of the one-time load
    pub load_state: LoadState,

    /// Background fetch of the record source
    pub loader: RecordLoader,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: Option<String>,

    pub config: Config,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub home: HomeComponent,
    pub table_view: TableComponent,
    pub edit_dialog: EditDialog,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
}

impl App {
    /// Create the app. Nothing is fetched until `init`.
    pub fn new(config: Config) -> App {
        let mut app = App {
            table: TableState::new(),
            load_state: LoadState::Pending,
            loader: RecordLoader::new(),
            modals: ModalStack::new(),
            should_quit: false,
            status_message: None,
            config,
            home: HomeComponent::new(),
            table_view: TableComponent::new(),
            edit_dialog: EditDialog::new(),
            quit_dialog: QuitDialog,
            help_dialog: HelpDialog::default(),
        };
        app.refresh_view();
        app
    }

    /// Apply the result of the record load
    pub fn on_load(&mut self, outcome: LoadOutcome) {
        match outcome {
            LoadOutcome::Loaded(records) => {
                self.table.load(records);
                self.load_state = LoadState::Loaded;
            }
            LoadOutcome::Failed(err) => {
                // The table stays empty; there is no retry
                self.load_state = LoadState::Failed(err.to_string());
            }
        }
    }

    /// Push engine state into the table widget
    fn refresh_view(&mut self) {
        let rows: Vec<TableRow> = self
            .table
            .page_window()
            .into_iter()
            .map(|r| TableRow::from_record(r, self.table.is_selected(&r.id)))
            .collect();
        self.table_view.set_rows(rows, self.table.all_selected());

        let placeholder = match self.load_state {
            LoadState::Pending => Some("Loading...".to_string()),
            _ => None,
        };
        self.table_view.set_placeholder(placeholder);
    }

    fn page_info(&self) -> PageInfo {
        PageInfo {
            page: self.table.page(),
            total_pages: self.table.total_pages(),
            selected: self.table.selection().len(),
            filtered: self.table.filtered_len(),
        }
    }

    fn cursor_id(&self) -> Option<String> {
        self.table_view.cursor_id().map(str::to_string)
    }

    fn close_edit(&mut self) {
        self.modals.remove_edit();
        self.edit_dialog.close();
    }

    fn save_edit(&mut self) {
        match self.table.commit_edit() {
            Ok(()) => {
                self.status_message = Some("Changes saved".to_string());
            }
            Err(err @ TableError::StaleEditTarget { .. }) => {
                self.status_message = Some(format!("Changes discarded: {}", err));
            }
            Err(TableError::NoEditInProgress) => {}
        }
        self.close_edit();
    }

    fn apply(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                if let Some(outcome) = self.loader.poll() {
                    self.on_load(outcome);
                }
            }
            Action::Resize(_, _) => {}
            Action::ForceQuit => {
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Row cursor (delegate to TableComponent)
            // ─────────────────────────────────────────────────────────────────
            Action::NextRow | Action::PrevRow => {
                self.table_view.update(action)?;
            }

            // ─────────────────────────────────────────────────────────────────
            // Search
            // ─────────────────────────────────────────────────────────────────
            Action::EnterSearchMode | Action::ExitSearchMode => {
                self.home.update(action)?;
            }
            Action::SearchInput(c) => {
                let mut term = self.table.search_term().to_string();
                term.push(c);
                self.table.set_search_term(term);
            }
            Action::SearchBackspace => {
                let mut term = self.table.search_term().to_string();
                term.pop();
                self.table.set_search_term(term);
            }
            Action::Search => {
                self.table.search();
                self.table_view.reset_cursor();
                self.home.update(action)?;
            }

            // ─────────────────────────────────────────────────────────────────
            // Pagination
            // ─────────────────────────────────────────────────────────────────
            Action::FirstPage => self.table.first_page(),
            Action::PrevPage => self.table.previous_page(),
            Action::NextPage => self.table.next_page(),
            Action::LastPage => self.table.last_page(),
            Action::GoToPage(n) => self.table.set_page(n),

            // ─────────────────────────────────────────────────────────────────
            // Selection & deletion
            // ─────────────────────────────────────────────────────────────────
            Action::ToggleRow => {
                if let Some(id) = self.cursor_id() {
                    self.table.toggle_select_row(&id);
                }
            }
            Action::TogglePage => self.table.toggle_select_all(),
            Action::DeleteRow => {
                if let Some(id) = self.cursor_id() {
                    self.table.delete_record(&id);
                    self.status_message = Some(format!("Deleted user {}", id));
                }
            }
            Action::DeleteSelected => {
                let count = self.table.selection().len();
                if count > 0 {
                    self.table.delete_selected();
                    self.status_message = Some(format!("Deleted {} user(s)", count));
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Editing
            // ─────────────────────────────────────────────────────────────────
            Action::BeginEdit => {
                return Ok(self.cursor_id().map(Action::EditRecord));
            }
            Action::EditRecord(id) => {
                self.table.begin_edit(&id);
                if let Some(buffer) = self.table.edit_buffer() {
                    self.edit_dialog.open(buffer);
                    self.modals.push(Modal::EditRecord { id });
                }
            }
            Action::UpdateEdit(patch) => {
                self.table.update_edit_buffer(patch);
                self.edit_dialog.sync(self.table.edit_buffer());
            }
            Action::SaveEdit => self.save_edit(),
            Action::CancelEdit => {
                self.table.cancel_edit();
                self.close_edit();
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::CloseModal => {
                if matches!(self.modals.top(), Some(Modal::EditRecord { .. })) {
                    return Ok(Some(Action::CancelEdit));
                }
                self.modals.pop();
            }
        }
        Ok(None)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    /// Kick off the one-time record load
    fn init(&mut self) -> Result<()> {
        self.loader
            .spawn(self.config.source_url.clone(), self.config.request_timeout());
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match self.modals.top() {
            Some(Modal::QuitConfirm) => self.quit_dialog.handle_key_event(key),
            Some(Modal::EditRecord { .. }) => self.edit_dialog.handle_key_event(key),
            Some(Modal::Help) => self.help_dialog.handle_key_event(key),
            None => self.home.handle_key_event(key),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action != Action::Tick {
            tracing::trace!(%action, "update");
        }
        let next = self.apply(action)?;
        self.refresh_view();
        Ok(next)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let ctx = HomeRenderContext {
            search_term: self.table.search_term(),
            page: self.page_info(),
            load_state: &self.load_state,
            status_message: self.status_message.as_deref(),
        };
        draw_home_screen(frame, area, &self.home, &mut self.table_view, &ctx)?;

        match self.modals.top() {
            Some(Modal::QuitConfirm) => self.quit_dialog.draw(frame, area)?,
            Some(Modal::EditRecord { .. }) => self.edit_dialog.draw(frame, area)?,
            Some(Modal::Help) => self.help_dialog.draw(frame, area)?,
            None => {}
        }
        Ok(())
    }
}
