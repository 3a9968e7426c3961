//! Action enum - All possible application actions
//!
//! Components turn key events into Actions; the App applies them to the
//! table engine or to presentation state.

use crate::model::{RecordId, RecordPatch};
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick, used to poll the record load
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Row cursor
    // ─────────────────────────────────────────────────────────────────────────
    NextRow,
    PrevRow,

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────
    EnterSearchMode,
    /// Leave search mode without applying the term
    ExitSearchMode,
    SearchInput(char),
    SearchBackspace,
    /// Apply the current term to the table
    Search,

    // ─────────────────────────────────────────────────────────────────────────
    // Pagination
    // ─────────────────────────────────────────────────────────────────────────
    FirstPage,
    PrevPage,
    NextPage,
    LastPage,
    GoToPage(usize),

    // ─────────────────────────────────────────────────────────────────────────
    // Selection & deletion
    // ─────────────────────────────────────────────────────────────────────────
    /// Toggle the row under the cursor
    ToggleRow,
    TogglePage,
    /// Delete the row under the cursor
    DeleteRow,
    DeleteSelected,

    // ─────────────────────────────────────────────────────────────────────────
    // Editing
    // ─────────────────────────────────────────────────────────────────────────
    /// Open the edit dialog for the row under the cursor
    BeginEdit,
    /// Open the edit dialog for a specific record
    EditRecord(RecordId),
    UpdateEdit(RecordPatch),
    SaveEdit,
    CancelEdit,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    OpenQuitDialog,
    OpenHelp,
    CloseModal,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextRow => write!(f, "NextRow"),
            Action::PrevRow => write!(f, "PrevRow"),
            Action::EnterSearchMode => write!(f, "EnterSearchMode"),
            Action::ExitSearchMode => write!(f, "ExitSearchMode"),
            Action::SearchInput(c) => write!(f, "SearchInput('{}')", c),
            Action::SearchBackspace => write!(f, "SearchBackspace"),
            Action::Search => write!(f, "Search"),
            Action::FirstPage => write!(f, "FirstPage"),
            Action::PrevPage => write!(f, "PrevPage"),
            Action::NextPage => write!(f, "NextPage"),
            Action::LastPage => write!(f, "LastPage"),
            Action::GoToPage(n) => write!(f, "GoToPage({})", n),
            Action::ToggleRow => write!(f, "ToggleRow"),
            Action::TogglePage => write!(f, "TogglePage"),
            Action::DeleteRow => write!(f, "DeleteRow"),
            Action::DeleteSelected => write!(f, "DeleteSelected"),
            Action::BeginEdit => write!(f, "BeginEdit"),
            Action::EditRecord(id) => write!(f, "EditRecord({})", id),
            Action::UpdateEdit(_) => write!(f, "UpdateEdit"),
            Action::SaveEdit => write!(f, "SaveEdit"),
            Action::CancelEdit => write!(f, "CancelEdit"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
        }
    }
}
