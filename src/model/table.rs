//! Table state engine
//!
//! Keeps four views of one record collection consistent: the full set,
//! the search-filtered subset, the current page window and the selected
//! rows. Every operation runs to completion synchronously; only
//! `commit_edit` can fail, and it leaves the collection untouched when it does.

use super::record::{Record, RecordId, RecordPatch};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Rows shown per page
pub const PAGE_SIZE: usize = 10;

/// Failures reported by the engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// The record being edited was deleted while the edit was open
    #[error("record {id} no longer exists")]
    StaleEditTarget { id: RecordId },
    #[error("no edit in progress")]
    NoEditInProgress,
}

/// The whole engine state. Serializable so it can be snapshotted in tests
/// and inspected in logs. Restoring a snapshot recomputes the derived views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Snapshot")]
pub struct TableState {
    records: Vec<Record>,
    search_term: String,
    /// Positions into `records`, in collection order
    filtered: Vec<usize>,
    /// 1-based
    page: usize,
    selected: BTreeSet<RecordId>,
    edit_buffer: Option<Record>,
}

#[derive(Deserialize)]
struct Snapshot {
    records: Vec<Record>,
    search_term: String,
    #[serde(default)]
    page: usize,
    #[serde(default)]
    selected: BTreeSet<RecordId>,
    #[serde(default)]
    edit_buffer: Option<Record>,
}

impl From<Snapshot> for TableState {
    fn from(snapshot: Snapshot) -> Self {
        let mut state = TableState {
            records: snapshot.records,
            search_term: snapshot.search_term,
            filtered: Vec::new(),
            page: snapshot.page,
            selected: snapshot.selected,
            edit_buffer: snapshot.edit_buffer,
        };
        state.refresh();
        state
    }
}

impl Default for TableState {
    fn default() -> Self {
        Self::new()
    }
}

impl TableState {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            search_term: String::new(),
            filtered: Vec::new(),
            page: 1,
            selected: BTreeSet::new(),
            edit_buffer: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Read side
    // ─────────────────────────────────────────────────────────────────────────

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn selection(&self) -> &BTreeSet<RecordId> {
        &self.selected
    }

    pub fn edit_buffer(&self) -> Option<&Record> {
        self.edit_buffer.as_ref()
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Records of the filtered view, in collection order
    pub fn filtered(&self) -> impl Iterator<Item = &Record> + '_ {
        self.filtered.iter().filter_map(move |&i| self.records.get(i))
    }

    /// Number of pages; at least one even when nothing matches
    pub fn total_pages(&self) -> usize {
        self.filtered.len().div_ceil(PAGE_SIZE).max(1)
    }

    /// Records on the current page
    pub fn page_window(&self) -> Vec<&Record> {
        let start = self.page.saturating_sub(1) * PAGE_SIZE;
        self.filtered
            .iter()
            .skip(start)
            .take(PAGE_SIZE)
            .filter_map(|&i| self.records.get(i))
            .collect()
    }

    fn window_ids(&self) -> BTreeSet<RecordId> {
        self.page_window().into_iter().map(|r| r.id.clone()).collect()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// True when every row of a non-empty page is selected
    pub fn all_selected(&self) -> bool {
        let window = self.window_ids();
        !window.is_empty() && window == self.selected
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Load & search
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the collection wholesale. The search term is kept.
    pub fn load(&mut self, records: Vec<Record>) {
        tracing::debug!(count = records.len(), "loading records");
        self.records = records;
        self.refresh();
    }

    /// Update the search term without filtering. Changing the term moves
    /// back to the first page; re-entering the same term does not.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term == self.search_term {
            return;
        }
        self.search_term = term;
        self.change_page(1);
    }

    /// Recompute the filtered view from the current term
    pub fn search(&mut self) {
        self.refresh();
        tracing::debug!(
            term = %self.search_term,
            matches = self.filtered.len(),
            "search applied"
        );
    }

    fn refresh(&mut self) {
        let needle = self.search_term.trim().to_lowercase();
        let needle = if needle.is_empty() {
            String::new()
        } else {
            self.search_term.to_lowercase()
        };

        self.filtered = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.matches(&needle))
            .map(|(i, _)| i)
            .collect();

        self.page = self.page.clamp(1, self.total_pages());
        let window = self.window_ids();
        self.selected.retain(|id| window.contains(id));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Pagination
    // ─────────────────────────────────────────────────────────────────────────

    /// Move to page `n`, clamped to the valid range. Always clears the selection.
    pub fn set_page(&mut self, n: usize) {
        self.change_page(n);
    }

    pub fn first_page(&mut self) {
        self.set_page(1);
    }

    pub fn previous_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page + 1);
    }

    pub fn last_page(&mut self) {
        self.set_page(self.total_pages());
    }

    fn change_page(&mut self, n: usize) {
        self.page = n.clamp(1, self.total_pages());
        self.selected.clear();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────────────────────

    /// Flip one row's checkbox. Ids outside the current page are ignored.
    pub fn toggle_select_row(&mut self, id: &str) {
        if !self.page_window().iter().any(|r| r.id == id) {
            return;
        }
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
    }

    /// Select the whole page, or clear if it is already exactly selected
    pub fn toggle_select_all(&mut self) {
        let window = self.window_ids();
        if self.selected == window {
            self.selected.clear();
        } else {
            self.selected = window;
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Deletion
    // ─────────────────────────────────────────────────────────────────────────

    /// Remove one record. Unknown ids are a no-op.
    pub fn delete_record(&mut self, id: &str) {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.records.len() == before {
            return;
        }
        self.selected.remove(id);
        tracing::debug!(id, "record deleted");
        self.refresh();
    }

    /// Remove every selected record and clear the selection
    pub fn delete_selected(&mut self) {
        if self.selected.is_empty() {
            return;
        }
        let selected = std::mem::take(&mut self.selected);
        self.records.retain(|r| !selected.contains(&r.id));
        tracing::debug!(count = selected.len(), "selected records deleted");
        self.refresh();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Editing
    // ─────────────────────────────────────────────────────────────────────────

    /// Open an edit buffer on a copy of the record. Unknown ids are a no-op.
    pub fn begin_edit(&mut self, id: &str) {
        if let Some(record) = self.records.iter().find(|r| r.id == id) {
            self.edit_buffer = Some(record.clone());
        }
    }

    /// Merge field changes into the open buffer, unvalidated
    pub fn update_edit_buffer(&mut self, patch: RecordPatch) {
        if let Some(buffer) = self.edit_buffer.as_mut() {
            patch.apply_to(buffer);
        }
    }

    /// Write the buffer back over its record, in place. The buffer is closed
    /// whether or not the record still exists.
    pub fn commit_edit(&mut self) -> Result<(), TableError> {
        let buffer = self.edit_buffer.take().ok_or(TableError::NoEditInProgress)?;

        let Some(slot) = self.records.iter_mut().find(|r| r.id == buffer.id) else {
            tracing::warn!(id = %buffer.id, "edit target no longer exists");
            return Err(TableError::StaleEditTarget { id: buffer.id });
        };

        *slot = buffer;
        self.refresh();
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.edit_buffer = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::Role;

    fn records(n: usize) -> Vec<Record> {
        (1..=n)
            .map(|i| {
                let role = if i % 2 == 1 { Role::Member } else { Role::Admin };
                Record::new(
                    i.to_string(),
                    &format!("U{}", i),
                    &format!("u{}@example.com", i),
                    role,
                )
            })
            .collect()
    }

    fn loaded(n: usize) -> TableState {
        let mut state = TableState::new();
        state.load(records(n));
        state
    }

    fn window_ids(state: &TableState) -> Vec<String> {
        state.page_window().iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_empty_state_has_one_page() {
        let state = TableState::new();
        assert_eq!(state.total_pages(), 1);
        assert_eq!(state.page(), 1);
        assert!(state.page_window().is_empty());
        assert!(!state.all_selected());
    }

    #[test]
    fn test_load_shows_everything_with_empty_term() {
        let state = loaded(25);
        assert_eq!(state.filtered_len(), 25);
        assert_eq!(state.total_pages(), 3);
        assert_eq!(window_ids(&state).len(), PAGE_SIZE);
    }

    #[test]
    fn test_search_matches_name_email_and_role() {
        let mut state = TableState::new();
        state.load(vec![
            Record::new("1", "Aaron", "aaron@x.com", Role::Member),
            Record::new("2", "Bea", "bea@corp.io", Role::Admin),
            Record::new("3", "Cy", "cy@x.com", Role::Moderator),
        ]);

        state.set_search_term("CORP");
        state.search();
        assert_eq!(window_ids(&state), vec!["2"]);

        state.set_search_term("moder");
        state.search();
        assert_eq!(window_ids(&state), vec!["3"]);

        state.set_search_term("aAr");
        state.search();
        assert_eq!(window_ids(&state), vec!["1"]);

        state.set_search_term("");
        state.search();
        assert_eq!(state.filtered_len(), 3);
    }

    #[test]
    fn test_filter_is_exact_projection_for_many_terms() {
        let mut state = loaded(30);
        for term in ["", "u1", "ADMIN", "member", "@example", "zzz", "3"] {
            state.set_search_term(term);
            state.search();
            let needle = term.to_lowercase();
            let expected: Vec<&Record> =
                state.records().iter().filter(|r| r.matches(&needle)).collect();
            let actual: Vec<&Record> = state.filtered().collect();
            assert_eq!(actual, expected, "term {:?}", term);
        }
    }

    #[test]
    fn test_whitespace_term_matches_everything() {
        let mut state = loaded(5);
        state.set_search_term("   ");
        state.search();
        assert_eq!(state.filtered_len(), 5);
    }

    #[test]
    fn test_term_is_stale_until_search() {
        let mut state = loaded(12);
        state.set_search_term("admin");
        assert_eq!(state.filtered_len(), 12);

        state.search();
        assert_eq!(state.filtered_len(), 6);
    }

    #[test]
    fn test_term_change_resets_page_but_same_term_does_not() {
        let mut state = loaded(25);
        state.set_page(3);
        state.set_search_term("u");
        assert_eq!(state.page(), 1);

        state.search();
        state.set_page(2);
        state.set_search_term("u");
        state.search();
        assert_eq!(state.page(), 2);
    }

    #[test]
    fn test_set_page_is_clamped() {
        let mut state = loaded(25);
        for n in [0, 1, 2, 3, 4, 100] {
            state.set_page(n);
            assert!((1..=state.total_pages()).contains(&state.page()));
        }
        state.set_page(0);
        assert_eq!(state.page(), 1);
        state.set_page(99);
        assert_eq!(state.page(), 3);

        let mut empty = TableState::new();
        empty.set_page(5);
        assert_eq!(empty.page(), 1);
    }

    #[test]
    fn test_page_navigation_helpers() {
        let mut state = loaded(25);
        state.last_page();
        assert_eq!(state.page(), 3);
        state.next_page();
        assert_eq!(state.page(), 3);
        state.previous_page();
        assert_eq!(state.page(), 2);
        state.first_page();
        state.previous_page();
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_search_shrinking_results_clamps_page() {
        let mut state = loaded(25);
        state.set_page(3);
        // Same term, so the page is kept until the filter shrinks
        state.search_term = "u2".to_string();
        state.search();
        assert_eq!(state.filtered_len(), 7);
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_toggle_row_only_within_window() {
        let mut state = loaded(25);
        state.toggle_select_row("3");
        assert!(state.is_selected("3"));

        state.toggle_select_row("15");
        assert!(!state.is_selected("15"));

        state.toggle_select_row("3");
        assert!(state.selection().is_empty());

        state.toggle_select_row("missing");
        assert!(state.selection().is_empty());
    }

    #[test]
    fn test_toggle_all_selects_then_clears_page() {
        let mut state = loaded(25);
        state.set_page(3);
        state.toggle_select_all();
        assert_eq!(state.selection().len(), 5);
        assert!(state.all_selected());

        state.toggle_select_all();
        assert!(state.selection().is_empty());

        state.toggle_select_row("21");
        state.toggle_select_all();
        assert_eq!(state.selection().len(), 5);
    }

    #[test]
    fn test_page_change_clears_selection() {
        let mut state = loaded(25);
        state.set_page(3);
        assert_eq!(window_ids(&state), vec!["21", "22", "23", "24", "25"]);

        state.toggle_select_all();
        state.set_page(2);
        assert!(state.selection().is_empty());
    }

    #[test]
    fn test_selection_stays_within_window_after_search() {
        let mut state = loaded(25);
        state.toggle_select_all();
        // Bypass the term-change reset so the selection survives into search()
        state.search_term = "admin".to_string();
        state.search();

        let window: BTreeSet<String> = window_ids(&state).into_iter().collect();
        assert!(state.selection().is_subset(&window));
        assert_eq!(state.selection().len(), 5);
    }

    #[test]
    fn test_delete_record_removes_from_collection_and_selection() {
        let mut state = loaded(12);
        state.toggle_select_row("2");
        state.delete_record("2");

        assert!(!state.records().iter().any(|r| r.id == "2"));
        assert!(!state.is_selected("2"));
        assert_eq!(state.filtered_len(), 11);
    }

    #[test]
    fn test_delete_last_row_of_last_page_clamps_page() {
        let mut state = loaded(11);
        state.set_page(2);
        state.delete_record("11");
        assert_eq!(state.page(), 1);
        assert_eq!(state.total_pages(), 1);
    }

    #[test]
    fn test_delete_keeps_page_when_still_valid() {
        let mut state = loaded(25);
        state.set_page(2);
        state.delete_record("1");
        assert_eq!(state.page(), 2);
    }

    #[test]
    fn test_delete_selected_removes_all_selected() {
        let mut state = loaded(25);
        state.set_page(2);
        state.toggle_select_all();
        let chosen = state.selection().clone();

        state.delete_selected();

        assert!(state.selection().is_empty());
        assert_eq!(state.records().len(), 15);
        for id in &chosen {
            assert!(!state.records().iter().any(|r| &r.id == id));
        }
    }

    #[test]
    fn test_delete_selected_with_empty_selection_is_noop() {
        let mut state = loaded(5);
        let before = state.clone();
        state.delete_selected();
        assert_eq!(state, before);
    }

    #[test]
    fn test_admin_bulk_delete_scenario() {
        let mut state = loaded(12);
        state.set_search_term("admin");
        state.search();
        assert_eq!(state.filtered_len(), 6);

        state.set_page(1);
        assert_eq!(state.page_window().len(), 6);

        state.toggle_select_all();
        assert_eq!(state.selection().len(), 6);

        state.delete_selected();
        assert_eq!(state.records().len(), 6);
        assert!(state.records().iter().all(|r| r.role == Role::Member));
        assert!(state.selection().is_empty());
    }

    #[test]
    fn test_begin_then_cancel_leaves_collection_unchanged() {
        let mut state = loaded(5);
        let before = state.records().to_vec();

        state.begin_edit("3");
        state.update_edit_buffer(RecordPatch::name("Changed"));
        state.cancel_edit();

        assert_eq!(state.records(), before.as_slice());
        assert!(state.edit_buffer().is_none());
    }

    #[test]
    fn test_buffer_is_independent_until_commit() {
        let mut state = loaded(5);
        state.begin_edit("3");
        state.update_edit_buffer(RecordPatch::email("new@example.com"));
        assert_eq!(state.records()[2].email, "u3@example.com");

        state.update_edit_buffer(RecordPatch::role(Role::Guest));
        state.commit_edit().unwrap();

        assert_eq!(state.records()[2].id, "3");
        assert_eq!(state.records()[2].email, "new@example.com");
        assert_eq!(state.records()[2].role, Role::Guest);
        assert!(state.edit_buffer().is_none());
    }

    #[test]
    fn test_begin_edit_unknown_id_is_noop() {
        let mut state = loaded(3);
        state.begin_edit("42");
        assert!(state.edit_buffer().is_none());
        assert_eq!(state.commit_edit(), Err(TableError::NoEditInProgress));
    }

    #[test]
    fn test_commit_after_delete_reports_stale_target() {
        let mut state = loaded(5);
        state.begin_edit("4");
        state.update_edit_buffer(RecordPatch::name("Ghost"));
        state.delete_record("4");
        let before = state.records().to_vec();

        let result = state.commit_edit();

        assert_eq!(
            result,
            Err(TableError::StaleEditTarget {
                id: "4".to_string()
            })
        );
        assert_eq!(state.records(), before.as_slice());
        assert!(state.edit_buffer().is_none());
    }

    #[test]
    fn test_commit_refilters_with_current_term() {
        let mut state = loaded(12);
        state.set_search_term("admin");
        state.search();
        state.begin_edit("2");
        state.update_edit_buffer(RecordPatch::role(Role::Guest));
        state.commit_edit().unwrap();

        assert_eq!(state.filtered_len(), 5);
    }

    #[test]
    fn test_load_keeps_search_term() {
        let mut state = TableState::new();
        state.set_search_term("admin");
        state.load(records(12));
        assert_eq!(state.search_term(), "admin");
        assert_eq!(state.filtered_len(), 6);
    }

    #[test]
    fn test_state_snapshot_round_trips_through_json() {
        let mut state = loaded(12);
        state.set_page(2);
        state.toggle_select_row("11");
        state.begin_edit("12");

        let json = serde_json::to_string(&state).unwrap();
        let restored: TableState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_restored_snapshot_recomputes_views() {
        let json = r#"{
            "records": [
                {"id": "1", "name": "Aaron", "email": "a@x.io", "role": "member"},
                {"id": "2", "name": "Bea", "email": "b@x.io", "role": "admin"}
            ],
            "search_term": "",
            "filtered": [0, 5, 9],
            "page": 0,
            "selected": ["2", "7"],
            "edit_buffer": null
        }"#;
        let state: TableState = serde_json::from_str(json).unwrap();

        assert_eq!(state.page(), 1);
        assert_eq!(state.filtered_len(), 2);
        assert_eq!(window_ids(&state), vec!["1", "2"]);
        assert_eq!(state.selection().iter().collect::<Vec<_>>(), vec!["2"]);
    }

    #[test]
    fn test_restored_snapshot_clamps_page_past_end() {
        let mut state = loaded(12);
        state.set_page(2);
        let json = serde_json::to_string(&state)
            .unwrap()
            .replace(r#""page":2"#, r#""page":40"#);

        let restored: TableState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.page(), 2);
        assert_eq!(restored.page_window().len(), 2);
    }
}
