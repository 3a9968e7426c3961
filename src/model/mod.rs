//! Model layer - centralized state management
//!
//! - `TableState` - the record collection and its derived views
//! - `ModalStack` - modal overlay management
//! - `LoadState` / `EditField` - presentation-only state

pub mod modal;
pub mod record;
pub mod table;
pub mod ui;

pub use record::{Record, RecordId, RecordPatch, Role};
pub use table::{TableError, TableState};
pub use ui::{EditField, LoadState};
