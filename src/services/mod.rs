//! External service interactions
//!
//! The only external system is the remote record source, read once at startup.

pub mod record_source;

pub use record_source::{LoadOutcome, RecordLoader, SourceError};
