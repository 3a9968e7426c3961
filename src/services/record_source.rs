//! Record source service
//!
//! Fetches the user list once, on a background thread, and hands it back
//! through a channel that the event loop polls on every tick.

use crate::model::Record;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Why the initial load produced no records
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
    #[error("could not decode records: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("loader thread stopped without a result")]
    Disconnected,
}

/// Outcome of the load as seen by the event loop
#[derive(Debug)]
pub enum LoadOutcome {
    Loaded(Vec<Record>),
    Failed(SourceError),
}

/// Parse a JSON array of records. Unknown fields are ignored and entries
/// without a usable id are skipped.
pub fn parse_records(body: &str) -> Result<Vec<Record>, SourceError> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(body)?;
    let mut records = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<Record>(entry) {
            Ok(record) => records.push(record),
            Err(err) => tracing::warn!(index, error = %err, "skipping malformed user entry"),
        }
    }
    Ok(records)
}

/// Perform the blocking GET and decode the body
pub fn fetch_records(url: &str, timeout: Option<Duration>) -> Result<Vec<Record>, SourceError> {
    let request_error = |source| SourceError::Request {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(request_error)?;

    let response = client.get(url).send().map_err(request_error)?;
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().map_err(request_error)?;
    parse_records(&body)
}

/// Runs the one-time fetch and reports its result
pub struct RecordLoader {
    receiver: Option<Receiver<Result<Vec<Record>, SourceError>>>,
    started: Option<Instant>,
}

impl Default for RecordLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordLoader {
    pub fn new() -> Self {
        Self {
            receiver: None,
            started: None,
        }
    }

    /// Start fetching `url` in the background. Later calls are ignored.
    pub fn spawn(&mut self, url: String, timeout: Option<Duration>) {
        tracing::info!(%url, "fetching records");
        self.spawn_with(move || fetch_records(&url, timeout));
    }

    /// Run an arbitrary fetch in the background. Later calls are ignored.
    pub fn spawn_with<F>(&mut self, fetch: F)
    where
        F: FnOnce() -> Result<Vec<Record>, SourceError> + Send + 'static,
    {
        if self.started.is_some() {
            return;
        }

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(fetch());
        });

        self.attach(rx);
    }

    fn attach(&mut self, rx: Receiver<Result<Vec<Record>, SourceError>>) {
        self.receiver = Some(rx);
        self.started = Some(Instant::now());
    }

    pub fn is_pending(&self) -> bool {
        self.receiver.is_some()
    }

    /// Check for a finished load. Returns the outcome exactly once.
    pub fn poll(&mut self) -> Option<LoadOutcome> {
        let rx = self.receiver.as_ref()?;

        let outcome = match rx.try_recv() {
            Ok(Ok(records)) => LoadOutcome::Loaded(records),
            Ok(Err(err)) => LoadOutcome::Failed(err),
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => LoadOutcome::Failed(SourceError::Disconnected),
        };

        self.receiver = None;
        let elapsed = self.started.map(|s| s.elapsed()).unwrap_or_default();
        match &outcome {
            LoadOutcome::Loaded(records) => {
                tracing::info!(count = records.len(), ?elapsed, "records loaded")
            }
            LoadOutcome::Failed(err) => tracing::warn!(error = %err, ?elapsed, "record load failed"),
        }

        Some(outcome)
    }
}
