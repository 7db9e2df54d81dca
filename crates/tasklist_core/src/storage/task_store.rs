//! Persistence gateway for the task sequence.
//!
//! # Responsibility
//! - Serialize the whole task list into the fixed storage slot.
//! - Read it back, distinguishing "nothing saved" from "saved but unreadable".
//!
//! # Invariants
//! - `load(save(tasks)) == tasks`, field for field and in order.
//! - `save` never surfaces an error; failures are logged and dropped.
//! - `load` never masks malformed data as an empty list; that decision
//!   belongs to the caller.
//! - An empty slot value means nothing was saved.
//! - Entries that parse but break task invariants are skipped one by one;
//!   the remaining tasks are still returned.

use crate::model::task::Task;
use crate::storage::kv::{KeyValueStore, StorageError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed storage key. The key name doubles as the schema version marker.
pub const TASKS_STORAGE_KEY: &str = "todo_tasks_v1";

/// Failure reading the persisted task list.
#[derive(Debug)]
pub enum LoadError {
    Storage(StorageError),
    /// Slot content is not a JSON array of tasks.
    Malformed(serde_json::Error),
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "failed to read saved tasks: {err}"),
            Self::Malformed(err) => write!(f, "saved tasks are malformed: {err}"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Malformed(err) => Some(err),
        }
    }
}

impl From<StorageError> for LoadError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(value: serde_json::Error) -> Self {
        Self::Malformed(value)
    }
}

/// Tasks read from the slot, plus how many stored entries were left out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadReport {
    pub tasks: Vec<Task>,
    /// Entries with an empty id or blank text.
    pub skipped: usize,
}

/// Mirrors the task list into [`TASKS_STORAGE_KEY`] of a key-value store.
pub struct TaskStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Creates a gateway writing to `store` under [`TASKS_STORAGE_KEY`].
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying key-value store.
    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Overwrites the slot with the full task sequence.
    ///
    /// Returns whether the write landed. Callers are not expected to act on
    /// it; it exists for diagnostics and tests.
    pub fn save(&self, tasks: &[Task]) -> bool {
        let encoded = match serde_json::to_string(tasks) {
            Ok(encoded) => encoded,
            Err(err) => {
                warn!(
                    "event=tasks_save module=storage status=error error_code=encode_failed error={}",
                    err
                );
                return false;
            }
        };

        match self.store.set_item(TASKS_STORAGE_KEY, &encoded) {
            Ok(()) => {
                info!(
                    "event=tasks_save module=storage status=ok count={}",
                    tasks.len()
                );
                true
            }
            Err(err) => {
                warn!(
                    "event=tasks_save module=storage status=error error_code=write_failed error={}",
                    err
                );
                false
            }
        }
    }

    /// Reads the slot, dropping entries that break task invariants.
    ///
    /// See [`TaskStore::load_report`] for the skipped count.
    pub fn load(&self) -> Result<Vec<Task>, LoadError> {
        self.load_report().map(|report| report.tasks)
    }

    /// Reads the slot. A missing or empty slot is an empty list.
    ///
    /// # Errors
    /// - `Storage` when the slot cannot be read.
    /// - `Malformed` when the slot is not a JSON task array.
    pub fn load_report(&self) -> Result<LoadReport, LoadError> {
        let raw = match self.store.get_item(TASKS_STORAGE_KEY)? {
            Some(raw) if !raw.is_empty() => raw,
            _ => {
                info!("event=tasks_load module=storage status=ok source=empty count=0");
                return Ok(LoadReport::default());
            }
        };

        let parsed: Vec<Task> = serde_json::from_str(&raw)?;
        let total = parsed.len();
        let tasks: Vec<Task> = parsed
            .into_iter()
            .filter(|task| match task.validate() {
                Ok(()) => true,
                Err(err) => {
                    warn!(
                        "event=tasks_load module=storage status=skip reason=invalid_task error={}",
                        err
                    );
                    false
                }
            })
            .collect();
        let skipped = total - tasks.len();
        info!(
            "event=tasks_load module=storage status=ok source=slot count={} skipped={}",
            tasks.len(),
            skipped
        );
        Ok(LoadReport { tasks, skipped })
    }
}
