//! Task domain model.
//!
//! # Responsibility
//! - Define the record stored in the task list and its serialized shape.
//! - Provide the text normalization shared by add and edit paths.
//!
//! # Invariants
//! - `id` is assigned once at creation and is immutable afterwards.
//! - `text` is non-empty after trimming.
//! - Serialized field names are exactly `id`, `text`, `completed`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque task identifier.
///
/// Kept as a type alias because persisted data stores ids as plain strings.
pub type TaskId = String;

/// Validation failures for task records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// `id` is empty.
    EmptyId,
    /// `text` is empty after trimming.
    EmptyText(TaskId),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "task id cannot be empty"),
            Self::EmptyText(id) => write!(f, "task `{id}` has empty text"),
        }
    }
}

impl Error for TaskValidationError {}

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
}

impl Task {
    /// Creates an incomplete task.
    ///
    /// Callers are expected to pass already-normalized text; see
    /// [`normalize_text`].
    pub fn new(id: impl Into<TaskId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            completed: false,
        }
    }

    /// Flips the completion flag.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    /// Checks record invariants.
    ///
    /// # Errors
    /// - `EmptyId` when `id` is empty.
    /// - `EmptyText` when `text` is blank.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_empty() {
            return Err(TaskValidationError::EmptyId);
        }
        if self.text.trim().is_empty() {
            return Err(TaskValidationError::EmptyText(self.id.clone()));
        }
        Ok(())
    }
}

/// Trims raw user input, returning `None` when nothing is left.
pub fn normalize_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
