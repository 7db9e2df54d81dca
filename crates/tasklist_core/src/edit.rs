//! Inline edit session for a single row.
//!
//! # Invariants
//! - At most one session exists; it lives in an `Option` owned by the
//!   controller.
//! - Commit and cancel consume the session, so whichever resolves first wins
//!   and later resolutions (typically the blur caused by re-rendering) are
//!   no-ops.

use crate::model::task::TaskId;

/// In-progress edit of one task's text. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub task_id: TaskId,
    /// Current content of the edit field.
    pub draft: String,
}

impl EditSession {
    /// Opens a session pre-populated with the task's current text.
    pub fn begin(task_id: impl Into<TaskId>, current_text: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            draft: current_text.into(),
        }
    }

    /// Whether this session edits the task with `id`.
    pub fn is_for(&self, id: &str) -> bool {
        self.task_id == id
    }
}
