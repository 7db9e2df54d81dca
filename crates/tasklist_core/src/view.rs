//! Rendering engine: projects the task list onto a visual tree.
//!
//! # Responsibility
//! - Build one row per task, most recently added first.
//! - Compute the remaining/total summary shown under the list.
//!
//! # Invariants
//! - `render_list` is pure; equal inputs give equal trees.
//! - The whole tree is rebuilt on every call; nothing is patched in place.

use crate::edit::EditSession;
use crate::model::task::{Task, TaskId};
use std::fmt::{Display, Formatter};

const EDIT_AFFORDANCE: &str = "✏️";
const DELETE_AFFORDANCE: &str = "🗑️";

/// Remaining/total summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskCount {
    pub remaining: usize,
    pub total: usize,
}

impl TaskCount {
    pub fn of(tasks: &[Task]) -> Self {
        Self {
            remaining: tasks.iter().filter(|task| !task.completed).count(),
            total: tasks.len(),
        }
    }
}

impl Display for TaskCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} remaining • {} total", self.remaining, self.total)
    }
}

/// Whether a row shows its label or an inline edit field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowMode {
    Display,
    /// Edit field pre-populated with `draft`, focused with content selected.
    Editing { draft: String },
}

/// One visual row, tagged with its task id for event correlation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: TaskId,
    pub text: String,
    /// Drives both the checkbox state and the strikethrough marker.
    pub completed: bool,
    pub mode: RowMode,
}

/// Rendered list plus summary line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListView {
    pub rows: Vec<RowView>,
    pub count: TaskCount,
    /// Non-fatal notice shown above the list (e.g. unreadable saved data).
    pub warning: Option<String>,
}

impl ListView {
    /// Row id at a 1-based display position.
    pub fn row_id_at(&self, position: usize) -> Option<&str> {
        position
            .checked_sub(1)
            .and_then(|index| self.rows.get(index))
            .map(|row| row.id.as_str())
    }

    /// Summary line, e.g. `1 remaining • 2 total`.
    pub fn count_text(&self) -> String {
        self.count.to_string()
    }
}

/// Builds the visual tree for `tasks`.
///
/// `edit` turns the matching row into an edit field; a session for a task
/// that no longer exists is ignored.
pub fn render_list(tasks: &[Task], edit: Option<&EditSession>, warning: Option<&str>) -> ListView {
    let rows = tasks
        .iter()
        .rev()
        .map(|task| RowView {
            id: task.id.clone(),
            text: task.text.clone(),
            completed: task.completed,
            mode: match edit {
                Some(session) if session.is_for(&task.id) => RowMode::Editing {
                    draft: session.draft.clone(),
                },
                _ => RowMode::Display,
            },
        })
        .collect();

    ListView {
        rows,
        count: TaskCount::of(tasks),
        warning: warning.map(str::to_string),
    }
}

impl Display for ListView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(warning) = &self.warning {
            writeln!(f, "! {warning}")?;
        }
        for (index, row) in self.rows.iter().enumerate() {
            let checkbox = if row.completed { "[x]" } else { "[ ]" };
            match &row.mode {
                RowMode::Display if row.completed => writeln!(
                    f,
                    "{:>3}. {checkbox} ~~{}~~  {EDIT_AFFORDANCE} {DELETE_AFFORDANCE}",
                    index + 1,
                    row.text
                )?,
                RowMode::Display => writeln!(
                    f,
                    "{:>3}. {checkbox} {}  {EDIT_AFFORDANCE} {DELETE_AFFORDANCE}",
                    index + 1,
                    row.text
                )?,
                RowMode::Editing { draft } => writeln!(
                    f,
                    "{:>3}. {checkbox} [edit: {draft}_]  {EDIT_AFFORDANCE} {DELETE_AFFORDANCE}",
                    index + 1
                )?,
            }
        }
        write!(f, "{}", self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::{render_list, RowMode, TaskCount};
    use crate::edit::EditSession;
    use crate::model::task::Task;

    fn sample() -> Vec<Task> {
        let mut a = Task::new("1", "a");
        a.completed = true;
        vec![a, Task::new("2", "b"), Task::new("3", "c")]
    }

    #[test]
    fn rows_are_in_reverse_insertion_order() {
        let view = render_list(&sample(), None, None);
        let texts: Vec<&str> = view.rows.iter().map(|row| row.text.as_str()).collect();
        assert_eq!(texts, vec!["c", "b", "a"]);
        assert_eq!(view.row_id_at(1), Some("3"));
        assert_eq!(view.row_id_at(0), None);
        assert_eq!(view.row_id_at(4), None);
    }

    #[test]
    fn count_text_matches_summary_format() {
        let count = TaskCount::of(&sample());
        assert_eq!(count.to_string(), "2 remaining • 3 total");
        assert_eq!(TaskCount::of(&[]).to_string(), "0 remaining • 0 total");
    }

    #[test]
    fn editing_row_shows_draft() {
        let session = EditSession::begin("2", "b draft");
        let view = render_list(&sample(), Some(&session), None);
        assert_eq!(
            view.rows[1].mode,
            RowMode::Editing {
                draft: "b draft".to_string()
            }
        );
        assert_eq!(view.rows[0].mode, RowMode::Display);
    }

    #[test]
    fn text_tree_marks_completed_rows() {
        let view = render_list(&sample(), None, Some("careful"));
        let text = view.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "! careful");
        assert!(lines[1].contains("[ ] c"));
        assert!(lines[3].contains("[x] ~~a~~"));
        assert_eq!(lines[4], "2 remaining • 3 total");
    }

    #[test]
    fn render_is_idempotent() {
        let tasks = sample();
        assert_eq!(render_list(&tasks, None, None), render_list(&tasks, None, None));
    }
}
