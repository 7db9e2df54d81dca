//! UI events delivered to the task list controller.
//!
//! Rows are never wired to handlers individually. A shell reports what
//! happened and on which row id; the controller decides what it means.

use crate::model::task::TaskId;

/// Keys the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Char(char),
}

/// Global shortcut that moves focus to the entry field.
pub const FOCUS_ENTRY_KEY: Key = Key::Char('/');

/// Which input currently holds keyboard focus.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    None,
    /// The task-entry text field.
    EntryField,
    /// The inline edit field of the given row.
    EditField(TaskId),
    /// Some other editable field on the page.
    OtherText,
}

impl Focus {
    /// Whether keystrokes are currently being typed into a text field.
    pub fn is_text_input(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Per-row actions, addressed by row id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    Toggle,
    StartEdit,
    Delete,
    EditInput(String),
    EditKey(Key),
    EditBlur,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Entry field content changed.
    EntryInput(String),
    /// Entry form submitted.
    SubmitEntry,
    Row { id: TaskId, action: RowAction },
    ClearCompleted,
    ClearAll,
    /// Key pressed outside any row edit field.
    GlobalKey(Key),
    FocusChanged(Focus),
}

impl UiEvent {
    pub fn row(id: impl Into<TaskId>, action: RowAction) -> Self {
        Self::Row {
            id: id.into(),
            action,
        }
    }
}

/// Whether the controller consumed an event.
///
/// `Handled` means the shell must suppress the event's default action (for
/// example, not inserting a typed `/` into a field).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Handled,
    Ignored,
}

/// Blocking yes/no prompt used before destructive operations.
pub trait ConfirmPrompt {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> ConfirmPrompt for F {
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfirmPrompt, Focus};

    #[test]
    fn closures_act_as_prompts() {
        let mut asked = Vec::new();
        let mut prompt = |message: &str| {
            asked.push(message.to_string());
            true
        };
        assert!(prompt.confirm("sure?"));
        assert_eq!(asked, vec!["sure?".to_string()]);
    }

    #[test]
    fn only_no_focus_is_outside_text_input() {
        assert!(!Focus::None.is_text_input());
        assert!(Focus::EntryField.is_text_input());
        assert!(Focus::EditField("1".to_string()).is_text_input());
        assert!(Focus::OtherText.is_text_input());
    }
}
