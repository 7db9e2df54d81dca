//! Task list controller.
//!
//! # Responsibility
//! - Own the canonical in-memory task sequence.
//! - Apply mutations, mirror them to storage, and rebuild the visual tree.
//! - Interpret delegated UI events (entry submit, row actions, keys, focus).
//!
//! # Invariants
//! - Every mutation runs `mutate -> save -> render`, in that order, in full.
//! - No-op paths (blank text, unknown id, declined prompt) neither save nor
//!   render.
//! - At most one edit session is open; commit and cancel are mutually
//!   exclusive.

use crate::edit::EditSession;
use crate::event::{ConfirmPrompt, EventOutcome, Focus, Key, RowAction, UiEvent, FOCUS_ENTRY_KEY};
use crate::model::id::IdGenerator;
use crate::model::task::{normalize_text, Task, TaskId};
use crate::storage::kv::KeyValueStore;
use crate::storage::task_store::TaskStore;
use crate::view::{render_list, ListView, TaskCount};
use log::{debug, info, warn};

/// Prompt shown before emptying the list.
pub const CLEAR_ALL_CONFIRM_MESSAGE: &str = "Delete all tasks?";

/// Notice shown when saved tasks exist but cannot be read.
pub const LOAD_FAILURE_WARNING: &str =
    "Saved tasks could not be read; starting with an empty list.";

/// Notice shown when some saved entries were unusable and left out.
pub const SKIPPED_TASKS_WARNING: &str =
    "Some saved tasks could not be read and were left out.";

/// Single owner of task list state.
pub struct TaskListController<S: KeyValueStore> {
    tasks: Vec<Task>,
    store: TaskStore<S>,
    ids: IdGenerator,
    edit: Option<EditSession>,
    entry_text: String,
    focus: Focus,
    warning: Option<String>,
    view: ListView,
}

impl<S: KeyValueStore> TaskListController<S> {
    /// Loads persisted tasks and performs the initial render.
    ///
    /// Unreadable saved data falls back to an empty list with a visible
    /// warning instead of aborting startup. Individual unusable entries are
    /// left out and also produce a warning. The slot is left untouched until
    /// the next mutation overwrites it.
    pub fn load(store: S) -> Self {
        let store = TaskStore::new(store);
        let (tasks, warning) = match store.load_report() {
            Ok(report) if report.skipped > 0 => {
                warn!(
                    "event=controller_init module=service status=error error_code=tasks_skipped skipped={}",
                    report.skipped
                );
                (report.tasks, Some(SKIPPED_TASKS_WARNING.to_string()))
            }
            Ok(report) => (report.tasks, None),
            Err(err) => {
                warn!(
                    "event=controller_init module=service status=error error_code=load_failed fallback=empty error={}",
                    err
                );
                (Vec::new(), Some(LOAD_FAILURE_WARNING.to_string()))
            }
        };

        let ids = IdGenerator::seeded(tasks.iter().map(|task| task.id.as_str()));
        let mut controller = Self {
            tasks,
            store,
            ids,
            edit: None,
            entry_text: String::new(),
            focus: Focus::None,
            warning,
            view: ListView::default(),
        };
        controller.render();
        info!(
            "event=controller_init module=service status=ok count={}",
            controller.tasks.len()
        );
        controller
    }

    /// Tasks in insertion order, oldest first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Visual tree produced by the most recent render.
    pub fn view(&self) -> &ListView {
        &self.view
    }

    /// Remaining/total summary of the last render.
    pub fn count(&self) -> TaskCount {
        self.view.count
    }

    /// Input that currently holds keyboard focus.
    pub fn focus(&self) -> &Focus {
        &self.focus
    }

    /// Current content of the task-entry field.
    pub fn entry_text(&self) -> &str {
        &self.entry_text
    }

    /// Open edit session, if any.
    pub fn editing(&self) -> Option<&EditSession> {
        self.edit.as_ref()
    }

    /// Key-value store backing the persisted slot.
    pub fn store(&self) -> &S {
        self.store.inner()
    }

    /// Appends a task. Blank text is ignored.
    ///
    /// Returns the new task id when a task was added.
    pub fn add(&mut self, raw_text: &str) -> Option<TaskId> {
        let Some(text) = normalize_text(raw_text) else {
            debug!("event=task_add module=service status=skip reason=blank_text");
            return None;
        };

        let id = self
            .ids
            .next(self.tasks.iter().map(|task| task.id.as_str()));
        self.tasks.push(Task::new(id.clone(), text));
        info!("event=task_add module=service status=ok id={id}");
        self.commit_mutation();
        Some(id)
    }

    /// Removes the task with `id`. Unknown ids are ignored.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        if self.tasks.len() == before {
            debug!("event=task_delete module=service status=skip reason=not_found id={id}");
            return false;
        }
        info!("event=task_delete module=service status=ok id={id}");
        self.commit_mutation();
        true
    }

    /// Flips completion on the task with `id`. Unknown ids are ignored.
    pub fn toggle_complete(&mut self, id: &str) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            debug!("event=task_toggle module=service status=skip reason=not_found id={id}");
            return false;
        };
        task.toggle();
        info!(
            "event=task_toggle module=service status=ok id={id} completed={}",
            task.completed
        );
        self.commit_mutation();
        true
    }

    /// Removes every completed task, keeping the others in order.
    ///
    /// Always saves and re-renders, even when nothing was completed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.completed);
        let removed = before - self.tasks.len();
        info!("event=tasks_clear_completed module=service status=ok removed={removed}");
        self.commit_mutation();
        removed
    }

    /// Empties the list after the user confirms.
    pub fn clear_all(&mut self, prompt: &mut dyn ConfirmPrompt) -> bool {
        if !prompt.confirm(CLEAR_ALL_CONFIRM_MESSAGE) {
            debug!("event=tasks_clear_all module=service status=skip reason=declined");
            return false;
        }
        let removed = self.tasks.len();
        self.tasks.clear();
        info!("event=tasks_clear_all module=service status=ok removed={removed}");
        self.commit_mutation();
        true
    }

    /// Replaces the entry field content.
    pub fn set_entry_text(&mut self, text: impl Into<String>) {
        self.entry_text = text.into();
    }

    /// Submits the entry field: adds its content as a task, then clears it.
    pub fn submit_entry(&mut self) -> Option<TaskId> {
        let text = std::mem::take(&mut self.entry_text);
        self.add(&text)
    }

    /// Switches a row to its edit field.
    ///
    /// Any other open session is discarded without saving.
    pub fn start_edit(&mut self, id: &str) -> bool {
        let Some(task) = self.tasks.iter().find(|task| task.id == id) else {
            debug!("event=edit_start module=service status=skip reason=not_found id={id}");
            return false;
        };
        if let Some(previous) = self.edit.replace(EditSession::begin(id, task.text.clone())) {
            debug!(
                "event=edit_start module=service status=ok discarded={}",
                previous.task_id
            );
        }
        self.focus = Focus::EditField(id.to_string());
        self.render();
        true
    }

    /// Updates the draft of the open session for `id`.
    pub fn update_edit_draft(&mut self, id: &str, draft: impl Into<String>) -> bool {
        match self.edit.as_mut() {
            Some(session) if session.is_for(id) => session.draft = draft.into(),
            _ => return false,
        }
        self.render();
        true
    }

    /// Finalizes the open session for `id`.
    ///
    /// A blank draft keeps the original text, but the list is still saved and
    /// re-rendered. Returns `false` when no session for `id` is open, which
    /// is the case for a blur arriving after cancel.
    pub fn commit_edit(&mut self, id: &str) -> bool {
        let Some(session) = self.take_session(id) else {
            return false;
        };
        self.release_edit_focus(id);

        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            debug!("event=edit_commit module=service status=skip reason=not_found id={id}");
            self.render();
            return true;
        };
        match normalize_text(&session.draft) {
            Some(text) => {
                task.text = text;
                info!("event=edit_commit module=service status=ok id={id} changed=true");
            }
            None => {
                info!("event=edit_commit module=service status=ok id={id} changed=false reason=blank_text");
            }
        }
        self.commit_mutation();
        true
    }

    /// Abandons the open session for `id` without saving.
    pub fn cancel_edit(&mut self, id: &str) -> bool {
        if self.take_session(id).is_none() {
            return false;
        }
        self.release_edit_focus(id);
        debug!("event=edit_cancel module=service status=ok id={id}");
        self.render();
        true
    }

    /// Handles a key pressed outside any row edit field.
    ///
    /// `/` moves focus to the entry field unless a text field already has
    /// focus, in which case the key is left for that field.
    pub fn handle_global_key(&mut self, key: Key) -> EventOutcome {
        if key != FOCUS_ENTRY_KEY || self.focus.is_text_input() {
            return EventOutcome::Ignored;
        }
        self.focus = Focus::EntryField;
        debug!("event=focus_entry module=service status=ok");
        EventOutcome::Handled
    }

    /// Moves focus. Leaving an open edit field counts as blur and commits it.
    pub fn set_focus(&mut self, focus: Focus) {
        if focus != self.focus {
            if let Focus::EditField(id) = self.focus.clone() {
                self.commit_edit(&id);
            }
        }
        self.focus = focus;
    }

    /// Routes a delegated UI event.
    pub fn dispatch(&mut self, event: UiEvent, prompt: &mut dyn ConfirmPrompt) -> EventOutcome {
        match event {
            UiEvent::EntryInput(text) => {
                self.set_entry_text(text);
                EventOutcome::Handled
            }
            UiEvent::SubmitEntry => {
                self.submit_entry();
                EventOutcome::Handled
            }
            UiEvent::Row { id, action } => self.dispatch_row(&id, action),
            UiEvent::ClearCompleted => {
                self.clear_completed();
                EventOutcome::Handled
            }
            UiEvent::ClearAll => {
                self.clear_all(prompt);
                EventOutcome::Handled
            }
            UiEvent::GlobalKey(key) => self.handle_global_key(key),
            UiEvent::FocusChanged(focus) => {
                self.set_focus(focus);
                EventOutcome::Handled
            }
        }
    }

    fn dispatch_row(&mut self, id: &str, action: RowAction) -> EventOutcome {
        let handled = match action {
            RowAction::Toggle => self.toggle_complete(id),
            RowAction::StartEdit => self.start_edit(id),
            RowAction::Delete => self.delete(id),
            RowAction::EditInput(text) => self.update_edit_draft(id, text),
            RowAction::EditKey(Key::Enter) => self.commit_edit(id),
            RowAction::EditKey(Key::Escape) => self.cancel_edit(id),
            RowAction::EditKey(Key::Char(_)) => false,
            RowAction::EditBlur => self.commit_edit(id),
        };
        if handled {
            EventOutcome::Handled
        } else {
            EventOutcome::Ignored
        }
    }

    fn take_session(&mut self, id: &str) -> Option<EditSession> {
        if self.edit.as_ref().is_some_and(|session| session.is_for(id)) {
            self.edit.take()
        } else {
            None
        }
    }

    fn release_edit_focus(&mut self, id: &str) {
        if matches!(&self.focus, Focus::EditField(focused) if focused == id) {
            self.focus = Focus::None;
        }
    }

    /// Saves, then re-renders. Rebuilding the rows closes any open session
    /// and replaces the load warning now that the slot has been rewritten.
    fn commit_mutation(&mut self) {
        self.store.save(&self.tasks);
        if let Some(session) = self.edit.take() {
            debug!(
                "event=edit_discard module=service status=ok id={}",
                session.task_id
            );
            self.release_edit_focus(&session.task_id);
        }
        self.warning = None;
        self.render();
    }

    fn render(&mut self) {
        self.view = render_list(&self.tasks, self.edit.as_ref(), self.warning.as_deref());
    }
}
