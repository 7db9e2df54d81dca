//! Interactive line-oriented shell over a [`TaskListController`].
//!
//! Each typed command becomes one or more [`UiEvent`]s addressed by the row
//! ids of the last rendered view.

use crate::command::{Command, EditCommand, FocusTarget, HELP};
use std::io::{self, BufRead, Write};
use tasklist_core::{
    ConfirmPrompt, EventOutcome, Focus, Key, KeyValueStore, RowAction, TaskListController, UiEvent,
};

/// Blocking y/N prompt on the shell's own input and output.
struct LinePrompt<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<R: BufRead, W: Write> ConfirmPrompt for LinePrompt<'_, R, W> {
    fn confirm(&mut self, message: &str) -> bool {
        if write!(self.output, "{message} [y/N] ").and_then(|()| self.output.flush()).is_err() {
            return false;
        }
        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

pub struct Shell<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Runs until `quit` or end of input.
    pub fn run<S: KeyValueStore>(&mut self, controller: &mut TaskListController<S>) -> io::Result<()> {
        writeln!(self.output, "{}", controller.view())?;
        loop {
            let editing = controller.editing().map(|session| session.task_id.clone());
            write!(self.output, "{}", if editing.is_some() { "edit> " } else { "> " })?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(());
            }
            let line = line.trim_end_matches(['\n', '\r']);

            if let Some(id) = editing {
                self.apply_edit(controller, id, EditCommand::parse(line));
                writeln!(self.output, "{}", controller.view())?;
                continue;
            }

            let command = match Command::parse(line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(err) => {
                    writeln!(self.output, "{err}")?;
                    continue;
                }
            };
            match command {
                Command::Quit => return Ok(()),
                Command::Help => writeln!(self.output, "{HELP}")?,
                command => {
                    self.apply(controller, command)?;
                    writeln!(self.output, "{}", controller.view())?;
                }
            }
        }
    }

    fn apply<S: KeyValueStore>(
        &mut self,
        controller: &mut TaskListController<S>,
        command: Command,
    ) -> io::Result<()> {
        let events = match command {
            Command::Add(text) => vec![
                UiEvent::FocusChanged(Focus::EntryField),
                UiEvent::EntryInput(text),
                UiEvent::SubmitEntry,
            ],
            Command::Type(text) => vec![
                UiEvent::FocusChanged(Focus::EntryField),
                UiEvent::EntryInput(text),
            ],
            Command::Submit => vec![UiEvent::SubmitEntry],
            Command::Toggle(row) => self.row_event(controller, row, RowAction::Toggle)?,
            Command::Edit(row) => self.row_event(controller, row, RowAction::StartEdit)?,
            Command::Delete(row) => self.row_event(controller, row, RowAction::Delete)?,
            Command::ClearCompleted => vec![UiEvent::ClearCompleted],
            Command::ClearAll => vec![UiEvent::ClearAll],
            Command::Slash => vec![UiEvent::GlobalKey(Key::Char('/'))],
            Command::Focus(target) => vec![UiEvent::FocusChanged(match target {
                FocusTarget::Entry => Focus::EntryField,
                FocusTarget::Other => Focus::OtherText,
                FocusTarget::Nothing => Focus::None,
            })],
            Command::List => Vec::new(),
            Command::Help | Command::Quit => Vec::new(),
        };

        for event in events {
            let is_shortcut = matches!(event, UiEvent::GlobalKey(_));
            let outcome = self.dispatch(controller, event);
            if is_shortcut {
                let note = self.unclaimed_slash(controller, outcome);
                writeln!(self.output, "{note}")?;
            }
        }
        Ok(())
    }

    /// A `/` the shortcut did not claim is an ordinary keystroke for
    /// whichever field holds focus. Only the entry field lives in the shell.
    fn unclaimed_slash<S: KeyValueStore>(
        &mut self,
        controller: &mut TaskListController<S>,
        outcome: EventOutcome,
    ) -> &'static str {
        match outcome {
            EventOutcome::Handled => "focus: entry field",
            EventOutcome::Ignored if controller.focus() == &Focus::EntryField => {
                let text = format!("{}/", controller.entry_text());
                self.dispatch(controller, UiEvent::EntryInput(text));
                "`/` typed into the entry field"
            }
            EventOutcome::Ignored => "`/` left to the focused field",
        }
    }

    fn apply_edit<S: KeyValueStore>(
        &mut self,
        controller: &mut TaskListController<S>,
        id: String,
        command: EditCommand,
    ) {
        let actions = match command {
            EditCommand::Enter => vec![RowAction::EditKey(Key::Enter)],
            // Escape re-renders, which drops the field and fires a blur.
            EditCommand::Escape => vec![RowAction::EditKey(Key::Escape), RowAction::EditBlur],
            EditCommand::Blur => vec![RowAction::EditBlur],
            EditCommand::Replace(text) => vec![
                RowAction::EditInput(text),
                RowAction::EditKey(Key::Enter),
                RowAction::EditBlur,
            ],
        };
        for action in actions {
            self.dispatch(controller, UiEvent::row(id.clone(), action));
        }
    }

    fn row_event<S: KeyValueStore>(
        &mut self,
        controller: &TaskListController<S>,
        row: usize,
        action: RowAction,
    ) -> io::Result<Vec<UiEvent>> {
        match controller.view().row_id_at(row) {
            Some(id) => Ok(vec![UiEvent::row(id, action)]),
            None => {
                writeln!(self.output, "no row {row}")?;
                Ok(Vec::new())
            }
        }
    }

    fn dispatch<S: KeyValueStore>(
        &mut self,
        controller: &mut TaskListController<S>,
        event: UiEvent,
    ) -> EventOutcome {
        let mut prompt = LinePrompt {
            input: &mut self.input,
            output: &mut self.output,
        };
        controller.dispatch(event, &mut prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::Shell;
    use tasklist_core::{MemoryKeyValueStore, TaskListController};

    fn run_script(script: &str) -> (TaskListController<MemoryKeyValueStore>, String) {
        let mut controller = TaskListController::load(MemoryKeyValueStore::new());
        let mut output = Vec::new();
        Shell::new(script.as_bytes(), &mut output)
            .run(&mut controller)
            .unwrap();
        (controller, String::from_utf8(output).unwrap())
    }

    #[test]
    fn add_toggle_and_list() {
        let (controller, output) = run_script("add a\nadd b\ntoggle 2\nquit\n");
        let texts: Vec<&str> = controller
            .view()
            .rows
            .iter()
            .map(|row| row.text.as_str())
            .collect();
        assert_eq!(texts, vec!["b", "a"]);
        assert!(controller.view().rows[1].completed);
        assert!(output.contains("1 remaining • 2 total"));
    }

    #[test]
    fn edit_mode_replaces_text() {
        let (controller, _) = run_script("add draft\nedit 1\n  final  \nquit\n");
        assert_eq!(controller.tasks()[0].text, "final");
        assert!(controller.editing().is_none());
    }

    #[test]
    fn escape_keeps_text_and_does_not_save() {
        let (controller, _) = run_script("add keep\nedit 1\n:esc\nquit\n");
        assert_eq!(controller.tasks()[0].text, "keep");
        assert_eq!(controller.store().writes(), 1);
    }

    #[test]
    fn clear_all_asks_first() {
        let (controller, output) = run_script("add a\nclear-all\nn\nclear-all\ny\nquit\n");
        assert!(output.contains("Delete all tasks? [y/N]"));
        assert!(controller.tasks().is_empty());
    }

    #[test]
    fn slash_shortcut_reports_focus_change() {
        let (_, output) = run_script("/\nquit\n");
        assert!(output.contains("focus: entry field"));
    }

    #[test]
    fn slash_in_the_entry_field_is_typed_not_swallowed() {
        let (controller, output) = run_script("type abc\n/\nsubmit\nquit\n");
        assert!(output.contains("`/` typed into the entry field"));
        assert_eq!(controller.tasks()[0].text, "abc/");
    }

    #[test]
    fn slash_in_another_field_leaves_the_entry_alone() {
        let (controller, output) = run_script("type abc\nfocus other\n/\nquit\n");
        assert!(output.contains("`/` left to the focused field"));
        assert_eq!(controller.entry_text(), "abc");
        assert_eq!(controller.focus(), &tasklist_core::Focus::OtherText);
    }

    #[test]
    fn unknown_rows_are_reported() {
        let (_, output) = run_script("toggle 3\nquit\n");
        assert!(output.contains("no row 3"));
    }
}
