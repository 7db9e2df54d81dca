//! Parsing of lines typed at the shell prompt.

use std::fmt::{Display, Formatter};

/// Where `focus` moves keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    Entry,
    Other,
    Nothing,
}

/// A command typed at the main prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Type into the entry field and submit it.
    Add(String),
    /// Type into the entry field without submitting.
    Type(String),
    Submit,
    Toggle(usize),
    Edit(usize),
    Delete(usize),
    ClearCompleted,
    ClearAll,
    /// The `/` shortcut key.
    Slash,
    Focus(FocusTarget),
    List,
    Help,
    Quit,
}

/// A line typed while a row's edit field is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    Enter,
    Escape,
    Blur,
    /// Replace the draft, then press Enter.
    Replace(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Unknown(String),
    MissingRow(&'static str),
    BadRow(String),
    BadFocus(String),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown(word) => write!(f, "unknown command `{word}`; try `help`"),
            Self::MissingRow(command) => write!(f, "`{command}` needs a row number"),
            Self::BadRow(value) => write!(f, "`{value}` is not a row number"),
            Self::BadFocus(value) => {
                write!(f, "cannot focus `{value}`; expected entry|other|none")
            }
        }
    }
}

impl std::error::Error for ParseError {}

pub const HELP: &str = "\
commands:
  add <text>        type <text> into the entry field and submit
  type <text>       type into the entry field
  submit            submit the entry field
  toggle <n>        toggle row n
  edit <n>          edit row n (then :enter, :esc, :blur, or new text)
  delete <n>        delete row n
  clear-completed   remove completed tasks
  clear-all         remove every task (asks first)
  /                 focus the entry field
  focus <entry|other|none>
  list | help | quit";

impl Command {
    /// Parses one prompt line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word {
            "add" => Self::Add(rest.to_string()),
            "type" => Self::Type(rest.to_string()),
            "submit" => Self::Submit,
            "toggle" => Self::Toggle(parse_row("toggle", rest)?),
            "edit" => Self::Edit(parse_row("edit", rest)?),
            "delete" | "rm" => Self::Delete(parse_row("delete", rest)?),
            "clear-completed" => Self::ClearCompleted,
            "clear-all" => Self::ClearAll,
            "/" => Self::Slash,
            "focus" => Self::Focus(match rest {
                "entry" => FocusTarget::Entry,
                "other" => FocusTarget::Other,
                "none" => FocusTarget::Nothing,
                other => return Err(ParseError::BadFocus(other.to_string())),
            }),
            "list" | "ls" => Self::List,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

impl EditCommand {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            ":enter" => Self::Enter,
            ":esc" => Self::Escape,
            ":blur" => Self::Blur,
            _ => Self::Replace(line.to_string()),
        }
    }
}

fn parse_row(command: &'static str, value: &str) -> Result<usize, ParseError> {
    if value.is_empty() {
        return Err(ParseError::MissingRow(command));
    }
    value
        .parse::<usize>()
        .map_err(|_| ParseError::BadRow(value.to_string()))
}
