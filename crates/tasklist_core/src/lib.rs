//! Core domain logic for the task list.
//! This crate is the single source of truth for task list invariants; UI
//! shells only translate input into [`UiEvent`]s and display [`ListView`]s.

pub mod config;
pub mod db;
pub mod edit;
pub mod event;
pub mod logging;
pub mod model;
pub mod service;
pub mod storage;
pub mod view;

pub use config::{AppConfig, ConfigError, ConfigOverrides};
pub use edit::EditSession;
pub use event::{ConfirmPrompt, EventOutcome, Focus, Key, RowAction, UiEvent};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::id::IdGenerator;
pub use model::task::{normalize_text, Task, TaskId, TaskValidationError};
pub use service::task_list::{
    TaskListController, CLEAR_ALL_CONFIRM_MESSAGE, LOAD_FAILURE_WARNING, SKIPPED_TASKS_WARNING,
};
pub use storage::kv::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError};
pub use storage::task_store::{LoadError, LoadReport, TaskStore, TASKS_STORAGE_KEY};
pub use view::{render_list, ListView, RowMode, RowView, TaskCount};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
