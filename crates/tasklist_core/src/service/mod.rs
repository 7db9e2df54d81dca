//! Core use-case services.
//!
//! # Responsibility
//! - Turn UI events into task list mutations.
//! - Keep UI shells decoupled from storage and rendering details.

pub mod task_list;
