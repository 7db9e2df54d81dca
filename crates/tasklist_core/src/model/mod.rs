//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the canonical `Task` record persisted to the storage slot.
//! - Generate task identifiers that stay unique within the held list.
//!
//! # Invariants
//! - Every task is identified by an opaque `TaskId` that never changes.
//! - Task text is never empty after trimming.

pub mod id;
pub mod task;
