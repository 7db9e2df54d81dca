//! Persistent storage for the task list.
//!
//! # Responsibility
//! - Provide a browser-style key-value slot contract (`KeyValueStore`).
//! - Mirror the full task sequence into one fixed slot (`TaskStore`).
//!
//! # Invariants
//! - Every save overwrites the whole slot; there are no partial writes.
//! - Storage details stay behind `KeyValueStore` so the controller never sees
//!   SQL.

pub mod kv;
pub mod task_store;
