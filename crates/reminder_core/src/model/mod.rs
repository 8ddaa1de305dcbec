//! Reminder domain model.
//!
//! # Responsibility
//! - Define record, form and entity shapes used by core business logic.
//! - Keep reshaping between them in pure converter functions.
//!
//! # Invariants
//! - Every reminder is identified by a store-assigned `ReminderId`.
//! - Deletion is a hard delete; there is no tombstone state.

pub mod convert;
pub mod reminder;
