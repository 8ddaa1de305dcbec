//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the storage contract the reminder service depends on.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs report absence as `None`, never as a domain error.
//! - Domain validation happens in the service before any write reaches here.

pub mod reminder_repo;
