//! Core domain logic for the reminder backend.
//! This crate is the single source of truth for reminder business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::reminder::{
    InvalidParam, NewReminder, ReminderEntity, ReminderForm, ReminderId, ReminderRecord,
    ReminderValidationError, ValidReminderForm, MUST_NOT_BE_NULL,
};
pub use repo::reminder_repo::{
    ReminderListQuery, ReminderRepository, RepoError, RepoResult, SqliteReminderRepository,
};
pub use service::reminder_service::{ReminderService, ReminderServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
