//! Shared handler state.
//!
//! # Invariants
//! - The connection lock is held only for the duration of one service call
//!   and never across an `.await`.

use crate::error::ApiError;
use reminder_core::{ReminderService, ServiceResult, SqliteReminderRepository};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct AppState {
    conn: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Wraps a migrated connection (see `reminder_core::db::open_db`).
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs one service operation against the shared connection.
    pub fn with_service<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        F: for<'c> FnOnce(&ReminderService<SqliteReminderRepository<'c>>) -> ServiceResult<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|_| ApiError::Internal("database connection lock poisoned".to_string()))?;
        let repo = SqliteReminderRepository::try_new(&conn)
            .map_err(|err| ApiError::Internal(err.to_string()))?;
        let service = ReminderService::new(repo);
        Ok(op(&service)?)
    }
}
