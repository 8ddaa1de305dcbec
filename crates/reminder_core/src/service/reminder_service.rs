//! Reminder use-case service.
//!
//! # Responsibility
//! - Enforce reminder validation and existence rules.
//! - Orchestrate repository calls and reshape records into entities.
//! - Raise domain failures (`NotFound`, `ValidationFailed`).
//!
//! # Invariants
//! - Forms are validated before any mutating store call.
//! - Existence is checked before update and delete mutate anything.
//! - Store failures are surfaced unmodified as `StoreFailure`.
//! - No state is kept between calls.

use crate::model::convert::{now_utc, to_new_reminder, to_reminder_entity, to_reminder_record};
use crate::model::reminder::{
    InvalidParam, ReminderEntity, ReminderForm, ReminderId, ReminderRecord,
    ReminderValidationError,
};
use crate::repo::reminder_repo::{RepoError, ReminderListQuery, ReminderRepository};
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ReminderServiceError>;

/// Service error for reminder use-cases.
#[derive(Debug)]
pub enum ReminderServiceError {
    /// One or more form fields are missing; every offending field is listed.
    ValidationFailed(Vec<InvalidParam>),
    /// No reminder exists with this id.
    NotFound(ReminderId),
    /// Persistence-layer failure, passed through as-is.
    StoreFailure(RepoError),
}

impl Display for ReminderServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ValidationFailed(params) => {
                let fields = params
                    .iter()
                    .map(|param| param.name.as_str())
                    .collect::<Vec<_>>()
                    .join(",");
                write!(f, "reminder validation failed: {fields}")
            }
            Self::NotFound(id) => write!(f, "reminder (id = {id}) is not found."),
            Self::StoreFailure(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ReminderServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StoreFailure(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ReminderServiceError {
    fn from(value: RepoError) -> Self {
        Self::StoreFailure(value)
    }
}

impl From<ReminderValidationError> for ReminderServiceError {
    fn from(value: ReminderValidationError) -> Self {
        Self::ValidationFailed(value.invalid_params)
    }
}

/// Reminder service facade over a repository implementation.
pub struct ReminderService<R: ReminderRepository> {
    repo: R,
}

impl<R: ReminderRepository> ReminderService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Gets one reminder by id.
    pub fn find_by_id(&self, id: ReminderId) -> ServiceResult<ReminderEntity> {
        let record = self.require_existing(id)?;
        Ok(to_reminder_entity(record))
    }

    /// Lists reminders in ascending id order.
    ///
    /// Unsatisfiable ranges (`limit == 0`, `offset` past the end) yield an
    /// empty list, never an error.
    pub fn find_list(&self, limit: u32, offset: u64) -> ServiceResult<Vec<ReminderEntity>> {
        let records = self
            .repo
            .list_reminders(&ReminderListQuery { limit, offset })
            .map_err(|err| log_store_failure("find_list", err))?;

        debug!(
            "event=reminder_list module=service status=ok limit={limit} offset={offset} size={}",
            records.len()
        );
        Ok(records.into_iter().map(to_reminder_entity).collect())
    }

    /// Validates the form and persists a new reminder.
    ///
    /// `created_at` and `updated_at` are stamped with the same instant.
    pub fn create(&self, form: &ReminderForm) -> ServiceResult<ReminderEntity> {
        let valid = form.validate()?;
        let reminder = to_new_reminder(&valid, now_utc());
        let id = self
            .repo
            .insert_reminder(&reminder)
            .map_err(|err| log_store_failure("create", err))?;

        info!("event=reminder_create module=service status=ok id={id}");
        Ok(to_reminder_entity(to_reminder_record(id, reminder)))
    }

    /// Replaces all form fields of an existing reminder.
    ///
    /// The store refreshes `updated_at`; the returned entity is reloaded
    /// after the write.
    pub fn update(&self, id: ReminderId, form: &ReminderForm) -> ServiceResult<ReminderEntity> {
        self.require_existing(id)?;
        let valid = form.validate()?;
        self.repo
            .update_reminder(id, &valid)
            .map_err(|err| log_store_failure("update", err))?;

        let record = self.require_existing(id)?;
        info!("event=reminder_update module=service status=ok id={id}");
        Ok(to_reminder_entity(record))
    }

    /// Permanently removes an existing reminder.
    pub fn delete(&self, id: ReminderId) -> ServiceResult<()> {
        self.require_existing(id)?;
        self.repo
            .delete_reminder(id)
            .map_err(|err| log_store_failure("delete", err))?;

        info!("event=reminder_delete module=service status=ok id={id}");
        Ok(())
    }

    fn require_existing(&self, id: ReminderId) -> ServiceResult<ReminderRecord> {
        self.repo
            .get_reminder(id)
            .map_err(|err| log_store_failure("get", err))?
            .ok_or_else(|| {
                debug!("event=reminder_get module=service status=not_found id={id}");
                ReminderServiceError::NotFound(id)
            })
    }
}

fn log_store_failure(operation: &str, err: RepoError) -> ReminderServiceError {
    error!(
        "event=reminder_{operation} module=service status=error error_code=store_failure error={err}"
    );
    ReminderServiceError::StoreFailure(err)
}
