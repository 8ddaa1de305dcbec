//! Reminder domain model.
//!
//! # Responsibility
//! - Define the persisted record, the caller-supplied form and the output
//!   entity for reminders.
//! - Validate forms by collecting every missing field at once.
//!
//! # Invariants
//! - `id` is assigned by the store and never changes afterwards.
//! - `created_at <= updated_at` for every persisted record.
//! - A `ValidReminderForm` can only be obtained through `ReminderForm::validate`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned reminder identifier.
pub type ReminderId = i64;

/// Reason reported for every required field that is absent.
pub const MUST_NOT_BE_NULL: &str = "must not be null";

/// Persisted reminder row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderRecord {
    pub id: ReminderId,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: i32,
    pub is_completed: bool,
    /// UTC wall-clock time, millisecond precision.
    pub created_at: NaiveDateTime,
    /// UTC wall-clock time, refreshed by the store on update.
    pub updated_at: NaiveDateTime,
}

/// Reminder row handed to the store on insert; the store assigns `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReminder {
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: i32,
    pub is_completed: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Caller-supplied fields for create and update.
///
/// Every field is optional on the wire so that absent and `null` values reach
/// validation instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderForm {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub is_completed: Option<bool>,
}

/// Form whose required fields are all present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidReminderForm {
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: i32,
    pub is_completed: bool,
}

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidParam {
    /// Wire name of the offending field.
    pub name: String,
    /// Human-readable reason.
    pub reason: String,
}

impl InvalidParam {
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// All validation failures found in one form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderValidationError {
    pub invalid_params: Vec<InvalidParam>,
}

impl Display for ReminderValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let fields = self
            .invalid_params
            .iter()
            .map(|param| format!("{} {}", param.name, param.reason))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "invalid reminder form: {fields}")
    }
}

impl Error for ReminderValidationError {}

impl ReminderForm {
    /// Builds a form with every field present.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: NaiveDate,
        priority: i32,
        is_completed: bool,
    ) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            due_date: Some(due_date),
            priority: Some(priority),
            is_completed: Some(is_completed),
        }
    }

    /// Checks required fields and returns the validated form.
    ///
    /// Does not stop at the first missing field: every violation is reported,
    /// in field declaration order.
    pub fn validate(&self) -> Result<ValidReminderForm, ReminderValidationError> {
        let mut invalid_params = Vec::new();
        require(&mut invalid_params, "title", self.title.is_some());
        require(&mut invalid_params, "description", self.description.is_some());
        require(&mut invalid_params, "dueDate", self.due_date.is_some());
        require(&mut invalid_params, "priority", self.priority.is_some());
        require(&mut invalid_params, "isCompleted", self.is_completed.is_some());

        let (Some(title), Some(description), Some(due_date), Some(priority), Some(is_completed)) = (
            self.title.as_ref(),
            self.description.as_ref(),
            self.due_date,
            self.priority,
            self.is_completed,
        ) else {
            return Err(ReminderValidationError { invalid_params });
        };

        Ok(ValidReminderForm {
            title: title.clone(),
            description: description.clone(),
            due_date,
            priority,
            is_completed,
        })
    }
}

fn require(invalid_params: &mut Vec<InvalidParam>, name: &str, present: bool) {
    if !present {
        invalid_params.push(InvalidParam::new(name, MUST_NOT_BE_NULL));
    }
}

/// Output representation returned to API callers.
///
/// Timestamps carry an explicit UTC offset on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderEntity {
    pub id: ReminderId,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: i32,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
