//! Stateless reshaping between form, record and entity.
//!
//! # Responsibility
//! - Convert validated forms into insertable rows.
//! - Convert stored rows into the offset-bearing output entity.
//! - Own the text encoding of timestamps used by the SQLite store.
//!
//! # Invariants
//! - Functions here are pure; "now" is always passed in by the caller.
//! - Stored timestamp text sorts lexicographically in time order.

use crate::model::reminder::{NewReminder, ReminderEntity, ReminderRecord, ValidReminderForm};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SubsecRound, Utc};

/// Text layout of `created_at` / `updated_at` columns.
///
/// Matches SQLite `strftime('%Y-%m-%d %H:%M:%f', 'now')` output.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Text layout of `due_date` columns.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Current UTC time truncated to the store's millisecond precision.
pub fn now_utc() -> NaiveDateTime {
    Utc::now().naive_utc().trunc_subsecs(3)
}

/// Builds an insertable row; both timestamps are stamped with the same `now`.
pub fn to_new_reminder(form: &ValidReminderForm, now: NaiveDateTime) -> NewReminder {
    NewReminder {
        title: form.title.clone(),
        description: form.description.clone(),
        due_date: form.due_date,
        priority: form.priority,
        is_completed: form.is_completed,
        created_at: now,
        updated_at: now,
    }
}

/// Attaches a store-assigned id to an inserted row.
pub fn to_reminder_record(id: i64, reminder: NewReminder) -> ReminderRecord {
    ReminderRecord {
        id,
        title: reminder.title,
        description: reminder.description,
        due_date: reminder.due_date,
        priority: reminder.priority,
        is_completed: reminder.is_completed,
        created_at: reminder.created_at,
        updated_at: reminder.updated_at,
    }
}

pub fn to_reminder_entity(record: ReminderRecord) -> ReminderEntity {
    ReminderEntity {
        id: record.id,
        title: record.title,
        description: record.description,
        due_date: record.due_date,
        priority: record.priority,
        is_completed: record.is_completed,
        created_at: to_utc(record.created_at),
        updated_at: to_utc(record.updated_at),
    }
}

/// Interprets a stored wall-clock time as UTC.
pub fn to_utc(value: NaiveDateTime) -> DateTime<Utc> {
    value.and_utc()
}

pub fn format_timestamp(value: NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses stored timestamp text; whole-second values are accepted too.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S"))
        .ok()
}

pub fn format_date(value: NaiveDate) -> String {
    value.format(DATE_FORMAT).to_string()
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}
