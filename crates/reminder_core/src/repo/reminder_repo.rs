//! Reminder repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide keyed CRUD access over the `reminders` table.
//! - Keep SQL and column encoding inside the persistence boundary.
//!
//! # Invariants
//! - The store assigns `id` on insert; callers never choose it.
//! - `updated_at` on update is computed by the store clock and never moves
//!   backwards.
//! - Read paths reject malformed persisted values instead of masking them.
//! - The store has no notion of domain "not found"; absence is `None` on
//!   reads and a no-op on writes.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::convert::{format_date, format_timestamp, parse_date, parse_timestamp};
use crate::model::reminder::{NewReminder, ReminderId, ReminderRecord, ValidReminderForm};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const REMINDER_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    due_date,
    priority,
    is_completed,
    created_at,
    updated_at
FROM reminders";

const REQUIRED_COLUMNS: &[&str] = &[
    "id",
    "title",
    "description",
    "due_date",
    "priority",
    "is_completed",
    "created_at",
    "updated_at",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for reminder persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
    /// Connection has not been migrated to the version this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted reminder data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Paging options for listing reminders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReminderListQuery {
    /// Maximum rows to return; `0` yields an empty page.
    pub limit: u32,
    /// Number of leading rows to skip.
    pub offset: u64,
}

/// Storage contract consumed by the reminder service.
pub trait ReminderRepository {
    fn get_reminder(&self, id: ReminderId) -> RepoResult<Option<ReminderRecord>>;
    /// Lists rows in ascending `id` order.
    fn list_reminders(&self, query: &ReminderListQuery) -> RepoResult<Vec<ReminderRecord>>;
    /// Inserts a row and returns the store-assigned id.
    fn insert_reminder(&self, reminder: &NewReminder) -> RepoResult<ReminderId>;
    /// Overwrites form-sourced columns and refreshes `updated_at`.
    fn update_reminder(&self, id: ReminderId, form: &ValidReminderForm) -> RepoResult<()>;
    fn delete_reminder(&self, id: ReminderId) -> RepoResult<()>;
}

/// SQLite-backed reminder repository.
pub struct SqliteReminderRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReminderRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema
    ///   does not match.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ReminderRepository for SqliteReminderRepository<'_> {
    fn get_reminder(&self, id: ReminderId) -> RepoResult<Option<ReminderRecord>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{REMINDER_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_reminder_row(row)?));
        }

        Ok(None)
    }

    fn list_reminders(&self, query: &ReminderListQuery) -> RepoResult<Vec<ReminderRecord>> {
        if query.limit == 0 {
            return Ok(Vec::new());
        }

        let offset = i64::try_from(query.offset).unwrap_or(i64::MAX);
        let mut stmt = self.conn.prepare_cached(&format!(
            "{REMINDER_SELECT_SQL} ORDER BY id ASC LIMIT ?1 OFFSET ?2;"
        ))?;
        let mut rows = stmt.query(params![i64::from(query.limit), offset])?;
        let mut reminders = Vec::new();

        while let Some(row) = rows.next()? {
            reminders.push(parse_reminder_row(row)?);
        }

        Ok(reminders)
    }

    fn insert_reminder(&self, reminder: &NewReminder) -> RepoResult<ReminderId> {
        self.conn.execute(
            "INSERT INTO reminders (
                title,
                description,
                due_date,
                priority,
                is_completed,
                created_at,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                reminder.title.as_str(),
                reminder.description.as_str(),
                format_date(reminder.due_date),
                reminder.priority,
                bool_to_int(reminder.is_completed),
                format_timestamp(reminder.created_at),
                format_timestamp(reminder.updated_at),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_reminder(&self, id: ReminderId, form: &ValidReminderForm) -> RepoResult<()> {
        self.conn.execute(
            "UPDATE reminders
             SET
                title = ?2,
                description = ?3,
                due_date = ?4,
                priority = ?5,
                is_completed = ?6,
                updated_at = MAX(updated_at, strftime('%Y-%m-%d %H:%M:%f', 'now'))
             WHERE id = ?1;",
            params![
                id,
                form.title.as_str(),
                form.description.as_str(),
                format_date(form.due_date),
                form.priority,
                bool_to_int(form.is_completed),
            ],
        )?;

        Ok(())
    }

    fn delete_reminder(&self, id: ReminderId) -> RepoResult<()> {
        self.conn.execute("DELETE FROM reminders WHERE id = ?1;", [id])?;
        Ok(())
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('reminders');")?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    if columns.is_empty() {
        return Err(RepoError::MissingRequiredTable("reminders"));
    }

    if let Some(column) = REQUIRED_COLUMNS
        .iter()
        .copied()
        .find(|required| !columns.iter().any(|column| column.as_str() == *required))
    {
        return Err(RepoError::MissingRequiredColumn {
            table: "reminders",
            column,
        });
    }

    Ok(())
}

fn parse_reminder_row(row: &Row<'_>) -> RepoResult<ReminderRecord> {
    let id: ReminderId = row.get("id")?;

    let due_date_text: String = row.get("due_date")?;
    let due_date = parse_date(&due_date_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid date `{due_date_text}` in reminders.due_date (id = {id})"
        ))
    })?;

    let is_completed = match row.get::<_, i64>("is_completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_completed value `{other}` in reminders.is_completed (id = {id})"
            )));
        }
    };

    Ok(ReminderRecord {
        id,
        title: row.get("title")?,
        description: row.get("description")?,
        due_date,
        priority: row.get("priority")?,
        is_completed,
        created_at: parse_timestamp_column(row, "created_at", id)?,
        updated_at: parse_timestamp_column(row, "updated_at", id)?,
    })
}

fn parse_timestamp_column(
    row: &Row<'_>,
    column: &str,
    id: ReminderId,
) -> RepoResult<chrono::NaiveDateTime> {
    let text: String = row.get(column)?;
    parse_timestamp(&text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid timestamp `{text}` in reminders.{column} (id = {id})"
        ))
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
