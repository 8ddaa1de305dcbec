use chrono::NaiveDate;
use reminder_core::db::migrations::latest_version;
use reminder_core::db::open_db_in_memory;
use reminder_core::model::convert::to_new_reminder;
use reminder_core::{
    NewReminder, ReminderForm, ReminderListQuery, ReminderRepository, RepoError,
    SqliteReminderRepository,
};
use rusqlite::Connection;

fn new_reminder(title: &str) -> NewReminder {
    let form = ReminderForm::new(
        title,
        "description",
        NaiveDate::from_ymd_opt(2023, 9, 14).unwrap(),
        1,
        false,
    )
    .validate()
    .unwrap();
    let now = NaiveDate::from_ymd_opt(2023, 9, 1)
        .unwrap()
        .and_hms_milli_opt(8, 30, 0, 250)
        .unwrap();
    to_new_reminder(&form, now)
}

#[test]
fn insert_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReminderRepository::try_new(&conn).unwrap();

    let reminder = new_reminder("Buy curry roux");
    let id = repo.insert_reminder(&reminder).unwrap();

    let loaded = repo.get_reminder(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.title, "Buy curry roux");
    assert_eq!(loaded.due_date, reminder.due_date);
    assert_eq!(loaded.priority, 1);
    assert!(!loaded.is_completed);
    assert_eq!(loaded.created_at, reminder.created_at);
    assert_eq!(loaded.updated_at, reminder.updated_at);
}

#[test]
fn get_missing_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReminderRepository::try_new(&conn).unwrap();

    assert!(repo.get_reminder(99).unwrap().is_none());
}

#[test]
fn insert_assigns_increasing_ids_that_are_not_reused() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReminderRepository::try_new(&conn).unwrap();

    let first = repo.insert_reminder(&new_reminder("a")).unwrap();
    let second = repo.insert_reminder(&new_reminder("b")).unwrap();
    assert!(second > first);

    repo.delete_reminder(second).unwrap();
    let third = repo.insert_reminder(&new_reminder("c")).unwrap();
    assert!(third > second);
}

#[test]
fn update_overwrites_form_fields_and_keeps_created_at() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReminderRepository::try_new(&conn).unwrap();

    let reminder = new_reminder("draft");
    let id = repo.insert_reminder(&reminder).unwrap();

    let form = ReminderForm::new(
        "final",
        "changed",
        NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        5,
        true,
    )
    .validate()
    .unwrap();
    repo.update_reminder(id, &form).unwrap();

    let loaded = repo.get_reminder(id).unwrap().unwrap();
    assert_eq!(loaded.title, "final");
    assert_eq!(loaded.description, "changed");
    assert_eq!(loaded.due_date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    assert_eq!(loaded.priority, 5);
    assert!(loaded.is_completed);
    assert_eq!(loaded.created_at, reminder.created_at);
    assert!(loaded.updated_at > reminder.updated_at);
}

#[test]
fn update_never_moves_updated_at_backwards() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReminderRepository::try_new(&conn).unwrap();

    let mut reminder = new_reminder("future");
    let far_future = NaiveDate::from_ymd_opt(2999, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    reminder.created_at = far_future;
    reminder.updated_at = far_future;
    let id = repo.insert_reminder(&reminder).unwrap();

    let form = ReminderForm::new("x", "y", reminder.due_date, 1, false)
        .validate()
        .unwrap();
    repo.update_reminder(id, &form).unwrap();

    let loaded = repo.get_reminder(id).unwrap().unwrap();
    assert_eq!(loaded.updated_at, far_future);
    assert!(loaded.created_at <= loaded.updated_at);
}

#[test]
fn update_and_delete_of_missing_id_are_no_ops() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReminderRepository::try_new(&conn).unwrap();
    let form = ReminderForm::new("x", "y", NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(), 1, false)
        .validate()
        .unwrap();

    repo.update_reminder(42, &form).unwrap();
    repo.delete_reminder(42).unwrap();
    assert!(repo.get_reminder(42).unwrap().is_none());
}

#[test]
fn delete_removes_row_permanently() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReminderRepository::try_new(&conn).unwrap();

    let id = repo.insert_reminder(&new_reminder("gone")).unwrap();
    repo.delete_reminder(id).unwrap();

    assert!(repo.get_reminder(id).unwrap().is_none());
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM reminders;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 0);
}

#[test]
fn list_pages_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteReminderRepository::try_new(&conn).unwrap();

    let ids: Vec<_> = ["a", "b", "c"]
        .into_iter()
        .map(|title| repo.insert_reminder(&new_reminder(title)).unwrap())
        .collect();

    let all = repo
        .list_reminders(&ReminderListQuery {
            limit: 10,
            offset: 0,
        })
        .unwrap();
    assert_eq!(all.iter().map(|r| r.id).collect::<Vec<_>>(), ids);

    let middle = repo
        .list_reminders(&ReminderListQuery {
            limit: 1,
            offset: 1,
        })
        .unwrap();
    assert_eq!(middle.len(), 1);
    assert_eq!(middle[0].title, "b");

    let empty_limit = repo.list_reminders(&ReminderListQuery::default()).unwrap();
    assert!(empty_limit.is_empty());

    let past_end = repo
        .list_reminders(&ReminderListQuery {
            limit: 10,
            offset: 3,
        })
        .unwrap();
    assert!(past_end.is_empty());

    let huge_offset = repo
        .list_reminders(&ReminderListQuery {
            limit: 10,
            offset: u64::MAX,
        })
        .unwrap();
    assert!(huge_offset.is_empty());
}

#[test]
fn read_rejects_malformed_persisted_values() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO reminders (title, description, due_date, priority, is_completed, created_at, updated_at)
         VALUES ('a', 'b', 'someday', 1, 0, '2023-09-14 09:00:00.000', '2023-09-14 09:00:00.000');",
        [],
    )
    .unwrap();
    let repo = SqliteReminderRepository::try_new(&conn).unwrap();

    let err = repo.get_reminder(1).unwrap_err();
    assert!(
        matches!(&err, RepoError::InvalidData(message) if message.contains("due_date")),
        "unexpected error: {err}"
    );
}

#[test]
fn whole_second_timestamps_are_accepted() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO reminders (title, description, due_date, priority, is_completed, created_at, updated_at)
         VALUES ('a', 'b', '2023-09-14', 1, 1, '2023-09-14 09:00:00', '2023-09-14 09:00:00');",
        [],
    )
    .unwrap();
    let repo = SqliteReminderRepository::try_new(&conn).unwrap();

    let loaded = repo.get_reminder(1).unwrap().unwrap();
    assert!(loaded.is_completed);
    assert_eq!(loaded.created_at, loaded.updated_at);
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteReminderRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_reminders_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteReminderRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("reminders"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE reminders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            due_date TEXT NOT NULL,
            priority INTEGER NOT NULL,
            is_completed INTEGER NOT NULL,
            created_at TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteReminderRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "reminders",
            column: "updated_at"
        })
    ));
}
