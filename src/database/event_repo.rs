use sqlx::{Executor, Sqlite, SqlitePool};

use crate::models::EventRow;

/// Event plus the facts derived from its registrations. Participant counts
/// are never stored; they are recomputed per query.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventWithCountRow {
    pub event_id: i64,
    pub title: String,
    pub description: String,
    pub date: String,
    pub venue: String,
    pub department: String,
    pub max_participants: i64,
    pub current_participants: i64,
    pub is_past: i64,
}

/// Row for the event feeds, with the viewing student's registration state.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventFeedRow {
    pub event_id: i64,
    pub title: String,
    pub description: String,
    pub date: String,
    pub venue: String,
    pub department: String,
    pub max_participants: i64,
    pub current_participants: i64,
    pub is_past: i64,
    pub is_registered: i64,
}

const SQL_LOAD_EVENT: &str = r#"
SELECT event_id, title, description, date, venue, department, max_participants, created_at
FROM events
WHERE event_id = ?
LIMIT 1
"#;

pub async fn load_by_id(pool: &SqlitePool, event_id: i64) -> sqlx::Result<Option<EventRow>> {
    sqlx::query_as::<_, EventRow>(SQL_LOAD_EVENT)
        .bind(event_id)
        .fetch_optional(pool)
        .await
}

const SQL_LOAD_EVENT_WITH_COUNT: &str = r#"
SELECT
  e.event_id,
  e.title,
  e.description,
  e.date,
  e.venue,
  e.department,
  e.max_participants,
  (SELECT COUNT(*) FROM registrations r WHERE r.event_id = e.event_id) AS current_participants,
  CASE WHEN datetime(e.date) <= datetime('now') THEN 1 ELSE 0 END AS is_past
FROM events e
WHERE e.event_id = ?
LIMIT 1
"#;

pub async fn load_with_count<'e, E>(
    executor: E,
    event_id: i64,
) -> sqlx::Result<Option<EventWithCountRow>>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, EventWithCountRow>(SQL_LOAD_EVENT_WITH_COUNT)
        .bind(event_id)
        .fetch_optional(executor)
        .await
}

const SQL_LIST_UPCOMING: &str = r#"
SELECT
  e.event_id,
  e.title,
  e.description,
  e.date,
  e.venue,
  e.department,
  e.max_participants,
  (SELECT COUNT(*) FROM registrations r WHERE r.event_id = e.event_id) AS current_participants,
  CASE WHEN datetime(e.date) <= datetime('now') THEN 1 ELSE 0 END AS is_past,
  0 AS is_registered
FROM events e
WHERE datetime(e.date) > datetime('now')
ORDER BY datetime(e.date) ASC
"#;

pub async fn list_upcoming(pool: &SqlitePool) -> sqlx::Result<Vec<EventFeedRow>> {
    sqlx::query_as::<_, EventFeedRow>(SQL_LIST_UPCOMING)
        .fetch_all(pool)
        .await
}

const SQL_LIST_UPCOMING_FOR_STUDENT: &str = r#"
SELECT
  e.event_id,
  e.title,
  e.description,
  e.date,
  e.venue,
  e.department,
  e.max_participants,
  (SELECT COUNT(*) FROM registrations r WHERE r.event_id = e.event_id) AS current_participants,
  CASE WHEN datetime(e.date) <= datetime('now') THEN 1 ELSE 0 END AS is_past,
  CASE WHEN EXISTS (
    SELECT 1 FROM registrations r2
    WHERE r2.event_id = e.event_id AND r2.student_id = ?
  ) THEN 1 ELSE 0 END AS is_registered
FROM events e
WHERE datetime(e.date) > datetime('now')
ORDER BY datetime(e.date) ASC
"#;

pub async fn list_upcoming_for_student(
    pool: &SqlitePool,
    student_id: i64,
) -> sqlx::Result<Vec<EventFeedRow>> {
    sqlx::query_as::<_, EventFeedRow>(SQL_LIST_UPCOMING_FOR_STUDENT)
        .bind(student_id)
        .fetch_all(pool)
        .await
}

const SQL_LIST_ALL_DESC: &str = r#"
SELECT
  e.event_id,
  e.title,
  e.description,
  e.date,
  e.venue,
  e.department,
  e.max_participants,
  (SELECT COUNT(*) FROM registrations r WHERE r.event_id = e.event_id) AS current_participants,
  CASE WHEN datetime(e.date) <= datetime('now') THEN 1 ELSE 0 END AS is_past,
  0 AS is_registered
FROM events e
ORDER BY datetime(e.date) DESC
"#;

pub async fn list_all_desc(pool: &SqlitePool) -> sqlx::Result<Vec<EventFeedRow>> {
    sqlx::query_as::<_, EventFeedRow>(SQL_LIST_ALL_DESC)
        .fetch_all(pool)
        .await
}

const SQL_INSERT_EVENT: &str = r#"
INSERT INTO events (
  title,
  description,
  date,
  venue,
  department,
  max_participants,
  created_at
) VALUES (?, ?, ?, ?, ?, ?, ?)
"#;

pub struct NewEvent<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub date: &'a str,
    pub venue: &'a str,
    pub department: &'a str,
    pub max_participants: i64,
    pub created_at: &'a str,
}

pub async fn insert_event(pool: &SqlitePool, event: NewEvent<'_>) -> sqlx::Result<i64> {
    let res = sqlx::query(SQL_INSERT_EVENT)
        .bind(event.title)
        .bind(event.description)
        .bind(event.date)
        .bind(event.venue)
        .bind(event.department)
        .bind(event.max_participants)
        .bind(event.created_at)
        .execute(pool)
        .await?;
    Ok(res.last_insert_rowid())
}

// The capacity guard is part of the UPDATE itself: zero rows affected means
// the new limit is below the current registration count.
const SQL_UPDATE_EVENT_GUARDED: &str = r#"
UPDATE events
SET title = ?, description = ?, date = ?, venue = ?, department = ?, max_participants = ?
WHERE event_id = ?
  AND ? >= (SELECT COUNT(*) FROM registrations r WHERE r.event_id = events.event_id)
"#;

pub struct EventUpdate<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub date: &'a str,
    pub venue: &'a str,
    pub department: &'a str,
    pub max_participants: i64,
}

pub async fn update_guarded<'e, E>(
    executor: E,
    event_id: i64,
    update: EventUpdate<'_>,
) -> sqlx::Result<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let res = sqlx::query(SQL_UPDATE_EVENT_GUARDED)
        .bind(update.title)
        .bind(update.description)
        .bind(update.date)
        .bind(update.venue)
        .bind(update.department)
        .bind(update.max_participants)
        .bind(event_id)
        .bind(update.max_participants)
        .execute(executor)
        .await?;
    Ok(res.rows_affected())
}

const SQL_DELETE_EVENT: &str = "DELETE FROM events WHERE event_id = ?";

pub async fn delete_event<'e, E>(executor: E, event_id: i64) -> sqlx::Result<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let res = sqlx::query(SQL_DELETE_EVENT)
        .bind(event_id)
        .execute(executor)
        .await?;
    Ok(res.rows_affected())
}
