use sqlx::{Executor, Sqlite, SqlitePool};

const SQL_REGISTRATION_EXISTS: &str = r#"
SELECT 1
FROM registrations
WHERE event_id = ? AND student_id = ?
LIMIT 1
"#;

pub async fn exists<'e, E>(executor: E, event_id: i64, student_id: i64) -> sqlx::Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row: Option<i64> = sqlx::query_scalar(SQL_REGISTRATION_EXISTS)
        .bind(event_id)
        .bind(student_id)
        .fetch_optional(executor)
        .await?;
    Ok(row.is_some())
}

// Conditional insert: the capacity and expiry checks are re-evaluated inside
// the statement itself, so the insert admits nobody once the event is full
// or past, regardless of what an earlier read saw.
const SQL_INSERT_REGISTRATION_GUARDED: &str = r#"
INSERT INTO registrations (event_id, student_id, created_at)
SELECT e.event_id, ?, ?
FROM events e
WHERE e.event_id = ?
  AND datetime(e.date) > datetime('now')
  AND (SELECT COUNT(*) FROM registrations r WHERE r.event_id = e.event_id) < e.max_participants
"#;

pub async fn insert_guarded<'e, E>(
    executor: E,
    event_id: i64,
    student_id: i64,
    created_at: &str,
) -> sqlx::Result<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let res = sqlx::query(SQL_INSERT_REGISTRATION_GUARDED)
        .bind(student_id)
        .bind(created_at)
        .bind(event_id)
        .execute(executor)
        .await?;
    Ok(res.rows_affected())
}

const SQL_DELETE_REGISTRATION: &str = r#"
DELETE FROM registrations
WHERE event_id = ? AND student_id = ?
"#;

pub async fn delete_registration(
    pool: &SqlitePool,
    event_id: i64,
    student_id: i64,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_DELETE_REGISTRATION)
        .bind(event_id)
        .bind(student_id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_DELETE_FOR_EVENT: &str = "DELETE FROM registrations WHERE event_id = ?";

pub async fn delete_for_event<'e, E>(executor: E, event_id: i64) -> sqlx::Result<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let res = sqlx::query(SQL_DELETE_FOR_EVENT)
        .bind(event_id)
        .execute(executor)
        .await?;
    Ok(res.rows_affected())
}

const SQL_COUNT_FOR_EVENT: &str = "SELECT COUNT(*) FROM registrations WHERE event_id = ?";

pub async fn count_for_event<'e, E>(executor: E, event_id: i64) -> sqlx::Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar::<_, i64>(SQL_COUNT_FOR_EVENT)
        .bind(event_id)
        .fetch_one(executor)
        .await
}

/// A registration joined with its event, for the student's own list.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StudentRegistrationRow {
    pub event_id: i64,
    pub title: String,
    pub date: String,
    pub venue: String,
    pub department: String,
    pub registered_at: String,
    pub is_past: i64,
}

const SQL_LIST_FOR_STUDENT: &str = r#"
SELECT
  e.event_id,
  e.title,
  e.date,
  e.venue,
  e.department,
  r.created_at AS registered_at,
  CASE WHEN datetime(e.date) <= datetime('now') THEN 1 ELSE 0 END AS is_past
FROM registrations r
JOIN events e ON e.event_id = r.event_id
WHERE r.student_id = ?
ORDER BY datetime(r.created_at) DESC
"#;

pub async fn list_for_student(
    pool: &SqlitePool,
    student_id: i64,
) -> sqlx::Result<Vec<StudentRegistrationRow>> {
    sqlx::query_as::<_, StudentRegistrationRow>(SQL_LIST_FOR_STUDENT)
        .bind(student_id)
        .fetch_all(pool)
        .await
}

/// A registration joined with its student, for the admin roster.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ParticipantRow {
    pub student_id: i64,
    pub name: String,
    pub email: String,
    pub roll_number: String,
    pub department: String,
    pub registered_at: String,
}

const SQL_LIST_FOR_EVENT: &str = r#"
SELECT
  s.student_id,
  s.name,
  s.email,
  s.roll_number,
  s.department,
  r.created_at AS registered_at
FROM registrations r
JOIN students s ON s.student_id = r.student_id
WHERE r.event_id = ?
ORDER BY datetime(r.created_at) ASC
"#;

pub async fn list_for_event(pool: &SqlitePool, event_id: i64) -> sqlx::Result<Vec<ParticipantRow>> {
    sqlx::query_as::<_, ParticipantRow>(SQL_LIST_FOR_EVENT)
        .bind(event_id)
        .fetch_all(pool)
        .await
}
