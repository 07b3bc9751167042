use sqlx::SqlitePool;

use crate::models::SessionRow;

const SQL_INSERT_SESSION: &str = r#"
INSERT INTO sessions (session_id, student_id, admin_id, created_at, expires_at)
VALUES (?, ?, ?, ?, ?)
"#;

pub async fn insert_session(
    pool: &SqlitePool,
    session_id: &str,
    student_id: Option<i64>,
    admin_id: Option<i64>,
    created_at: &str,
    expires_at: &str,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_INSERT_SESSION)
        .bind(session_id)
        .bind(student_id)
        .bind(admin_id)
        .bind(created_at)
        .bind(expires_at)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_LOAD_ACTIVE_SESSION: &str = r#"
SELECT session_id, student_id, admin_id, created_at, expires_at
FROM sessions
WHERE session_id = ?
  AND datetime(expires_at) > datetime('now')
LIMIT 1
"#;

pub async fn load_active(pool: &SqlitePool, session_id: &str) -> sqlx::Result<Option<SessionRow>> {
    sqlx::query_as::<_, SessionRow>(SQL_LOAD_ACTIVE_SESSION)
        .bind(session_id)
        .fetch_optional(pool)
        .await
}

const SQL_SET_STUDENT_SLOT: &str = r#"
UPDATE sessions
SET student_id = ?
WHERE session_id = ?
  AND datetime(expires_at) > datetime('now')
"#;

pub async fn set_student_slot(
    pool: &SqlitePool,
    session_id: &str,
    student_id: Option<i64>,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_SET_STUDENT_SLOT)
        .bind(student_id)
        .bind(session_id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_SET_ADMIN_SLOT: &str = r#"
UPDATE sessions
SET admin_id = ?
WHERE session_id = ?
  AND datetime(expires_at) > datetime('now')
"#;

pub async fn set_admin_slot(
    pool: &SqlitePool,
    session_id: &str,
    admin_id: Option<i64>,
) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_SET_ADMIN_SLOT)
        .bind(admin_id)
        .bind(session_id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}

const SQL_DELETE_EXPIRED: &str = r#"
DELETE FROM sessions WHERE datetime(expires_at) <= datetime('now')
"#;

pub async fn delete_expired(pool: &SqlitePool) -> sqlx::Result<u64> {
    let res = sqlx::query(SQL_DELETE_EXPIRED).execute(pool).await?;
    Ok(res.rows_affected())
}
