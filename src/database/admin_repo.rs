use sqlx::SqlitePool;

use crate::models::AdminRow;

const SQL_INSERT_ADMIN: &str = r#"
INSERT INTO admins (username, password_hash, created_at)
VALUES (?, ?, ?)
"#;

pub async fn insert_admin(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
    created_at: &str,
) -> sqlx::Result<i64> {
    let res = sqlx::query(SQL_INSERT_ADMIN)
        .bind(username)
        .bind(password_hash)
        .bind(created_at)
        .execute(pool)
        .await?;
    Ok(res.last_insert_rowid())
}

const SQL_FIND_ADMIN_BY_USERNAME: &str = r#"
SELECT admin_id, username, password_hash, created_at
FROM admins
WHERE username = ?
LIMIT 1
"#;

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> sqlx::Result<Option<AdminRow>> {
    sqlx::query_as::<_, AdminRow>(SQL_FIND_ADMIN_BY_USERNAME)
        .bind(username)
        .fetch_optional(pool)
        .await
}
