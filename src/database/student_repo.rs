use sqlx::{Executor, Sqlite, SqlitePool};

use crate::models::StudentRow;

const SQL_INSERT_STUDENT: &str = r#"
INSERT INTO students (
  name,
  email,
  roll_number,
  department,
  password_hash,
  created_at
) VALUES (?, ?, ?, ?, ?, ?)
"#;

pub struct NewStudent<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub roll_number: &'a str,
    pub department: &'a str,
    pub password_hash: &'a str,
    pub created_at: &'a str,
}

pub async fn insert_student(pool: &SqlitePool, student: NewStudent<'_>) -> sqlx::Result<i64> {
    let res = sqlx::query(SQL_INSERT_STUDENT)
        .bind(student.name)
        .bind(student.email)
        .bind(student.roll_number)
        .bind(student.department)
        .bind(student.password_hash)
        .bind(student.created_at)
        .execute(pool)
        .await?;
    Ok(res.last_insert_rowid())
}

const SQL_LOAD_STUDENT_BY_ID: &str = r#"
SELECT student_id, name, email, roll_number, department, password_hash, created_at
FROM students
WHERE student_id = ?
LIMIT 1
"#;

pub async fn load_by_id(pool: &SqlitePool, student_id: i64) -> sqlx::Result<Option<StudentRow>> {
    sqlx::query_as::<_, StudentRow>(SQL_LOAD_STUDENT_BY_ID)
        .bind(student_id)
        .fetch_optional(pool)
        .await
}

const SQL_FIND_STUDENT_BY_EMAIL: &str = r#"
SELECT student_id, name, email, roll_number, department, password_hash, created_at
FROM students
WHERE email = ?
LIMIT 1
"#;

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> sqlx::Result<Option<StudentRow>> {
    sqlx::query_as::<_, StudentRow>(SQL_FIND_STUDENT_BY_EMAIL)
        .bind(email)
        .fetch_optional(pool)
        .await
}

const SQL_FIND_STUDENT_BY_ROLL: &str = r#"
SELECT student_id, name, email, roll_number, department, password_hash, created_at
FROM students
WHERE roll_number = ?
LIMIT 1
"#;

pub async fn find_by_roll_number(
    pool: &SqlitePool,
    roll_number: &str,
) -> sqlx::Result<Option<StudentRow>> {
    sqlx::query_as::<_, StudentRow>(SQL_FIND_STUDENT_BY_ROLL)
        .bind(roll_number)
        .fetch_optional(pool)
        .await
}

const SQL_DELETE_STUDENT_REGISTRATIONS: &str = "DELETE FROM registrations WHERE student_id = ?";
const SQL_DELETE_STUDENT_SESSIONS: &str = "DELETE FROM sessions WHERE student_id = ?";
const SQL_DELETE_STUDENT: &str = "DELETE FROM students WHERE student_id = ?";

/// Removes a student together with their registrations and sessions in one
/// transaction.
pub async fn delete_student_cascade(pool: &SqlitePool, student_id: i64) -> sqlx::Result<u64> {
    let mut tx = pool.begin().await?;
    delete_by_student(&mut *tx, SQL_DELETE_STUDENT_REGISTRATIONS, student_id).await?;
    delete_by_student(&mut *tx, SQL_DELETE_STUDENT_SESSIONS, student_id).await?;
    let deleted = delete_by_student(&mut *tx, SQL_DELETE_STUDENT, student_id).await?;
    tx.commit().await?;
    Ok(deleted)
}

async fn delete_by_student<'e, E>(executor: E, sql: &str, student_id: i64) -> sqlx::Result<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let res = sqlx::query(sql).bind(student_id).execute(executor).await?;
    Ok(res.rows_affected())
}
