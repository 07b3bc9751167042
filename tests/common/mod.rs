// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::{Duration, NaiveDateTime, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tempfile::TempDir;

use eventportal::database::schema;
use eventportal::services::auth_service::{self, SignupInput};
use eventportal::services::event_admin_service::{self, EventInput};

/// Helper to create a pool against a temporary database with the schema
/// applied.
pub async fn test_pool() -> Result<(SqlitePool, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let pool = SqlitePoolOptions::new()
        .connect(&format!("sqlite://{}?mode=rwc", db_path.display()))
        .await?;
    schema::init(&pool).await?;
    Ok((pool, temp_dir))
}

pub fn days_from_now(days: i64) -> NaiveDateTime {
    Utc::now().naive_utc() + Duration::days(days)
}

pub async fn seed_student(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    roll_number: &str,
) -> Result<i64> {
    let student_id = auth_service::signup_student(
        pool,
        SignupInput {
            name,
            email,
            roll_number,
            department: "Physics",
            password: "hunter22",
            confirm_password: "hunter22",
        },
    )
    .await?;
    Ok(student_id)
}

pub async fn seed_event(
    pool: &SqlitePool,
    title: &str,
    date: NaiveDateTime,
    max_participants: i64,
) -> Result<i64> {
    let event_id = event_admin_service::create_event(
        pool,
        &EventInput {
            title: title.to_string(),
            description: "Test event".to_string(),
            date,
            venue: "Main hall".to_string(),
            department: "Physics".to_string(),
            max_participants,
        },
    )
    .await?;
    Ok(event_id)
}

pub fn event_input(title: &str, date: NaiveDateTime, max_participants: i64) -> EventInput {
    EventInput {
        title: title.to_string(),
        description: "Test event".to_string(),
        date,
        venue: "Main hall".to_string(),
        department: "Physics".to_string(),
        max_participants,
    }
}
