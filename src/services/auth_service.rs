use chrono::{Duration, Utc};
use pbkdf2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use pbkdf2::Pbkdf2;
use rand_core::OsRng;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::database::{admin_repo, session_repo, student_repo};
use crate::models::{AdminRow, StudentRow};
use crate::services::{utc_now_stamp, STORE_DATETIME_FORMAT};

const SESSION_TTL_DAYS: i64 = 2;

const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("All fields are required")]
    MissingFields,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Email already registered")]
    EmailTaken,

    #[error("Roll number already registered")]
    RollNumberTaken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password hash error: {0}")]
    Hash(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub struct SignupInput<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub roll_number: &'a str,
    pub department: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
}

pub async fn signup_student(pool: &SqlitePool, input: SignupInput<'_>) -> Result<i64, AuthError> {
    let name = input.name.trim();
    let email = input.email.trim();
    let roll_number = input.roll_number.trim();
    let department = input.department.trim();

    if name.is_empty()
        || email.is_empty()
        || roll_number.is_empty()
        || department.is_empty()
        || input.password.is_empty()
        || input.confirm_password.is_empty()
    {
        return Err(AuthError::MissingFields);
    }
    if input.password != input.confirm_password {
        return Err(AuthError::PasswordMismatch);
    }

    if student_repo::find_by_email(pool, email).await?.is_some() {
        return Err(AuthError::EmailTaken);
    }
    if student_repo::find_by_roll_number(pool, roll_number)
        .await?
        .is_some()
    {
        return Err(AuthError::RollNumberTaken);
    }

    let password_hash = hash_password(input.password)?;
    let student_id = student_repo::insert_student(
        pool,
        student_repo::NewStudent {
            name,
            email,
            roll_number,
            department,
            password_hash: &password_hash,
            created_at: &utc_now_stamp(),
        },
    )
    .await?;
    Ok(student_id)
}

pub async fn login_student(
    pool: &SqlitePool,
    email: &str,
    password: &str,
) -> Result<StudentRow, AuthError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::MissingFields);
    }
    let Some(student) = student_repo::find_by_email(pool, email).await? else {
        return Err(AuthError::InvalidCredentials);
    };
    if !verify_password(password, &student.password_hash) {
        return Err(AuthError::InvalidCredentials);
    }
    Ok(student)
}

pub async fn login_admin(
    pool: &SqlitePool,
    username: &str,
    password: &str,
) -> Result<AdminRow, AuthError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AuthError::MissingFields);
    }
    let Some(admin) = admin_repo::find_by_username(pool, username).await? else {
        return Err(AuthError::InvalidCredentials);
    };
    if !verify_password(password, &admin.password_hash) {
        return Err(AuthError::InvalidCredentials);
    }
    Ok(admin)
}

/// Seeds the default admin account on first startup.
pub async fn ensure_default_admin(pool: &SqlitePool) -> Result<(), AuthError> {
    if admin_repo::find_by_username(pool, DEFAULT_ADMIN_USERNAME)
        .await?
        .is_some()
    {
        return Ok(());
    }
    let password_hash = hash_password(DEFAULT_ADMIN_PASSWORD)?;
    admin_repo::insert_admin(pool, DEFAULT_ADMIN_USERNAME, &password_hash, &utc_now_stamp())
        .await?;
    info!(
        "Default admin created: username='{}', password='{}'",
        DEFAULT_ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD
    );
    Ok(())
}

/// Binds the student identity to the browser session, reusing the current
/// session row when there is one (the admin slot is left untouched).
/// Returns the session id to set as the cookie value.
pub async fn establish_student_session(
    pool: &SqlitePool,
    current_session: Option<&str>,
    student_id: i64,
) -> sqlx::Result<String> {
    session_repo::delete_expired(pool).await?;
    if let Some(sid) = current_session {
        if session_repo::set_student_slot(pool, sid, Some(student_id)).await? > 0 {
            return Ok(sid.to_string());
        }
    }
    create_session(pool, Some(student_id), None).await
}

pub async fn establish_admin_session(
    pool: &SqlitePool,
    current_session: Option<&str>,
    admin_id: i64,
) -> sqlx::Result<String> {
    session_repo::delete_expired(pool).await?;
    if let Some(sid) = current_session {
        if session_repo::set_admin_slot(pool, sid, Some(admin_id)).await? > 0 {
            return Ok(sid.to_string());
        }
    }
    create_session(pool, None, Some(admin_id)).await
}

pub async fn clear_student_slot(pool: &SqlitePool, session_id: &str) -> sqlx::Result<()> {
    session_repo::set_student_slot(pool, session_id, None).await?;
    Ok(())
}

pub async fn clear_admin_slot(pool: &SqlitePool, session_id: &str) -> sqlx::Result<()> {
    session_repo::set_admin_slot(pool, session_id, None).await?;
    Ok(())
}

async fn create_session(
    pool: &SqlitePool,
    student_id: Option<i64>,
    admin_id: Option<i64>,
) -> sqlx::Result<String> {
    let session_id = Uuid::new_v4().to_string();
    let now = Utc::now().naive_utc();
    let expires_at = now + Duration::days(SESSION_TTL_DAYS);
    session_repo::insert_session(
        pool,
        &session_id,
        student_id,
        admin_id,
        &now.format(STORE_DATETIME_FORMAT).to_string(),
        &expires_at.format(STORE_DATETIME_FORMAT).to_string(),
    )
    .await?;
    Ok(session_id)
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    Pbkdf2
        .hash_password(password.as_bytes(), &SaltString::generate(&mut OsRng))
        .map(|h| h.to_string())
        .map_err(|e| AuthError::Hash(e.to_string()))
}

fn verify_password(password: &str, password_hash: &str) -> bool {
    PasswordHash::new(password_hash)
        .map(|hash| Pbkdf2.verify_password(password.as_bytes(), &hash).is_ok())
        .unwrap_or(false)
}
