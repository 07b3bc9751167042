use sqlx::SqlitePool;
use thiserror::Error;

use crate::database::{event_repo, registration_repo};
use crate::services::utc_now_stamp;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Event not found: {0}")]
    EventNotFound(i64),

    #[error("Event is full: {0}")]
    EventFull(i64),

    #[error("Event date has passed: {0}")]
    EventExpired(i64),

    #[error("Student {student_id} is already registered for event {event_id}")]
    AlreadyRegistered { event_id: i64, student_id: i64 },

    #[error("Student {student_id} is not registered for event {event_id}")]
    NotRegistered { event_id: i64, student_id: i64 },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Admits or rejects a registration for (event, student).
///
/// The checks and the insert run in one write transaction, and the insert
/// itself re-checks capacity and expiry, so concurrent attempts can never
/// push an event past its limit. The UNIQUE(event_id, student_id) constraint
/// backs the duplicate check.
pub async fn register(pool: &SqlitePool, event_id: i64, student_id: i64) -> Result<(), LedgerError> {
    let mut tx = pool.begin().await?;

    let Some(event) = event_repo::load_with_count(&mut *tx, event_id).await? else {
        return Err(LedgerError::EventNotFound(event_id));
    };
    if event.is_past != 0 {
        return Err(LedgerError::EventExpired(event_id));
    }
    if event.current_participants >= event.max_participants {
        return Err(LedgerError::EventFull(event_id));
    }
    if registration_repo::exists(&mut *tx, event_id, student_id).await? {
        return Err(LedgerError::AlreadyRegistered {
            event_id,
            student_id,
        });
    }

    let now = utc_now_stamp();
    let inserted = registration_repo::insert_guarded(&mut *tx, event_id, student_id, &now)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                LedgerError::AlreadyRegistered {
                    event_id,
                    student_id,
                }
            } else {
                LedgerError::Database(e)
            }
        })?;
    if inserted == 0 {
        // The guarded insert saw a full or just-expired event.
        return Err(LedgerError::EventFull(event_id));
    }

    tx.commit().await?;
    Ok(())
}

pub async fn unregister(
    pool: &SqlitePool,
    event_id: i64,
    student_id: i64,
) -> Result<(), LedgerError> {
    let deleted = registration_repo::delete_registration(pool, event_id, student_id).await?;
    if deleted == 0 {
        return Err(LedgerError::NotRegistered {
            event_id,
            student_id,
        });
    }
    Ok(())
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}
