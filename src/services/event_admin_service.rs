use chrono::NaiveDateTime;
use sqlx::SqlitePool;
use thiserror::Error;

use crate::database::{event_repo, registration_repo};
use crate::services::{utc_now_stamp, STORE_DATETIME_FORMAT};

#[derive(Error, Debug)]
pub enum EventAdminError {
    #[error("Event not found: {0}")]
    EventNotFound(i64),

    #[error("Capacity {requested} is below the current registration count {registered}")]
    CapacityBelowRegistered { requested: i64, registered: i64 },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Form-level rejection, raised before anything touches the store.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EventFormError {
    #[error("All fields are required")]
    MissingFields,

    #[error("Invalid date format")]
    InvalidDate,

    #[error("Participant limit must be at least 1")]
    InvalidCapacity,
}

#[derive(Debug, Clone)]
pub struct EventInput {
    pub title: String,
    pub description: String,
    pub date: NaiveDateTime,
    pub venue: String,
    pub department: String,
    pub max_participants: i64,
}

/// Validates the raw add/edit form fields. The date comes from a
/// datetime-local input (`YYYY-MM-DDTHH:MM`, seconds optional).
pub fn parse_event_input(
    title: &str,
    description: &str,
    date_raw: &str,
    venue: &str,
    department: &str,
    max_participants_raw: &str,
) -> Result<EventInput, EventFormError> {
    let title = title.trim();
    let description = description.trim();
    let venue = venue.trim();
    let department = department.trim();
    let date_raw = date_raw.trim();
    let max_participants_raw = max_participants_raw.trim();

    if title.is_empty()
        || description.is_empty()
        || venue.is_empty()
        || department.is_empty()
        || date_raw.is_empty()
        || max_participants_raw.is_empty()
    {
        return Err(EventFormError::MissingFields);
    }

    let date = parse_form_datetime(date_raw).ok_or(EventFormError::InvalidDate)?;
    let max_participants: i64 = max_participants_raw
        .parse()
        .map_err(|_| EventFormError::InvalidCapacity)?;
    if max_participants < 1 {
        return Err(EventFormError::InvalidCapacity);
    }

    Ok(EventInput {
        title: title.to_string(),
        description: description.to_string(),
        date,
        venue: venue.to_string(),
        department: department.to_string(),
        max_participants,
    })
}

fn parse_form_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.replace('T', " ");
    NaiveDateTime::parse_from_str(&raw, STORE_DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M"))
        .ok()
}

pub async fn create_event(pool: &SqlitePool, input: &EventInput) -> Result<i64, EventAdminError> {
    let id = event_repo::insert_event(
        pool,
        event_repo::NewEvent {
            title: &input.title,
            description: &input.description,
            date: &input.date.format(STORE_DATETIME_FORMAT).to_string(),
            venue: &input.venue,
            department: &input.department,
            max_participants: input.max_participants,
            created_at: &utc_now_stamp(),
        },
    )
    .await?;
    Ok(id)
}

/// Updates an event. The new capacity may never drop below the number of
/// registrations the event already holds; the guarded UPDATE enforces that
/// even against a registration landing between the read and the write.
pub async fn update_event(
    pool: &SqlitePool,
    event_id: i64,
    input: &EventInput,
) -> Result<(), EventAdminError> {
    let mut tx = pool.begin().await?;

    let Some(event) = event_repo::load_with_count(&mut *tx, event_id).await? else {
        return Err(EventAdminError::EventNotFound(event_id));
    };
    if input.max_participants < event.current_participants {
        return Err(EventAdminError::CapacityBelowRegistered {
            requested: input.max_participants,
            registered: event.current_participants,
        });
    }

    let updated = event_repo::update_guarded(
        &mut *tx,
        event_id,
        event_repo::EventUpdate {
            title: &input.title,
            description: &input.description,
            date: &input.date.format(STORE_DATETIME_FORMAT).to_string(),
            venue: &input.venue,
            department: &input.department,
            max_participants: input.max_participants,
        },
    )
    .await?;
    if updated == 0 {
        return Err(EventAdminError::CapacityBelowRegistered {
            requested: input.max_participants,
            registered: event.current_participants,
        });
    }

    tx.commit().await?;
    Ok(())
}

/// Deletes an event and all of its registrations in one transaction.
/// Returns the deleted event's title.
pub async fn delete_event(pool: &SqlitePool, event_id: i64) -> Result<String, EventAdminError> {
    let mut tx = pool.begin().await?;

    let Some(event) = event_repo::load_with_count(&mut *tx, event_id).await? else {
        return Err(EventAdminError::EventNotFound(event_id));
    };

    registration_repo::delete_for_event(&mut *tx, event_id).await?;
    event_repo::delete_event(&mut *tx, event_id).await?;

    tx.commit().await?;
    Ok(event.title)
}
