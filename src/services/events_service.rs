use chrono::NaiveDateTime;
use sqlx::SqlitePool;

use crate::database::event_repo::{EventFeedRow, EventWithCountRow};
use crate::database::{event_repo, registration_repo};
use crate::services::STORE_DATETIME_FORMAT;

pub struct EventCardView {
    pub event_id: i64,
    pub title: String,
    pub description: String,
    pub date_label: String,
    pub time_label: String,
    pub venue: String,
    pub department: String,
    pub max_participants: i64,
    pub current_participants: i64,
    pub is_full: bool,
    pub is_past: bool,
    pub is_registered: bool,
}

pub struct MyRegistrationView {
    pub event_id: i64,
    pub title: String,
    pub date_label: String,
    pub time_label: String,
    pub venue: String,
    pub department: String,
    pub registered_at_label: String,
    pub is_past: bool,
}

pub struct ParticipantView {
    pub name: String,
    pub email: String,
    pub roll_number: String,
    pub department: String,
    pub registered_at_label: String,
}

/// Upcoming events, soonest first. With a student id the cards carry that
/// student's registration state; without one `is_registered` is always false.
pub async fn list_upcoming_events(
    pool: &SqlitePool,
    student_id: Option<i64>,
) -> sqlx::Result<Vec<EventCardView>> {
    let rows = match student_id {
        Some(id) => event_repo::list_upcoming_for_student(pool, id).await?,
        None => event_repo::list_upcoming(pool).await?,
    };
    Ok(rows.into_iter().map(card_from_feed).collect())
}

/// Every event regardless of date, latest first, for the admin dashboard.
pub async fn list_all_events(pool: &SqlitePool) -> sqlx::Result<Vec<EventCardView>> {
    let rows = event_repo::list_all_desc(pool).await?;
    Ok(rows.into_iter().map(card_from_feed).collect())
}

pub async fn load_event_card(
    pool: &SqlitePool,
    event_id: i64,
) -> sqlx::Result<Option<EventCardView>> {
    let Some(row) = event_repo::load_with_count(pool, event_id).await? else {
        return Ok(None);
    };
    Ok(Some(card_from_count(row)))
}

pub async fn list_my_registrations(
    pool: &SqlitePool,
    student_id: i64,
) -> sqlx::Result<Vec<MyRegistrationView>> {
    let rows = registration_repo::list_for_student(pool, student_id).await?;
    Ok(rows
        .into_iter()
        .map(|r| {
            let (date_label, time_label) = format_event_labels(&r.date);
            MyRegistrationView {
                event_id: r.event_id,
                title: r.title,
                date_label,
                time_label,
                venue: r.venue,
                department: r.department,
                registered_at_label: format_timestamp_label(&r.registered_at),
                is_past: r.is_past != 0,
            }
        })
        .collect())
}

pub async fn list_participants(
    pool: &SqlitePool,
    event_id: i64,
) -> sqlx::Result<Vec<ParticipantView>> {
    let rows = registration_repo::list_for_event(pool, event_id).await?;
    Ok(rows
        .into_iter()
        .map(|r| ParticipantView {
            name: r.name,
            email: r.email,
            roll_number: r.roll_number,
            department: r.department,
            registered_at_label: format_timestamp_label(&r.registered_at),
        })
        .collect())
}

fn card_from_feed(row: EventFeedRow) -> EventCardView {
    let (date_label, time_label) = format_event_labels(&row.date);
    EventCardView {
        event_id: row.event_id,
        title: row.title,
        description: row.description,
        date_label,
        time_label,
        venue: row.venue,
        department: row.department,
        max_participants: row.max_participants,
        current_participants: row.current_participants,
        is_full: row.current_participants >= row.max_participants,
        is_past: row.is_past != 0,
        is_registered: row.is_registered != 0,
    }
}

fn card_from_count(row: EventWithCountRow) -> EventCardView {
    let (date_label, time_label) = format_event_labels(&row.date);
    EventCardView {
        event_id: row.event_id,
        title: row.title,
        description: row.description,
        date_label,
        time_label,
        venue: row.venue,
        department: row.department,
        max_participants: row.max_participants,
        current_participants: row.current_participants,
        is_full: row.current_participants >= row.max_participants,
        is_past: row.is_past != 0,
        is_registered: false,
    }
}

fn format_event_labels(raw: &str) -> (String, String) {
    match NaiveDateTime::parse_from_str(raw, STORE_DATETIME_FORMAT) {
        Ok(dt) => (
            dt.format("%a %d %b %Y").to_string(),
            dt.format("%H:%M").to_string(),
        ),
        Err(_) => (raw.to_string(), String::new()),
    }
}

fn format_timestamp_label(raw: &str) -> String {
    // "YYYY-MM-DD HH:MM"
    raw.chars().take(16).collect()
}
