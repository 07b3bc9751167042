mod common;

use anyhow::Result;
use common::{days_from_now, event_input, seed_event, seed_student, test_pool};
use eventportal::database::{event_repo, registration_repo};
use eventportal::services::event_admin_service::{self, EventAdminError, EventFormError};
use eventportal::services::{events_service, registration_service};

#[tokio::test]
async fn upcoming_list_skips_past_events() -> Result<()> {
    let (pool, _tmp) = test_pool().await?;
    let future = seed_event(&pool, "Tech Quiz", days_from_now(3), 10).await?;
    let past = seed_event(&pool, "Old Quiz", days_from_now(-3), 10).await?;

    let upcoming = events_service::list_upcoming_events(&pool, None).await?;
    assert!(upcoming.iter().any(|e| e.event_id == future));
    assert!(upcoming.iter().all(|e| e.event_id != past));

    // The admin dashboard sees both.
    let all = events_service::list_all_events(&pool).await?;
    assert_eq!(all.len(), 2);
    assert!(all.iter().find(|e| e.event_id == past).unwrap().is_past);
    Ok(())
}

#[tokio::test]
async fn update_rewrites_event_fields() -> Result<()> {
    let (pool, _tmp) = test_pool().await?;
    let event = seed_event(&pool, "Tech Quiz", days_from_now(3), 10).await?;

    let mut input = event_input("Mega Quiz", days_from_now(4), 25);
    input.venue = "Auditorium".to_string();
    event_admin_service::update_event(&pool, event, &input).await?;

    let row = event_repo::load_by_id(&pool, event).await?.unwrap();
    assert_eq!(row.title, "Mega Quiz");
    assert_eq!(row.venue, "Auditorium");
    assert_eq!(row.max_participants, 25);
    Ok(())
}

#[tokio::test]
async fn capacity_cannot_drop_below_registration_count() -> Result<()> {
    let (pool, _tmp) = test_pool().await?;
    let event = seed_event(&pool, "Tech Quiz", days_from_now(3), 3).await?;
    let alice = seed_student(&pool, "Alice", "alice@campus.edu", "PH-001").await?;
    let bob = seed_student(&pool, "Bob", "bob@campus.edu", "PH-002").await?;
    registration_service::register(&pool, event, alice).await?;
    registration_service::register(&pool, event, bob).await?;

    let err = event_admin_service::update_event(&pool, event, &event_input("Tech Quiz", days_from_now(3), 1))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EventAdminError::CapacityBelowRegistered {
            requested: 1,
            registered: 2
        }
    ));
    // No mutation on failure.
    let row = event_repo::load_by_id(&pool, event).await?.unwrap();
    assert_eq!(row.max_participants, 3);

    // Dropping to exactly the registration count is allowed and makes the
    // event full.
    event_admin_service::update_event(&pool, event, &event_input("Tech Quiz", days_from_now(3), 2))
        .await?;
    let card = events_service::load_event_card(&pool, event).await?.unwrap();
    assert_eq!(card.max_participants, 2);
    assert!(card.is_full);
    Ok(())
}

#[tokio::test]
async fn delete_cascades_to_registrations() -> Result<()> {
    let (pool, _tmp) = test_pool().await?;
    let event = seed_event(&pool, "Tech Quiz", days_from_now(3), 10).await?;
    let alice = seed_student(&pool, "Alice", "alice@campus.edu", "PH-001").await?;
    let bob = seed_student(&pool, "Bob", "bob@campus.edu", "PH-002").await?;
    registration_service::register(&pool, event, alice).await?;
    registration_service::register(&pool, event, bob).await?;

    let title = event_admin_service::delete_event(&pool, event).await?;
    assert_eq!(title, "Tech Quiz");
    assert!(event_repo::load_by_id(&pool, event).await?.is_none());
    assert_eq!(registration_repo::count_for_event(&pool, event).await?, 0);
    Ok(())
}

#[tokio::test]
async fn delete_unknown_event_fails() -> Result<()> {
    let (pool, _tmp) = test_pool().await?;
    let err = event_admin_service::delete_event(&pool, 42).await.unwrap_err();
    assert!(matches!(err, EventAdminError::EventNotFound(42)));
    Ok(())
}

#[test]
fn form_validation_rejects_bad_input() {
    let err = event_admin_service::parse_event_input("", "desc", "2026-09-01T10:00", "Hall", "CS", "10")
        .unwrap_err();
    assert_eq!(err, EventFormError::MissingFields);

    let err = event_admin_service::parse_event_input("Quiz", "desc", "next tuesday", "Hall", "CS", "10")
        .unwrap_err();
    assert_eq!(err, EventFormError::InvalidDate);

    let err = event_admin_service::parse_event_input("Quiz", "desc", "2026-09-01T10:00", "Hall", "CS", "0")
        .unwrap_err();
    assert_eq!(err, EventFormError::InvalidCapacity);

    let input = event_admin_service::parse_event_input(
        " Quiz ",
        "desc",
        "2026-09-01T10:00",
        "Hall",
        "CS",
        "10",
    )
    .unwrap();
    assert_eq!(input.title, "Quiz");
    assert_eq!(input.max_participants, 10);
}

#[tokio::test]
async fn participant_roster_orders_by_signup_time() -> Result<()> {
    let (pool, _tmp) = test_pool().await?;
    let event = seed_event(&pool, "Tech Quiz", days_from_now(3), 10).await?;
    let alice = seed_student(&pool, "Alice", "alice@campus.edu", "PH-001").await?;
    let bob = seed_student(&pool, "Bob", "bob@campus.edu", "PH-002").await?;
    registration_service::register(&pool, event, alice).await?;
    registration_service::register(&pool, event, bob).await?;

    let roster = events_service::list_participants(&pool, event).await?;
    assert_eq!(roster.len(), 2);
    assert!(roster.iter().any(|p| p.email == "alice@campus.edu"));
    assert!(roster.iter().any(|p| p.roll_number == "PH-002"));
    Ok(())
}
