mod common;

use anyhow::Result;
use common::{days_from_now, seed_event, seed_student, test_pool};
use eventportal::database::{registration_repo, student_repo};
use eventportal::services::events_service;
use eventportal::services::registration_service::{self, LedgerError};

#[tokio::test]
async fn capacity_one_admits_first_and_rejects_second() -> Result<()> {
    let (pool, _tmp) = test_pool().await?;
    let event = seed_event(&pool, "Tech Quiz", days_from_now(3), 1).await?;
    let alice = seed_student(&pool, "Alice", "alice@campus.edu", "PH-001").await?;
    let bob = seed_student(&pool, "Bob", "bob@campus.edu", "PH-002").await?;

    registration_service::register(&pool, event, alice).await?;
    assert_eq!(registration_repo::count_for_event(&pool, event).await?, 1);

    let err = registration_service::register(&pool, event, bob)
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::EventFull(_)));
    assert_eq!(registration_repo::count_for_event(&pool, event).await?, 1);

    let cards = events_service::list_upcoming_events(&pool, Some(alice)).await?;
    let card = cards.iter().find(|c| c.event_id == event).unwrap();
    assert!(card.is_full);
    assert!(card.is_registered);
    Ok(())
}

#[tokio::test]
async fn capacity_never_exceeded() -> Result<()> {
    let (pool, _tmp) = test_pool().await?;
    let event = seed_event(&pool, "CAD Modelling", days_from_now(5), 2).await?;
    let mut admitted = 0;
    for i in 0..3 {
        let student = seed_student(
            &pool,
            "Student",
            &format!("s{}@campus.edu", i),
            &format!("PH-10{}", i),
        )
        .await?;
        if registration_service::register(&pool, event, student)
            .await
            .is_ok()
        {
            admitted += 1;
        }
    }
    assert_eq!(admitted, 2);
    assert_eq!(registration_repo::count_for_event(&pool, event).await?, 2);
    Ok(())
}

#[tokio::test]
async fn duplicate_registration_rejected() -> Result<()> {
    let (pool, _tmp) = test_pool().await?;
    let event = seed_event(&pool, "Tech Quiz", days_from_now(3), 10).await?;
    let alice = seed_student(&pool, "Alice", "alice@campus.edu", "PH-001").await?;

    registration_service::register(&pool, event, alice).await?;
    let err = registration_service::register(&pool, event, alice)
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::AlreadyRegistered { .. }));
    assert_eq!(registration_repo::count_for_event(&pool, event).await?, 1);
    Ok(())
}

#[tokio::test]
async fn past_event_rejected() -> Result<()> {
    let (pool, _tmp) = test_pool().await?;
    let event = seed_event(&pool, "Last year's quiz", days_from_now(-2), 10).await?;
    let alice = seed_student(&pool, "Alice", "alice@campus.edu", "PH-001").await?;

    let err = registration_service::register(&pool, event, alice)
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::EventExpired(_)));
    assert_eq!(registration_repo::count_for_event(&pool, event).await?, 0);
    Ok(())
}

#[tokio::test]
async fn unknown_event_rejected_without_side_effects() -> Result<()> {
    let (pool, _tmp) = test_pool().await?;
    let alice = seed_student(&pool, "Alice", "alice@campus.edu", "PH-001").await?;

    let err = registration_service::register(&pool, 999, alice)
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::EventNotFound(999)));
    assert!(!registration_repo::exists(&pool, 999, alice).await?);
    Ok(())
}

#[tokio::test]
async fn unregister_removes_the_registration() -> Result<()> {
    let (pool, _tmp) = test_pool().await?;
    let event = seed_event(&pool, "Tech Quiz", days_from_now(3), 1).await?;
    let alice = seed_student(&pool, "Alice", "alice@campus.edu", "PH-001").await?;

    registration_service::register(&pool, event, alice).await?;
    registration_service::unregister(&pool, event, alice).await?;
    assert_eq!(registration_repo::count_for_event(&pool, event).await?, 0);

    let err = registration_service::unregister(&pool, event, alice)
        .await
        .unwrap_err();
    assert!(matches!(err, LedgerError::NotRegistered { .. }));

    // The freed seat can be taken again.
    registration_service::register(&pool, event, alice).await?;
    assert_eq!(registration_repo::count_for_event(&pool, event).await?, 1);
    Ok(())
}

#[tokio::test]
async fn my_registrations_lists_newest_first() -> Result<()> {
    let (pool, _tmp) = test_pool().await?;
    let quiz = seed_event(&pool, "Tech Quiz", days_from_now(3), 10).await?;
    let cad = seed_event(&pool, "CAD Modelling", days_from_now(5), 10).await?;
    let alice = seed_student(&pool, "Alice", "alice@campus.edu", "PH-001").await?;

    registration_service::register(&pool, quiz, alice).await?;
    registration_service::register(&pool, cad, alice).await?;

    let mine = events_service::list_my_registrations(&pool, alice).await?;
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().any(|r| r.event_id == quiz));
    assert!(mine.iter().any(|r| r.event_id == cad));
    Ok(())
}

#[tokio::test]
async fn deleting_a_student_removes_their_registrations() -> Result<()> {
    let (pool, _tmp) = test_pool().await?;
    let event = seed_event(&pool, "Tech Quiz", days_from_now(3), 10).await?;
    let alice = seed_student(&pool, "Alice", "alice@campus.edu", "PH-001").await?;
    let bob = seed_student(&pool, "Bob", "bob@campus.edu", "PH-002").await?;

    registration_service::register(&pool, event, alice).await?;
    registration_service::register(&pool, event, bob).await?;

    student_repo::delete_student_cascade(&pool, alice).await?;
    assert_eq!(registration_repo::count_for_event(&pool, event).await?, 1);
    assert!(!registration_repo::exists(&pool, event, alice).await?);
    assert!(registration_repo::exists(&pool, event, bob).await?);
    Ok(())
}
