mod common;

use anyhow::Result;
use common::{seed_student, test_pool};
use eventportal::database::session_repo;
use eventportal::services::auth_service::{self, AuthError, SignupInput};

#[tokio::test]
async fn signup_then_login() -> Result<()> {
    let (pool, _tmp) = test_pool().await?;
    let id = seed_student(&pool, "Alice", "alice@campus.edu", "PH-001").await?;

    let student = auth_service::login_student(&pool, "alice@campus.edu", "hunter22").await?;
    assert_eq!(student.student_id, id);
    assert_eq!(student.name, "Alice");

    let err = auth_service::login_student(&pool, "alice@campus.edu", "wrong")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));

    let err = auth_service::login_student(&pool, "nobody@campus.edu", "hunter22")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
    Ok(())
}

#[tokio::test]
async fn signup_rejects_duplicates_and_bad_input() -> Result<()> {
    let (pool, _tmp) = test_pool().await?;
    seed_student(&pool, "Alice", "alice@campus.edu", "PH-001").await?;

    let err = auth_service::signup_student(
        &pool,
        SignupInput {
            name: "Other",
            email: "alice@campus.edu",
            roll_number: "PH-002",
            department: "Physics",
            password: "pw",
            confirm_password: "pw",
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AuthError::EmailTaken));

    let err = auth_service::signup_student(
        &pool,
        SignupInput {
            name: "Other",
            email: "other@campus.edu",
            roll_number: "PH-001",
            department: "Physics",
            password: "pw",
            confirm_password: "pw",
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AuthError::RollNumberTaken));

    let err = auth_service::signup_student(
        &pool,
        SignupInput {
            name: "Other",
            email: "other@campus.edu",
            roll_number: "PH-003",
            department: "Physics",
            password: "pw",
            confirm_password: "different",
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AuthError::PasswordMismatch));

    let err = auth_service::signup_student(
        &pool,
        SignupInput {
            name: "",
            email: "other@campus.edu",
            roll_number: "PH-003",
            department: "Physics",
            password: "pw",
            confirm_password: "pw",
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AuthError::MissingFields));
    Ok(())
}

#[tokio::test]
async fn default_admin_is_seeded_once() -> Result<()> {
    let (pool, _tmp) = test_pool().await?;
    auth_service::ensure_default_admin(&pool).await?;
    auth_service::ensure_default_admin(&pool).await?;

    let admin = auth_service::login_admin(&pool, "admin", "admin123").await?;
    assert_eq!(admin.username, "admin");

    let err = auth_service::login_admin(&pool, "admin", "nope")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
    Ok(())
}

#[tokio::test]
async fn session_slots_are_independent() -> Result<()> {
    let (pool, _tmp) = test_pool().await?;
    auth_service::ensure_default_admin(&pool).await?;
    let student_id = seed_student(&pool, "Alice", "alice@campus.edu", "PH-001").await?;
    let admin = auth_service::login_admin(&pool, "admin", "admin123").await?;

    // Student logs in first, then the admin logs in on the same browser
    // session.
    let sid = auth_service::establish_student_session(&pool, None, student_id).await?;
    let same_sid =
        auth_service::establish_admin_session(&pool, Some(&sid), admin.admin_id).await?;
    assert_eq!(sid, same_sid);

    let row = session_repo::load_active(&pool, &sid).await?.unwrap();
    assert_eq!(row.student_id, Some(student_id));
    assert_eq!(row.admin_id, Some(admin.admin_id));

    // Student logout leaves the admin slot intact.
    auth_service::clear_student_slot(&pool, &sid).await?;
    let row = session_repo::load_active(&pool, &sid).await?.unwrap();
    assert_eq!(row.student_id, None);
    assert_eq!(row.admin_id, Some(admin.admin_id));

    auth_service::clear_admin_slot(&pool, &sid).await?;
    let row = session_repo::load_active(&pool, &sid).await?.unwrap();
    assert_eq!(row.admin_id, None);
    Ok(())
}

#[tokio::test]
async fn expired_sessions_are_not_loaded_and_get_swept() -> Result<()> {
    let (pool, _tmp) = test_pool().await?;
    let student_id = seed_student(&pool, "Alice", "alice@campus.edu", "PH-001").await?;
    session_repo::insert_session(
        &pool,
        "stale",
        Some(student_id),
        None,
        "2020-01-01 00:00:00",
        "2020-01-03 00:00:00",
    )
    .await?;

    assert!(session_repo::load_active(&pool, "stale").await?.is_none());
    assert_eq!(session_repo::delete_expired(&pool).await?, 1);

    // A fresh login after the sweep gets a new session row.
    let sid = auth_service::establish_student_session(&pool, Some("stale"), student_id).await?;
    assert_ne!(sid, "stale");
    assert!(session_repo::load_active(&pool, &sid).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn logout_without_a_session_is_a_no_op() -> Result<()> {
    let (pool, _tmp) = test_pool().await?;
    auth_service::clear_student_slot(&pool, "no-such-session").await?;
    auth_service::clear_admin_slot(&pool, "no-such-session").await?;
    Ok(())
}

#[tokio::test]
async fn unknown_session_resolves_to_nothing() -> Result<()> {
    let (pool, _tmp) = test_pool().await?;
    assert!(session_repo::load_active(&pool, "not-a-session").await?.is_none());
    Ok(())
}
