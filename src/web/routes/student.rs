use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
    Extension,
};
use sqlx::SqlitePool;
use tracing::warn;

use crate::database::student_repo;
use crate::services::events_service::{self, EventCardView, MyRegistrationView};
use crate::services::registration_service::{self, LedgerError};
use crate::web::middleware::session::AuthenticatedStudent;
use crate::web::routes::{notice_from_code, Notice, NoticeQuery};

#[derive(Template)]
#[template(path = "student_dashboard.html")]
pub struct StudentDashboardTemplate {
    pub student_name: String,
    pub events: Vec<EventCardView>,
    pub notice: Option<Notice>,
}

pub async fn dashboard_handler(
    Extension(student): Extension<AuthenticatedStudent>,
    Query(query): Query<NoticeQuery>,
    State(pool): State<SqlitePool>,
) -> impl IntoResponse {
    let row = match student_repo::load_by_id(&pool, student.id).await {
        Ok(Some(row)) => row,
        // A live session for a deleted student; treat as logged out.
        Ok(None) => return Redirect::to("/login?notice=login_required").into_response(),
        Err(e) => {
            warn!("Student lookup failed: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let events = match events_service::list_upcoming_events(&pool, Some(student.id)).await {
        Ok(v) => v,
        Err(e) => {
            warn!("Event list failed: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let template = StudentDashboardTemplate {
        student_name: row.name,
        events,
        notice: notice_from_code(query.notice.as_deref()),
    };
    Html(template.render().unwrap()).into_response()
}

pub async fn register_event_handler(
    Extension(student): Extension<AuthenticatedStudent>,
    Path(event_id): Path<i64>,
    State(pool): State<SqlitePool>,
) -> Redirect {
    let code = match registration_service::register(&pool, event_id, student.id).await {
        Ok(()) => "register_ok",
        Err(LedgerError::EventNotFound(_)) => "event_missing",
        Err(LedgerError::EventFull(_)) => "event_full",
        Err(LedgerError::EventExpired(_)) => "event_past",
        Err(LedgerError::AlreadyRegistered { .. }) => "already_registered",
        Err(e) => {
            warn!("Registration failed: {}", e);
            "register_failed"
        }
    };
    Redirect::to(&format!("/dashboard?notice={}", code))
}

pub async fn unregister_event_handler(
    Extension(student): Extension<AuthenticatedStudent>,
    Path(event_id): Path<i64>,
    State(pool): State<SqlitePool>,
) -> Redirect {
    let code = match registration_service::unregister(&pool, event_id, student.id).await {
        Ok(()) => "unregister_ok",
        Err(LedgerError::NotRegistered { .. }) => "not_registered",
        Err(e) => {
            warn!("Unregistration failed: {}", e);
            "unregister_failed"
        }
    };
    Redirect::to(&format!("/my-registrations?notice={}", code))
}

#[derive(Template)]
#[template(path = "my_registrations.html")]
pub struct MyRegistrationsTemplate {
    pub student_name: String,
    pub registrations: Vec<MyRegistrationView>,
    pub notice: Option<Notice>,
}

pub async fn my_registrations_handler(
    Extension(student): Extension<AuthenticatedStudent>,
    Query(query): Query<NoticeQuery>,
    State(pool): State<SqlitePool>,
) -> impl IntoResponse {
    let row = match student_repo::load_by_id(&pool, student.id).await {
        Ok(Some(row)) => row,
        Ok(None) => return Redirect::to("/login?notice=login_required").into_response(),
        Err(e) => {
            warn!("Student lookup failed: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let registrations = match events_service::list_my_registrations(&pool, student.id).await {
        Ok(v) => v,
        Err(e) => {
            warn!("Registration list failed: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let template = MyRegistrationsTemplate {
        student_name: row.name,
        registrations,
        notice: notice_from_code(query.notice.as_deref()),
    };
    Html(template.render().unwrap()).into_response()
}
