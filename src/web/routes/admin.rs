use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use chrono::NaiveDateTime;
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::warn;

use crate::database::event_repo;
use crate::services::auth_service::{self, AuthError};
use crate::services::event_admin_service::{self, EventAdminError, EventFormError};
use crate::services::events_service::{self, EventCardView, ParticipantView};
use crate::services::STORE_DATETIME_FORMAT;
use crate::web::middleware::session::{AuthenticatedAdmin, SessionContext};
use crate::web::routes::{notice_from_code, session_cookie, Notice, NoticeQuery};

#[derive(Template)]
#[template(path = "admin_login.html")]
pub struct AdminLoginTemplate {
    pub notice: Option<Notice>,
}

#[derive(Deserialize)]
pub struct AdminLoginForm {
    username: String,
    password: String,
}

pub async fn login_page(Query(query): Query<NoticeQuery>) -> Html<String> {
    let template = AdminLoginTemplate {
        notice: notice_from_code(query.notice.as_deref()),
    };
    Html(template.render().unwrap())
}

pub async fn login_handler(
    Extension(ctx): Extension<SessionContext>,
    State(pool): State<SqlitePool>,
    Form(form): Form<AdminLoginForm>,
) -> Response {
    let admin = match auth_service::login_admin(&pool, &form.username, &form.password).await {
        Ok(admin) => admin,
        Err(AuthError::MissingFields) => {
            return Redirect::to("/admin/login?notice=missing_fields").into_response()
        }
        Err(AuthError::InvalidCredentials) => {
            return Redirect::to("/admin/login?notice=invalid_admin_login").into_response()
        }
        Err(e) => {
            warn!("Admin login failed: {}", e);
            return Redirect::to("/admin/login?notice=login_failed").into_response();
        }
    };

    let sid = match auth_service::establish_admin_session(
        &pool,
        ctx.session_id.as_deref(),
        admin.admin_id,
    )
    .await
    {
        Ok(sid) => sid,
        Err(e) => {
            warn!("Could not establish admin session: {}", e);
            return Redirect::to("/admin/login?notice=login_failed").into_response();
        }
    };

    let mut response = Redirect::to("/admin/dashboard").into_response();
    response.headers_mut().append(
        header::SET_COOKIE,
        session_cookie(&sid).to_string().parse().unwrap(),
    );
    response
}

/// Clears the admin slot only; a student login in the same browser session
/// stays intact.
pub async fn logout_handler(
    Extension(ctx): Extension<SessionContext>,
    State(pool): State<SqlitePool>,
) -> Redirect {
    if let Some(sid) = ctx.session_id.as_deref() {
        if let Err(e) = auth_service::clear_admin_slot(&pool, sid).await {
            warn!("Admin logout failed: {}", e);
        }
    }
    Redirect::to("/admin/login?notice=logout_ok")
}

#[derive(Template)]
#[template(path = "admin_dashboard.html")]
pub struct AdminDashboardTemplate {
    pub events: Vec<EventCardView>,
    pub notice: Option<Notice>,
}

pub async fn dashboard_handler(
    Extension(_admin): Extension<AuthenticatedAdmin>,
    Query(query): Query<NoticeQuery>,
    State(pool): State<SqlitePool>,
) -> impl IntoResponse {
    let events = match events_service::list_all_events(&pool).await {
        Ok(v) => v,
        Err(e) => {
            warn!("Admin event list failed: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let template = AdminDashboardTemplate {
        events,
        notice: notice_from_code(query.notice.as_deref()),
    };
    Html(template.render().unwrap()).into_response()
}

#[derive(Deserialize)]
pub struct EventForm {
    title: String,
    description: String,
    date: String,
    venue: String,
    department: String,
    max_participants: String,
}

#[derive(Template)]
#[template(path = "add_event.html")]
pub struct AddEventTemplate {
    pub notice: Option<Notice>,
}

pub async fn add_event_page(
    Extension(_admin): Extension<AuthenticatedAdmin>,
    Query(query): Query<NoticeQuery>,
) -> Html<String> {
    let template = AddEventTemplate {
        notice: notice_from_code(query.notice.as_deref()),
    };
    Html(template.render().unwrap())
}

pub async fn add_event_handler(
    Extension(_admin): Extension<AuthenticatedAdmin>,
    State(pool): State<SqlitePool>,
    Form(form): Form<EventForm>,
) -> Redirect {
    let input = match event_admin_service::parse_event_input(
        &form.title,
        &form.description,
        &form.date,
        &form.venue,
        &form.department,
        &form.max_participants,
    ) {
        Ok(input) => input,
        Err(e) => {
            return Redirect::to(&format!("/admin/add-event?notice={}", form_error_code(&e)))
        }
    };

    match event_admin_service::create_event(&pool, &input).await {
        Ok(_) => Redirect::to("/admin/dashboard?notice=event_added"),
        Err(e) => {
            warn!("Add event failed: {}", e);
            Redirect::to("/admin/add-event?notice=event_failed")
        }
    }
}

/// Event fields as the edit form needs them, with the date shaped for a
/// datetime-local input.
pub struct EventFormView {
    pub event_id: i64,
    pub title: String,
    pub description: String,
    pub date_value: String,
    pub venue: String,
    pub department: String,
    pub max_participants: i64,
}

#[derive(Template)]
#[template(path = "edit_event.html")]
pub struct EditEventTemplate {
    pub event: EventFormView,
    pub notice: Option<Notice>,
}

pub async fn edit_event_page(
    Extension(_admin): Extension<AuthenticatedAdmin>,
    Path(event_id): Path<i64>,
    Query(query): Query<NoticeQuery>,
    State(pool): State<SqlitePool>,
) -> impl IntoResponse {
    let row = match event_repo::load_by_id(&pool, event_id).await {
        Ok(Some(row)) => row,
        Ok(None) => return StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            warn!("Event lookup failed: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let date_value = match NaiveDateTime::parse_from_str(&row.date, STORE_DATETIME_FORMAT) {
        Ok(dt) => dt.format("%Y-%m-%dT%H:%M").to_string(),
        Err(_) => row.date.clone(),
    };

    let template = EditEventTemplate {
        event: EventFormView {
            event_id: row.event_id,
            title: row.title,
            description: row.description,
            date_value,
            venue: row.venue,
            department: row.department,
            max_participants: row.max_participants,
        },
        notice: notice_from_code(query.notice.as_deref()),
    };
    Html(template.render().unwrap()).into_response()
}

pub async fn edit_event_handler(
    Extension(_admin): Extension<AuthenticatedAdmin>,
    Path(event_id): Path<i64>,
    State(pool): State<SqlitePool>,
    Form(form): Form<EventForm>,
) -> Redirect {
    let input = match event_admin_service::parse_event_input(
        &form.title,
        &form.description,
        &form.date,
        &form.venue,
        &form.department,
        &form.max_participants,
    ) {
        Ok(input) => input,
        Err(e) => {
            return Redirect::to(&format!(
                "/admin/edit-event/{}?notice={}",
                event_id,
                form_error_code(&e)
            ))
        }
    };

    match event_admin_service::update_event(&pool, event_id, &input).await {
        Ok(()) => Redirect::to("/admin/dashboard?notice=event_updated"),
        Err(EventAdminError::EventNotFound(_)) => {
            Redirect::to("/admin/dashboard?notice=event_missing")
        }
        Err(EventAdminError::CapacityBelowRegistered { .. }) => Redirect::to(&format!(
            "/admin/edit-event/{}?notice=capacity_below",
            event_id
        )),
        Err(e) => {
            warn!("Edit event failed: {}", e);
            Redirect::to(&format!("/admin/edit-event/{}?notice=event_failed", event_id))
        }
    }
}

pub async fn delete_event_handler(
    Extension(_admin): Extension<AuthenticatedAdmin>,
    Path(event_id): Path<i64>,
    State(pool): State<SqlitePool>,
) -> Redirect {
    match event_admin_service::delete_event(&pool, event_id).await {
        Ok(_title) => Redirect::to("/admin/dashboard?notice=event_deleted"),
        Err(EventAdminError::EventNotFound(_)) => {
            Redirect::to("/admin/dashboard?notice=event_missing")
        }
        Err(e) => {
            warn!("Delete event failed: {}", e);
            Redirect::to("/admin/dashboard?notice=event_failed")
        }
    }
}

#[derive(Template)]
#[template(path = "participants.html")]
pub struct ParticipantsTemplate {
    pub event: EventCardView,
    pub participants: Vec<ParticipantView>,
    pub notice: Option<Notice>,
}

pub async fn participants_handler(
    Extension(_admin): Extension<AuthenticatedAdmin>,
    Path(event_id): Path<i64>,
    Query(query): Query<NoticeQuery>,
    State(pool): State<SqlitePool>,
) -> impl IntoResponse {
    let event = match events_service::load_event_card(&pool, event_id).await {
        Ok(Some(event)) => event,
        Ok(None) => return StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            warn!("Event lookup failed: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let participants = match events_service::list_participants(&pool, event_id).await {
        Ok(v) => v,
        Err(e) => {
            warn!("Participant list failed: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let template = ParticipantsTemplate {
        event,
        participants,
        notice: notice_from_code(query.notice.as_deref()),
    };
    Html(template.render().unwrap()).into_response()
}

fn form_error_code(err: &EventFormError) -> &'static str {
    match err {
        EventFormError::MissingFields => "missing_fields",
        EventFormError::InvalidDate => "event_date",
        EventFormError::InvalidCapacity => "event_capacity",
    }
}
