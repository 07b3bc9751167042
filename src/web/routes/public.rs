use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
    Extension,
};
use sqlx::SqlitePool;
use tracing::warn;

use crate::services::events_service::{self, EventCardView};
use crate::web::middleware::session::SessionContext;
use crate::web::routes::{notice_from_code, Notice, NoticeQuery};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub events: Vec<EventCardView>,
    pub notice: Option<Notice>,
}

/// Public landing page: the upcoming events list. A logged-in student goes
/// straight to their dashboard.
pub async fn index_handler(
    Extension(ctx): Extension<SessionContext>,
    Query(query): Query<NoticeQuery>,
    State(pool): State<SqlitePool>,
) -> impl IntoResponse {
    if ctx.student_id.is_some() {
        return Redirect::to("/dashboard").into_response();
    }

    let events = match events_service::list_upcoming_events(&pool, None).await {
        Ok(v) => v,
        Err(e) => {
            warn!("Event list failed: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let template = IndexTemplate {
        events,
        notice: notice_from_code(query.notice.as_deref()),
    };
    Html(template.render().unwrap()).into_response()
}
