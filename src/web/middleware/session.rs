use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use sqlx::SqlitePool;
use tracing::warn;

use crate::database::session_repo;

pub const SESSION_COOKIE: &str = "sid";

/// Request-scoped identity, resolved once per request. Both slots are
/// optional and independent; a browser can hold a student and an admin
/// login at the same time.
#[derive(Clone, Debug, Default)]
pub struct SessionContext {
    pub session_id: Option<String>,
    pub student_id: Option<i64>,
    pub admin_id: Option<i64>,
}

#[derive(Clone, Debug)]
pub struct AuthenticatedStudent {
    pub id: i64,
}

#[derive(Clone, Debug)]
pub struct AuthenticatedAdmin {
    pub id: i64,
}

/// Resolves the session cookie into a `SessionContext` extension. Always
/// inserts one, so downstream extractors never miss it.
pub async fn resolve_session(
    State(pool): State<SqlitePool>,
    mut request: Request,
    next: Next,
) -> Response {
    let sid = request
        .headers()
        .get(header::COOKIE)
        .and_then(|hv| hv.to_str().ok())
        .and_then(|cookies| {
            cookies
                .split("; ")
                .find_map(|c| c.strip_prefix("sid="))
        })
        .map(|s| s.to_string());

    let mut ctx = SessionContext::default();
    if let Some(sid) = sid {
        match session_repo::load_active(&pool, &sid).await {
            Ok(Some(row)) => {
                ctx = SessionContext {
                    session_id: Some(sid),
                    student_id: row.student_id,
                    admin_id: row.admin_id,
                };
            }
            Ok(None) => {}
            Err(e) => warn!("Session lookup failed: {}", e),
        }
    }

    request.extensions_mut().insert(ctx);
    next.run(request).await
}

pub async fn require_student(mut request: Request, next: Next) -> Response {
    let student_id = request
        .extensions()
        .get::<SessionContext>()
        .and_then(|ctx| ctx.student_id);

    match student_id {
        Some(id) => {
            request
                .extensions_mut()
                .insert(AuthenticatedStudent { id });
            next.run(request).await
        }
        None => Redirect::to("/login?notice=login_required").into_response(),
    }
}

pub async fn require_admin(mut request: Request, next: Next) -> Response {
    let admin_id = request
        .extensions()
        .get::<SessionContext>()
        .and_then(|ctx| ctx.admin_id);

    match admin_id {
        Some(id) => {
            request.extensions_mut().insert(AuthenticatedAdmin { id });
            next.run(request).await
        }
        None => Redirect::to("/admin/login?notice=login_required").into_response(),
    }
}
