use askama::Template;
use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::warn;

use crate::services::auth_service::{self, AuthError, SignupInput};
use crate::web::middleware::session::SessionContext;
use crate::web::routes::{notice_from_code, session_cookie, Notice, NoticeQuery};

#[derive(Template)]
#[template(path = "signup.html")]
pub struct SignupTemplate {
    pub notice: Option<Notice>,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub notice: Option<Notice>,
}

#[derive(Deserialize)]
pub struct SignupForm {
    name: String,
    email: String,
    roll_number: String,
    department: String,
    password: String,
    confirm_password: String,
}

#[derive(Deserialize)]
pub struct LoginForm {
    email: String,
    password: String,
}

pub async fn signup_page(Query(query): Query<NoticeQuery>) -> Html<String> {
    let template = SignupTemplate {
        notice: notice_from_code(query.notice.as_deref()),
    };
    Html(template.render().unwrap())
}

pub async fn signup_handler(
    State(pool): State<SqlitePool>,
    Form(form): Form<SignupForm>,
) -> Redirect {
    let result = auth_service::signup_student(
        &pool,
        SignupInput {
            name: &form.name,
            email: &form.email,
            roll_number: &form.roll_number,
            department: &form.department,
            password: &form.password,
            confirm_password: &form.confirm_password,
        },
    )
    .await;

    match result {
        Ok(_) => Redirect::to("/login?notice=signup_ok"),
        Err(e) => {
            let code = match e {
                AuthError::MissingFields => "missing_fields",
                AuthError::PasswordMismatch => "password_mismatch",
                AuthError::EmailTaken => "email_taken",
                AuthError::RollNumberTaken => "roll_taken",
                other => {
                    warn!("Signup failed: {}", other);
                    "signup_failed"
                }
            };
            Redirect::to(&format!("/signup?notice={}", code))
        }
    }
}

pub async fn login_page(Query(query): Query<NoticeQuery>) -> Html<String> {
    let template = LoginTemplate {
        notice: notice_from_code(query.notice.as_deref()),
    };
    Html(template.render().unwrap())
}

pub async fn login_handler(
    Extension(ctx): Extension<SessionContext>,
    State(pool): State<SqlitePool>,
    Form(form): Form<LoginForm>,
) -> Response {
    let student = match auth_service::login_student(&pool, &form.email, &form.password).await {
        Ok(student) => student,
        Err(AuthError::MissingFields) => {
            return Redirect::to("/login?notice=missing_fields").into_response()
        }
        Err(AuthError::InvalidCredentials) => {
            return Redirect::to("/login?notice=invalid_login").into_response()
        }
        Err(e) => {
            warn!("Student login failed: {}", e);
            return Redirect::to("/login?notice=login_failed").into_response();
        }
    };

    let sid = match auth_service::establish_student_session(
        &pool,
        ctx.session_id.as_deref(),
        student.student_id,
    )
    .await
    {
        Ok(sid) => sid,
        Err(e) => {
            warn!("Could not establish session: {}", e);
            return Redirect::to("/login?notice=login_failed").into_response();
        }
    };

    let mut response = Redirect::to("/dashboard").into_response();
    response.headers_mut().append(
        header::SET_COOKIE,
        session_cookie(&sid).to_string().parse().unwrap(),
    );
    response
}

/// Clears the student slot only; an admin login in the same browser session
/// stays intact.
pub async fn logout_handler(
    Extension(ctx): Extension<SessionContext>,
    State(pool): State<SqlitePool>,
) -> Redirect {
    if let Some(sid) = ctx.session_id.as_deref() {
        if let Err(e) = auth_service::clear_student_slot(&pool, sid).await {
            warn!("Student logout failed: {}", e);
        }
    }
    Redirect::to("/?notice=logout_ok")
}
