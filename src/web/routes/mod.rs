pub mod admin;
pub mod auth;
pub mod public;
pub mod student;

use cookie::Cookie;
use serde::Deserialize;

use crate::web::middleware::session::SESSION_COOKIE;

/// Notices travel as short codes in the `?notice=` query parameter and are
/// mapped back to a styled message when the next page renders.
#[derive(Debug, Deserialize, Default)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}

pub struct Notice {
    pub category: &'static str,
    pub message: &'static str,
}

pub fn notice_from_code(code: Option<&str>) -> Option<Notice> {
    let code = code?;
    let (category, message) = match code {
        "signup_ok" => ("success", "Registration successful! Please log in."),
        "login_required" => ("warning", "Please log in first."),
        "invalid_login" => ("danger", "Invalid email or password."),
        "invalid_admin_login" => ("danger", "Invalid username or password."),
        "missing_fields" => ("danger", "All fields are required."),
        "password_mismatch" => ("danger", "Passwords do not match."),
        "email_taken" => ("danger", "Email already registered."),
        "roll_taken" => ("danger", "Roll number already registered."),
        "signup_failed" => ("danger", "Registration failed. Please try again."),
        "login_failed" => ("danger", "Login failed. Please try again."),
        "logout_ok" => ("info", "You have been logged out successfully."),
        "register_ok" => ("success", "Successfully registered for the event!"),
        "event_full" => ("warning", "Sorry, this event is full."),
        "event_past" => ("warning", "Cannot register for past events."),
        "event_missing" => ("danger", "Event not found."),
        "already_registered" => ("info", "You are already registered for this event."),
        "register_failed" => ("danger", "Registration failed. Please try again."),
        "unregister_ok" => ("success", "Your registration has been cancelled."),
        "not_registered" => ("info", "You are not registered for this event."),
        "unregister_failed" => ("danger", "Unregistration failed. Please try again."),
        "event_added" => ("success", "Event added successfully!"),
        "event_updated" => ("success", "Event updated successfully!"),
        "event_deleted" => ("success", "Event deleted successfully!"),
        "event_date" => ("danger", "Invalid date format."),
        "event_capacity" => ("danger", "Participant limit must be at least 1."),
        "capacity_below" => (
            "danger",
            "Participant limit cannot drop below the current number of registrations.",
        ),
        "event_failed" => ("danger", "Could not save the event. Please try again."),
        _ => return None,
    };
    Some(Notice { category, message })
}

pub(crate) fn session_cookie(session_id: &str) -> Cookie<'static> {
    let mut c = Cookie::new(SESSION_COOKIE, session_id.to_string());
    c.set_path("/");
    c.set_http_only(true);
    c.set_same_site(cookie::SameSite::Lax);
    c
}
