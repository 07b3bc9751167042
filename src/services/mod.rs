pub mod auth_service;
pub mod event_admin_service;
pub mod events_service;
pub mod registration_service;

use chrono::Utc;

/// Storage timestamp format, comparable with SQLite's `datetime('now')`.
pub(crate) const STORE_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub(crate) fn utc_now_stamp() -> String {
    Utc::now().naive_utc().format(STORE_DATETIME_FORMAT).to_string()
}
