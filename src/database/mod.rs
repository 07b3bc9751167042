pub mod admin_repo;
pub mod event_repo;
pub mod registration_repo;
pub mod schema;
pub mod session_repo;
pub mod student_repo;
