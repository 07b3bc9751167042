pub mod admins;
pub mod events;
pub mod sessions;
pub mod students;

pub use admins::AdminRow;
pub use events::EventRow;
pub use sessions::SessionRow;
pub use students::StudentRow;
