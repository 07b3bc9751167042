#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EventRow {
    pub event_id: i64,
    pub title: String,
    pub description: String,
    pub date: String,
    pub venue: String,
    pub department: String,
    pub max_participants: i64,
    pub created_at: String,
}
