#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AdminRow {
    pub admin_id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: String,
}
