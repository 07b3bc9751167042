#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StudentRow {
    pub student_id: i64,
    pub name: String,
    pub email: String,
    pub roll_number: String,
    pub department: String,
    pub password_hash: String,
    pub created_at: String,
}
