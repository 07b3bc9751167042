/// One server-side session. The student and admin slots are independent:
/// the same browser session can be logged in as both at once.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SessionRow {
    pub session_id: String,
    pub student_id: Option<i64>,
    pub admin_id: Option<i64>,
    pub created_at: String,
    pub expires_at: String,
}
