use sqlx::SqlitePool;

const SQL_CREATE_STUDENTS: &str = r#"
CREATE TABLE IF NOT EXISTS students (
  student_id    INTEGER PRIMARY KEY AUTOINCREMENT,
  name          TEXT NOT NULL,
  email         TEXT NOT NULL UNIQUE,
  roll_number   TEXT NOT NULL UNIQUE,
  department    TEXT NOT NULL,
  password_hash TEXT NOT NULL,
  created_at    TEXT NOT NULL
)
"#;

const SQL_CREATE_ADMINS: &str = r#"
CREATE TABLE IF NOT EXISTS admins (
  admin_id      INTEGER PRIMARY KEY AUTOINCREMENT,
  username      TEXT NOT NULL UNIQUE,
  password_hash TEXT NOT NULL,
  created_at    TEXT NOT NULL
)
"#;

const SQL_CREATE_EVENTS: &str = r#"
CREATE TABLE IF NOT EXISTS events (
  event_id         INTEGER PRIMARY KEY AUTOINCREMENT,
  title            TEXT NOT NULL,
  description      TEXT NOT NULL,
  date             TEXT NOT NULL,
  venue            TEXT NOT NULL,
  department       TEXT NOT NULL,
  max_participants INTEGER NOT NULL CHECK (max_participants >= 1),
  created_at       TEXT NOT NULL
)
"#;

// UNIQUE(event_id, student_id) is the structural guard against duplicate
// registrations; capacity is enforced transactionally on insert.
const SQL_CREATE_REGISTRATIONS: &str = r#"
CREATE TABLE IF NOT EXISTS registrations (
  reg_id     INTEGER PRIMARY KEY AUTOINCREMENT,
  event_id   INTEGER NOT NULL REFERENCES events(event_id),
  student_id INTEGER NOT NULL REFERENCES students(student_id),
  created_at TEXT NOT NULL,
  UNIQUE (event_id, student_id)
)
"#;

const SQL_CREATE_REGISTRATIONS_EVENT_IDX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_registrations_event ON registrations(event_id)
"#;

const SQL_CREATE_SESSIONS: &str = r#"
CREATE TABLE IF NOT EXISTS sessions (
  session_id TEXT PRIMARY KEY,
  student_id INTEGER,
  admin_id   INTEGER,
  created_at TEXT NOT NULL,
  expires_at TEXT NOT NULL
)
"#;

pub async fn init(pool: &SqlitePool) -> sqlx::Result<()> {
    for statement in [
        SQL_CREATE_STUDENTS,
        SQL_CREATE_ADMINS,
        SQL_CREATE_EVENTS,
        SQL_CREATE_REGISTRATIONS,
        SQL_CREATE_REGISTRATIONS_EVENT_IDX,
        SQL_CREATE_SESSIONS,
    ] {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
