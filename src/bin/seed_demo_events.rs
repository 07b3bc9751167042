use chrono::{Duration, Utc};
use dotenvy::dotenv;
use sqlx::sqlite::SqlitePoolOptions;
use std::env;

use eventportal::database::schema;
use eventportal::services::auth_service;
use eventportal::services::event_admin_service::{self, EventInput};
use eventportal::services::events_service;

/// Seeds a fresh database with the demo competition events so the portal has
/// something to show. Skips seeding when any event already exists.
#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let db_url = env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://college_events.db?mode=rwc".to_string());
    let pool = SqlitePoolOptions::new()
        .connect(&db_url)
        .await
        .expect("Kan niet verbinden met DB");

    schema::init(&pool).await.expect("Kan schema niet aanmaken");
    auth_service::ensure_default_admin(&pool)
        .await
        .expect("Kan default admin niet aanmaken");

    let existing = events_service::list_all_events(&pool)
        .await
        .expect("Kan events niet lezen");
    if !existing.is_empty() {
        println!("Events bestaan al ({}), seeding overgeslagen.", existing.len());
        return;
    }

    let demo_events = [
        (
            "Debugging Contest",
            "Find and fix bugs in given code snippets within time limits.",
            10,
            "Computer Lab A",
            "Computer Science",
        ),
        (
            "UI/UX Design Challenge",
            "Design user-friendly interfaces for given problem statements.",
            11,
            "Design Studio",
            "Computer Science",
        ),
        (
            "Circuit Debugging",
            "Identify and fix issues in electronic circuits.",
            12,
            "Electronics Lab",
            "Electronics",
        ),
        (
            "CAD Modelling",
            "Create 3D models and technical drawings using CAD software.",
            13,
            "CAD Lab",
            "Mechanical",
        ),
        (
            "Tech Quiz",
            "MCQs from multiple engineering fields.",
            14,
            "Main Auditorium",
            "General",
        ),
        (
            "Paper Presentation",
            "Present your original research or technical solutions to a panel of judges.",
            15,
            "Conference Hall",
            "General",
        ),
    ];

    let base = Utc::now().naive_utc();
    let mut created = 0;
    for (title, description, days_ahead, venue, department) in demo_events {
        let input = EventInput {
            title: title.to_string(),
            description: description.to_string(),
            date: base + Duration::days(days_ahead),
            venue: venue.to_string(),
            department: department.to_string(),
            max_participants: 50,
        };
        match event_admin_service::create_event(&pool, &input).await {
            Ok(_) => created += 1,
            Err(e) => {
                eprintln!("Seeden van '{}' mislukt: {}", title, e);
                std::process::exit(1);
            }
        }
    }

    println!("✅ {} demo events aangemaakt", created);
}
