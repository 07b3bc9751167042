use axum::{
    middleware,
    routing::{get, get_service, post},
    Router,
};
use dotenvy::dotenv;
use http::header::{HeaderValue, CACHE_CONTROL};
use sqlx::sqlite::SqlitePoolOptions;
use std::env;
use std::net::SocketAddr;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use eventportal::database::schema;
use eventportal::services::auth_service;
use eventportal::web::middleware::session as session_middleware;
use eventportal::web::routes::{admin, auth, public, student};

#[tokio::main]
async fn main() {
    // Laad .env bestand
    dotenv().ok();

    // 1. Start logging
    tracing_subscriber::fmt::init();

    // 2. Verbind met de database
    let db_url = env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://college_events.db?mode=rwc".to_string());
    println!("Verbinden met database: {}", db_url);

    let pool = SqlitePoolOptions::new()
        .connect(&db_url)
        .await
        .expect("Kan niet verbinden met DB");

    schema::init(&pool).await.expect("Kan schema niet aanmaken");
    if let Err(e) = auth_service::ensure_default_admin(&pool).await {
        eprintln!("⚠️  Kon default admin niet aanmaken: {}", e);
    }

    // 3. Student routes onder één guard layer
    let student_routes = Router::new()
        .route("/dashboard", get(student::dashboard_handler))
        .route("/register/:event_id", get(student::register_event_handler))
        .route(
            "/unregister/:event_id",
            get(student::unregister_event_handler),
        )
        .route("/my-registrations", get(student::my_registrations_handler))
        .layer(middleware::from_fn(session_middleware::require_student));

    // 4. Admin routes onder een eigen guard layer
    let admin_routes = Router::new()
        .route("/admin/dashboard", get(admin::dashboard_handler))
        .route(
            "/admin/add-event",
            get(admin::add_event_page).post(admin::add_event_handler),
        )
        .route(
            "/admin/edit-event/:event_id",
            get(admin::edit_event_page).post(admin::edit_event_handler),
        )
        .route(
            "/admin/delete-event/:event_id",
            post(admin::delete_event_handler),
        )
        .route(
            "/admin/event/:event_id/participants",
            get(admin::participants_handler),
        )
        .route("/admin/logout", post(admin::logout_handler))
        .layer(middleware::from_fn(session_middleware::require_admin));

    // 5. Bouw de hele applicatie
    let app = Router::new()
        // Public routes
        .route("/", get(public::index_handler))
        .route("/signup", get(auth::signup_page).post(auth::signup_handler))
        .route("/login", get(auth::login_page).post(auth::login_handler))
        // Logout staat buiten de guard: ook met een verlopen sessie werkt hij
        .route("/logout", post(auth::logout_handler))
        .route(
            "/admin/login",
            get(admin::login_page).post(admin::login_handler),
        )
        // Guarded routes
        .merge(student_routes)
        .merge(admin_routes)
        // Static files
        .nest_service(
            "/assets",
            get_service(ServeDir::new("assets")).layer(SetResponseHeaderLayer::if_not_present(
                CACHE_CONTROL,
                HeaderValue::from_static("no-store"),
            )),
        )
        // Layers
        .layer(middleware::from_fn_with_state(
            pool.clone(),
            session_middleware::resolve_session,
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(CatchPanicLayer::new())
        // State
        .with_state(pool);

    // 6. Start de server (met fallback poort)
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("Kan host/port niet parsen");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!(
                "⚠️  Kon niet binden op {}: {}. Probeer fallback {}:{}",
                addr,
                e,
                host,
                port + 1
            );
            let fallback: SocketAddr = format!("{}:{}", host, port + 1)
                .parse()
                .expect("Kan fallback niet parsen");
            tokio::net::TcpListener::bind(fallback)
                .await
                .expect("Kan niet binden op fallback poort")
        }
    };

    let bound_addr = listener.local_addr().unwrap();
    println!("🚀 Server draait op http://{}", bound_addr);
    println!("📍 Ga naar http://{}/login om te beginnen", bound_addr);

    axum::serve(listener, app).await.unwrap();
}
