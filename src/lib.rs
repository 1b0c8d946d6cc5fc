//! Portfolio Site - library for app logic and testing

pub mod auth;
pub mod config;
pub mod db;
pub mod filter;
pub mod logging;
pub mod navigation;
pub mod routes;
pub mod shell;
pub mod state;
pub mod stats;
pub mod views;

use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{get, patch, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer,
};

use crate::config::Config;
use crate::logging::LogConfig;
use crate::state::AppState;

/// Configure CORS from the configured origin list.
/// Falls back to the local frontend dev server when the list is empty.
pub fn configure_cors(allowed_origins: &[String]) -> CorsLayer {
    let mut origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring unparsable CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        origins = vec![
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
        ];
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
        ])
        .allow_credentials(true)
}

/// Create and configure the application router.
pub fn create_app(state: AppState, allowed_origins: &[String]) -> Router {
    let cors = configure_cors(allowed_origins);
    tracing::info!(origins = allowed_origins.len(), "CORS configured");

    Router::new()
        .route("/api/pages/{name}", get(routes::pages::get_page))
        .route("/api/navigate", post(routes::navigation::navigate))
        .route("/api/blogs", get(routes::blogs::list_blogs))
        .route("/api/blogs/{slug}", get(routes::blogs::get_blog))
        .route("/api/projects", get(routes::projects::list_projects))
        .route("/api/journals", get(routes::journals::list_journals))
        .route("/api/contact", post(routes::contact::submit_contact))
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/auth/logout", post(routes::auth::logout))
        .route("/api/admin/dashboard", get(routes::admin::dashboard))
        .route("/api/admin/messages", get(routes::admin::list_messages))
        .route(
            "/api/admin/messages/{id}/read",
            patch(routes::admin::mark_message_read),
        )
        .route("/api/admin/blogs", post(routes::admin::create_blog))
        .route("/api/admin/projects", post(routes::admin::create_project))
        .route("/api/admin/journals", post(routes::admin::create_journal))
        .route("/health", get(routes::health::health_ping))
        .route("/health/detailed", get(routes::health::health_detailed))
        .route("/health/ready", get(routes::health::health_ready))
        .with_state(state)
        .layer(logging::middleware::propagate_request_id_layer())
        .layer(middleware::from_fn(logging::middleware::log_request))
        .layer(logging::middleware::request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        // Global 2 MB request body cap
        .layer(RequestBodyLimitLayer::new(2 * 1024 * 1024))
        .layer(cors)
}

/// Run the server (used by main).
pub async fn run() {
    dotenvy::dotenv().ok();

    // Dropping the guards stops the background log writers.
    let _log_guards = logging::init(&LogConfig::from_env());

    routes::health::init_start_time();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };
    tracing::info!(
        environment = %config.environment,
        upstream = %config.supabase_url,
        "configuration loaded"
    );

    let addr = match config.bind_addr() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!(error = %e, "invalid bind address");
            std::process::exit(1);
        }
    };

    let app = create_app(AppState::from_config(&config), &config.allowed_origins);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server error");
}
