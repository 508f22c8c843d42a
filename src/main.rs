//! Pumptrack Server - Vacuum Pump Maintenance Tracker
//!
//! A Rust REST API server for weekly vacuum-pump maintenance tracking.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pumptrack_server::{
    api, config::AppConfig, repository::Repository, services::Services, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "pumptrack_server={},tower_http=debug",
            config.logging.level
        )
        .into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Pumptrack Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository, config.backup.clone());

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(server_host.parse().expect("Invalid host address"), server_port);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/status", get(api::health::status_check))
        // Equipment registry
        .route("/equipment", get(api::equipment::list_equipment))
        .route("/equipment", post(api::equipment::create_equipment))
        .route("/equipment/next-id", get(api::equipment::next_equipment_id))
        .route(
            "/equipment/delete-batch",
            post(api::equipment::delete_equipment_batch),
        )
        .route(
            "/equipment/options/:field",
            get(api::equipment::equipment_options),
        )
        .route("/equipment/:id", get(api::equipment::get_equipment))
        .route("/equipment/:id", put(api::equipment::update_equipment))
        .route("/equipment/:id", delete(api::equipment::delete_equipment))
        .route(
            "/equipment/:id/logs",
            get(api::equipment::list_equipment_logs),
        )
        // Maintenance logs
        .route("/logs", get(api::logs::list_logs))
        .route("/logs/work-weeks", get(api::logs::list_work_weeks))
        .route("/logs/service-options", get(api::logs::list_service_options))
        .route("/logs/:id", get(api::logs::get_log))
        .route("/logs/:id", put(api::logs::update_log))
        .route("/logs/:id", delete(api::logs::delete_log))
        // Weekly checklist
        .route("/weekly-log", get(api::logs::get_current_weekly_log))
        .route("/weekly-log/:work_week", get(api::logs::get_weekly_log))
        .route("/weekly-log/:work_week", put(api::logs::save_weekly_log))
        .route(
            "/weekly-log/:work_week/equipment/:id",
            put(api::logs::save_equipment_log),
        )
        // Analytics
        .route("/dashboard", get(api::analytics::get_dashboard))
        .route("/charts", get(api::analytics::get_charts))
        .route("/hall-of-fame", get(api::analytics::get_hall_of_fame))
        // Backup
        .route("/backup", post(api::backup::create_backup))
        .route("/restore", post(api::backup::restore_backup))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
