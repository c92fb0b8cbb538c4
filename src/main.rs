//! Turnos Server - Multi-tenant appointment booking
//!
//! REST API server for provider schedules, slot availability and
//! reservation admission.

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

use turnos_server::{
    api,
    config::AppConfig,
    repository::Repository,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("turnos_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Turnos Server v{}", env!("CARGO_PKG_VERSION"));

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
    let services = Services::new(
        repository,
        config.booking.clone(),
        config.email.clone(),
        config.payments.clone(),
    );

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

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
        .route("/ready", get(api::health::readiness_check))
        // Public booking
        .route("/public/availability", get(api::public::availability))
        .route("/public/reservations", post(api::public::create_reservation))
        .route("/public/reservations/:code", get(api::public::reservation_by_code))
        .route("/public/:slug", get(api::public::booking_page))
        // Providers
        .route("/providers", get(api::providers::list_providers))
        .route("/providers", post(api::providers::create_provider))
        .route("/providers/:id", get(api::providers::get_provider))
        .route("/providers/:id", put(api::providers::update_provider))
        // Agendas
        .route("/providers/:id/agendas", get(api::agendas::list_agendas))
        .route("/providers/:id/agendas", post(api::agendas::create_agenda))
        .route("/providers/:id/agendas/:agenda_id", put(api::agendas::update_agenda))
        .route("/providers/:id/agendas/:agenda_id", delete(api::agendas::delete_agenda))
        // Services
        .route("/providers/:id/services", get(api::services::list_services))
        .route("/providers/:id/services", post(api::services::create_service))
        .route("/providers/:id/services/:service_id", put(api::services::update_service))
        .route("/providers/:id/services/:service_id", delete(api::services::delete_service))
        // Clients
        .route("/providers/:id/clients", get(api::clients::list_clients))
        .route("/providers/:id/clients", post(api::clients::create_client))
        .route("/providers/:id/clients/:client_id", get(api::clients::get_client))
        .route(
            "/providers/:id/clients/:client_id/toggle-block",
            post(api::clients::toggle_client_block),
        )
        // Reservations
        .route("/providers/:id/reservations", get(api::reservations::list_reservations))
        .route("/reservations/:id", get(api::reservations::get_reservation))
        .route("/reservations/:id/cancel", post(api::reservations::cancel_reservation))
        .route("/reservations/:id/confirm", post(api::reservations::confirm_reservation))
        .route("/reservations/:id/refund", post(api::reservations::refund_reservation))
        // Notifications
        .route("/providers/:id/notifications", get(api::notifications::list_notifications))
        .route("/notifications/:id/read", post(api::notifications::mark_read))
        // Stats
        .route("/providers/:id/stats", get(api::stats::get_dashboard))
        // Lifecycle jobs (external time-based trigger)
        .route("/jobs/reminders", post(api::jobs::send_reminders))
        .route("/jobs/no-show-sweep", post(api::jobs::no_show_sweep))
        .route("/jobs/purge-notifications", post(api::jobs::purge_notifications))
        .route("/jobs/daily-report", post(api::jobs::daily_report))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
