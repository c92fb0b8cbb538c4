//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    agendas, clients, health, jobs, notifications, providers, public, reservations, services,
    stats,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Turnos API",
        version = "0.9.0",
        description = "Multi-tenant appointment booking REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Public booking
        public::booking_page,
        public::availability,
        public::create_reservation,
        public::reservation_by_code,
        // Providers
        providers::list_providers,
        providers::create_provider,
        providers::get_provider,
        providers::update_provider,
        // Agendas
        agendas::list_agendas,
        agendas::create_agenda,
        agendas::update_agenda,
        agendas::delete_agenda,
        // Services
        services::list_services,
        services::create_service,
        services::update_service,
        services::delete_service,
        // Clients
        clients::list_clients,
        clients::create_client,
        clients::get_client,
        clients::toggle_client_block,
        // Reservations
        reservations::list_reservations,
        reservations::get_reservation,
        reservations::cancel_reservation,
        reservations::confirm_reservation,
        reservations::refund_reservation,
        // Notifications
        notifications::list_notifications,
        notifications::mark_read,
        // Stats
        stats::get_dashboard,
        // Jobs
        jobs::send_reminders,
        jobs::no_show_sweep,
        jobs::purge_notifications,
        jobs::daily_report,
    ),
    components(
        schemas(
            // Providers
            crate::models::provider::Provider,
            crate::models::provider::ProviderPublic,
            crate::models::provider::CreateProvider,
            crate::models::provider::UpdateProvider,
            // Agendas
            crate::models::agenda::Agenda,
            crate::models::agenda::CreateAgenda,
            crate::models::agenda::UpdateAgenda,
            // Services
            crate::models::service::Service,
            crate::models::service::CreateService,
            crate::models::service::UpdateService,
            // Clients
            crate::models::client::Client,
            crate::models::client::CreateClient,
            crate::models::client::ClientDetails,
            // Reservations
            crate::models::reservation::Reservation,
            crate::models::reservation::ReservationDetails,
            crate::models::reservation::CancelReservation,
            crate::models::reservation::ConfirmReservation,
            crate::models::enums::ReservationStatus,
            crate::models::enums::PaymentStatus,
            // Notifications
            crate::models::notification::Notification,
            crate::models::enums::NotificationType,
            // Public booking
            public::CreateReservationRequest,
            crate::services::booking::BookingOutcome,
            crate::services::payments::PaymentPreference,
            crate::services::directory::BookingPage,
            // Stats
            crate::services::stats::DashboardStats,
            // Jobs
            jobs::JobResult,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "public", description = "Public booking endpoints"),
        (name = "providers", description = "Provider management"),
        (name = "agendas", description = "Agenda management"),
        (name = "services", description = "Service management"),
        (name = "clients", description = "Client management"),
        (name = "reservations", description = "Reservation management"),
        (name = "notifications", description = "Provider notifications"),
        (name = "stats", description = "Dashboard statistics"),
        (name = "jobs", description = "Lifecycle job triggers")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
