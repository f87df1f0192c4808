//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::booking::BookingService;
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::modules::metrics::MetricsState;
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::reservations::ReservationAppState;
use crate::interfaces::http::modules::rooms::RoomAppState;
use crate::interfaces::http::modules::{health, metrics, reservations, rooms};
use crate::notifications::SharedEventBus;

/// Unified state for all routes. Axum extracts the specific handler state
/// via `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub booking_service: Arc<BookingService>,
    pub event_bus: SharedEventBus,
    pub metrics_handle: PrometheusHandle,
}

impl FromRef<AppState> for RoomAppState {
    fn from_ref(s: &AppState) -> Self {
        RoomAppState {
            repos: Arc::clone(&s.repos),
            event_bus: s.event_bus.clone(),
        }
    }
}

impl FromRef<AppState> for ReservationAppState {
    fn from_ref(s: &AppState) -> Self {
        ReservationAppState {
            repos: Arc::clone(&s.repos),
            booking_service: Arc::clone(&s.booking_service),
        }
    }
}

impl FromRef<AppState> for MetricsState {
    fn from_ref(s: &AppState) -> Self {
        MetricsState {
            handle: s.metrics_handle.clone(),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Rooms
        rooms::handlers::create_room,
        rooms::handlers::list_rooms,
        rooms::handlers::get_room,
        rooms::handlers::deactivate_room,
        // Reservations
        reservations::handlers::create_reservation,
        reservations::handlers::list_reservations,
        reservations::handlers::get_reservation,
        reservations::handlers::confirm_reservation,
        reservations::handlers::cancel_reservation,
        reservations::handlers::reschedule_reservation,
    ),
    components(schemas(
        ApiResponse<rooms::dto::RoomDto>,
        ApiResponse<Vec<rooms::dto::RoomDto>>,
        ApiResponse<reservations::dto::ReservationDto>,
        ApiResponse<Vec<reservations::dto::ReservationDto>>,
        ApiResponse<health::handlers::HealthResponse>,
        rooms::dto::CreateRoomRequest,
        rooms::dto::RoomDto,
        reservations::dto::CreateReservationRequest,
        reservations::dto::RescheduleReservationRequest,
        reservations::dto::ReservationDto,
        health::handlers::HealthResponse,
    )),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Rooms", description = "Room management"),
        (name = "Reservations", description = "Reservation lifecycle")
    )
)]
struct ApiDoc;

/// Build the API router with all routes, middleware, and Swagger UI.
pub fn create_api_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/health", get(health::handlers::health_check))
        .route(
            "/api/v1/rooms",
            post(rooms::handlers::create_room).get(rooms::handlers::list_rooms),
        )
        .route("/api/v1/rooms/{room_id}", get(rooms::handlers::get_room))
        .route(
            "/api/v1/rooms/{room_id}/deactivate",
            post(rooms::handlers::deactivate_room),
        )
        .route(
            "/api/v1/reservations",
            post(reservations::handlers::create_reservation)
                .get(reservations::handlers::list_reservations),
        )
        .route(
            "/api/v1/reservations/{reservation_id}",
            get(reservations::handlers::get_reservation)
                .put(reservations::handlers::reschedule_reservation),
        )
        .route(
            "/api/v1/reservations/{reservation_id}/confirm",
            post(reservations::handlers::confirm_reservation),
        )
        .route(
            "/api/v1/reservations/{reservation_id}/cancel",
            post(reservations::handlers::cancel_reservation),
        )
        .route("/metrics", get(metrics::handlers::prometheus_metrics))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
