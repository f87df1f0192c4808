//! Reservation HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};

use crate::application::booking::{BookingError, BookingService, NewBooking};
use crate::domain::{RepositoryProvider, ReservationStatus};
use crate::interfaces::http::common::{ApiResponse, ValidatedJson};

use super::dto::*;

/// Application state for reservation handlers.
#[derive(Clone)]
pub struct ReservationAppState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub booking_service: Arc<BookingService>,
}

/// Map a booking failure onto a status code and response envelope.
///
/// Rule rejections carry their field and stable reason kind; transition
/// refusals carry the reason kind only.
fn booking_error_response<T>(e: BookingError) -> (StatusCode, Json<ApiResponse<T>>) {
    match e {
        BookingError::Rejected(rejection) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::rejection(
                rejection.field.as_str(),
                rejection.reason.kind(),
                rejection.reason.to_string(),
            )),
        ),
        BookingError::Transition(transition) => {
            let mut body = ApiResponse::error(transition.to_string());
            body.reason = Some(transition.kind().to_string());
            (StatusCode::CONFLICT, Json(body))
        }
        BookingError::ReservationNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Reservation {} not found", id))),
        ),
        BookingError::Storage(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        ),
    }
}

fn parse_timestamp<T>(
    raw: &str,
    label: &str,
) -> Result<DateTime<Utc>, (StatusCode, Json<ApiResponse<T>>)> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(format!("Invalid {}: {}", label, e))),
            )
        })
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    tag = "Reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 200, description = "Pending reservation created", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Malformed timestamps"),
        (status = 422, description = "Booking rule rejection, with field attribution")
    )
)]
pub async fn create_reservation(
    State(state): State<ReservationAppState>,
    ValidatedJson(request): ValidatedJson<CreateReservationRequest>,
) -> Result<Json<ApiResponse<ReservationDto>>, (StatusCode, Json<ApiResponse<ReservationDto>>)> {
    let start_time = parse_timestamp(&request.start_time, "start_time")?;
    let end_time = parse_timestamp(&request.end_time, "end_time")?;

    let reservation = state
        .booking_service
        .create(NewBooking {
            room_id: request.room_id,
            booked_by: request.booked_by,
            start_time,
            end_time,
            attendees: request.attendees,
        })
        .await
        .map_err(booking_error_response)?;

    Ok(Json(ApiResponse::success(reservation.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    tag = "Reservations",
    params(ListReservationsQuery),
    responses(
        (status = 200, description = "Reservations", body = ApiResponse<Vec<ReservationDto>>),
        (status = 400, description = "Unknown status filter")
    )
)]
pub async fn list_reservations(
    State(state): State<ReservationAppState>,
    Query(query): Query<ListReservationsQuery>,
) -> Result<
    Json<ApiResponse<Vec<ReservationDto>>>,
    (StatusCode, Json<ApiResponse<Vec<ReservationDto>>>),
> {
    let status = match query.status.as_deref() {
        None => None,
        Some(raw) => match ReservationStatus::parse(raw) {
            Some(status) => Some(status),
            None => {
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::error(format!("Unknown status '{}'", raw))),
                ));
            }
        },
    };

    let reservations = match query.room_id {
        Some(room_id) => state
            .repos
            .reservations()
            .find_for_room(room_id, status)
            .await,
        None => state.repos.reservations().find_all().await.map(|all| {
            all.into_iter()
                .filter(|r| status.map_or(true, |s| r.status() == s))
                .collect()
        }),
    }
    .map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;

    Ok(Json(ApiResponse::success(
        reservations.into_iter().map(ReservationDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations/{reservation_id}",
    tag = "Reservations",
    params(("reservation_id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation details", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_reservation(
    State(state): State<ReservationAppState>,
    Path(reservation_id): Path<i32>,
) -> Result<Json<ApiResponse<ReservationDto>>, (StatusCode, Json<ApiResponse<ReservationDto>>)> {
    let reservation = state
        .repos
        .reservations()
        .find_by_id(reservation_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(e.to_string())),
            )
        })?;

    let Some(reservation) = reservation else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!(
                "Reservation {} not found",
                reservation_id
            ))),
        ));
    };

    Ok(Json(ApiResponse::success(reservation.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations/{reservation_id}/confirm",
    tag = "Reservations",
    params(("reservation_id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation confirmed", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Slot taken or illegal transition")
    )
)]
pub async fn confirm_reservation(
    State(state): State<ReservationAppState>,
    Path(reservation_id): Path<i32>,
) -> Result<Json<ApiResponse<ReservationDto>>, (StatusCode, Json<ApiResponse<ReservationDto>>)> {
    let reservation = state
        .booking_service
        .confirm(reservation_id)
        .await
        .map_err(booking_error_response)?;

    Ok(Json(ApiResponse::success(reservation.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations/{reservation_id}/cancel",
    tag = "Reservations",
    params(("reservation_id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation cancelled", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Already cancelled")
    )
)]
pub async fn cancel_reservation(
    State(state): State<ReservationAppState>,
    Path(reservation_id): Path<i32>,
) -> Result<Json<ApiResponse<ReservationDto>>, (StatusCode, Json<ApiResponse<ReservationDto>>)> {
    let reservation = state
        .booking_service
        .cancel(reservation_id)
        .await
        .map_err(booking_error_response)?;

    Ok(Json(ApiResponse::success(reservation.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/reservations/{reservation_id}",
    tag = "Reservations",
    params(("reservation_id" = i32, Path, description = "Reservation ID")),
    request_body = RescheduleReservationRequest,
    responses(
        (status = 200, description = "Reservation rescheduled", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Not pending"),
        (status = 422, description = "Booking rule rejection, with field attribution")
    )
)]
pub async fn reschedule_reservation(
    State(state): State<ReservationAppState>,
    Path(reservation_id): Path<i32>,
    ValidatedJson(request): ValidatedJson<RescheduleReservationRequest>,
) -> Result<Json<ApiResponse<ReservationDto>>, (StatusCode, Json<ApiResponse<ReservationDto>>)> {
    let start_time = parse_timestamp(&request.start_time, "start_time")?;
    let end_time = parse_timestamp(&request.end_time, "end_time")?;

    let reservation = state
        .booking_service
        .reschedule(reservation_id, start_time, end_time, request.attendees)
        .await
        .map_err(booking_error_response)?;

    Ok(Json(ApiResponse::success(reservation.into())))
}
