//! Room HTTP handlers
//!
//! Rooms are managed here, outside the scheduling engine: the engine only
//! ever reads them through the repository.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;

use crate::domain::{RepositoryProvider, Room};
use crate::interfaces::http::common::{ApiResponse, ValidatedJson};
use crate::notifications::{Event, RoomDeactivatedEvent, SharedEventBus};

use super::dto::*;

/// Application state for room handlers.
#[derive(Clone)]
pub struct RoomAppState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub event_bus: SharedEventBus,
}

#[utoipa::path(
    post,
    path = "/api/v1/rooms",
    tag = "Rooms",
    request_body = CreateRoomRequest,
    responses(
        (status = 200, description = "Room created", body = ApiResponse<RoomDto>),
        (status = 422, description = "Invalid request body")
    )
)]
pub async fn create_room(
    State(state): State<RoomAppState>,
    ValidatedJson(request): ValidatedJson<CreateRoomRequest>,
) -> Result<Json<ApiResponse<RoomDto>>, (StatusCode, Json<ApiResponse<RoomDto>>)> {
    let id = state.repos.rooms().next_id().await;
    let room = Room::new(id, request.name, request.capacity, request.location, Utc::now());

    if let Err(e) = state.repos.rooms().save(room.clone()).await {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        ));
    }

    Ok(Json(ApiResponse::success(room.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms",
    tag = "Rooms",
    responses(
        (status = 200, description = "All rooms", body = ApiResponse<Vec<RoomDto>>)
    )
)]
pub async fn list_rooms(
    State(state): State<RoomAppState>,
) -> Result<Json<ApiResponse<Vec<RoomDto>>>, (StatusCode, Json<ApiResponse<Vec<RoomDto>>>)> {
    let rooms = state.repos.rooms().find_all().await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;

    Ok(Json(ApiResponse::success(
        rooms.into_iter().map(RoomDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms/{room_id}",
    tag = "Rooms",
    params(("room_id" = i32, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room details", body = ApiResponse<RoomDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_room(
    State(state): State<RoomAppState>,
    Path(room_id): Path<i32>,
) -> Result<Json<ApiResponse<RoomDto>>, (StatusCode, Json<ApiResponse<RoomDto>>)> {
    let room = state.repos.rooms().find_by_id(room_id).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;

    let Some(room) = room else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Room {} not found", room_id))),
        ));
    };

    Ok(Json(ApiResponse::success(room.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/rooms/{room_id}/deactivate",
    tag = "Rooms",
    params(("room_id" = i32, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room deactivated", body = ApiResponse<RoomDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn deactivate_room(
    State(state): State<RoomAppState>,
    Path(room_id): Path<i32>,
) -> Result<Json<ApiResponse<RoomDto>>, (StatusCode, Json<ApiResponse<RoomDto>>)> {
    let room = state.repos.rooms().find_by_id(room_id).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        )
    })?;

    let Some(mut room) = room else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("Room {} not found", room_id))),
        ));
    };

    room.deactivate();
    if let Err(e) = state.repos.rooms().update(room.clone()).await {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::error(e.to_string())),
        ));
    }

    state.event_bus.publish(Event::RoomDeactivated(RoomDeactivatedEvent {
        room_id: room.id,
        name: room.name.clone(),
    }));

    Ok(Json(ApiResponse::success(room.into())))
}
