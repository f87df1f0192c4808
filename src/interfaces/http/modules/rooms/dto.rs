//! Room DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Room;

/// Request to register a new room
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRoomRequest {
    /// Display name (e.g. "Boardroom 3F")
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Maximum number of attendees
    #[validate(range(min = 1, max = 1000))]
    pub capacity: i32,
    /// Optional free-form location hint
    #[validate(length(max = 200))]
    pub location: Option<String>,
}

/// Room details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct RoomDto {
    pub id: i32,
    pub name: String,
    pub capacity: i32,
    pub location: Option<String>,
    pub is_active: bool,
    pub created_at: String,
}

impl From<Room> for RoomDto {
    fn from(room: Room) -> Self {
        Self {
            id: room.id,
            name: room.name,
            capacity: room.capacity,
            location: room.location,
            is_active: room.is_active,
            created_at: room.created_at.to_rfc3339(),
        }
    }
}
