//! Reservation DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::Reservation;

/// Request to create a new reservation
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservationRequest {
    /// Room to book
    pub room_id: i32,
    /// Who the room is booked for
    #[validate(length(min = 1, max = 100))]
    pub booked_by: String,
    /// Interval start (ISO 8601)
    pub start_time: String,
    /// Interval end, exclusive (ISO 8601)
    pub end_time: String,
    /// Requested headcount
    pub attendees: i32,
}

/// Request to move a pending reservation
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RescheduleReservationRequest {
    /// New interval start (ISO 8601)
    pub start_time: String,
    /// New interval end, exclusive (ISO 8601)
    pub end_time: String,
    /// New headcount
    pub attendees: i32,
}

/// List filter parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListReservationsQuery {
    /// Only reservations for this room
    pub room_id: Option<i32>,
    /// Only reservations in this status (Pending, Confirmed, Cancelled)
    pub status: Option<String>,
}

/// Reservation details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationDto {
    pub id: i32,
    pub room_id: i32,
    pub booked_by: String,
    pub start_time: String,
    pub end_time: String,
    pub attendees: i32,
    pub status: String,
    pub created_at: String,
    pub cancelled_at: Option<String>,
}

impl From<Reservation> for ReservationDto {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            room_id: r.room_id,
            booked_by: r.booked_by.clone(),
            start_time: r.start_time.to_rfc3339(),
            end_time: r.end_time.to_rfc3339(),
            attendees: r.attendees,
            status: r.status().as_str().to_string(),
            created_at: r.created_at.to_rfc3339(),
            cancelled_at: r.cancelled_at().map(|t| t.to_rfc3339()),
        }
    }
}
