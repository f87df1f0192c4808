//! Notification events
//!
//! Defines the reservation lifecycle events broadcast to subscribers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event types for notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    /// A new pending reservation was created
    ReservationRequested(ReservationEvent),
    /// A pending reservation was confirmed
    ReservationConfirmed(ReservationEvent),
    /// A reservation was cancelled
    ReservationCancelled(ReservationEvent),
    /// A reservation was moved to a new time slot
    ReservationRescheduled(ReservationEvent),
    /// A room was taken out of service
    RoomDeactivated(RoomDeactivatedEvent),
}

impl Event {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::ReservationRequested(_) => "reservation_requested",
            Event::ReservationConfirmed(_) => "reservation_confirmed",
            Event::ReservationCancelled(_) => "reservation_cancelled",
            Event::ReservationRescheduled(_) => "reservation_rescheduled",
            Event::RoomDeactivated(_) => "room_deactivated",
        }
    }

    /// Get the room the event concerns
    pub fn room_id(&self) -> i32 {
        match self {
            Event::ReservationRequested(e)
            | Event::ReservationConfirmed(e)
            | Event::ReservationCancelled(e)
            | Event::ReservationRescheduled(e) => e.room_id,
            Event::RoomDeactivated(e) => e.room_id,
        }
    }
}

/// Reservation lifecycle event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationEvent {
    pub reservation_id: i32,
    pub room_id: i32,
    pub booked_by: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Room deactivation event payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDeactivatedEvent {
    pub room_id: i32,
    pub name: String,
}

/// An event with its publication timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMessage {
    pub event: Event,
    pub timestamp: DateTime<Utc>,
}

impl EventMessage {
    pub fn new(event: Event) -> Self {
        Self {
            event,
            timestamp: Utc::now(),
        }
    }
}
