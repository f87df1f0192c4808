//! Room domain entity

use chrono::{DateTime, Utc};

/// A bookable conference room.
///
/// Rooms are created and deactivated through the rooms API; the scheduling
/// engine only ever reads them. Deactivating a room stops new reservations
/// from being accepted, but reservations already referencing it are kept
/// for history.
#[derive(Debug, Clone)]
pub struct Room {
    /// Unique identifier
    pub id: i32,
    /// Display name (e.g. "Boardroom 3F")
    pub name: String,
    /// Maximum number of attendees
    pub capacity: i32,
    /// Optional free-form location hint
    pub location: Option<String>,
    /// Inactive rooms accept no new reservations
    pub is_active: bool,
    /// When the room was registered
    pub created_at: DateTime<Utc>,
}

impl Room {
    pub fn new(
        id: i32,
        name: impl Into<String>,
        capacity: i32,
        location: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            capacity,
            location,
            is_active: true,
            created_at,
        }
    }

    /// Take this room out of service.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_room_is_active() {
        let room = Room::new(1, "Boardroom 3F", 10, None, Utc::now());
        assert!(room.is_active);
        assert_eq!(room.capacity, 10);
        assert_eq!(room.name, "Boardroom 3F");
    }

    #[test]
    fn deactivate_clears_active_flag() {
        let mut room = Room::new(2, "Huddle A", 4, Some("2nd floor".into()), Utc::now());
        room.deactivate();
        assert!(!room.is_active);
        assert_eq!(room.location.as_deref(), Some("2nd floor"));
    }
}
