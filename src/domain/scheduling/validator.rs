//! Booking validation rule chain
//!
//! `validate_booking` decides whether a proposed reservation may be created.
//! It is a pure function over caller-supplied data: the room record and the
//! confirmed-slot snapshot are inputs, never fetched here. Rules run in a
//! fixed order and the first failure wins, so every rejection attributes to
//! exactly one field.

use thiserror::Error;

use super::business_hours::BusinessHours;
use super::slot::TimeSlot;
use crate::domain::room::Room;

/// Which request field a rejection attributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectField {
    StartDate,
    EndDate,
    StartTime,
    RoomId,
    Capacity,
}

impl RejectField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StartDate => "StartDate",
            Self::EndDate => "EndDate",
            Self::StartTime => "StartTime",
            Self::RoomId => "RoomId",
            Self::Capacity => "Capacity",
        }
    }
}

impl std::fmt::Display for RejectField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a booking was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("start time must be before end time")]
    StartNotBeforeEnd,

    #[error("bookings must start and end on the same day")]
    MultiDaySpan,

    #[error("start time is outside business hours ({hours})")]
    StartOutsideHours { hours: BusinessHours },

    #[error("end time is outside business hours ({hours})")]
    EndOutsideHours { hours: BusinessHours },

    #[error("room does not exist")]
    RoomNotFound,

    #[error("room is not currently available")]
    RoomUnavailable,

    #[error("requested capacity must be at least 1")]
    CapacityTooSmall,

    #[error("requested capacity exceeds room capacity ({room_capacity})")]
    CapacityExceeded { room_capacity: i32 },

    #[error("room is already booked during the requested time")]
    SlotConflict,
}

impl RejectReason {
    /// Stable machine-readable kind. Clients branch on this, not on the
    /// English wording.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::StartNotBeforeEnd => "start_not_before_end",
            Self::MultiDaySpan => "multi_day_span",
            Self::StartOutsideHours { .. } => "start_outside_hours",
            Self::EndOutsideHours { .. } => "end_outside_hours",
            Self::RoomNotFound => "room_not_found",
            Self::RoomUnavailable => "room_unavailable",
            Self::CapacityTooSmall => "capacity_too_small",
            Self::CapacityExceeded { .. } => "capacity_exceeded",
            Self::SlotConflict => "slot_conflict",
        }
    }
}

/// A refused booking: one field, one reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct Rejection {
    pub field: RejectField,
    pub reason: RejectReason,
}

impl Rejection {
    fn new(field: RejectField, reason: RejectReason) -> Self {
        Self { field, reason }
    }
}

/// Whether the validation runs for a brand-new booking or for rescheduling
/// an existing one. Only the field attribution of a conflict differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingIntent {
    Create,
    Reschedule,
}

impl BookingIntent {
    fn conflict_field(self) -> RejectField {
        match self {
            Self::Create => RejectField::StartDate,
            Self::Reschedule => RejectField::StartTime,
        }
    }
}

/// A proposed booking, before validation.
#[derive(Debug, Clone, Copy)]
pub struct BookingRequest {
    pub room_id: i32,
    pub slot: TimeSlot,
    pub attendees: i32,
}

/// A booking that passed every rule, with the resolved room attached.
/// Callers persist a `Pending` reservation from this.
#[derive(Debug, Clone)]
pub struct AcceptedBooking {
    pub room: Room,
    pub slot: TimeSlot,
    pub attendees: i32,
}

/// Run the full rule chain over a proposed booking.
///
/// `room` is the lookup result for `request.room_id` (`None` when the room
/// does not exist). `confirmed` is the snapshot of confirmed slots on that
/// room; when rescheduling, the caller must have excluded the reservation's
/// own slot from it.
///
/// Rule order, first failure wins:
/// 1. interval ordering          → StartDate
/// 2. single-day span            → StartDate
/// 3. business hours, start      → StartDate
/// 4. business hours, end        → EndDate
/// 5. room exists and is active  → RoomId
/// 6. capacity bounds            → Capacity
/// 7. confirmed-slot conflict    → StartDate (create) / StartTime (reschedule)
pub fn validate_booking(
    request: &BookingRequest,
    room: Option<&Room>,
    confirmed: &[TimeSlot],
    hours: BusinessHours,
    intent: BookingIntent,
) -> Result<AcceptedBooking, Rejection> {
    let slot = request.slot;

    if !slot.is_ordered() {
        return Err(Rejection::new(
            RejectField::StartDate,
            RejectReason::StartNotBeforeEnd,
        ));
    }

    if !slot.is_same_day() {
        return Err(Rejection::new(
            RejectField::StartDate,
            RejectReason::MultiDaySpan,
        ));
    }

    if !hours.admits_start(slot.start) {
        return Err(Rejection::new(
            RejectField::StartDate,
            RejectReason::StartOutsideHours { hours },
        ));
    }

    if !hours.admits_end(slot.end) {
        return Err(Rejection::new(
            RejectField::EndDate,
            RejectReason::EndOutsideHours { hours },
        ));
    }

    let room = match room {
        None => {
            return Err(Rejection::new(RejectField::RoomId, RejectReason::RoomNotFound));
        }
        Some(room) if !room.is_active => {
            return Err(Rejection::new(
                RejectField::RoomId,
                RejectReason::RoomUnavailable,
            ));
        }
        Some(room) => room,
    };

    if request.attendees < 1 {
        return Err(Rejection::new(
            RejectField::Capacity,
            RejectReason::CapacityTooSmall,
        ));
    }
    if request.attendees > room.capacity {
        return Err(Rejection::new(
            RejectField::Capacity,
            RejectReason::CapacityExceeded {
                room_capacity: room.capacity,
            },
        ));
    }

    if confirmed.iter().any(|held| held.overlaps(&slot)) {
        return Err(Rejection::new(
            intent.conflict_field(),
            RejectReason::SlotConflict,
        ));
    }

    Ok(AcceptedBooking {
        room: room.clone(),
        slot,
        attendees: request.attendees,
    })
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn slot_on(day: u32, start_h: u32, start_m: u32, end_h: u32, end_m: u32) -> TimeSlot {
        TimeSlot::new(
            Utc.with_ymd_and_hms(2026, 3, day, start_h, start_m, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, day, end_h, end_m, 0).unwrap(),
        )
    }

    fn slot(start_h: u32, end_h: u32) -> TimeSlot {
        slot_on(5, start_h, 0, end_h, 0)
    }

    fn room() -> Room {
        Room::new(1, "Boardroom 3F", 10, None, Utc::now())
    }

    fn request(slot: TimeSlot, attendees: i32) -> BookingRequest {
        BookingRequest {
            room_id: 1,
            slot,
            attendees,
        }
    }

    fn validate(
        req: &BookingRequest,
        room: Option<&Room>,
        confirmed: &[TimeSlot],
    ) -> Result<AcceptedBooking, Rejection> {
        validate_booking(
            req,
            room,
            confirmed,
            BusinessHours::default(),
            BookingIntent::Create,
        )
    }

    #[test]
    fn valid_booking_is_accepted() {
        let room = room();
        let accepted = validate(&request(slot(9, 11), 4), Some(&room), &[]).unwrap();
        assert_eq!(accepted.room.id, 1);
        assert_eq!(accepted.attendees, 4);
        assert_eq!(accepted.slot, slot(9, 11));
    }

    #[test]
    fn start_after_end_rejected_on_start_date() {
        let room = room();
        let backwards = TimeSlot::new(slot(9, 11).end, slot(9, 11).start);
        let rejection = validate(&request(backwards, 4), Some(&room), &[]).unwrap_err();
        assert_eq!(rejection.field, RejectField::StartDate);
        assert_eq!(rejection.reason, RejectReason::StartNotBeforeEnd);
    }

    #[test]
    fn multi_day_span_rejected() {
        let room = room();
        let overnight = TimeSlot::new(
            Utc.with_ymd_and_hms(2026, 3, 5, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 6, 9, 0, 0).unwrap(),
        );
        let rejection = validate(&request(overnight, 4), Some(&room), &[]).unwrap_err();
        assert_eq!(rejection.field, RejectField::StartDate);
        assert_eq!(rejection.reason, RejectReason::MultiDaySpan);
    }

    #[test]
    fn early_start_rejected_on_start_date() {
        let room = room();
        let rejection = validate(&request(slot(7, 9), 4), Some(&room), &[]).unwrap_err();
        assert_eq!(rejection.field, RejectField::StartDate);
        assert_eq!(rejection.reason.kind(), "start_outside_hours");
    }

    #[test]
    fn late_end_rejected_on_end_date() {
        let room = room();
        let rejection =
            validate(&request(slot_on(5, 15, 0, 16, 30), 4), Some(&room), &[]).unwrap_err();
        assert_eq!(rejection.field, RejectField::EndDate);
        assert_eq!(rejection.reason.kind(), "end_outside_hours");
    }

    #[test]
    fn end_exactly_at_closing_is_accepted() {
        let room = room();
        assert!(validate(&request(slot(15, 16), 4), Some(&room), &[]).is_ok());
    }

    #[test]
    fn missing_room_rejected() {
        let rejection = validate(&request(slot(9, 11), 4), None, &[]).unwrap_err();
        assert_eq!(rejection.field, RejectField::RoomId);
        assert_eq!(rejection.reason, RejectReason::RoomNotFound);
    }

    #[test]
    fn inactive_room_rejected_with_distinct_reason() {
        let mut room = room();
        room.deactivate();
        let rejection = validate(&request(slot(9, 11), 4), Some(&room), &[]).unwrap_err();
        assert_eq!(rejection.field, RejectField::RoomId);
        assert_eq!(rejection.reason, RejectReason::RoomUnavailable);
    }

    #[test]
    fn zero_attendees_rejected() {
        let room = room();
        let rejection = validate(&request(slot(9, 11), 0), Some(&room), &[]).unwrap_err();
        assert_eq!(rejection.field, RejectField::Capacity);
        assert_eq!(rejection.reason, RejectReason::CapacityTooSmall);
    }

    #[test]
    fn over_capacity_rejected() {
        let room = room();
        let rejection = validate(&request(slot(9, 11), 11), Some(&room), &[]).unwrap_err();
        assert_eq!(rejection.field, RejectField::Capacity);
        assert_eq!(
            rejection.reason,
            RejectReason::CapacityExceeded { room_capacity: 10 }
        );
    }

    #[test]
    fn attendees_at_capacity_accepted() {
        let room = room();
        assert!(validate(&request(slot(9, 11), 10), Some(&room), &[]).is_ok());
    }

    #[test]
    fn confirmed_overlap_rejected_on_start_date_for_create() {
        let room = room();
        let rejection =
            validate(&request(slot(9, 11), 4), Some(&room), &[slot(10, 12)]).unwrap_err();
        assert_eq!(rejection.field, RejectField::StartDate);
        assert_eq!(rejection.reason, RejectReason::SlotConflict);
    }

    #[test]
    fn confirmed_overlap_rejected_on_start_time_for_reschedule() {
        let room = room();
        let rejection = validate_booking(
            &request(slot(9, 11), 4),
            Some(&room),
            &[slot(10, 12)],
            BusinessHours::default(),
            BookingIntent::Reschedule,
        )
        .unwrap_err();
        assert_eq!(rejection.field, RejectField::StartTime);
        assert_eq!(rejection.reason, RejectReason::SlotConflict);
    }

    #[test]
    fn adjacent_confirmed_slot_is_not_a_conflict() {
        let room = room();
        assert!(validate(&request(slot(9, 11), 4), Some(&room), &[slot(11, 13)]).is_ok());
    }

    #[test]
    fn rule_order_interval_beats_capacity() {
        // both the interval and the capacity are bad; the interval rule
        // runs first, so the rejection attributes to StartDate
        let room = room();
        let backwards = TimeSlot::new(slot(9, 11).end, slot(9, 11).start);
        let rejection = validate(&request(backwards, 99), Some(&room), &[]).unwrap_err();
        assert_eq!(rejection.field, RejectField::StartDate);
        assert_eq!(rejection.reason, RejectReason::StartNotBeforeEnd);
    }

    #[test]
    fn rule_order_hours_beat_room_lookup() {
        let rejection = validate(&request(slot(7, 9), 4), None, &[]).unwrap_err();
        assert_eq!(rejection.reason.kind(), "start_outside_hours");
    }

    #[test]
    fn validation_is_idempotent() {
        let room = room();
        let req = request(slot(9, 11), 4);
        let held = [slot(10, 12)];
        let first = validate(&req, Some(&room), &held).unwrap_err();
        let second = validate(&req, Some(&room), &held).unwrap_err();
        assert_eq!(first, second);
    }

    #[test]
    fn pending_holds_are_invisible() {
        // the snapshot only ever contains confirmed slots, so any number of
        // identical requests validate cleanly against an empty snapshot
        let room = room();
        for _ in 0..5 {
            assert!(validate(&request(slot(9, 11), 4), Some(&room), &[]).is_ok());
        }
    }

    #[test]
    fn rejection_message_carries_field() {
        let rejection = Rejection::new(RejectField::Capacity, RejectReason::CapacityTooSmall);
        assert_eq!(
            rejection.to_string(),
            "Capacity: requested capacity must be at least 1"
        );
    }
}
