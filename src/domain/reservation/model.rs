//! Reservation domain entity and status state machine
//!
//! Status changes go through `Reservation::confirm` / `Reservation::cancel`
//! exclusively — the `status` field is module-private and there is no setter,
//! so the transition table in `validate_transition` cannot be bypassed.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::scheduling::TimeSlot;

/// Reservation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    /// Requested but not yet committed; does not block the room
    Pending,
    /// Committed; the only status that participates in conflict checks
    Confirmed,
    /// Terminal; no further transitions
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Parse a stored status string. Returns `None` for unknown values so
    /// storage layers surface corruption instead of guessing.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(Self::Pending),
            "Confirmed" => Some(Self::Confirmed),
            "Cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a status transition was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("reservation is already {0}")]
    AlreadyInStatus(ReservationStatus),

    #[error("cannot revert a confirmed reservation to pending")]
    ConfirmedToPending,

    #[error("cannot change status of a cancelled reservation")]
    CancelledIsTerminal,

    #[error("cannot confirm: room is not available during the requested time")]
    SlotTaken,
}

impl TransitionError {
    /// Stable machine-readable kind, independent of the display wording.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AlreadyInStatus(_) => "already_in_status",
            Self::ConfirmedToPending => "confirmed_to_pending",
            Self::CancelledIsTerminal => "cancelled_terminal",
            Self::SlotTaken => "slot_taken",
        }
    }
}

/// The status transition table.
///
/// The terminal rule outranks the no-op rule: cancelling an already
/// cancelled reservation reports the terminal reason, not "already in
/// that status".
pub fn validate_transition(
    from: ReservationStatus,
    to: ReservationStatus,
) -> Result<(), TransitionError> {
    use ReservationStatus::*;

    match (from, to) {
        (Cancelled, _) => Err(TransitionError::CancelledIsTerminal),
        (Pending, Pending) | (Confirmed, Confirmed) => {
            Err(TransitionError::AlreadyInStatus(from))
        }
        (Confirmed, Pending) => Err(TransitionError::ConfirmedToPending),
        (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Cancelled) => Ok(()),
    }
}

/// A booking of one room over a half-open time interval.
#[derive(Debug, Clone)]
pub struct Reservation {
    /// Unique reservation ID
    pub id: i32,
    /// Room this reservation is against
    pub room_id: i32,
    /// Who the room is booked for (opaque to the engine)
    pub booked_by: String,
    /// Start of the reserved interval (inclusive)
    pub start_time: DateTime<Utc>,
    /// End of the reserved interval (exclusive)
    pub end_time: DateTime<Utc>,
    /// Requested headcount
    pub attendees: i32,
    /// When the reservation was created
    pub created_at: DateTime<Utc>,

    status: ReservationStatus,
    cancelled_at: Option<DateTime<Utc>>,
}

impl Reservation {
    /// Create a fresh `Pending` reservation from validated parameters.
    pub fn pending(
        id: i32,
        room_id: i32,
        booked_by: impl Into<String>,
        slot: TimeSlot,
        attendees: i32,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            room_id,
            booked_by: booked_by.into(),
            start_time: slot.start,
            end_time: slot.end,
            attendees,
            created_at,
            status: ReservationStatus::Pending,
            cancelled_at: None,
        }
    }

    /// Rehydrate a reservation from storage. Not a way around the state
    /// machine — callers pass back exactly what was persisted.
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: i32,
        room_id: i32,
        booked_by: String,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        attendees: i32,
        status: ReservationStatus,
        created_at: DateTime<Utc>,
        cancelled_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            room_id,
            booked_by,
            start_time,
            end_time,
            attendees,
            created_at,
            status,
            cancelled_at,
        }
    }

    pub fn status(&self) -> ReservationStatus {
        self.status
    }

    pub fn cancelled_at(&self) -> Option<DateTime<Utc>> {
        self.cancelled_at
    }

    pub fn slot(&self) -> TimeSlot {
        TimeSlot::new(self.start_time, self.end_time)
    }

    /// Confirm this reservation.
    ///
    /// `other_confirmed` is the snapshot of every *other* confirmed slot on
    /// the same room. The conflict check re-runs here because any number of
    /// pending reservations may hold overlapping windows — confirmation is
    /// the enforcement point, and whichever reservation confirms first wins.
    /// On failure the reservation stays `Pending`.
    pub fn confirm(&mut self, other_confirmed: &[TimeSlot]) -> Result<(), TransitionError> {
        validate_transition(self.status, ReservationStatus::Confirmed)?;

        let slot = self.slot();
        if other_confirmed.iter().any(|s| s.overlaps(&slot)) {
            return Err(TransitionError::SlotTaken);
        }

        self.status = ReservationStatus::Confirmed;
        Ok(())
    }

    /// Cancel this reservation, stamping `cancelled_at` exactly once.
    ///
    /// Allowed from `Pending` or `Confirmed`; the transition table rejects
    /// repeat cancellations.
    pub fn cancel(&mut self, now: DateTime<Utc>) -> Result<(), TransitionError> {
        validate_transition(self.status, ReservationStatus::Cancelled)?;

        self.status = ReservationStatus::Cancelled;
        self.cancelled_at = Some(now);
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn slot(start_h: u32, end_h: u32) -> TimeSlot {
        TimeSlot::new(
            Utc.with_ymd_and_hms(2026, 3, 5, start_h, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 3, 5, end_h, 0, 0).unwrap(),
        )
    }

    fn sample_reservation() -> Reservation {
        Reservation::pending(1, 1, "mira", slot(9, 11), 4, Utc::now())
    }

    #[test]
    fn new_reservation_is_pending() {
        let r = sample_reservation();
        assert_eq!(r.status(), ReservationStatus::Pending);
        assert!(r.cancelled_at().is_none());
    }

    #[test]
    fn transition_table_full_matrix() {
        use ReservationStatus::*;

        assert!(validate_transition(Pending, Confirmed).is_ok());
        assert!(validate_transition(Pending, Cancelled).is_ok());
        assert!(validate_transition(Confirmed, Cancelled).is_ok());

        assert_eq!(
            validate_transition(Confirmed, Pending),
            Err(TransitionError::ConfirmedToPending)
        );
        assert_eq!(
            validate_transition(Cancelled, Pending),
            Err(TransitionError::CancelledIsTerminal)
        );
        assert_eq!(
            validate_transition(Cancelled, Confirmed),
            Err(TransitionError::CancelledIsTerminal)
        );
        assert_eq!(
            validate_transition(Cancelled, Cancelled),
            Err(TransitionError::CancelledIsTerminal)
        );

        assert_eq!(
            validate_transition(Pending, Pending),
            Err(TransitionError::AlreadyInStatus(Pending))
        );
        assert_eq!(
            validate_transition(Confirmed, Confirmed),
            Err(TransitionError::AlreadyInStatus(Confirmed))
        );
    }

    #[test]
    fn confirm_without_conflicts_succeeds() {
        let mut r = sample_reservation();
        r.confirm(&[]).unwrap();
        assert_eq!(r.status(), ReservationStatus::Confirmed);
    }

    #[test]
    fn confirm_against_overlapping_slot_fails_and_stays_pending() {
        let mut r = sample_reservation();
        let err = r.confirm(&[slot(10, 12)]).unwrap_err();
        assert_eq!(err, TransitionError::SlotTaken);
        assert_eq!(r.status(), ReservationStatus::Pending);
    }

    #[test]
    fn confirm_against_adjacent_slot_succeeds() {
        let mut r = sample_reservation();
        r.confirm(&[slot(11, 13), slot(7, 9)]).unwrap();
        assert_eq!(r.status(), ReservationStatus::Confirmed);
    }

    #[test]
    fn first_confirm_wins() {
        let mut first = sample_reservation();
        let mut second = Reservation::pending(2, 1, "noor", slot(10, 12), 4, Utc::now());

        first.confirm(&[]).unwrap();
        let err = second.confirm(&[first.slot()]).unwrap_err();
        assert_eq!(err, TransitionError::SlotTaken);
        assert_eq!(second.status(), ReservationStatus::Pending);
    }

    #[test]
    fn cancel_stamps_cancelled_at() {
        let mut r = sample_reservation();
        let now = Utc.with_ymd_and_hms(2026, 3, 4, 12, 0, 0).unwrap();
        r.cancel(now).unwrap();
        assert_eq!(r.status(), ReservationStatus::Cancelled);
        assert_eq!(r.cancelled_at(), Some(now));
    }

    #[test]
    fn cancel_confirmed_is_allowed() {
        let mut r = sample_reservation();
        r.confirm(&[]).unwrap();
        r.cancel(Utc::now()).unwrap();
        assert_eq!(r.status(), ReservationStatus::Cancelled);
    }

    #[test]
    fn cancelled_is_terminal() {
        let mut r = sample_reservation();
        let now = Utc::now();
        r.cancel(now).unwrap();

        assert_eq!(r.confirm(&[]), Err(TransitionError::CancelledIsTerminal));
        assert_eq!(
            r.cancel(Utc::now()),
            Err(TransitionError::CancelledIsTerminal)
        );
        // the original cancellation timestamp is untouched
        assert_eq!(r.cancelled_at(), Some(now));
    }

    #[test]
    fn double_confirm_is_rejected_explicitly() {
        let mut r = sample_reservation();
        r.confirm(&[]).unwrap();
        assert_eq!(
            r.confirm(&[]),
            Err(TransitionError::AlreadyInStatus(ReservationStatus::Confirmed))
        );
    }

    #[test]
    fn status_string_roundtrip() {
        for status in [
            ReservationStatus::Pending,
            ReservationStatus::Confirmed,
            ReservationStatus::Cancelled,
        ] {
            assert_eq!(ReservationStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ReservationStatus::parse("Expired"), None);
    }
}
