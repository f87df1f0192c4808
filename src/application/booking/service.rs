//! Booking orchestration service
//!
//! Everything impure lives here: repository I/O, id allocation, per-room
//! locking, metrics, and event publication. The scheduling decisions
//! themselves are delegated to the pure validator and the reservation
//! state machine.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use metrics::counter;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::scheduling::{
    validate_booking, BookingIntent, BookingRequest, BusinessHours, Rejection, TimeSlot,
};
use crate::domain::{
    DomainError, RepositoryProvider, Reservation, ReservationStatus, TransitionError,
};
use crate::notifications::{Event, ReservationEvent, SharedEventBus};

/// Failures surfaced by booking operations.
#[derive(Debug, Error)]
pub enum BookingError {
    /// The validator refused the proposed booking
    #[error(transparent)]
    Rejected(#[from] Rejection),

    /// The state machine refused the transition (or the confirm-time
    /// conflict check failed)
    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error("reservation {0} not found")]
    ReservationNotFound(i32),

    #[error(transparent)]
    Storage(#[from] DomainError),
}

/// A booking request as it arrives from the outside.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub room_id: i32,
    pub booked_by: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub attendees: i32,
}

/// Orchestrates reservation creation and lifecycle transitions.
///
/// A per-room async mutex is held across every snapshot-read → validate →
/// write window, so two concurrent creates or confirms on the same room are
/// serialized and can never both commit overlapping confirmed intervals.
/// Distinct rooms proceed independently.
pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    hours: BusinessHours,
    events: SharedEventBus,
    room_locks: DashMap<i32, Arc<Mutex<()>>>,
}

impl BookingService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        hours: BusinessHours,
        events: SharedEventBus,
    ) -> Self {
        Self {
            repos,
            hours,
            events,
            room_locks: DashMap::new(),
        }
    }

    pub fn business_hours(&self) -> BusinessHours {
        self.hours
    }

    fn room_lock(&self, room_id: i32) -> Arc<Mutex<()>> {
        self.room_locks
            .entry(room_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Validate a proposed booking and persist it as a `Pending` reservation.
    pub async fn create(&self, booking: NewBooking) -> Result<Reservation, BookingError> {
        let lock = self.room_lock(booking.room_id);
        let _guard = lock.lock().await;

        let room = self.repos.rooms().find_by_id(booking.room_id).await?;
        let held = self
            .repos
            .reservations()
            .find_confirmed_slots(booking.room_id, None)
            .await?;

        let request = BookingRequest {
            room_id: booking.room_id,
            slot: TimeSlot::new(booking.start_time, booking.end_time),
            attendees: booking.attendees,
        };
        let accepted = validate_booking(
            &request,
            room.as_ref(),
            &held,
            self.hours,
            BookingIntent::Create,
        )?;

        let id = self.repos.reservations().next_id().await;
        let reservation = Reservation::pending(
            id,
            accepted.room.id,
            booking.booked_by,
            accepted.slot,
            accepted.attendees,
            Utc::now(),
        );
        self.repos.reservations().save(reservation.clone()).await?;

        counter!("bookings_created_total").increment(1);
        info!(
            reservation_id = id,
            room_id = reservation.room_id,
            slot = %reservation.slot(),
            "Reservation created"
        );
        self.publish(Event::ReservationRequested, &reservation);

        Ok(reservation)
    }

    /// Confirm a pending reservation, re-checking conflicts under the room
    /// lock. Whichever of two overlapping pendings confirms first wins.
    pub async fn confirm(&self, id: i32) -> Result<Reservation, BookingError> {
        let probe = self
            .repos
            .reservations()
            .find_by_id(id)
            .await?
            .ok_or(BookingError::ReservationNotFound(id))?;

        let lock = self.room_lock(probe.room_id);
        let _guard = lock.lock().await;

        // Re-read under the lock: another confirm may have landed between
        // the probe and lock acquisition.
        let mut reservation = self
            .repos
            .reservations()
            .find_by_id(id)
            .await?
            .ok_or(BookingError::ReservationNotFound(id))?;

        let others = self
            .repos
            .reservations()
            .find_confirmed_slots(reservation.room_id, Some(id))
            .await?;

        reservation.confirm(&others)?;
        self.repos.reservations().update(reservation.clone()).await?;

        counter!("bookings_confirmed_total").increment(1);
        info!(
            reservation_id = id,
            room_id = reservation.room_id,
            "Reservation confirmed"
        );
        self.publish(Event::ReservationConfirmed, &reservation);

        Ok(reservation)
    }

    /// Cancel a pending or confirmed reservation. No conflict check and no
    /// room lock needed — cancellation only ever releases a slot.
    pub async fn cancel(&self, id: i32) -> Result<Reservation, BookingError> {
        let mut reservation = self
            .repos
            .reservations()
            .find_by_id(id)
            .await?
            .ok_or(BookingError::ReservationNotFound(id))?;

        reservation.cancel(Utc::now())?;
        self.repos.reservations().update(reservation.clone()).await?;

        counter!("bookings_cancelled_total").increment(1);
        info!(
            reservation_id = id,
            room_id = reservation.room_id,
            "Reservation cancelled"
        );
        self.publish(Event::ReservationCancelled, &reservation);

        Ok(reservation)
    }

    /// Move a pending reservation to a new slot and/or headcount, running
    /// the full rule chain with the reservation's own record excluded from
    /// the conflict snapshot.
    ///
    /// Confirmed reservations cannot be rescheduled (there is no
    /// Confirmed→Pending edge); they must be cancelled and rebooked.
    pub async fn reschedule(
        &self,
        id: i32,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        attendees: i32,
    ) -> Result<Reservation, BookingError> {
        let probe = self
            .repos
            .reservations()
            .find_by_id(id)
            .await?
            .ok_or(BookingError::ReservationNotFound(id))?;

        let lock = self.room_lock(probe.room_id);
        let _guard = lock.lock().await;

        let reservation = self
            .repos
            .reservations()
            .find_by_id(id)
            .await?
            .ok_or(BookingError::ReservationNotFound(id))?;

        // Only a pending reservation may move; reuse the transition table's
        // vocabulary for the refusals.
        match reservation.status() {
            ReservationStatus::Pending => {}
            ReservationStatus::Confirmed => {
                return Err(TransitionError::ConfirmedToPending.into());
            }
            ReservationStatus::Cancelled => {
                return Err(TransitionError::CancelledIsTerminal.into());
            }
        }

        let room = self.repos.rooms().find_by_id(reservation.room_id).await?;
        let held = self
            .repos
            .reservations()
            .find_confirmed_slots(reservation.room_id, Some(id))
            .await?;

        let request = BookingRequest {
            room_id: reservation.room_id,
            slot: TimeSlot::new(start_time, end_time),
            attendees,
        };
        let accepted = validate_booking(
            &request,
            room.as_ref(),
            &held,
            self.hours,
            BookingIntent::Reschedule,
        )?;

        let updated = Reservation::pending(
            reservation.id,
            reservation.room_id,
            reservation.booked_by.clone(),
            accepted.slot,
            accepted.attendees,
            reservation.created_at,
        );
        self.repos.reservations().update(updated.clone()).await?;

        counter!("bookings_rescheduled_total").increment(1);
        info!(
            reservation_id = id,
            room_id = updated.room_id,
            slot = %updated.slot(),
            "Reservation rescheduled"
        );
        self.publish(Event::ReservationRescheduled, &updated);

        Ok(updated)
    }

    fn publish(&self, variant: fn(ReservationEvent) -> Event, reservation: &Reservation) {
        self.events.publish(variant(ReservationEvent {
            reservation_id: reservation.id,
            room_id: reservation.room_id,
            booked_by: reservation.booked_by.clone(),
            start_time: reservation.start_time,
            end_time: reservation.end_time,
        }));
    }
}

// ── Tests ──────────────────────────────────────────────────────
