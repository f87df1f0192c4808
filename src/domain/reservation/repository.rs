//! Reservation repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{Reservation, ReservationStatus};
use crate::domain::scheduling::TimeSlot;
use crate::domain::DomainResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Save a new reservation
    async fn save(&self, reservation: Reservation) -> DomainResult<()>;

    /// Find reservation by ID
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>>;

    /// Update an existing reservation
    async fn update(&self, reservation: Reservation) -> DomainResult<()>;

    /// Find all reservations (any status)
    async fn find_all(&self) -> DomainResult<Vec<Reservation>>;

    /// Find all reservations for a room, optionally filtered by status
    async fn find_for_room(
        &self,
        room_id: i32,
        status: Option<ReservationStatus>,
    ) -> DomainResult<Vec<Reservation>>;

    /// Snapshot of the intervals held by `Confirmed` reservations on a room.
    ///
    /// `exclude` drops one reservation from the snapshot — used when
    /// re-validating an existing reservation against everyone else.
    async fn find_confirmed_slots(
        &self,
        room_id: i32,
        exclude: Option<i32>,
    ) -> DomainResult<Vec<TimeSlot>>;

    /// Find `Pending` reservations whose interval already ended (end_time < cutoff)
    async fn find_stale_pending(&self, cutoff: DateTime<Utc>) -> DomainResult<Vec<Reservation>>;

    /// Generate next reservation ID
    async fn next_id(&self) -> i32;
}
