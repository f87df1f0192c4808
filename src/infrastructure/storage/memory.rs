//! In-memory repository implementations
//!
//! Backs development and unit tests; the production path uses the SeaORM
//! repositories. Maps are `DashMap`s, ids come from atomic counters.

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::domain::reservation::{Reservation, ReservationRepository, ReservationStatus};
use crate::domain::room::{Room, RoomRepository};
use crate::domain::scheduling::TimeSlot;
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

/// In-memory storage for development and testing
pub struct InMemoryRepositoryProvider {
    rooms: InMemoryRoomRepository,
    reservations: InMemoryReservationRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self {
            rooms: InMemoryRoomRepository::new(),
            reservations: InMemoryReservationRepository::new(),
        }
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn rooms(&self) -> &dyn RoomRepository {
        &self.rooms
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }
}

// ── Rooms ──────────────────────────────────────────────────────

pub struct InMemoryRoomRepository {
    rooms: DashMap<i32, Room>,
    counter: AtomicI32,
}

impl InMemoryRoomRepository {
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
            counter: AtomicI32::new(1),
        }
    }
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn save(&self, room: Room) -> DomainResult<()> {
        if self.rooms.contains_key(&room.id) {
            return Err(DomainError::Conflict(format!("room {}", room.id)));
        }
        self.rooms.insert(room.id, room);
        Ok(())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>> {
        Ok(self.rooms.get(&id).map(|r| r.clone()))
    }

    async fn update(&self, room: Room) -> DomainResult<()> {
        if !self.rooms.contains_key(&room.id) {
            return Err(DomainError::NotFound {
                entity: "Room",
                field: "id",
                value: room.id.to_string(),
            });
        }
        self.rooms.insert(room.id, room);
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<Room>> {
        let mut rooms: Vec<Room> = self.rooms.iter().map(|e| e.value().clone()).collect();
        rooms.sort_by_key(|r| r.id);
        Ok(rooms)
    }

    async fn next_id(&self) -> i32 {
        self.counter.fetch_add(1, Ordering::SeqCst)
    }
}

// ── Reservations ───────────────────────────────────────────────

pub struct InMemoryReservationRepository {
    reservations: DashMap<i32, Reservation>,
    counter: AtomicI32,
}

impl InMemoryReservationRepository {
    pub fn new() -> Self {
        Self {
            reservations: DashMap::new(),
            counter: AtomicI32::new(1),
        }
    }
}

impl Default for InMemoryReservationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn save(&self, reservation: Reservation) -> DomainResult<()> {
        if self.reservations.contains_key(&reservation.id) {
            return Err(DomainError::Conflict(format!(
                "reservation {}",
                reservation.id
            )));
        }
        self.reservations.insert(reservation.id, reservation);
        Ok(())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>> {
        Ok(self.reservations.get(&id).map(|r| r.clone()))
    }

    async fn update(&self, reservation: Reservation) -> DomainResult<()> {
        if !self.reservations.contains_key(&reservation.id) {
            return Err(DomainError::NotFound {
                entity: "Reservation",
                field: "id",
                value: reservation.id.to_string(),
            });
        }
        self.reservations.insert(reservation.id, reservation);
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<Reservation>> {
        let mut all: Vec<Reservation> =
            self.reservations.iter().map(|e| e.value().clone()).collect();
        all.sort_by_key(|r| r.id);
        Ok(all)
    }

    async fn find_for_room(
        &self,
        room_id: i32,
        status: Option<ReservationStatus>,
    ) -> DomainResult<Vec<Reservation>> {
        let mut matching: Vec<Reservation> = self
            .reservations
            .iter()
            .filter(|r| r.room_id == room_id)
            .filter(|r| status.map_or(true, |s| r.status() == s))
            .map(|r| r.clone())
            .collect();
        matching.sort_by_key(|r| r.id);
        Ok(matching)
    }

    async fn find_confirmed_slots(
        &self,
        room_id: i32,
        exclude: Option<i32>,
    ) -> DomainResult<Vec<TimeSlot>> {
        Ok(self
            .reservations
            .iter()
            .filter(|r| {
                r.room_id == room_id
                    && r.status() == ReservationStatus::Confirmed
                    && Some(r.id) != exclude
            })
            .map(|r| r.slot())
            .collect())
    }

    async fn find_stale_pending(
        &self,
        cutoff: DateTime<Utc>,
    ) -> DomainResult<Vec<Reservation>> {
        Ok(self
            .reservations
            .iter()
            .filter(|r| r.status() == ReservationStatus::Pending && r.end_time < cutoff)
            .map(|r| r.clone())
            .collect())
    }

    async fn next_id(&self) -> i32 {
        self.counter.fetch_add(1, Ordering::SeqCst)
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

    fn pending(id: i32, room_id: i32, start_h: u32, end_h: u32) -> Reservation {
        Reservation::pending(id, room_id, "mira", slot(start_h, end_h), 4, Utc::now())
    }

    #[tokio::test]
    async fn save_and_find_room() {
        let repo = InMemoryRoomRepository::new();
        repo.save(Room::new(1, "Boardroom 3F", 10, None, Utc::now()))
            .await
            .unwrap();

        let found = repo.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(found.name, "Boardroom 3F");
        assert!(repo.find_by_id(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_room_save_is_a_conflict() {
        let repo = InMemoryRoomRepository::new();
        let room = Room::new(1, "Boardroom 3F", 10, None, Utc::now());
        repo.save(room.clone()).await.unwrap();
        assert!(repo.save(room).await.is_err());
    }

    #[tokio::test]
    async fn update_missing_reservation_is_not_found() {
        let repo = InMemoryReservationRepository::new();
        let err = repo.update(pending(9, 1, 9, 11)).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn confirmed_slots_filter_by_status_room_and_exclusion() {
        let repo = InMemoryReservationRepository::new();

        let mut confirmed = pending(1, 1, 9, 11);
        confirmed.confirm(&[]).unwrap();
        let mut other_room = pending(2, 2, 9, 11);
        other_room.confirm(&[]).unwrap();
        let still_pending = pending(3, 1, 12, 13);

        repo.save(confirmed).await.unwrap();
        repo.save(other_room).await.unwrap();
        repo.save(still_pending).await.unwrap();

        let slots = repo.find_confirmed_slots(1, None).await.unwrap();
        assert_eq!(slots, vec![slot(9, 11)]);

        let excluded = repo.find_confirmed_slots(1, Some(1)).await.unwrap();
        assert!(excluded.is_empty());
    }

    #[tokio::test]
    async fn find_for_room_honors_status_filter() {
        let repo = InMemoryReservationRepository::new();
        let mut confirmed = pending(1, 1, 9, 11);
        confirmed.confirm(&[]).unwrap();
        repo.save(confirmed).await.unwrap();
        repo.save(pending(2, 1, 12, 13)).await.unwrap();

        let all = repo.find_for_room(1, None).await.unwrap();
        assert_eq!(all.len(), 2);

        let pendings = repo
            .find_for_room(1, Some(ReservationStatus::Pending))
            .await
            .unwrap();
        assert_eq!(pendings.len(), 1);
        assert_eq!(pendings[0].id, 2);
    }

    #[tokio::test]
    async fn next_id_is_monotonic() {
        let repo = InMemoryReservationRepository::new();
        let a = repo.next_id().await;
        let b = repo.next_id().await;
        assert!(b > a);
    }
}
