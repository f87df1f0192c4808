//! Room repository interface

use async_trait::async_trait;

use super::model::Room;
use crate::domain::DomainResult;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Save a new room
    async fn save(&self, room: Room) -> DomainResult<()>;

    /// Find room by ID
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>>;

    /// Update an existing room
    async fn update(&self, room: Room) -> DomainResult<()>;

    /// Find all rooms
    async fn find_all(&self) -> DomainResult<Vec<Room>>;

    /// Generate next room ID
    async fn next_id(&self) -> i32;
}
