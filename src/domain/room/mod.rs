//! Room aggregate
//!
//! Contains the Room entity and repository interface.

pub mod model;
pub mod repository;

pub use model::Room;
pub use repository::RoomRepository;
