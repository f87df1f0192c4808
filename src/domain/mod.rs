//! Core business entities, scheduling rules, and repository traits

pub mod error;
pub mod repositories;
pub mod reservation;
pub mod room;
pub mod scheduling;

// Re-export commonly used types
pub use error::{DomainError, DomainResult};
pub use repositories::RepositoryProvider;
pub use reservation::{Reservation, ReservationStatus, TransitionError};
pub use room::Room;
pub use scheduling::{BusinessHours, TimeSlot};
