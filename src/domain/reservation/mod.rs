//! Reservation aggregate
//!
//! Contains the Reservation entity, the status state machine, and the
//! repository interface.

pub mod model;
pub mod repository;

pub use model::{validate_transition, Reservation, ReservationStatus, TransitionError};
pub use repository::ReservationRepository;
