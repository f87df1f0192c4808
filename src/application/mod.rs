//! Business logic and use cases

pub mod booking;

pub use booking::{BookingError, BookingService, NewBooking};
