//! Booking use cases

pub mod service;
pub mod stale_sweeper;

pub use service::{BookingError, BookingService, NewBooking};
pub use stale_sweeper::start_stale_sweeper_task;
