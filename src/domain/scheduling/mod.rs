//! Scheduling engine
//!
//! Pure conflict-detection and validation logic: half-open time slots, the
//! bookable-hours window, and the booking rule chain. Nothing in this module
//! performs I/O; callers supply the room record and the confirmed-slot
//! snapshot.

pub mod business_hours;
pub mod slot;
pub mod validator;

pub use business_hours::BusinessHours;
pub use slot::TimeSlot;
pub use validator::{
    validate_booking, AcceptedBooking, BookingIntent, BookingRequest, RejectField, RejectReason,
    Rejection,
};
