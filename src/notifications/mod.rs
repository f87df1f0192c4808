//! Real-time notifications for reservation lifecycle changes

pub mod event_bus;
pub mod events;

pub use event_bus::{create_event_bus, EventBus, EventSubscriber, SharedEventBus};
pub use events::{Event, EventMessage, ReservationEvent, RoomDeactivatedEvent};
