//! # Atrium Room Booking Service
//!
//! Conference-room reservation service with conflict detection over
//! half-open time intervals and a guarded booking lifecycle.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, the scheduling rule chain, the
//!   reservation state machine, and repository traits
//! - **application**: Booking orchestration (per-room serialization,
//!   id allocation, events, metrics) and background tasks
//! - **infrastructure**: SeaORM persistence and the in-memory store
//! - **interfaces**: REST API with Swagger documentation
//! - **notifications**: Broadcast events for reservation lifecycle changes

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod notifications;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::{create_api_router, AppState};

// Re-export notifications
pub use notifications::{create_event_bus, Event, EventBus, SharedEventBus};
