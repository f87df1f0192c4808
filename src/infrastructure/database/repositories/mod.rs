//! SeaORM repository implementations

pub mod repository_provider;
pub mod reservation_repository;
pub mod room_repository;

pub use repository_provider::SeaOrmRepositoryProvider;
pub use reservation_repository::SeaOrmReservationRepository;
pub use room_repository::SeaOrmRoomRepository;
