//! Repository traits for the domain layer

use super::reservation::ReservationRepository;
use super::room::RoomRepository;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let room = repos.rooms().find_by_id(1).await?;
///     let held = repos.reservations().find_confirmed_slots(1, None).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn rooms(&self) -> &dyn RoomRepository;
    fn reservations(&self) -> &dyn ReservationRepository;
}
