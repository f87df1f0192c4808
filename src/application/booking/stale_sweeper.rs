//! Background task that cancels stale pending reservations.
//!
//! A pending reservation whose interval has already ended can never be
//! meaningfully confirmed; the sweeper cancels it through the state machine
//! so `cancelled_at` is stamped like any other cancellation.

use std::sync::Arc;

use chrono::Utc;
use tokio::time::Duration;
use tracing::{info, warn};

use crate::domain::RepositoryProvider;
use crate::shared::shutdown::ShutdownSignal;

/// Start the stale-pending sweep background task.
///
/// Checks every `check_interval_secs` for reservations still `Pending`
/// with `end_time` in the past and cancels them.
pub fn start_stale_sweeper_task(
    repos: Arc<dyn RepositoryProvider>,
    shutdown: ShutdownSignal,
    check_interval_secs: u64,
) {
    tokio::spawn(async move {
        info!(
            check_interval = check_interval_secs,
            "🧹 Stale-pending sweeper started"
        );

        let mut interval = tokio::time::interval(Duration::from_secs(check_interval_secs));

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = sweep_stale_pending(&repos).await {
                        warn!(error = %e, "Stale-pending sweep error");
                    }
                }
                _ = shutdown.notified().wait() => {
                    info!("🧹 Stale-pending sweeper shutting down");
                    break;
                }
            }
        }
    });
}

/// One sweep pass. Separated from the spawn loop so it can be tested
/// directly.
pub async fn sweep_stale_pending(
    repos: &Arc<dyn RepositoryProvider>,
) -> Result<usize, Box<dyn std::error::Error + Send + Sync>> {
    let now = Utc::now();
    let stale = repos.reservations().find_stale_pending(now).await?;

    if stale.is_empty() {
        return Ok(0);
    }

    info!(count = stale.len(), "Cancelling stale pending reservations");

    let mut swept = 0;
    for mut reservation in stale {
        if let Err(e) = reservation.cancel(now) {
            warn!(reservation_id = reservation.id, error = %e, "Skipping stale reservation");
            continue;
        }
        match repos.reservations().update(reservation).await {
            Ok(()) => swept += 1,
            Err(e) => warn!(error = %e, "Failed to persist stale cancellation"),
        }
    }

    Ok(swept)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scheduling::TimeSlot;
    use crate::domain::{Reservation, ReservationStatus, Room};
    use crate::infrastructure::storage::InMemoryRepositoryProvider;
    use chrono::Duration as ChronoDuration;

    #[tokio::test]
    async fn sweeps_only_overdue_pendings() {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositoryProvider::new());
        let now = Utc::now();
        repos
            .rooms()
            .save(Room::new(1, "Boardroom 3F", 10, None, now))
            .await
            .unwrap();

        // ended an hour ago, still pending — should be swept
        let overdue = Reservation::pending(
            1,
            1,
            "mira",
            TimeSlot::new(now - ChronoDuration::hours(3), now - ChronoDuration::hours(1)),
            4,
            now - ChronoDuration::hours(4),
        );
        // still in the future — must be left alone
        let upcoming = Reservation::pending(
            2,
            1,
            "noor",
            TimeSlot::new(now + ChronoDuration::hours(1), now + ChronoDuration::hours(2)),
            4,
            now,
        );
        repos.reservations().save(overdue).await.unwrap();
        repos.reservations().save(upcoming).await.unwrap();

        let swept = sweep_stale_pending(&repos).await.unwrap();
        assert_eq!(swept, 1);

        let r1 = repos.reservations().find_by_id(1).await.unwrap().unwrap();
        let r2 = repos.reservations().find_by_id(2).await.unwrap().unwrap();
        assert_eq!(r1.status(), ReservationStatus::Cancelled);
        assert!(r1.cancelled_at().is_some());
        assert_eq!(r2.status(), ReservationStatus::Pending);
    }

    #[tokio::test]
    async fn empty_store_sweeps_nothing() {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositoryProvider::new());
        assert_eq!(sweep_stale_pending(&repos).await.unwrap(), 0);
    }
}
