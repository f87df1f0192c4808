//! SeaORM implementation of ReservationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::reservation::{Reservation, ReservationRepository, ReservationStatus};
use crate::domain::scheduling::TimeSlot;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::reservation;

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: reservation::Model) -> DomainResult<Reservation> {
    let status = ReservationStatus::parse(&m.status).ok_or_else(|| {
        DomainError::Validation(format!(
            "reservation {} has unknown status '{}'",
            m.id, m.status
        ))
    })?;

    Ok(Reservation::from_parts(
        m.id,
        m.room_id,
        m.booked_by,
        m.start_time,
        m.end_time,
        m.attendees,
        status,
        m.created_at,
        m.cancelled_at,
    ))
}

fn domain_to_active(r: &Reservation) -> reservation::ActiveModel {
    reservation::ActiveModel {
        id: Set(r.id),
        room_id: Set(r.room_id),
        booked_by: Set(r.booked_by.clone()),
        start_time: Set(r.start_time),
        end_time: Set(r.end_time),
        attendees: Set(r.attendees),
        status: Set(r.status().as_str().to_string()),
        created_at: Set(r.created_at),
        cancelled_at: Set(r.cancelled_at()),
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn save(&self, r: Reservation) -> DomainResult<()> {
        debug!("Saving reservation: {}", r.id);
        domain_to_active(&r).insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Reservation>> {
        let model = reservation::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn update(&self, r: Reservation) -> DomainResult<()> {
        debug!("Updating reservation: {}", r.id);

        let existing = reservation::Entity::find_by_id(r.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::NotFound {
                entity: "Reservation",
                field: "id",
                value: r.id.to_string(),
            });
        }

        domain_to_active(&r).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .order_by_asc(reservation::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn find_for_room(
        &self,
        room_id: i32,
        status: Option<ReservationStatus>,
    ) -> DomainResult<Vec<Reservation>> {
        let mut query = reservation::Entity::find()
            .filter(reservation::Column::RoomId.eq(room_id));
        if let Some(status) = status {
            query = query.filter(reservation::Column::Status.eq(status.as_str()));
        }
        let models = query
            .order_by_asc(reservation::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn find_confirmed_slots(
        &self,
        room_id: i32,
        exclude: Option<i32>,
    ) -> DomainResult<Vec<TimeSlot>> {
        let mut query = reservation::Entity::find()
            .filter(reservation::Column::RoomId.eq(room_id))
            .filter(reservation::Column::Status.eq(ReservationStatus::Confirmed.as_str()));
        if let Some(id) = exclude {
            query = query.filter(reservation::Column::Id.ne(id));
        }
        let models = query.all(&self.db).await.map_err(db_err)?;
        Ok(models
            .into_iter()
            .map(|m| TimeSlot::new(m.start_time, m.end_time))
            .collect())
    }

    async fn find_stale_pending(
        &self,
        cutoff: DateTime<Utc>,
    ) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .filter(reservation::Column::Status.eq(ReservationStatus::Pending.as_str()))
            .filter(reservation::Column::EndTime.lt(cutoff))
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn next_id(&self) -> i32 {
        reservation::Entity::find()
            .all(&self.db)
            .await
            .map(|rs| rs.into_iter().map(|r| r.id).max().unwrap_or(0) + 1)
            .unwrap_or(1)
    }
}
