//! SeaORM implementation of RoomRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::domain::room::{Room, RoomRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::room;

pub struct SeaOrmRoomRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoomRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: room::Model) -> Room {
    Room {
        id: m.id,
        name: m.name,
        capacity: m.capacity,
        location: m.location,
        is_active: m.is_active,
        created_at: m.created_at,
    }
}

fn domain_to_active(r: Room) -> room::ActiveModel {
    room::ActiveModel {
        id: Set(r.id),
        name: Set(r.name),
        capacity: Set(r.capacity),
        location: Set(r.location),
        is_active: Set(r.is_active),
        created_at: Set(r.created_at),
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}

// ── RoomRepository impl ─────────────────────────────────────────

#[async_trait]
impl RoomRepository for SeaOrmRoomRepository {
    async fn save(&self, r: Room) -> DomainResult<()> {
        debug!("Saving room: {}", r.id);
        domain_to_active(r).insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>> {
        let model = room::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn update(&self, r: Room) -> DomainResult<()> {
        debug!("Updating room: {}", r.id);

        let existing = room::Entity::find_by_id(r.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::NotFound {
                entity: "Room",
                field: "id",
                value: r.id.to_string(),
            });
        }

        domain_to_active(r).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn find_all(&self) -> DomainResult<Vec<Room>> {
        let models = room::Entity::find()
            .order_by_asc(room::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn next_id(&self) -> i32 {
        room::Entity::find()
            .all(&self.db)
            .await
            .map(|rs| rs.into_iter().map(|r| r.id).max().unwrap_or(0) + 1)
            .unwrap_or(1)
    }
}
