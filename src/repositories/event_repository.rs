use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::enums::EntityState;
use crate::models::event::Event;
use crate::utils::errors::AppError;

/// Operaciones de persistencia sobre eventos
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Event>, AppError>;
    async fn get_by_id(&self, id: i32) -> Result<Option<Event>, AppError>;
    async fn get_by_user_id(&self, user_id: i32) -> Result<Vec<Event>, AppError>;
    async fn add(&self, event: &Event) -> Result<Event, AppError>;
    async fn update(&self, event: &Event) -> Result<(), AppError>;
    async fn get_entity_state(&self, id: i32) -> Result<Option<EntityState>, AppError>;
    async fn toggle_status(&self, id: i32) -> Result<EntityState, AppError>;
    async fn get_event_vehicle_ids(&self, event_id: i32) -> Result<Vec<i32>, AppError>;
}

pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn list(&self) -> Result<Vec<Event>, AppError> {
        let events = sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY event_date")
            .fetch_all(&self.pool)
            .await?;

        Ok(events)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Event>, AppError> {
        let event = sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(event)
    }

    async fn get_by_user_id(&self, user_id: i32) -> Result<Vec<Event>, AppError> {
        let events = sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE user_id = $1 ORDER BY event_date",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    async fn add(&self, event: &Event) -> Result<Event, AppError> {
        let stored = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events
                (name, description, event_date, event_type, city_id, image, user_id, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW())
            RETURNING *
            "#,
        )
        .bind(&event.name)
        .bind(&event.description)
        .bind(event.event_date)
        .bind(event.event_type)
        .bind(event.city_id)
        .bind(&event.image)
        .bind(event.user_id)
        .bind(event.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    async fn update(&self, event: &Event) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE events
            SET name = $2, description = $3, event_date = $4, event_type = $5,
                city_id = $6, image = $7, is_active = $8
            WHERE id = $1
            "#,
        )
        .bind(event.id)
        .bind(&event.name)
        .bind(&event.description)
        .bind(event.event_date)
        .bind(event.event_type)
        .bind(event.city_id)
        .bind(&event.image)
        .bind(event.is_active)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_entity_state(&self, id: i32) -> Result<Option<EntityState>, AppError> {
        let state: Option<(EntityState,)> =
            sqlx::query_as("SELECT is_active FROM events WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(state.map(|s| s.0))
    }

    async fn toggle_status(&self, id: i32) -> Result<EntityState, AppError> {
        let state: (EntityState,) = sqlx::query_as(
            r#"
            UPDATE events
            SET is_active = CASE WHEN is_active = 1 THEN 0 ELSE 1 END
            WHERE id = $1
            RETURNING is_active
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        Ok(state.0)
    }

    async fn get_event_vehicle_ids(&self, event_id: i32) -> Result<Vec<i32>, AppError> {
        let ids: Vec<(i32,)> =
            sqlx::query_as("SELECT id FROM events_vehicles WHERE event_id = $1")
                .bind(event_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(ids.into_iter().map(|i| i.0).collect())
    }
}
