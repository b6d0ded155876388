use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::enums::EntityState;
use crate::models::event_vehicle::{EventVehicle, EventVehicleDetail};
use crate::utils::errors::AppError;

// JOIN con vehículo, dueño y ciudad para el detalle de la asociación
const DETAIL_QUERY: &str = r#"
    SELECT ev.id, ev.event_id, ev.license_plate, ev.date, ev.price, ev.description,
           ev.is_active, v.name AS vehicle_name, v.driver_name, v.capacity, v.available,
           u.first_name AS owner_first_name, u.last_name AS owner_last_name,
           c.name AS owner_city
    FROM events_vehicles ev
    JOIN vehicles v ON v.license_plate = ev.license_plate
    JOIN users u ON u.id = v.user_id
    JOIN cities c ON c.id = u.city_id
"#;

/// Operaciones de persistencia sobre asociaciones evento-vehículo
#[async_trait]
pub trait EventVehicleRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<EventVehicle>, AppError>;
    async fn get_by_id(&self, id: i32) -> Result<Option<EventVehicle>, AppError>;
    async fn get_detail_by_id(&self, id: i32) -> Result<Option<EventVehicleDetail>, AppError>;
    async fn get_by_event(&self, event_id: i32) -> Result<Vec<EventVehicleDetail>, AppError>;
    async fn get_active_by_event(&self, event_id: i32)
        -> Result<Vec<EventVehicleDetail>, AppError>;
    async fn get_by_event_and_license_plate(
        &self,
        event_id: i32,
        license_plate: &str,
    ) -> Result<Option<EventVehicle>, AppError>;
    async fn get_by_user_id(&self, user_id: i32) -> Result<Vec<EventVehicle>, AppError>;
    async fn add(&self, event_vehicle: &EventVehicle) -> Result<EventVehicle, AppError>;
    async fn update(&self, event_vehicle: &EventVehicle) -> Result<(), AppError>;
    async fn toggle_status(&self, id: i32) -> Result<EntityState, AppError>;
}

pub struct PgEventVehicleRepository {
    pool: PgPool,
}

impl PgEventVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventVehicleRepository for PgEventVehicleRepository {
    async fn list(&self) -> Result<Vec<EventVehicle>, AppError> {
        let rows = sqlx::query_as::<_, EventVehicle>("SELECT * FROM events_vehicles ORDER BY date")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<EventVehicle>, AppError> {
        let row = sqlx::query_as::<_, EventVehicle>("SELECT * FROM events_vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn get_detail_by_id(&self, id: i32) -> Result<Option<EventVehicleDetail>, AppError> {
        let query = format!("{} WHERE ev.id = $1", DETAIL_QUERY);
        let row = sqlx::query_as::<_, EventVehicleDetail>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn get_by_event(&self, event_id: i32) -> Result<Vec<EventVehicleDetail>, AppError> {
        let query = format!("{} WHERE ev.event_id = $1 ORDER BY ev.date", DETAIL_QUERY);
        let rows = sqlx::query_as::<_, EventVehicleDetail>(&query)
            .bind(event_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn get_active_by_event(
        &self,
        event_id: i32,
    ) -> Result<Vec<EventVehicleDetail>, AppError> {
        let query = format!(
            "{} WHERE ev.event_id = $1 AND ev.is_active = 1 ORDER BY ev.date",
            DETAIL_QUERY
        );
        let rows = sqlx::query_as::<_, EventVehicleDetail>(&query)
            .bind(event_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn get_by_event_and_license_plate(
        &self,
        event_id: i32,
        license_plate: &str,
    ) -> Result<Option<EventVehicle>, AppError> {
        let row = sqlx::query_as::<_, EventVehicle>(
            "SELECT * FROM events_vehicles WHERE event_id = $1 AND license_plate = $2",
        )
        .bind(event_id)
        .bind(license_plate)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn get_by_user_id(&self, user_id: i32) -> Result<Vec<EventVehicle>, AppError> {
        let rows = sqlx::query_as::<_, EventVehicle>(
            r#"
            SELECT ev.*
            FROM events_vehicles ev
            JOIN vehicles v ON v.license_plate = ev.license_plate
            WHERE v.user_id = $1
            ORDER BY ev.date
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn add(&self, event_vehicle: &EventVehicle) -> Result<EventVehicle, AppError> {
        let stored = sqlx::query_as::<_, EventVehicle>(
            r#"
            INSERT INTO events_vehicles
                (event_id, license_plate, date, price, description, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            RETURNING *
            "#,
        )
        .bind(event_vehicle.event_id)
        .bind(&event_vehicle.license_plate)
        .bind(event_vehicle.date)
        .bind(event_vehicle.price)
        .bind(&event_vehicle.description)
        .bind(event_vehicle.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    async fn update(&self, event_vehicle: &EventVehicle) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE events_vehicles
            SET date = $2, price = $3, description = $4, is_active = $5
            WHERE id = $1
            "#,
        )
        .bind(event_vehicle.id)
        .bind(event_vehicle.date)
        .bind(event_vehicle.price)
        .bind(&event_vehicle.description)
        .bind(event_vehicle.is_active)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn toggle_status(&self, id: i32) -> Result<EntityState, AppError> {
        let state: (EntityState,) = sqlx::query_as(
            r#"
            UPDATE events_vehicles
            SET is_active = CASE WHEN is_active = 1 THEN 0 ELSE 1 END
            WHERE id = $1
            RETURNING is_active
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("EventVehicle not found".to_string()))?;

        Ok(state.0)
    }
}
