use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::enums::EntityState;
use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppError;

/// Operaciones de persistencia sobre vehículos (clave natural: patente)
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Vehicle>, AppError>;
    async fn list_active(&self) -> Result<Vec<Vehicle>, AppError>;
    async fn get_by_license_plate(&self, license_plate: &str) -> Result<Option<Vehicle>, AppError>;
    async fn get_by_user_id(&self, user_id: i32) -> Result<Vec<Vehicle>, AppError>;
    async fn exists_by_license_plate(&self, license_plate: &str) -> Result<bool, AppError>;
    async fn add(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError>;
    async fn update(&self, license_plate: &str, vehicle: &Vehicle) -> Result<(), AppError>;
    async fn get_entity_state(&self, license_plate: &str)
        -> Result<Option<EntityState>, AppError>;
    async fn toggle_status(&self, license_plate: &str) -> Result<EntityState, AppError>;
    async fn get_event_vehicle_ids(&self, license_plate: &str) -> Result<Vec<i32>, AppError>;
    /// Ajusta los asientos disponibles; delta negativo reserva, positivo libera
    async fn adjust_available(&self, license_plate: &str, delta: i32) -> Result<i32, AppError>;
}

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn list(&self) -> Result<Vec<Vehicle>, AppError> {
        let vehicles =
            sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(vehicles)
    }

    async fn list_active(&self) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE is_active = 1 ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    async fn get_by_license_plate(&self, license_plate: &str) -> Result<Option<Vehicle>, AppError> {
        let vehicle =
            sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE license_plate = $1")
                .bind(license_plate)
                .fetch_optional(&self.pool)
                .await?;

        Ok(vehicle)
    }

    async fn get_by_user_id(&self, user_id: i32) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    async fn exists_by_license_plate(&self, license_plate: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicles WHERE license_plate = $1)")
                .bind(license_plate)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    async fn add(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError> {
        let stored = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles
                (license_plate, user_id, name, image_path, description, driver_name,
                 vehicle_type, year_model, capacity, available, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NOW())
            RETURNING *
            "#,
        )
        .bind(&vehicle.license_plate)
        .bind(vehicle.user_id)
        .bind(&vehicle.name)
        .bind(&vehicle.image_path)
        .bind(&vehicle.description)
        .bind(&vehicle.driver_name)
        .bind(vehicle.vehicle_type)
        .bind(vehicle.year_model)
        .bind(vehicle.capacity)
        .bind(vehicle.available)
        .bind(vehicle.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    async fn update(&self, license_plate: &str, vehicle: &Vehicle) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE vehicles
            SET license_plate = $2, name = $3, image_path = $4, description = $5,
                driver_name = $6, vehicle_type = $7, year_model = $8, capacity = $9,
                available = $10, is_active = $11
            WHERE license_plate = $1
            "#,
        )
        .bind(license_plate)
        .bind(&vehicle.license_plate)
        .bind(&vehicle.name)
        .bind(&vehicle.image_path)
        .bind(&vehicle.description)
        .bind(&vehicle.driver_name)
        .bind(vehicle.vehicle_type)
        .bind(vehicle.year_model)
        .bind(vehicle.capacity)
        .bind(vehicle.available)
        .bind(vehicle.is_active)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_entity_state(
        &self,
        license_plate: &str,
    ) -> Result<Option<EntityState>, AppError> {
        let state: Option<(EntityState,)> =
            sqlx::query_as("SELECT is_active FROM vehicles WHERE license_plate = $1")
                .bind(license_plate)
                .fetch_optional(&self.pool)
                .await?;

        Ok(state.map(|s| s.0))
    }

    async fn toggle_status(&self, license_plate: &str) -> Result<EntityState, AppError> {
        let state: (EntityState,) = sqlx::query_as(
            r#"
            UPDATE vehicles
            SET is_active = CASE WHEN is_active = 1 THEN 0 ELSE 1 END
            WHERE license_plate = $1
            RETURNING is_active
            "#,
        )
        .bind(license_plate)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        Ok(state.0)
    }

    async fn get_event_vehicle_ids(&self, license_plate: &str) -> Result<Vec<i32>, AppError> {
        let ids: Vec<(i32,)> =
            sqlx::query_as("SELECT id FROM events_vehicles WHERE license_plate = $1")
                .bind(license_plate)
                .fetch_all(&self.pool)
                .await?;

        Ok(ids.into_iter().map(|i| i.0).collect())
    }

    async fn adjust_available(&self, license_plate: &str, delta: i32) -> Result<i32, AppError> {
        let available: (i32,) = sqlx::query_as(
            r#"
            UPDATE vehicles
            SET available = available + $2
            WHERE license_plate = $1 AND available + $2 >= 0
            RETURNING available
            "#,
        )
        .bind(license_plate)
        .bind(delta)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::Conflict("No hay asientos disponibles suficientes".to_string())
        })?;

        Ok(available.0)
    }
}
