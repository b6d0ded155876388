//! Modelo de Vehicle
//!
//! La patente (license_plate) es la clave natural del vehículo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::enums::{EntityState, VehicleType};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub license_plate: String,
    pub user_id: i32,
    pub name: String,
    pub image_path: Option<String>,
    pub description: Option<String>,
    pub driver_name: String,
    pub vehicle_type: VehicleType,
    pub year_model: i32,
    pub capacity: i32,
    // Asientos todavía disponibles para reservar
    pub available: i32,
    pub is_active: EntityState,
    pub created_at: DateTime<Utc>,
}
