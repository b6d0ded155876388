//! Modelo de EventVehicle
//!
//! Entidad de asociación entre un evento y un vehículo, con los datos
//! propios del viaje ofrecido (fecha, precio, descripción).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::enums::EntityState;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EventVehicle {
    pub id: i32,
    pub event_id: i32,
    pub license_plate: String,
    pub date: DateTime<Utc>,
    pub price: i32,
    pub description: String,
    pub is_active: EntityState,
    pub created_at: DateTime<Utc>,
}

/// Fila de EventVehicle con los datos del vehículo, su dueño y la ciudad,
/// resultado del JOIN que usa el detalle de la asociación.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EventVehicleDetail {
    pub id: i32,
    pub event_id: i32,
    pub license_plate: String,
    pub date: DateTime<Utc>,
    pub price: i32,
    pub description: String,
    pub is_active: EntityState,
    pub vehicle_name: String,
    pub driver_name: String,
    pub capacity: i32,
    pub available: i32,
    pub owner_first_name: String,
    pub owner_last_name: String,
    pub owner_city: String,
}
