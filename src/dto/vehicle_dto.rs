use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::enums::{EntityState, VehicleType};
use crate::models::vehicle::Vehicle;

// Request para crear o actualizar un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct VehicleRequest {
    pub user_id: i32,

    #[validate(custom = "crate::utils::validation::validate_license_plate")]
    pub license_plate: String,

    #[validate(length(min = 2, max = 100))]
    pub name: String,

    pub image_path: Option<String>,
    pub description: Option<String>,

    #[validate(length(min = 2, max = 100))]
    pub driver_name: String,

    pub vehicle_type: VehicleType,

    #[validate(range(min = 1950, max = 2030))]
    pub year_model: i32,

    #[validate(range(min = 1, max = 100))]
    pub capacity: i32,
}

// Request de actualización administrativa (nunca cambia la patente)
#[derive(Debug, Deserialize, Validate)]
pub struct AdminVehicleUpdateRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    pub description: Option<String>,

    #[validate(range(min = 1, max = 100))]
    pub capacity: i32,

    pub vehicle_type: VehicleType,

    #[validate(length(min = 2, max = 100))]
    pub driver_name: String,

    #[validate(range(min = 1950, max = 2030))]
    pub year_model: i32,

    pub image_path: Option<String>,

    #[validate(range(min = 0, max = 100))]
    pub available: i32,
}

// Response de vehículo
#[derive(Debug, Clone, Serialize)]
pub struct VehicleDto {
    pub license_plate: String,
    pub user_id: i32,
    pub name: String,
    pub image_path: Option<String>,
    pub description: Option<String>,
    pub driver_name: String,
    pub vehicle_type: VehicleType,
    pub year_model: i32,
    pub capacity: i32,
    pub available: i32,
    pub is_active: EntityState,
    pub created_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleDto {
    fn from(v: Vehicle) -> Self {
        Self {
            license_plate: v.license_plate,
            user_id: v.user_id,
            name: v.name,
            image_path: v.image_path,
            description: v.description,
            driver_name: v.driver_name,
            vehicle_type: v.vehicle_type,
            year_model: v.year_model,
            capacity: v.capacity,
            available: v.available,
            is_active: v.is_active,
            created_at: v.created_at,
        }
    }
}
