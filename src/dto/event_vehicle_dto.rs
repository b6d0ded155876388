use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::enums::EntityState;
use crate::models::event_vehicle::{EventVehicle, EventVehicleDetail};

// Request para asociar un vehículo a un evento
#[derive(Debug, Deserialize, Validate)]
pub struct AddEventVehicleRequest {
    pub event_id: i32,

    #[validate(custom = "crate::utils::validation::validate_license_plate")]
    pub license_plate: String,

    pub date: DateTime<Utc>,

    #[validate(range(min = 1))]
    pub price: i32,

    #[validate(length(min = 2, max = 500))]
    pub description: String,
}

// Request de actualización de la asociación (solo el dueño del vehículo)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEventVehicleRequest {
    pub event_vehicle_id: i32,

    pub date: DateTime<Utc>,

    #[validate(range(min = 1))]
    pub price: i32,

    #[validate(length(min = 2, max = 500))]
    pub description: String,
}

// Response de la asociación evento-vehículo
#[derive(Debug, Clone, Serialize)]
pub struct EventVehicleDto {
    pub id: i32,
    pub event_id: i32,
    pub license_plate: String,
    pub date: DateTime<Utc>,
    pub price: i32,
    pub description: String,
    pub is_active: EntityState,
}

impl From<EventVehicle> for EventVehicleDto {
    fn from(ev: EventVehicle) -> Self {
        Self {
            id: ev.id,
            event_id: ev.event_id,
            license_plate: ev.license_plate,
            date: ev.date,
            price: ev.price,
            description: ev.description,
            is_active: ev.is_active,
        }
    }
}

// Response con los datos del vehículo, su dueño y la ciudad
#[derive(Debug, Clone, Serialize)]
pub struct EventVehicleDetailDto {
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
    pub owner_name: String,
    pub owner_city: String,
}

impl From<EventVehicleDetail> for EventVehicleDetailDto {
    fn from(d: EventVehicleDetail) -> Self {
        Self {
            id: d.id,
            event_id: d.event_id,
            license_plate: d.license_plate,
            date: d.date,
            price: d.price,
            description: d.description,
            is_active: d.is_active,
            vehicle_name: d.vehicle_name,
            driver_name: d.driver_name,
            capacity: d.capacity,
            available: d.available,
            owner_name: format!("{} {}", d.owner_first_name, d.owner_last_name),
            owner_city: d.owner_city,
        }
    }
}
