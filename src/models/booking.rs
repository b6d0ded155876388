//! Modelo de Booking

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::enums::BookingStatus;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: i32,
    pub user_id: i32,
    pub event_vehicle_id: i32,
    pub seats: i32,
    pub status: BookingStatus,
    pub payment_id: i32,
    pub booking_date: DateTime<Utc>,
}
