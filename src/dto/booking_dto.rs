use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::booking::Booking;
use crate::models::enums::{BookingStatus, PaymentMethod};

// Request para crear una reserva
#[derive(Debug, Deserialize, Validate)]
pub struct AddBookingRequest {
    pub user_id: i32,
    pub event_vehicle_id: i32,

    #[validate(range(min = 1, max = 100))]
    pub seats: i32,

    pub payment_method: PaymentMethod,
    pub payment_details: Option<String>,
}

// Response de reserva
#[derive(Debug, Clone, Serialize)]
pub struct BookingDto {
    pub id: i32,
    pub user_id: i32,
    pub event_vehicle_id: i32,
    pub seats: i32,
    pub status: BookingStatus,
    pub payment_id: i32,
    pub booking_date: DateTime<Utc>,
}

impl From<Booking> for BookingDto {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            user_id: b.user_id,
            event_vehicle_id: b.event_vehicle_id,
            seats: b.seats,
            status: b.status,
            payment_id: b.payment_id,
            booking_date: b.booking_date,
        }
    }
}
