//! Modelo de Event

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::enums::{EntityState, EventType};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub event_date: DateTime<Utc>,
    pub event_type: EventType,
    pub city_id: i32,
    pub image: Option<String>,
    // Usuario que creó el evento
    pub user_id: i32,
    pub is_active: EntityState,
    pub created_at: DateTime<Utc>,
}
