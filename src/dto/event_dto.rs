use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::enums::{EntityState, EventType};
use crate::models::event::Event;

// Request para crear o actualizar un evento
#[derive(Debug, Deserialize, Validate)]
pub struct EventRequest {
    #[validate(length(min = 2, max = 150))]
    pub name: String,

    #[validate(length(min = 2, max = 1000))]
    pub description: String,

    pub event_date: DateTime<Utc>,
    pub event_type: EventType,
    pub city_id: i32,
    pub image: Option<String>,
    pub user_id: i32,
}

// Response de evento
#[derive(Debug, Clone, Serialize)]
pub struct EventDto {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub event_date: DateTime<Utc>,
    pub event_type: EventType,
    pub city_id: i32,
    pub image: Option<String>,
    pub user_id: i32,
    pub is_active: EntityState,
}

impl From<Event> for EventDto {
    fn from(e: Event) -> Self {
        Self {
            id: e.id,
            name: e.name,
            description: e.description,
            event_date: e.event_date,
            event_type: e.event_type,
            city_id: e.city_id,
            image: e.image,
            user_id: e.user_id,
            is_active: e.is_active,
        }
    }
}
