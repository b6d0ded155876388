//! Modelo de User
//!
//! Mapea exactamente a la tabla users del schema.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::enums::{EntityState, Role};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub identification_number: String,
    pub email: String,
    // Hash bcrypt, nunca se expone en la API
    pub password: String,
    pub city_id: i32,
    pub province_id: i32,
    pub role: Role,
    pub is_active: EntityState,
    pub recovery_code: Option<String>,
    pub must_change_password: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
