//! Modelos de City y Province

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::enums::EntityState;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Province {
    pub id: i32,
    pub name: String,
    pub is_active: EntityState,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct City {
    pub id: i32,
    pub name: String,
    pub province_id: i32,
    pub is_active: EntityState,
}
