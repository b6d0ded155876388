//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL con las convenciones estándar.

pub mod booking;
pub mod enums;
pub mod event;
pub mod event_vehicle;
pub mod location;
pub mod payment;
pub mod user;
pub mod vehicle;
