//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación. Los servicios
//! validan requests, mapean entidades a DTOs, invocan repositorios y
//! disparan las notificaciones por email.

pub mod auth_service;
pub mod booking_service;
pub mod email_service;
pub mod event_service;
pub mod event_vehicle_service;
pub mod location_service;
pub mod user_service;
pub mod vehicle_service;

#[cfg(test)]
pub mod test_support;
