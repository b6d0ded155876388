//! Repositorios
//!
//! Cada repositorio expone un trait con las operaciones de persistencia
//! y una implementación PostgreSQL sobre sqlx.

pub mod booking_repository;
pub mod event_repository;
pub mod event_vehicle_repository;
pub mod location_repository;
pub mod payment_repository;
pub mod user_repository;
pub mod vehicle_repository;
