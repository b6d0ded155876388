//! Enums de dominio
//!
//! Este módulo contiene los enums compartidos por entidades y DTOs.
//! Se persisten como enteros (INT4) y se serializan por nombre en la API.

use serde::{Deserialize, Serialize};

/// Flag de soft-delete para User/Vehicle/Event/EventVehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[repr(i32)]
pub enum EntityState {
    Inactive = 0,
    Active = 1,
}

impl EntityState {
    pub fn is_active(&self) -> bool {
        matches!(self, EntityState::Active)
    }

    /// Estado opuesto al actual
    pub fn toggled(&self) -> EntityState {
        match self {
            EntityState::Active => EntityState::Inactive,
            EntityState::Inactive => EntityState::Active,
        }
    }
}

/// Rol de usuario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[repr(i32)]
pub enum Role {
    Customer = 0,
    Provider = 1,
    Admin = 2,
}

/// Tipo de vehículo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[repr(i32)]
pub enum VehicleType {
    Bus = 0,
    Minibus = 1,
    Van = 2,
    Car = 3,
}

/// Categoría del evento
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[repr(i32)]
pub enum EventType {
    Recital = 0,
    Sports = 1,
    Cultural = 2,
    Festival = 3,
    Other = 4,
}

/// Estado de una reserva
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[repr(i32)]
pub enum BookingStatus {
    Confirmed = 0,
    Cancelled = 1,
    Completed = 2,
}

/// Medio de pago
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[repr(i32)]
pub enum PaymentMethod {
    Cash = 0,
    CreditCard = 1,
    DebitCard = 2,
    BankTransfer = 3,
}

/// Estado de un pago
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[repr(i32)]
pub enum PaymentStatus {
    Pending = 0,
    Approved = 1,
    Rejected = 2,
}
