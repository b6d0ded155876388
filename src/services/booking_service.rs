//! Servicio de reservas
//!
//! El alta descuenta asientos del vehículo y registra el pago; la
//! cancelación los devuelve. También manda los recordatorios de viajes
//! que salen dentro de las próximas 24 horas.

use std::sync::Arc;

use futures::future::join_all;
use rust_decimal::Decimal;
use validator::Validate;

use crate::dto::booking_dto::{AddBookingRequest, BookingDto};
use crate::models::booking::Booking;
use crate::models::enums::{BookingStatus, PaymentMethod, PaymentStatus};
use crate::models::payment::Payment;
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::event_vehicle_repository::EventVehicleRepository;
use crate::repositories::payment_repository::PaymentRepository;
use crate::repositories::user_repository::UserRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::email_service::{notifications, EmailService};
use crate::utils::errors::AppError;

// Ventana de aviso para los recordatorios de viaje
const UPCOMING_WINDOW_HOURS: i64 = 24;

pub struct BookingService {
    booking_repository: Arc<dyn BookingRepository>,
    event_vehicle_repository: Arc<dyn EventVehicleRepository>,
    vehicle_repository: Arc<dyn VehicleRepository>,
    payment_repository: Arc<dyn PaymentRepository>,
    user_repository: Arc<dyn UserRepository>,
    email_service: Arc<dyn EmailService>,
}

impl BookingService {
    pub fn new(
        booking_repository: Arc<dyn BookingRepository>,
        event_vehicle_repository: Arc<dyn EventVehicleRepository>,
        vehicle_repository: Arc<dyn VehicleRepository>,
        payment_repository: Arc<dyn PaymentRepository>,
        user_repository: Arc<dyn UserRepository>,
        email_service: Arc<dyn EmailService>,
    ) -> Self {
        Self {
            booking_repository,
            event_vehicle_repository,
            vehicle_repository,
            payment_repository,
            user_repository,
            email_service,
        }
    }

    pub async fn get_bookings(&self) -> Result<Vec<BookingDto>, AppError> {
        let bookings = self.booking_repository.list().await?;
        Ok(bookings.into_iter().map(BookingDto::from).collect())
    }

    pub async fn get_booking_by_id(&self, id: i32) -> Result<BookingDto, AppError> {
        let booking = self
            .booking_repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))?;

        Ok(BookingDto::from(booking))
    }

    pub async fn get_bookings_by_user(&self, user_id: i32) -> Result<Vec<BookingDto>, AppError> {
        let bookings = self.booking_repository.get_by_user(user_id).await?;
        Ok(bookings.into_iter().map(BookingDto::from).collect())
    }

    /// Alta de reserva: la asociación tiene que estar activa y el vehículo
    /// tener asientos suficientes. El pago en efectivo queda aprobado, el
    /// resto pendiente.
    pub async fn add_booking(&self, request: AddBookingRequest) -> Result<BookingDto, AppError> {
        request.validate()?;

        let event_vehicle = self
            .event_vehicle_repository
            .get_by_id(request.event_vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Asociación no encontrada".to_string()))?;

        if !event_vehicle.is_active.is_active() {
            return Err(AppError::BadRequest(
                "El viaje ya no está disponible.".to_string(),
            ));
        }

        // Descuenta asientos; si no alcanzan devuelve conflict
        self.vehicle_repository
            .adjust_available(&event_vehicle.license_plate, -request.seats)
            .await?;

        let amount = Decimal::from(event_vehicle.price) * Decimal::from(request.seats);
        let payment_status = match request.payment_method {
            PaymentMethod::Cash => PaymentStatus::Approved,
            _ => PaymentStatus::Pending,
        };

        let payment = Payment {
            id: 0,
            date: chrono::Utc::now(),
            payment_method: request.payment_method,
            payment_status,
            amount,
            details: request.payment_details,
        };
        let payment = self.payment_repository.add(&payment).await?;

        let booking = Booking {
            id: 0,
            user_id: request.user_id,
            event_vehicle_id: event_vehicle.id,
            seats: request.seats,
            status: BookingStatus::Confirmed,
            payment_id: payment.id,
            booking_date: chrono::Utc::now(),
        };
        let stored = self.booking_repository.add(&booking).await?;

        if let Some(user) = self.user_repository.get_by_id(stored.user_id).await? {
            let (subject, body) =
                notifications::booking_confirmed(&event_vehicle.description, stored.seats);
            if let Err(e) = self.email_service.send_email(&user.email, &subject, &body).await {
                log::warn!("No se pudo enviar la confirmación de reserva: {}", e);
            }
        }

        Ok(BookingDto::from(stored))
    }

    /// Cancela la reserva y devuelve los asientos al vehículo
    pub async fn cancel_booking(&self, booking_id: i32) -> Result<(), AppError> {
        let booking = self
            .booking_repository
            .get_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))?;

        if booking.status == BookingStatus::Cancelled {
            return Err(AppError::Conflict(
                "La reserva ya está cancelada.".to_string(),
            ));
        }

        if let Some(event_vehicle) = self
            .event_vehicle_repository
            .get_by_id(booking.event_vehicle_id)
            .await?
        {
            self.vehicle_repository
                .adjust_available(&event_vehicle.license_plate, booking.seats)
                .await?;
        }

        self.booking_repository
            .update_status(booking_id, BookingStatus::Cancelled)
            .await
    }

    /// Marca la reserva como completada; solo desde Confirmed
    pub async fn complete_booking(&self, booking_id: i32) -> Result<(), AppError> {
        let booking = self
            .booking_repository
            .get_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))?;

        if booking.status != BookingStatus::Confirmed {
            return Err(AppError::BadRequest(
                "Solo se pueden completar reservas confirmadas.".to_string(),
            ));
        }

        self.booking_repository
            .update_status(booking_id, BookingStatus::Completed)
            .await
    }

    /// Manda un recordatorio por cada reserva confirmada cuyo viaje sale
    /// dentro de las próximas 24 horas. Devuelve cuántos se enviaron.
    pub async fn notify_upcoming_bookings(&self) -> Result<usize, AppError> {
        let upcoming = self
            .booking_repository
            .list_upcoming(UPCOMING_WINDOW_HOURS)
            .await?;

        let sends = upcoming.iter().map(|row| {
            let (subject, body) = notifications::upcoming_booking(
                &row.user_first_name,
                &row.event_name,
                &row.date.format("%d/%m/%Y %H:%M").to_string(),
            );
            let email_service = self.email_service.clone();
            let to = row.user_email.clone();
            async move {
                if let Err(e) = email_service.send_email(&to, &subject, &body).await {
                    log::warn!("No se pudo enviar el recordatorio a {}: {}", to, e);
                    false
                } else {
                    true
                }
            }
        });

        let results = join_all(sends).await;
        Ok(results.into_iter().filter(|sent| *sent).count())
    }
}
