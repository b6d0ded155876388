use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::models::booking::Booking;
use crate::models::enums::BookingStatus;
use crate::utils::errors::AppError;

/// Fila de reserva próxima a vencer, con los datos para el recordatorio
#[derive(Debug, Clone, FromRow)]
pub struct UpcomingBooking {
    pub booking_id: i32,
    pub seats: i32,
    pub date: DateTime<Utc>,
    pub user_email: String,
    pub user_first_name: String,
    pub event_name: String,
}

/// Operaciones de persistencia sobre reservas
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Booking>, AppError>;
    async fn get_by_id(&self, id: i32) -> Result<Option<Booking>, AppError>;
    async fn get_by_user(&self, user_id: i32) -> Result<Vec<Booking>, AppError>;
    async fn add(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn update_status(&self, id: i32, status: BookingStatus) -> Result<(), AppError>;
    /// Reservas confirmadas cuyo viaje sale dentro de las próximas `hours` horas
    async fn list_upcoming(&self, hours: i64) -> Result<Vec<UpcomingBooking>, AppError>;
}

pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn list(&self) -> Result<Vec<Booking>, AppError> {
        let bookings =
            sqlx::query_as::<_, Booking>("SELECT * FROM bookings ORDER BY booking_date DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(bookings)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Booking>, AppError> {
        let booking = sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(booking)
    }

    async fn get_by_user(&self, user_id: i32) -> Result<Vec<Booking>, AppError> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE user_id = $1 ORDER BY booking_date DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    async fn add(&self, booking: &Booking) -> Result<Booking, AppError> {
        let stored = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (user_id, event_vehicle_id, seats, status, payment_id, booking_date)
            VALUES ($1, $2, $3, $4, $5, NOW())
            RETURNING *
            "#,
        )
        .bind(booking.user_id)
        .bind(booking.event_vehicle_id)
        .bind(booking.seats)
        .bind(booking.status)
        .bind(booking.payment_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    async fn update_status(&self, id: i32, status: BookingStatus) -> Result<(), AppError> {
        sqlx::query("UPDATE bookings SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_upcoming(&self, hours: i64) -> Result<Vec<UpcomingBooking>, AppError> {
        let rows = sqlx::query_as::<_, UpcomingBooking>(
            r#"
            SELECT b.id AS booking_id, b.seats, ev.date,
                   u.email AS user_email, u.first_name AS user_first_name,
                   e.name AS event_name
            FROM bookings b
            JOIN events_vehicles ev ON ev.id = b.event_vehicle_id
            JOIN events e ON e.id = ev.event_id
            JOIN users u ON u.id = b.user_id
            WHERE b.status = 0
              AND ev.date > NOW()
              AND ev.date <= NOW() + make_interval(hours => $1)
            ORDER BY ev.date
            "#,
        )
        .bind(hours as i32)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
