use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::json;

use crate::dto::booking_dto::{AddBookingRequest, BookingDto};
use crate::dto::ApiResponse;
use crate::middleware::auth::AdminUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_booking_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bookings))
        .route("/", post(add_booking))
        .route("/notify-upcoming", post(notify_upcoming))
        .route("/user/:user_id", get(list_bookings_by_user))
        .route("/:id", get(get_booking))
        .route("/:id", delete(cancel_booking))
        .route("/:id/complete", put(complete_booking))
}

async fn list_bookings(State(state): State<AppState>) -> Result<Json<Vec<BookingDto>>, AppError> {
    let bookings = state.booking_service.get_bookings().await?;
    Ok(Json(bookings))
}

async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<BookingDto>, AppError> {
    let booking = state.booking_service.get_booking_by_id(id).await?;
    Ok(Json(booking))
}

async fn list_bookings_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<BookingDto>>, AppError> {
    let bookings = state.booking_service.get_bookings_by_user(user_id).await?;
    Ok(Json(bookings))
}

async fn add_booking(
    State(state): State<AppState>,
    Json(request): Json<AddBookingRequest>,
) -> Result<Json<ApiResponse<BookingDto>>, AppError> {
    let booking = state.booking_service.add_booking(request).await?;
    Ok(Json(ApiResponse::success_with_message(
        booking,
        "Reserva creada exitosamente".to_string(),
    )))
}

async fn cancel_booking(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.booking_service.cancel_booking(id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Reserva cancelada exitosamente"
    })))
}

async fn complete_booking(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.booking_service.complete_booking(id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Reserva completada exitosamente"
    })))
}

async fn notify_upcoming(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<serde_json::Value>, AppError> {
    let notified = state.booking_service.notify_upcoming_bookings().await?;
    Ok(Json(json!({
        "success": true,
        "notified": notified
    })))
}
