use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;

use crate::dto::event_vehicle_dto::{
    AddEventVehicleRequest, EventVehicleDetailDto, EventVehicleDto, UpdateEventVehicleRequest,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::{AdminUser, AuthUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_event_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", post(add_event_vehicle))
        .route("/", get(list_event_vehicles))
        .route("/", put(update_event_vehicle))
        .route("/event/:event_id", get(list_by_event))
        .route("/event/:event_id/active", get(list_active_by_event))
        .route("/user/:user_id", get(list_by_user))
        .route("/:id", get(get_event_vehicle))
        .route("/:id/toggle-status", put(toggle_status))
}

async fn add_event_vehicle(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(request): Json<AddEventVehicleRequest>,
) -> Result<Json<ApiResponse<EventVehicleDto>>, AppError> {
    let event_vehicle = state.event_vehicle_service.add(request).await?;
    Ok(Json(ApiResponse::success_with_message(
        event_vehicle,
        "Vehículo asociado al evento exitosamente".to_string(),
    )))
}

async fn list_event_vehicles(
    State(state): State<AppState>,
) -> Result<Json<Vec<EventVehicleDto>>, AppError> {
    let rows = state.event_vehicle_service.get_all().await?;
    Ok(Json(rows))
}

async fn get_event_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<EventVehicleDetailDto>, AppError> {
    let detail = state.event_vehicle_service.get_by_id(id).await?;
    Ok(Json(detail))
}

async fn list_by_event(
    State(state): State<AppState>,
    Path(event_id): Path<i32>,
) -> Result<Json<Vec<EventVehicleDetailDto>>, AppError> {
    let rows = state
        .event_vehicle_service
        .get_vehicles_by_event(event_id)
        .await?;
    Ok(Json(rows))
}

async fn list_active_by_event(
    State(state): State<AppState>,
    Path(event_id): Path<i32>,
) -> Result<Json<Vec<EventVehicleDetailDto>>, AppError> {
    let rows = state
        .event_vehicle_service
        .get_active_by_event(event_id)
        .await?;
    Ok(Json(rows))
}

async fn list_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<EventVehicleDto>>, AppError> {
    let rows = state.event_vehicle_service.get_by_user_id(user_id).await?;
    Ok(Json(rows))
}

async fn update_event_vehicle(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<UpdateEventVehicleRequest>,
) -> Result<Json<ApiResponse<EventVehicleDto>>, AppError> {
    let updated = state
        .event_vehicle_service
        .update(request, auth.user_id)
        .await?;

    Ok(Json(ApiResponse::success_with_message(
        updated,
        "Asociación actualizada exitosamente".to_string(),
    )))
}

async fn toggle_status(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    let is_active = state.event_vehicle_service.toggle_status(id).await?;
    Ok(Json(json!({
        "success": true,
        "is_active": is_active
    })))
}
