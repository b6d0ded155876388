use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;

use crate::dto::vehicle_dto::{AdminVehicleUpdateRequest, VehicleDto, VehicleRequest};
use crate::dto::ApiResponse;
use crate::middleware::auth::{AdminUser, AuthUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_vehicle))
        .route("/", get(list_vehicles))
        .route("/active", get(list_active_vehicles))
        .route("/user/:user_id", get(list_vehicles_by_user))
        .route("/:license_plate", get(get_vehicle))
        .route("/:license_plate", put(update_vehicle))
        .route("/admin/:license_plate", put(admin_update_vehicle))
        .route("/:license_plate/toggle-status", put(toggle_status))
}

async fn create_vehicle(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(request): Json<VehicleRequest>,
) -> Result<Json<ApiResponse<VehicleDto>>, AppError> {
    let vehicle = state.vehicle_service.create_vehicle(request).await?;
    Ok(Json(ApiResponse::success_with_message(
        vehicle,
        "Vehículo creado exitosamente".to_string(),
    )))
}

async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleDto>>, AppError> {
    let vehicles = state.vehicle_service.get_all_vehicles().await?;
    Ok(Json(vehicles))
}

async fn list_active_vehicles(
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleDto>>, AppError> {
    let vehicles = state.vehicle_service.get_all_active_vehicles().await?;
    Ok(Json(vehicles))
}

async fn list_vehicles_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<VehicleDto>>, AppError> {
    let vehicles = state.vehicle_service.get_vehicles_by_user_id(user_id).await?;
    Ok(Json(vehicles))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(license_plate): Path<String>,
) -> Result<Json<VehicleDto>, AppError> {
    let vehicle = state
        .vehicle_service
        .get_vehicle_by_license_plate(&license_plate)
        .await?;
    Ok(Json(vehicle))
}

async fn update_vehicle(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(license_plate): Path<String>,
    Json(request): Json<VehicleRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    state
        .vehicle_service
        .update_vehicle(&license_plate, request)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Vehículo actualizado exitosamente"
    })))
}

async fn admin_update_vehicle(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(license_plate): Path<String>,
    Json(request): Json<AdminVehicleUpdateRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let updated = state
        .vehicle_service
        .admin_update_vehicle(&license_plate, request)
        .await?;

    if !updated {
        return Err(AppError::NotFound("Vehículo no encontrado".to_string()));
    }

    Ok(Json(json!({
        "success": true,
        "message": "Vehículo actualizado exitosamente"
    })))
}

async fn toggle_status(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(license_plate): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let is_active = state.vehicle_service.toggle_status(&license_plate).await?;
    Ok(Json(json!({
        "success": true,
        "is_active": is_active
    })))
}
