use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;

use crate::dto::event_dto::{EventDto, EventRequest};
use crate::dto::ApiResponse;
use crate::middleware::auth::{AdminUser, AuthUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_event_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_event))
        .route("/", get(list_events))
        .route("/user/:user_id", get(list_events_by_user))
        .route("/:id", get(get_event))
        .route("/:id", put(update_event))
        .route("/:id/toggle-status", put(toggle_status))
}

async fn create_event(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(request): Json<EventRequest>,
) -> Result<Json<ApiResponse<EventDto>>, AppError> {
    let event = state.event_service.create_event(request).await?;
    Ok(Json(ApiResponse::success_with_message(
        event,
        "Evento creado exitosamente".to_string(),
    )))
}

async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<EventDto>>, AppError> {
    let events = state.event_service.get_all_events().await?;
    Ok(Json(events))
}

async fn list_events_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<EventDto>>, AppError> {
    let events = state.event_service.get_events_by_user_id(user_id).await?;
    Ok(Json(events))
}

async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<EventDto>, AppError> {
    let event = state.event_service.get_event_by_id(id).await?;
    Ok(Json(event))
}

async fn update_event(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i32>,
    Json(request): Json<EventRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.event_service.update_event(id, request).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Evento actualizado exitosamente"
    })))
}

async fn toggle_status(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    let is_active = state.event_service.toggle_status(id).await?;
    Ok(Json(json!({
        "success": true,
        "is_active": is_active
    })))
}
