use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::models::location::{City, Province};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_province_router() -> Router<AppState> {
    Router::new().route("/", get(list_provinces))
}

pub fn create_city_router() -> Router<AppState> {
    Router::new()
        .route("/province/:province_id", get(list_cities_by_province))
        .route("/name/:name", get(get_city_by_name))
        .route("/:id", get(get_city))
}

async fn list_provinces(State(state): State<AppState>) -> Result<Json<Vec<Province>>, AppError> {
    let provinces = state.location_service.get_all_provinces().await?;
    Ok(Json(provinces))
}

async fn list_cities_by_province(
    State(state): State<AppState>,
    Path(province_id): Path<i32>,
) -> Result<Json<Vec<City>>, AppError> {
    let cities = state
        .location_service
        .get_cities_by_province(province_id)
        .await?;
    Ok(Json(cities))
}

async fn get_city(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<City>, AppError> {
    let city = state.location_service.get_city_by_id(id).await?;
    Ok(Json(city))
}

async fn get_city_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<City>, AppError> {
    let city = state.location_service.get_city_by_name(&name).await?;
    Ok(Json(city))
}
