//! Servicio de provincias y ciudades

use std::sync::Arc;

use crate::models::location::{City, Province};
use crate::repositories::location_repository::{CityRepository, ProvinceRepository};
use crate::utils::errors::AppError;

pub struct LocationService {
    province_repository: Arc<dyn ProvinceRepository>,
    city_repository: Arc<dyn CityRepository>,
}

impl LocationService {
    pub fn new(
        province_repository: Arc<dyn ProvinceRepository>,
        city_repository: Arc<dyn CityRepository>,
    ) -> Self {
        Self {
            province_repository,
            city_repository,
        }
    }

    pub async fn get_all_provinces(&self) -> Result<Vec<Province>, AppError> {
        self.province_repository.list().await
    }

    pub async fn get_cities_by_province(&self, province_id: i32) -> Result<Vec<City>, AppError> {
        self.city_repository.get_by_province(province_id).await
    }

    pub async fn get_city_by_id(&self, id: i32) -> Result<City, AppError> {
        self.city_repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ciudad no encontrada".to_string()))
    }

    pub async fn get_city_by_name(&self, name: &str) -> Result<City, AppError> {
        self.city_repository
            .get_by_name(name)
            .await?
            .ok_or_else(|| AppError::NotFound("Ciudad no encontrada".to_string()))
    }
}
