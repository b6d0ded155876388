use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::location::{City, Province};
use crate::utils::errors::AppError;

/// Operaciones de lectura sobre provincias
#[async_trait]
pub trait ProvinceRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Province>, AppError>;
    async fn get_by_id(&self, id: i32) -> Result<Option<Province>, AppError>;
}

/// Operaciones de lectura sobre ciudades
#[async_trait]
pub trait CityRepository: Send + Sync {
    async fn get_by_province(&self, province_id: i32) -> Result<Vec<City>, AppError>;
    async fn get_by_id(&self, id: i32) -> Result<Option<City>, AppError>;
    async fn get_by_name(&self, name: &str) -> Result<Option<City>, AppError>;
}

pub struct PgProvinceRepository {
    pool: PgPool,
}

impl PgProvinceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProvinceRepository for PgProvinceRepository {
    async fn list(&self) -> Result<Vec<Province>, AppError> {
        let provinces = sqlx::query_as::<_, Province>("SELECT * FROM provinces ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(provinces)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Province>, AppError> {
        let province = sqlx::query_as::<_, Province>("SELECT * FROM provinces WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(province)
    }
}

pub struct PgCityRepository {
    pool: PgPool,
}

impl PgCityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CityRepository for PgCityRepository {
    async fn get_by_province(&self, province_id: i32) -> Result<Vec<City>, AppError> {
        let cities =
            sqlx::query_as::<_, City>("SELECT * FROM cities WHERE province_id = $1 ORDER BY name")
                .bind(province_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(cities)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<City>, AppError> {
        let city = sqlx::query_as::<_, City>("SELECT * FROM cities WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(city)
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<City>, AppError> {
        let city = sqlx::query_as::<_, City>("SELECT * FROM cities WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(city)
    }
}
