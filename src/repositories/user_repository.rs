use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::enums::{EntityState, Role};
use crate::models::user::User;
use crate::utils::errors::AppError;

/// Operaciones de persistencia sobre usuarios
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, AppError>;
    async fn get_by_id(&self, id: i32) -> Result<Option<User>, AppError>;
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError>;
    async fn exists_by_identification_number(&self, dni: &str) -> Result<bool, AppError>;
    async fn add(&self, user: &User) -> Result<User, AppError>;
    async fn update(&self, user: &User) -> Result<(), AppError>;
    async fn get_entity_state(&self, id: i32) -> Result<Option<EntityState>, AppError>;
    /// Invierte el flag is_active y devuelve el estado nuevo
    async fn toggle_status(&self, id: i32) -> Result<EntityState, AppError>;
    async fn get_user_vehicle_license_plates(&self, user_id: i32) -> Result<Vec<String>, AppError>;
    async fn get_user_event_ids(&self, user_id: i32) -> Result<Vec<i32>, AppError>;
    async fn is_admin(&self, user_id: i32) -> Result<bool, AppError>;
}

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn list(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    async fn exists_by_identification_number(&self, dni: &str) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM users WHERE identification_number = $1)",
        )
        .bind(dni)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    async fn add(&self, user: &User) -> Result<User, AppError> {
        let stored = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users
                (first_name, last_name, birth_date, identification_number, email, password,
                 city_id, province_id, role, is_active, recovery_code, must_change_password, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, NOW())
            RETURNING *
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.birth_date)
        .bind(&user.identification_number)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.city_id)
        .bind(user.province_id)
        .bind(user.role)
        .bind(user.is_active)
        .bind(&user.recovery_code)
        .bind(user.must_change_password)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    async fn update(&self, user: &User) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE users
            SET first_name = $2, last_name = $3, birth_date = $4, identification_number = $5,
                email = $6, password = $7, city_id = $8, province_id = $9, role = $10,
                is_active = $11, recovery_code = $12, must_change_password = $13
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.birth_date)
        .bind(&user.identification_number)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.city_id)
        .bind(user.province_id)
        .bind(user.role)
        .bind(user.is_active)
        .bind(&user.recovery_code)
        .bind(user.must_change_password)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_entity_state(&self, id: i32) -> Result<Option<EntityState>, AppError> {
        let state: Option<(EntityState,)> =
            sqlx::query_as("SELECT is_active FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(state.map(|s| s.0))
    }

    async fn toggle_status(&self, id: i32) -> Result<EntityState, AppError> {
        let state: (EntityState,) = sqlx::query_as(
            r#"
            UPDATE users
            SET is_active = CASE WHEN is_active = 1 THEN 0 ELSE 1 END
            WHERE id = $1
            RETURNING is_active
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(state.0)
    }

    async fn get_user_vehicle_license_plates(&self, user_id: i32) -> Result<Vec<String>, AppError> {
        let plates: Vec<(String,)> =
            sqlx::query_as("SELECT license_plate FROM vehicles WHERE user_id = $1")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(plates.into_iter().map(|p| p.0).collect())
    }

    async fn get_user_event_ids(&self, user_id: i32) -> Result<Vec<i32>, AppError> {
        let ids: Vec<(i32,)> = sqlx::query_as("SELECT id FROM events WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(ids.into_iter().map(|i| i.0).collect())
    }

    async fn is_admin(&self, user_id: i32) -> Result<bool, AppError> {
        let role: Option<(Role,)> = sqlx::query_as("SELECT role FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(matches!(role, Some((Role::Admin,))))
    }
}
