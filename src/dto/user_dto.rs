use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::enums::{EntityState, Role};
use crate::models::user::User;

// Request de registro de usuario
#[derive(Debug, Deserialize, Validate)]
pub struct UserSignUpRequest {
    #[validate(length(min = 2, max = 100))]
    pub first_name: String,

    #[validate(length(min = 2, max = 100))]
    pub last_name: String,

    pub birth_date: NaiveDate,

    #[validate(custom = "crate::utils::validation::validate_identification_number")]
    pub dni_number: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6, max = 100))]
    pub password: String,

    pub city: i32,
    pub province: i32,
}

// Request de actualización del propio usuario
#[derive(Debug, Deserialize, Validate)]
pub struct UserUpdateRequest {
    #[validate(length(min = 2, max = 100))]
    pub first_name: String,

    #[validate(length(min = 2, max = 100))]
    pub last_name: String,

    #[validate(custom = "crate::utils::validation::validate_identification_number")]
    pub dni_number: String,

    #[validate(email)]
    pub email: Option<String>,

    // Si viene vacío o ausente, la contraseña no cambia
    pub password: Option<String>,

    pub city: i32,
    pub province: i32,
}

// Request de actualización administrativa (incluye rol)
#[derive(Debug, Deserialize, Validate)]
pub struct AdminUserUpdateRequest {
    #[validate(length(min = 2, max = 100))]
    pub first_name: String,

    #[validate(length(min = 2, max = 100))]
    pub last_name: String,

    pub birth_date: NaiveDate,

    #[validate(custom = "crate::utils::validation::validate_identification_number")]
    pub identification_number: String,

    #[validate(email)]
    pub email: String,

    pub city_id: i32,
    pub province_id: i32,
    pub role: Role,
}

// Request de cambio de rol
#[derive(Debug, Deserialize)]
pub struct RoleChangeRequest {
    pub user_id: i32,
    pub new_role: Role,
}

// Request de activación de cuenta (email + código recibido)
#[derive(Debug, Deserialize, Validate)]
pub struct ActivateAccountRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(equal = 6))]
    pub code: String,
}

// Request de recuperación de contraseña
#[derive(Debug, Deserialize, Validate)]
pub struct RecoveryRequest {
    #[validate(email)]
    pub email: String,
}

// Request de reseteo con clave provisoria
#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(equal = 6))]
    pub recovery_code: String,

    #[validate(length(min = 6, max = 100))]
    pub new_password: String,
}

// Request de cambio de contraseña autenticado
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub current_password: String,

    #[validate(length(min = 6, max = 100))]
    pub new_password: String,

    pub confirm_new_password: String,
}

/// Response de usuario para la API (sin password ni código de recuperación)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub identification_number: String,
    pub email: String,
    pub city_id: i32,
    pub province_id: i32,
    pub role: Role,
    pub is_active: EntityState,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            birth_date: user.birth_date,
            identification_number: user.identification_number,
            email: user.email,
            city_id: user.city_id,
            province_id: user.province_id,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_user_response_hides_password() {
        let user = User {
            id: 1,
            first_name: "Ana".to_string(),
            last_name: "Gómez".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 5, 1).unwrap(),
            identification_number: "30123456".to_string(),
            email: "ana@example.com".to_string(),
            password: "$2b$12$hash".to_string(),
            city_id: 1,
            province_id: 1,
            role: Role::Customer,
            is_active: EntityState::Active,
            recovery_code: Some("ABC123".to_string()),
            must_change_password: false,
            created_at: Utc::now(),
        };

        let response = UserResponse::from(user);
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("recovery_code"));
        assert!(json.contains("ana@example.com"));
    }
}
