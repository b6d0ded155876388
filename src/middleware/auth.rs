//! Extractores de autenticación
//!
//! `AuthUser` saca el usuario del header Authorization (Bearer JWT);
//! `AdminUser` además exige rol Admin.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::models::enums::Role;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::verify_token;

/// Usuario autenticado extraído del JWT
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i32,
    pub role: Role,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| {
                AppError::Unauthorized("Falta el header Authorization".to_string())
            })?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Formato de token inválido".to_string()))?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser {
            user_id: claims.user_id()?,
            role: claims.role,
        })
    }
}

/// Usuario autenticado con rol Admin
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;

        if !user.is_admin() {
            return Err(AppError::Forbidden(
                "Se requiere rol de administrador".to_string(),
            ));
        }

        Ok(AdminUser(user))
    }
}
