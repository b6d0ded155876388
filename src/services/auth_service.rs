//! Servicio de autenticación
//!
//! Login por email y contraseña contra la tabla de usuarios; emite un JWT
//! con el rol del usuario.

use std::sync::Arc;

use bcrypt::verify;
use chrono::{Duration, Utc};

use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::dto::user_dto::UserResponse;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};

pub struct AuthService {
    user_repository: Arc<dyn UserRepository>,
    jwt_config: JwtConfig,
}

impl AuthService {
    pub fn new(user_repository: Arc<dyn UserRepository>, jwt_config: JwtConfig) -> Self {
        Self {
            user_repository,
            jwt_config,
        }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AppError> {
        let user = match self.user_repository.get_by_email(&request.email).await? {
            Some(user) => user,
            None => return Ok(Self::failed("Credenciales inválidas")),
        };

        let password_ok = verify(&request.password, &user.password)
            .map_err(|e| AppError::Hash(format!("Error verificando contraseña: {}", e)))?;

        if !password_ok {
            return Ok(Self::failed("Credenciales inválidas"));
        }

        if !user.is_active.is_active() {
            return Ok(Self::failed("La cuenta todavía no está activada"));
        }

        let token = generate_token(user.id, user.role, &self.jwt_config)?;
        let expires_at = Utc::now() + Duration::seconds(self.jwt_config.expiration as i64);

        Ok(LoginResponse {
            success: true,
            token: Some(token),
            user: Some(UserResponse::from(user)),
            message: None,
            expires_at: Some(expires_at),
        })
    }

    fn failed(message: &str) -> LoginResponse {
        LoginResponse {
            success: false,
            token: None,
            user: None,
            message: Some(message.to_string()),
            expires_at: None,
        }
    }
}
