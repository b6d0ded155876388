use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;

use crate::dto::user_dto::{
    ActivateAccountRequest, AdminUserUpdateRequest, ChangePasswordRequest, RecoveryRequest,
    ResetPasswordRequest, RoleChangeRequest, UserResponse, UserSignUpRequest, UserUpdateRequest,
};
use crate::dto::ApiResponse;
use crate::middleware::auth::{AdminUser, AuthUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_user_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/signup", post(sign_up))
        .route("/activate", post(activate_account))
        .route("/recovery", post(request_recovery))
        .route("/reset-password", post(reset_password))
        .route("/change-password", post(change_password))
        .route("/role", post(change_role))
        .route("/:id", get(get_user))
        .route("/:id", put(update_user))
        .route("/admin/:id", put(admin_update_user))
        .route("/:id/toggle-status", put(toggle_status))
}

async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.user_service.get_users().await?;
    Ok(Json(users))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.user_service.get_user_by_id(id).await?;
    Ok(Json(user))
}

async fn sign_up(
    State(state): State<AppState>,
    Json(request): Json<UserSignUpRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = state.user_service.sign_up(request).await?;
    Ok(Json(ApiResponse::success_with_message(
        user,
        "Usuario registrado. Revisá tu email para activar la cuenta.".to_string(),
    )))
}

async fn activate_account(
    State(state): State<AppState>,
    Json(request): Json<ActivateAccountRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let activated = state
        .user_service
        .activate_account(&request.email, &request.code)
        .await?;

    if !activated {
        return Err(AppError::BadRequest(
            "El código no es válido o la cuenta ya está activa.".to_string(),
        ));
    }

    Ok(Json(json!({
        "success": true,
        "message": "Cuenta activada exitosamente"
    })))
}

async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i32>,
    Json(request): Json<UserUpdateRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    // Solo el propio usuario o un admin pueden actualizar el perfil
    if auth.user_id != id && !auth.is_admin() {
        return Err(AppError::Forbidden(
            "No podés modificar a otro usuario".to_string(),
        ));
    }

    state.user_service.update_user(id, request).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Usuario actualizado exitosamente"
    })))
}

async fn admin_update_user(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i32>,
    Json(request): Json<AdminUserUpdateRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let updated = state.user_service.admin_update_user(id, request).await?;
    if !updated {
        return Err(AppError::NotFound("Usuario no encontrado".to_string()));
    }

    Ok(Json(json!({
        "success": true,
        "message": "Usuario actualizado exitosamente"
    })))
}

async fn change_role(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(request): Json<RoleChangeRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.user_service.change_user_role(request).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Rol actualizado exitosamente"
    })))
}

async fn request_recovery(
    State(state): State<AppState>,
    Json(request): Json<RecoveryRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let sent = state
        .user_service
        .generate_recovery_code_and_send_email(&request.email)
        .await?;

    if !sent {
        return Err(AppError::NotFound(
            "No existe un usuario con ese email.".to_string(),
        ));
    }

    Ok(Json(json!({
        "success": true,
        "message": "Te mandamos la clave provisoria por email"
    })))
}

async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let reset = state
        .user_service
        .reset_password_with_recovery_code(
            &request.email,
            &request.recovery_code,
            &request.new_password,
        )
        .await?;

    if !reset {
        return Err(AppError::BadRequest(
            "La clave provisoria no es válida.".to_string(),
        ));
    }

    Ok(Json(json!({
        "success": true,
        "message": "Contraseña actualizada exitosamente"
    })))
}

async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    state
        .user_service
        .change_password(auth.user_id, request)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Contraseña actualizada exitosamente"
    })))
}

async fn toggle_status(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, AppError> {
    let is_active = state.user_service.toggle_status(id).await?;
    Ok(Json(json!({
        "success": true,
        "is_active": is_active
    })))
}
