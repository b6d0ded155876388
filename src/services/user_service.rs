//! Servicio de usuarios
//!
//! Registro, activación de cuenta, recuperación de contraseña y el toggle
//! de estado en cascada sobre vehículos, eventos y sus asociaciones.

use std::sync::Arc;

use bcrypt::{hash, verify, DEFAULT_COST};
use rand::Rng;
use validator::Validate;

use crate::dto::user_dto::{
    AdminUserUpdateRequest, ChangePasswordRequest, RoleChangeRequest, UserResponse,
    UserSignUpRequest, UserUpdateRequest,
};
use crate::models::enums::EntityState;
use crate::models::user::User;
use crate::repositories::event_repository::EventRepository;
use crate::repositories::event_vehicle_repository::EventVehicleRepository;
use crate::repositories::user_repository::UserRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::email_service::{notifications, EmailService};
use crate::utils::errors::AppError;

const RECOVERY_CODE_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const RECOVERY_CODE_LEN: usize = 6;

pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
    vehicle_repository: Arc<dyn VehicleRepository>,
    event_repository: Arc<dyn EventRepository>,
    event_vehicle_repository: Arc<dyn EventVehicleRepository>,
    email_service: Arc<dyn EmailService>,
}

impl UserService {
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        vehicle_repository: Arc<dyn VehicleRepository>,
        event_repository: Arc<dyn EventRepository>,
        event_vehicle_repository: Arc<dyn EventVehicleRepository>,
        email_service: Arc<dyn EmailService>,
    ) -> Self {
        Self {
            user_repository,
            vehicle_repository,
            event_repository,
            event_vehicle_repository,
            email_service,
        }
    }

    pub async fn get_users(&self) -> Result<Vec<UserResponse>, AppError> {
        let users = self.user_repository.list().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn get_user_by_id(&self, id: i32) -> Result<UserResponse, AppError> {
        let user = self
            .user_repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        Ok(UserResponse::from(user))
    }

    /// Registra un usuario inactivo y le manda el código de activación
    pub async fn sign_up(&self, request: UserSignUpRequest) -> Result<UserResponse, AppError> {
        request.validate()?;

        if self.user_repository.exists_by_email(&request.email).await? {
            return Err(AppError::Conflict(
                "Ya existe un usuario con ese email.".to_string(),
            ));
        }

        if self
            .user_repository
            .exists_by_identification_number(&request.dni_number)
            .await?
        {
            return Err(AppError::Conflict(
                "Ya existe un usuario con ese documento.".to_string(),
            ));
        }

        let recovery_code = generate_recovery_code();
        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error hasheando contraseña: {}", e)))?;

        let user = User {
            id: 0,
            first_name: request.first_name,
            last_name: request.last_name,
            birth_date: request.birth_date,
            identification_number: request.dni_number,
            email: request.email,
            password: password_hash,
            city_id: request.city,
            province_id: request.province,
            role: crate::models::enums::Role::Customer,
            is_active: EntityState::Inactive,
            recovery_code: Some(recovery_code.clone()),
            must_change_password: false,
            created_at: chrono::Utc::now(),
        };

        let stored = self.user_repository.add(&user).await?;

        let (subject, body) = notifications::account_activation(&stored.first_name, &recovery_code);
        if let Err(e) = self.email_service.send_email(&stored.email, &subject, &body).await {
            log::warn!("No se pudo enviar el email de activación: {}", e);
        }

        Ok(UserResponse::from(stored))
    }

    /// Activa la cuenta con email + código. Solo funciona una vez: al activar
    /// se limpia el código.
    pub async fn activate_account(&self, email: &str, code: &str) -> Result<bool, AppError> {
        let user = match self.user_repository.get_by_email(email).await? {
            Some(user) => user,
            None => return Ok(false),
        };

        if user.is_active.is_active() || user.recovery_code.as_deref() != Some(code) {
            return Ok(false);
        }

        let mut user = user;
        user.is_active = EntityState::Active;
        user.recovery_code = None;

        self.user_repository.update(&user).await?;
        Ok(true)
    }

    pub async fn update_user(&self, id: i32, request: UserUpdateRequest) -> Result<(), AppError> {
        request.validate()?;

        let mut user = self
            .user_repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        user.first_name = request.first_name;
        user.last_name = request.last_name;
        user.identification_number = request.dni_number;
        if let Some(email) = request.email {
            user.email = email;
        }
        if let Some(password) = request.password {
            if !password.is_empty() {
                user.password = hash(&password, DEFAULT_COST)
                    .map_err(|e| AppError::Hash(format!("Error hasheando contraseña: {}", e)))?;
            }
        }
        user.city_id = request.city;
        user.province_id = request.province;

        self.user_repository.update(&user).await
    }

    pub async fn change_user_role(&self, request: RoleChangeRequest) -> Result<(), AppError> {
        let mut user = self
            .user_repository
            .get_by_id(request.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        user.role = request.new_role;
        self.user_repository.update(&user).await
    }

    pub async fn admin_update_user(
        &self,
        user_id: i32,
        request: AdminUserUpdateRequest,
    ) -> Result<bool, AppError> {
        request.validate()?;

        let mut user = match self.user_repository.get_by_id(user_id).await? {
            Some(user) => user,
            None => return Ok(false),
        };

        user.first_name = request.first_name;
        user.last_name = request.last_name;
        user.birth_date = request.birth_date;
        user.identification_number = request.identification_number;
        user.email = request.email;
        user.city_id = request.city_id;
        user.province_id = request.province_id;
        user.role = request.role;

        self.user_repository.update(&user).await?;
        Ok(true)
    }

    /// Genera una clave provisoria, marca must_change_password y la manda
    /// por email. Devuelve false si el email no existe.
    pub async fn generate_recovery_code_and_send_email(
        &self,
        email: &str,
    ) -> Result<bool, AppError> {
        let mut user = match self.user_repository.get_by_email(email).await? {
            Some(user) => user,
            None => return Ok(false),
        };

        let recovery_code = generate_recovery_code();
        user.recovery_code = Some(recovery_code.clone());
        user.must_change_password = true;

        self.user_repository.update(&user).await?;

        let (subject, body) = notifications::password_recovery(&recovery_code);
        if let Err(e) = self.email_service.send_email(&user.email, &subject, &body).await {
            log::warn!("No se pudo enviar el email de recuperación: {}", e);
        }

        Ok(true)
    }

    /// Resetea la contraseña con la clave provisoria. Exige must_change_password
    /// y código coincidente.
    pub async fn reset_password_with_recovery_code(
        &self,
        email: &str,
        recovery_code: &str,
        new_password: &str,
    ) -> Result<bool, AppError> {
        let mut user = match self.user_repository.get_by_email(email).await? {
            Some(user) => user,
            None => return Ok(false),
        };

        if user.recovery_code.as_deref() != Some(recovery_code) || !user.must_change_password {
            return Ok(false);
        }

        user.password = hash(new_password, DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error hasheando contraseña: {}", e)))?;
        user.recovery_code = None;
        user.must_change_password = false;

        self.user_repository.update(&user).await?;
        Ok(true)
    }

    /// Cambio de contraseña autenticado: verifica la actual y la confirmación
    pub async fn change_password(
        &self,
        user_id: i32,
        request: ChangePasswordRequest,
    ) -> Result<(), AppError> {
        request.validate()?;

        if request.new_password != request.confirm_new_password {
            return Err(AppError::BadRequest(
                "Las contraseñas no coinciden.".to_string(),
            ));
        }

        let mut user = self
            .user_repository
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        let current_ok = verify(&request.current_password, &user.password)
            .map_err(|e| AppError::Hash(format!("Error verificando contraseña: {}", e)))?;
        if !current_ok {
            return Err(AppError::BadRequest(
                "La contraseña actual es incorrecta.".to_string(),
            ));
        }

        user.password = hash(&request.new_password, DEFAULT_COST)
            .map_err(|e| AppError::Hash(format!("Error hasheando contraseña: {}", e)))?;

        self.user_repository.update(&user).await
    }

    /// Toggle de estado del usuario. Al desactivar, la baja se propaga:
    /// primero las asociaciones evento-vehículo de cada vehículo, después el
    /// vehículo; después las asociaciones de cada evento del usuario, después
    /// el evento; al final el usuario. Reactivar solo toca al usuario.
    pub async fn toggle_status(&self, user_id: i32) -> Result<bool, AppError> {
        let current_state = self
            .user_repository
            .get_entity_state(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        let is_deactivating = current_state.is_active();

        if is_deactivating {
            // Desactivar vehículos del usuario
            let license_plates = self
                .user_repository
                .get_user_vehicle_license_plates(user_id)
                .await?;
            for license_plate in &license_plates {
                let event_vehicle_ids = self
                    .vehicle_repository
                    .get_event_vehicle_ids(license_plate)
                    .await?;
                for event_vehicle_id in event_vehicle_ids {
                    self.event_vehicle_repository
                        .toggle_status(event_vehicle_id)
                        .await?;
                }

                self.vehicle_repository.toggle_status(license_plate).await?;
            }

            // Desactivar eventos del usuario
            let event_ids = self.user_repository.get_user_event_ids(user_id).await?;
            for event_id in event_ids {
                let event_vehicle_ids = self
                    .event_repository
                    .get_event_vehicle_ids(event_id)
                    .await?;
                for event_vehicle_id in event_vehicle_ids {
                    self.event_vehicle_repository
                        .toggle_status(event_vehicle_id)
                        .await?;
                }

                self.event_repository.toggle_status(event_id).await?;
            }
        }

        let new_state = self.user_repository.toggle_status(user_id).await?;
        Ok(new_state.is_active())
    }
}

/// Código alfanumérico de 6 caracteres para activación y recuperación
fn generate_recovery_code() -> String {
    let mut rng = rand::thread_rng();
    (0..RECOVERY_CODE_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..RECOVERY_CODE_CHARS.len());
            RECOVERY_CODE_CHARS[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::{EntityState, Role};
    use crate::services::test_support::{
        fixture_event, fixture_event_vehicle, fixture_user, fixture_vehicle,
        InMemoryEventRepository, InMemoryEventVehicleRepository, InMemoryUserRepository,
        InMemoryVehicleRepository, RecordingEmailService, TestStore,
    };

    fn build_service(store: &Arc<TestStore>) -> UserService {
        UserService::new(
            Arc::new(InMemoryUserRepository::new(store.clone())),
            Arc::new(InMemoryVehicleRepository::new(store.clone())),
            Arc::new(InMemoryEventRepository::new(store.clone())),
            Arc::new(InMemoryEventVehicleRepository::new(store.clone())),
            Arc::new(RecordingEmailService::new(store.clone())),
        )
    }

    #[test]
    fn test_generate_recovery_code_shape() {
        for _ in 0..100 {
            let code = generate_recovery_code();
            assert_eq!(code.len(), RECOVERY_CODE_LEN);
            assert!(code.bytes().all(|b| RECOVERY_CODE_CHARS.contains(&b)));
        }
    }

    #[tokio::test]
    async fn test_sign_up_sends_activation_email() {
        let store = TestStore::new();
        let service = build_service(&store);

        let request = UserSignUpRequest {
            first_name: "Ana".to_string(),
            last_name: "Gómez".to_string(),
            birth_date: chrono::NaiveDate::from_ymd_opt(1990, 5, 1).unwrap(),
            dni_number: "28999111".to_string(),
            email: "nueva@example.com".to_string(),
            password: "secreta1".to_string(),
            city: 1,
            province: 1,
        };

        let response = service.sign_up(request).await.unwrap();
        assert_eq!(response.is_active, EntityState::Inactive);

        let stored = store.user(response.id).unwrap();
        assert!(stored.recovery_code.is_some());
        // La contraseña quedó hasheada
        assert_ne!(stored.password, "secreta1");

        let emails = store.emails_sent();
        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].0, "nueva@example.com");
        assert!(emails[0].1.contains("Activación"));
    }

    #[tokio::test]
    async fn test_sign_up_duplicate_email_conflicts() {
        let store = TestStore::new();
        store.insert_user(fixture_user(1, "ana@example.com"));
        let service = build_service(&store);

        let request = UserSignUpRequest {
            first_name: "Ana".to_string(),
            last_name: "Gómez".to_string(),
            birth_date: chrono::NaiveDate::from_ymd_opt(1990, 5, 1).unwrap(),
            dni_number: "28999111".to_string(),
            email: "ana@example.com".to_string(),
            password: "secreta1".to_string(),
            city: 1,
            province: 1,
        };

        let result = service.sign_up(request).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_activate_account_exactly_once() {
        let store = TestStore::new();
        let mut user = fixture_user(1, "ana@example.com");
        user.is_active = EntityState::Inactive;
        user.recovery_code = Some("ABC123".to_string());
        store.insert_user(user);

        let service = build_service(&store);

        // Primera activación: éxito
        assert!(service
            .activate_account("ana@example.com", "ABC123")
            .await
            .unwrap());

        let stored = store.user(1).unwrap();
        assert!(stored.is_active.is_active());
        assert!(stored.recovery_code.is_none());

        // Segunda activación con el mismo código: ya está activa
        assert!(!service
            .activate_account("ana@example.com", "ABC123")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_activate_account_wrong_code() {
        let store = TestStore::new();
        let mut user = fixture_user(1, "ana@example.com");
        user.is_active = EntityState::Inactive;
        user.recovery_code = Some("ABC123".to_string());
        store.insert_user(user);

        let service = build_service(&store);

        assert!(!service
            .activate_account("ana@example.com", "ZZZZZZ")
            .await
            .unwrap());
        assert!(!store.user(1).unwrap().is_active.is_active());
    }

    #[tokio::test]
    async fn test_recovery_sets_flag_and_sends_email() {
        let store = TestStore::new();
        store.insert_user(fixture_user(1, "ana@example.com"));
        let service = build_service(&store);

        assert!(service
            .generate_recovery_code_and_send_email("ana@example.com")
            .await
            .unwrap());

        let stored = store.user(1).unwrap();
        assert!(stored.must_change_password);
        assert!(stored.recovery_code.is_some());
        assert_eq!(store.emails_sent().len(), 1);

        // Email desconocido: false y sin envíos nuevos
        assert!(!service
            .generate_recovery_code_and_send_email("nadie@example.com")
            .await
            .unwrap());
        assert_eq!(store.emails_sent().len(), 1);
    }

    #[tokio::test]
    async fn test_reset_password_requires_flag_and_code() {
        let store = TestStore::new();
        let mut user = fixture_user(1, "ana@example.com");
        user.recovery_code = Some("XY12AB".to_string());
        user.must_change_password = false;
        store.insert_user(user);

        let service = build_service(&store);

        // Sin must_change_password el reseteo falla aunque el código coincida
        assert!(!service
            .reset_password_with_recovery_code("ana@example.com", "XY12AB", "nueva-clave")
            .await
            .unwrap());

        let mut user = store.user(1).unwrap();
        user.must_change_password = true;
        store.users.lock().unwrap()[0] = user;

        // Con código equivocado también falla
        assert!(!service
            .reset_password_with_recovery_code("ana@example.com", "OTRO99", "nueva-clave")
            .await
            .unwrap());

        // Con flag + código correcto funciona y limpia ambos
        assert!(service
            .reset_password_with_recovery_code("ana@example.com", "XY12AB", "nueva-clave")
            .await
            .unwrap());

        let stored = store.user(1).unwrap();
        assert!(stored.recovery_code.is_none());
        assert!(!stored.must_change_password);
        assert!(bcrypt::verify("nueva-clave", &stored.password).unwrap());
    }

    #[tokio::test]
    async fn test_toggle_status_cascades_on_deactivation() {
        let store = TestStore::new();
        store.insert_user(fixture_user(1, "ana@example.com"));

        // Un vehículo del usuario con una asociación activa
        store.insert_vehicle(fixture_vehicle("AB123CD", 1));
        store.insert_event_vehicle(fixture_event_vehicle(10, 99, "AB123CD"));
        // Un evento del usuario con una asociación de un vehículo ajeno
        store.insert_event(fixture_event(5, 1));
        store.insert_event_vehicle(fixture_event_vehicle(11, 5, "ZZ999ZZ"));

        let service = build_service(&store);

        let now_active = service.toggle_status(1).await.unwrap();
        assert!(!now_active);

        // La asociación del vehículo y el vehículo quedaron inactivos
        assert_eq!(store.event_vehicle(10).unwrap().is_active, EntityState::Inactive);
        assert_eq!(store.vehicle("AB123CD").unwrap().is_active, EntityState::Inactive);
        // La asociación del evento y el evento también
        assert_eq!(store.event_vehicle(11).unwrap().is_active, EntityState::Inactive);
        assert_eq!(store.event(5).unwrap().is_active, EntityState::Inactive);
        // Y el usuario al final
        assert_eq!(store.user(1).unwrap().is_active, EntityState::Inactive);
    }

    #[tokio::test]
    async fn test_toggle_status_reactivation_touches_only_root() {
        let store = TestStore::new();
        let mut user = fixture_user(1, "ana@example.com");
        user.is_active = EntityState::Inactive;
        store.insert_user(user);

        // Vehículo ya inactivo por una baja anterior
        let mut vehicle = fixture_vehicle("AB123CD", 1);
        vehicle.is_active = EntityState::Inactive;
        store.insert_vehicle(vehicle);

        let service = build_service(&store);

        let now_active = service.toggle_status(1).await.unwrap();
        assert!(now_active);

        // Reactivar no toca los vehículos
        assert_eq!(
            store.vehicle("AB123CD").unwrap().is_active,
            EntityState::Inactive
        );
        assert_eq!(store.user(1).unwrap().is_active, EntityState::Active);
    }

    #[tokio::test]
    async fn test_toggle_status_unknown_user() {
        let store = TestStore::new();
        let service = build_service(&store);

        let result = service.toggle_status(99).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_change_role() {
        let store = TestStore::new();
        store.insert_user(fixture_user(1, "ana@example.com"));
        let service = build_service(&store);

        service
            .change_user_role(RoleChangeRequest {
                user_id: 1,
                new_role: Role::Provider,
            })
            .await
            .unwrap();

        assert_eq!(store.user(1).unwrap().role, Role::Provider);
    }

    #[tokio::test]
    async fn test_change_password_checks_current_and_confirmation() {
        let store = TestStore::new();
        let mut user = fixture_user(1, "ana@example.com");
        user.password = bcrypt::hash("actual123", 4).unwrap();
        store.insert_user(user);

        let service = build_service(&store);

        // Confirmación que no coincide
        let result = service
            .change_password(
                1,
                ChangePasswordRequest {
                    current_password: "actual123".to_string(),
                    new_password: "nueva-clave".to_string(),
                    confirm_new_password: "otra-clave".to_string(),
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        // Contraseña actual incorrecta
        let result = service
            .change_password(
                1,
                ChangePasswordRequest {
                    current_password: "equivocada".to_string(),
                    new_password: "nueva-clave".to_string(),
                    confirm_new_password: "nueva-clave".to_string(),
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        // Camino feliz
        service
            .change_password(
                1,
                ChangePasswordRequest {
                    current_password: "actual123".to_string(),
                    new_password: "nueva-clave".to_string(),
                    confirm_new_password: "nueva-clave".to_string(),
                },
            )
            .await
            .unwrap();

        let stored = store.user(1).unwrap();
        assert!(bcrypt::verify("nueva-clave", &stored.password).unwrap());
    }
}
