//! Servicio de vehículos
//!
//! Alta con chequeo de patente duplicada y aviso por email al dueño;
//! toggle de estado en cascada sobre las asociaciones evento-vehículo.

use std::sync::Arc;

use validator::Validate;

use crate::dto::vehicle_dto::{AdminVehicleUpdateRequest, VehicleDto, VehicleRequest};
use crate::models::enums::EntityState;
use crate::models::vehicle::Vehicle;
use crate::repositories::event_vehicle_repository::EventVehicleRepository;
use crate::repositories::user_repository::UserRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::email_service::{notifications, EmailService};
use crate::utils::errors::AppError;
use crate::utils::validation::normalize_license_plate;

pub struct VehicleService {
    vehicle_repository: Arc<dyn VehicleRepository>,
    user_repository: Arc<dyn UserRepository>,
    event_vehicle_repository: Arc<dyn EventVehicleRepository>,
    email_service: Arc<dyn EmailService>,
}

impl VehicleService {
    pub fn new(
        vehicle_repository: Arc<dyn VehicleRepository>,
        user_repository: Arc<dyn UserRepository>,
        event_vehicle_repository: Arc<dyn EventVehicleRepository>,
        email_service: Arc<dyn EmailService>,
    ) -> Self {
        Self {
            vehicle_repository,
            user_repository,
            event_vehicle_repository,
            email_service,
        }
    }

    pub async fn get_all_vehicles(&self) -> Result<Vec<VehicleDto>, AppError> {
        let vehicles = self.vehicle_repository.list().await?;
        Ok(vehicles.into_iter().map(VehicleDto::from).collect())
    }

    /// Vehículos activos; si no hay ninguno responde not found
    pub async fn get_all_active_vehicles(&self) -> Result<Vec<VehicleDto>, AppError> {
        let vehicles = self.vehicle_repository.list_active().await?;
        if vehicles.is_empty() {
            return Err(AppError::NotFound(
                "No se encontró la lista de vehículos.".to_string(),
            ));
        }
        Ok(vehicles.into_iter().map(VehicleDto::from).collect())
    }

    pub async fn get_vehicle_by_license_plate(
        &self,
        license_plate: &str,
    ) -> Result<VehicleDto, AppError> {
        let plate = normalize_license_plate(license_plate);
        let vehicle = self
            .vehicle_repository
            .get_by_license_plate(&plate)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        Ok(VehicleDto::from(vehicle))
    }

    pub async fn get_vehicles_by_user_id(&self, user_id: i32) -> Result<Vec<VehicleDto>, AppError> {
        let vehicles = self.vehicle_repository.get_by_user_id(user_id).await?;
        Ok(vehicles.into_iter().map(VehicleDto::from).collect())
    }

    /// Alta de vehículo: patente única, arranca con todos los asientos
    /// disponibles y se le avisa al dueño por email.
    pub async fn create_vehicle(&self, request: VehicleRequest) -> Result<VehicleDto, AppError> {
        request.validate()?;

        let license_plate = normalize_license_plate(&request.license_plate);

        let exists = self
            .vehicle_repository
            .exists_by_license_plate(&license_plate)
            .await?;
        if exists {
            return Err(AppError::Conflict(
                "Ya existe un vehículo con esa patente.".to_string(),
            ));
        }

        let vehicle = Vehicle {
            license_plate,
            user_id: request.user_id,
            name: request.name,
            image_path: request.image_path,
            description: request.description,
            driver_name: request.driver_name,
            vehicle_type: request.vehicle_type,
            year_model: request.year_model,
            capacity: request.capacity,
            available: request.capacity,
            is_active: EntityState::Active,
            created_at: chrono::Utc::now(),
        };

        let stored = self.vehicle_repository.add(&vehicle).await?;

        if let Some(user) = self.user_repository.get_by_id(stored.user_id).await? {
            let (subject, body) =
                notifications::vehicle_created(&stored.name, &stored.license_plate);
            if let Err(e) = self.email_service.send_email(&user.email, &subject, &body).await {
                log::warn!("No se pudo enviar el aviso de vehículo creado: {}", e);
            }
        }

        Ok(VehicleDto::from(stored))
    }

    /// Actualización del dueño; si cambia la patente se chequea que la nueva
    /// no exista.
    pub async fn update_vehicle(
        &self,
        license_plate: &str,
        request: VehicleRequest,
    ) -> Result<(), AppError> {
        request.validate()?;

        let current_plate = normalize_license_plate(license_plate);
        let new_plate = normalize_license_plate(&request.license_plate);

        let mut vehicle = self
            .vehicle_repository
            .get_by_license_plate(&current_plate)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        if current_plate != new_plate {
            let exists = self
                .vehicle_repository
                .exists_by_license_plate(&new_plate)
                .await?;
            if exists {
                return Err(AppError::Conflict(
                    "Ya existe un vehículo con esa patente.".to_string(),
                ));
            }
        }

        vehicle.license_plate = new_plate;
        vehicle.name = request.name;
        vehicle.image_path = request.image_path.or(vehicle.image_path);
        vehicle.description = request.description.or(vehicle.description);
        vehicle.driver_name = request.driver_name;
        vehicle.vehicle_type = request.vehicle_type;
        vehicle.year_model = request.year_model;
        vehicle.capacity = request.capacity;

        self.vehicle_repository.update(&current_plate, &vehicle).await
    }

    /// Actualización administrativa; la patente es la clave primaria y no se
    /// reescribe.
    pub async fn admin_update_vehicle(
        &self,
        license_plate: &str,
        request: AdminVehicleUpdateRequest,
    ) -> Result<bool, AppError> {
        request.validate()?;

        let plate = normalize_license_plate(license_plate);
        let mut vehicle = match self.vehicle_repository.get_by_license_plate(&plate).await? {
            Some(vehicle) => vehicle,
            None => return Ok(false),
        };

        vehicle.name = request.name;
        vehicle.description = request.description;
        vehicle.capacity = request.capacity;
        vehicle.vehicle_type = request.vehicle_type;
        vehicle.driver_name = request.driver_name;
        vehicle.year_model = request.year_model;
        vehicle.image_path = request.image_path;
        vehicle.available = request.available;

        self.vehicle_repository.update(&plate, &vehicle).await?;
        Ok(true)
    }

    /// Toggle de estado del vehículo. Al desactivar se desactivan antes sus
    /// asociaciones evento-vehículo.
    pub async fn toggle_status(&self, license_plate: &str) -> Result<bool, AppError> {
        let plate = normalize_license_plate(license_plate);

        let current_state = self
            .vehicle_repository
            .get_entity_state(&plate)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        if current_state.is_active() {
            let event_vehicle_ids = self
                .vehicle_repository
                .get_event_vehicle_ids(&plate)
                .await?;
            for event_vehicle_id in event_vehicle_ids {
                self.event_vehicle_repository
                    .toggle_status(event_vehicle_id)
                    .await?;
            }
        }

        let new_state = self.vehicle_repository.toggle_status(&plate).await?;
        Ok(new_state.is_active())
    }
}
