//! Servicio de asociaciones evento-vehículo

use std::sync::Arc;

use validator::Validate;

use crate::dto::event_vehicle_dto::{
    AddEventVehicleRequest, EventVehicleDetailDto, EventVehicleDto, UpdateEventVehicleRequest,
};
use crate::models::enums::EntityState;
use crate::models::event_vehicle::EventVehicle;
use crate::repositories::event_repository::EventRepository;
use crate::repositories::event_vehicle_repository::EventVehicleRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;
use crate::utils::validation::normalize_license_plate;

pub struct EventVehicleService {
    event_vehicle_repository: Arc<dyn EventVehicleRepository>,
    event_repository: Arc<dyn EventRepository>,
    vehicle_repository: Arc<dyn VehicleRepository>,
}

impl EventVehicleService {
    pub fn new(
        event_vehicle_repository: Arc<dyn EventVehicleRepository>,
        event_repository: Arc<dyn EventRepository>,
        vehicle_repository: Arc<dyn VehicleRepository>,
    ) -> Self {
        Self {
            event_vehicle_repository,
            event_repository,
            vehicle_repository,
        }
    }

    /// Asocia un vehículo a un evento. El par (evento, patente) es único.
    pub async fn add(&self, request: AddEventVehicleRequest) -> Result<EventVehicleDto, AppError> {
        request.validate()?;

        let license_plate = normalize_license_plate(&request.license_plate);

        let event = self
            .event_repository
            .get_by_id(request.event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Evento no encontrado".to_string()))?;

        let vehicle = self
            .vehicle_repository
            .get_by_license_plate(&license_plate)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let existing = self
            .event_vehicle_repository
            .get_by_event_and_license_plate(event.id, &vehicle.license_plate)
            .await?;
        if existing.is_some() {
            return Err(AppError::Conflict(
                "El vehículo ya está asociado a ese evento.".to_string(),
            ));
        }

        let event_vehicle = EventVehicle {
            id: 0,
            event_id: event.id,
            license_plate: vehicle.license_plate,
            date: request.date,
            price: request.price,
            description: request.description,
            is_active: EntityState::Active,
            created_at: chrono::Utc::now(),
        };

        let stored = self.event_vehicle_repository.add(&event_vehicle).await?;
        Ok(EventVehicleDto::from(stored))
    }

    pub async fn get_all(&self) -> Result<Vec<EventVehicleDto>, AppError> {
        let rows = self.event_vehicle_repository.list().await?;
        Ok(rows.into_iter().map(EventVehicleDto::from).collect())
    }

    pub async fn get_by_id(&self, id: i32) -> Result<EventVehicleDetailDto, AppError> {
        let detail = self
            .event_vehicle_repository
            .get_detail_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Asociación no encontrada".to_string()))?;

        Ok(EventVehicleDetailDto::from(detail))
    }

    pub async fn get_vehicles_by_event(
        &self,
        event_id: i32,
    ) -> Result<Vec<EventVehicleDetailDto>, AppError> {
        let rows = self.event_vehicle_repository.get_by_event(event_id).await?;
        Ok(rows.into_iter().map(EventVehicleDetailDto::from).collect())
    }

    pub async fn get_active_by_event(
        &self,
        event_id: i32,
    ) -> Result<Vec<EventVehicleDetailDto>, AppError> {
        let rows = self
            .event_vehicle_repository
            .get_active_by_event(event_id)
            .await?;
        Ok(rows.into_iter().map(EventVehicleDetailDto::from).collect())
    }

    pub async fn get_by_user_id(&self, user_id: i32) -> Result<Vec<EventVehicleDto>, AppError> {
        let rows = self.event_vehicle_repository.get_by_user_id(user_id).await?;
        Ok(rows.into_iter().map(EventVehicleDto::from).collect())
    }

    /// Actualiza la asociación. Solo puede hacerlo el dueño del vehículo.
    pub async fn update(
        &self,
        request: UpdateEventVehicleRequest,
        user_id: i32,
    ) -> Result<EventVehicleDto, AppError> {
        request.validate()?;

        let mut event_vehicle = self
            .event_vehicle_repository
            .get_by_id(request.event_vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Asociación no encontrada".to_string()))?;

        let vehicle = self
            .vehicle_repository
            .get_by_license_plate(&event_vehicle.license_plate)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        if vehicle.user_id != user_id {
            return Err(AppError::Forbidden(
                "El vehículo no pertenece al usuario.".to_string(),
            ));
        }

        event_vehicle.date = request.date;
        event_vehicle.price = request.price;
        event_vehicle.description = request.description;

        self.event_vehicle_repository.update(&event_vehicle).await?;
        Ok(EventVehicleDto::from(event_vehicle))
    }

    pub async fn toggle_status(&self, id: i32) -> Result<bool, AppError> {
        let new_state = self.event_vehicle_repository.toggle_status(id).await?;
        Ok(new_state.is_active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{
        fixture_event, fixture_event_vehicle, fixture_vehicle, InMemoryEventRepository,
        InMemoryEventVehicleRepository, InMemoryVehicleRepository, TestStore,
    };

    fn build_service(store: &Arc<TestStore>) -> EventVehicleService {
        EventVehicleService::new(
            Arc::new(InMemoryEventVehicleRepository::new(store.clone())),
            Arc::new(InMemoryEventRepository::new(store.clone())),
            Arc::new(InMemoryVehicleRepository::new(store.clone())),
        )
    }

    fn add_request(event_id: i32, plate: &str) -> AddEventVehicleRequest {
        AddEventVehicleRequest {
            event_id,
            license_plate: plate.to_string(),
            date: chrono::Utc::now() + chrono::Duration::days(7),
            price: 1500,
            description: "Salida 8hs".to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_requires_existing_event_and_vehicle() {
        let store = TestStore::new();
        store.insert_vehicle(fixture_vehicle("AB123CD", 1));

        let service = build_service(&store);

        // Evento inexistente
        let result = service.add(add_request(99, "AB123CD")).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        // Vehículo inexistente
        store.insert_event(fixture_event(5, 1));
        let result = service.add(add_request(5, "ZZ999ZZ")).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_add_duplicate_pair_conflicts() {
        let store = TestStore::new();
        store.insert_event(fixture_event(5, 1));
        store.insert_vehicle(fixture_vehicle("AB123CD", 1));

        let service = build_service(&store);

        service.add(add_request(5, "AB123CD")).await.unwrap();
        let result = service.add(add_request(5, "ab123cd")).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_only_by_owner() {
        let store = TestStore::new();
        store.insert_vehicle(fixture_vehicle("AB123CD", 1));
        store.insert_event_vehicle(fixture_event_vehicle(10, 5, "AB123CD"));

        let service = build_service(&store);

        let request = UpdateEventVehicleRequest {
            event_vehicle_id: 10,
            date: chrono::Utc::now() + chrono::Duration::days(14),
            price: 2000,
            description: "Nueva salida".to_string(),
        };

        // Otro usuario no puede tocar la asociación
        let result = service
            .update(
                UpdateEventVehicleRequest {
                    event_vehicle_id: 10,
                    date: request.date,
                    price: request.price,
                    description: request.description.clone(),
                },
                2,
            )
            .await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));

        // El dueño sí
        let dto = service.update(request, 1).await.unwrap();
        assert_eq!(dto.price, 2000);
        assert_eq!(store.event_vehicle(10).unwrap().price, 2000);
    }
}
