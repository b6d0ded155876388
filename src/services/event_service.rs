//! Servicio de eventos

use std::sync::Arc;

use validator::Validate;

use crate::dto::event_dto::{EventDto, EventRequest};
use crate::models::enums::EntityState;
use crate::models::event::Event;
use crate::repositories::event_repository::EventRepository;
use crate::repositories::event_vehicle_repository::EventVehicleRepository;
use crate::utils::errors::AppError;

pub struct EventService {
    event_repository: Arc<dyn EventRepository>,
    event_vehicle_repository: Arc<dyn EventVehicleRepository>,
}

impl EventService {
    pub fn new(
        event_repository: Arc<dyn EventRepository>,
        event_vehicle_repository: Arc<dyn EventVehicleRepository>,
    ) -> Self {
        Self {
            event_repository,
            event_vehicle_repository,
        }
    }

    pub async fn get_all_events(&self) -> Result<Vec<EventDto>, AppError> {
        let events = self.event_repository.list().await?;
        Ok(events.into_iter().map(EventDto::from).collect())
    }

    pub async fn get_event_by_id(&self, id: i32) -> Result<EventDto, AppError> {
        let event = self
            .event_repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Evento no encontrado".to_string()))?;

        Ok(EventDto::from(event))
    }

    pub async fn get_events_by_user_id(&self, user_id: i32) -> Result<Vec<EventDto>, AppError> {
        let events = self.event_repository.get_by_user_id(user_id).await?;
        Ok(events.into_iter().map(EventDto::from).collect())
    }

    pub async fn create_event(&self, request: EventRequest) -> Result<EventDto, AppError> {
        request.validate()?;

        let event = Event {
            id: 0,
            name: request.name,
            description: request.description,
            event_date: request.event_date,
            event_type: request.event_type,
            city_id: request.city_id,
            image: request.image,
            user_id: request.user_id,
            is_active: EntityState::Active,
            created_at: chrono::Utc::now(),
        };

        let stored = self.event_repository.add(&event).await?;
        Ok(EventDto::from(stored))
    }

    pub async fn update_event(&self, id: i32, request: EventRequest) -> Result<(), AppError> {
        request.validate()?;

        let mut event = self
            .event_repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Evento no encontrado".to_string()))?;

        event.name = request.name;
        event.description = request.description;
        event.event_date = request.event_date;
        event.event_type = request.event_type;
        event.city_id = request.city_id;
        event.image = request.image.or(event.image);

        self.event_repository.update(&event).await
    }

    /// Toggle de estado del evento. Al desactivar se desactivan antes sus
    /// asociaciones evento-vehículo.
    pub async fn toggle_status(&self, id: i32) -> Result<bool, AppError> {
        let current_state = self
            .event_repository
            .get_entity_state(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Evento no encontrado".to_string()))?;

        if current_state.is_active() {
            let event_vehicle_ids = self.event_repository.get_event_vehicle_ids(id).await?;
            for event_vehicle_id in event_vehicle_ids {
                self.event_vehicle_repository
                    .toggle_status(event_vehicle_id)
                    .await?;
            }
        }

        let new_state = self.event_repository.toggle_status(id).await?;
        Ok(new_state.is_active())
    }
}
