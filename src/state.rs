//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Acá se arman los servicios con sus
//! repositorios Postgres y el colaborador de emails.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::booking_repository::PgBookingRepository;
use crate::repositories::event_repository::PgEventRepository;
use crate::repositories::event_vehicle_repository::PgEventVehicleRepository;
use crate::repositories::location_repository::{PgCityRepository, PgProvinceRepository};
use crate::repositories::payment_repository::PgPaymentRepository;
use crate::repositories::user_repository::PgUserRepository;
use crate::repositories::vehicle_repository::PgVehicleRepository;
use crate::services::auth_service::AuthService;
use crate::services::booking_service::BookingService;
use crate::services::email_service::EmailService;
use crate::services::event_service::EventService;
use crate::services::event_vehicle_service::EventVehicleService;
use crate::services::location_service::LocationService;
use crate::services::user_service::UserService;
use crate::services::vehicle_service::VehicleService;
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub jwt_config: JwtConfig,
    pub user_service: Arc<UserService>,
    pub vehicle_service: Arc<VehicleService>,
    pub event_service: Arc<EventService>,
    pub event_vehicle_service: Arc<EventVehicleService>,
    pub booking_service: Arc<BookingService>,
    pub location_service: Arc<LocationService>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(
        pool: PgPool,
        config: EnvironmentConfig,
        email_service: Arc<dyn EmailService>,
    ) -> Self {
        let jwt_config = JwtConfig::from(&config);

        let user_repository = Arc::new(PgUserRepository::new(pool.clone()));
        let vehicle_repository = Arc::new(PgVehicleRepository::new(pool.clone()));
        let event_repository = Arc::new(PgEventRepository::new(pool.clone()));
        let event_vehicle_repository = Arc::new(PgEventVehicleRepository::new(pool.clone()));
        let booking_repository = Arc::new(PgBookingRepository::new(pool.clone()));
        let payment_repository = Arc::new(PgPaymentRepository::new(pool.clone()));
        let province_repository = Arc::new(PgProvinceRepository::new(pool.clone()));
        let city_repository = Arc::new(PgCityRepository::new(pool.clone()));

        let user_service = Arc::new(UserService::new(
            user_repository.clone(),
            vehicle_repository.clone(),
            event_repository.clone(),
            event_vehicle_repository.clone(),
            email_service.clone(),
        ));

        let vehicle_service = Arc::new(VehicleService::new(
            vehicle_repository.clone(),
            user_repository.clone(),
            event_vehicle_repository.clone(),
            email_service.clone(),
        ));

        let event_service = Arc::new(EventService::new(
            event_repository.clone(),
            event_vehicle_repository.clone(),
        ));

        let event_vehicle_service = Arc::new(EventVehicleService::new(
            event_vehicle_repository.clone(),
            event_repository.clone(),
            vehicle_repository.clone(),
        ));

        let booking_service = Arc::new(BookingService::new(
            booking_repository,
            event_vehicle_repository,
            vehicle_repository,
            payment_repository,
            user_repository.clone(),
            email_service,
        ));

        let location_service = Arc::new(LocationService::new(province_repository, city_repository));

        let auth_service = Arc::new(AuthService::new(user_repository, jwt_config.clone()));

        Self {
            pool,
            config,
            jwt_config,
            user_service,
            vehicle_service,
            event_service,
            event_vehicle_service,
            booking_service,
            location_service,
            auth_service,
        }
    }
}
