//! Dobles de prueba en memoria para los servicios
//!
//! Un `TestStore` compartido hace de base de datos; cada repositorio mock
//! opera sobre las mismas tablas, igual que las implementaciones Postgres.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use crate::models::booking::Booking;
use crate::models::enums::{BookingStatus, EntityState, EventType, PaymentStatus, Role, VehicleType};
use crate::models::event::Event;
use crate::models::event_vehicle::{EventVehicle, EventVehicleDetail};
use crate::models::payment::Payment;
use crate::models::user::User;
use crate::models::vehicle::Vehicle;
use crate::repositories::booking_repository::{BookingRepository, UpcomingBooking};
use crate::repositories::event_repository::EventRepository;
use crate::repositories::event_vehicle_repository::EventVehicleRepository;
use crate::repositories::payment_repository::PaymentRepository;
use crate::repositories::user_repository::UserRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::email_service::EmailService;
use crate::utils::errors::AppError;

#[derive(Default)]
pub struct TestStore {
    pub users: Mutex<Vec<User>>,
    pub vehicles: Mutex<Vec<Vehicle>>,
    pub events: Mutex<Vec<Event>>,
    pub event_vehicles: Mutex<Vec<EventVehicle>>,
    pub bookings: Mutex<Vec<Booking>>,
    pub payments: Mutex<Vec<Payment>>,
    pub sent_emails: Mutex<Vec<(String, String)>>,
}

impl TestStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn insert_user(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }

    pub fn user(&self, id: i32) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }

    pub fn insert_vehicle(&self, vehicle: Vehicle) {
        self.vehicles.lock().unwrap().push(vehicle);
    }

    pub fn vehicle(&self, license_plate: &str) -> Option<Vehicle> {
        self.vehicles
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.license_plate == license_plate)
            .cloned()
    }

    pub fn insert_event(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }

    pub fn event(&self, id: i32) -> Option<Event> {
        self.events.lock().unwrap().iter().find(|e| e.id == id).cloned()
    }

    pub fn insert_event_vehicle(&self, event_vehicle: EventVehicle) {
        self.event_vehicles.lock().unwrap().push(event_vehicle);
    }

    pub fn event_vehicle(&self, id: i32) -> Option<EventVehicle> {
        self.event_vehicles
            .lock()
            .unwrap()
            .iter()
            .find(|ev| ev.id == id)
            .cloned()
    }

    pub fn booking(&self, id: i32) -> Option<Booking> {
        self.bookings.lock().unwrap().iter().find(|b| b.id == id).cloned()
    }

    pub fn payment(&self, id: i32) -> Option<Payment> {
        self.payments.lock().unwrap().iter().find(|p| p.id == id).cloned()
    }

    pub fn emails_sent(&self) -> Vec<(String, String)> {
        self.sent_emails.lock().unwrap().clone()
    }
}

pub fn fixture_user(id: i32, email: &str) -> User {
    User {
        id,
        first_name: "Ana".to_string(),
        last_name: "Gómez".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1990, 5, 1).unwrap(),
        identification_number: format!("3012345{}", id),
        email: email.to_string(),
        password: "$2b$04$invalido".to_string(),
        city_id: 1,
        province_id: 1,
        role: Role::Customer,
        is_active: EntityState::Active,
        recovery_code: None,
        must_change_password: false,
        created_at: Utc::now(),
    }
}

pub fn fixture_vehicle(license_plate: &str, user_id: i32) -> Vehicle {
    Vehicle {
        license_plate: license_plate.to_string(),
        user_id,
        name: "Combi 19".to_string(),
        image_path: None,
        description: None,
        driver_name: "Carlos Pérez".to_string(),
        vehicle_type: VehicleType::Minibus,
        year_model: 2019,
        capacity: 20,
        available: 20,
        is_active: EntityState::Active,
        created_at: Utc::now(),
    }
}

pub fn fixture_event(id: i32, user_id: i32) -> Event {
    Event {
        id,
        name: "Recital en el estadio".to_string(),
        description: "Ida y vuelta".to_string(),
        event_date: Utc::now() + chrono::Duration::days(7),
        event_type: EventType::Recital,
        city_id: 1,
        image: None,
        user_id,
        is_active: EntityState::Active,
        created_at: Utc::now(),
    }
}

pub fn fixture_event_vehicle(id: i32, event_id: i32, license_plate: &str) -> EventVehicle {
    EventVehicle {
        id,
        event_id,
        license_plate: license_plate.to_string(),
        date: Utc::now() + chrono::Duration::days(7),
        price: 1500,
        description: "Salida 8hs desde la terminal".to_string(),
        is_active: EntityState::Active,
        created_at: Utc::now(),
    }
}

pub struct InMemoryUserRepository {
    store: Arc<TestStore>,
}

impl InMemoryUserRepository {
    pub fn new(store: Arc<TestStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.store.users.lock().unwrap().clone())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        Ok(self.store.user(id))
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .store
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        Ok(self.store.users.lock().unwrap().iter().any(|u| u.email == email))
    }

    async fn exists_by_identification_number(&self, dni: &str) -> Result<bool, AppError> {
        Ok(self
            .store
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.identification_number == dni))
    }

    async fn add(&self, user: &User) -> Result<User, AppError> {
        let mut users = self.store.users.lock().unwrap();
        let mut stored = user.clone();
        stored.id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        users.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, user: &User) -> Result<(), AppError> {
        let mut users = self.store.users.lock().unwrap();
        if let Some(existing) = users.iter_mut().find(|u| u.id == user.id) {
            *existing = user.clone();
        }
        Ok(())
    }

    async fn get_entity_state(&self, id: i32) -> Result<Option<EntityState>, AppError> {
        Ok(self.store.user(id).map(|u| u.is_active))
    }

    async fn toggle_status(&self, id: i32) -> Result<EntityState, AppError> {
        let mut users = self.store.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        user.is_active = user.is_active.toggled();
        Ok(user.is_active)
    }

    async fn get_user_vehicle_license_plates(&self, user_id: i32) -> Result<Vec<String>, AppError> {
        Ok(self
            .store
            .vehicles
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.user_id == user_id)
            .map(|v| v.license_plate.clone())
            .collect())
    }

    async fn get_user_event_ids(&self, user_id: i32) -> Result<Vec<i32>, AppError> {
        Ok(self
            .store
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id)
            .map(|e| e.id)
            .collect())
    }

    async fn is_admin(&self, user_id: i32) -> Result<bool, AppError> {
        Ok(matches!(self.store.user(user_id), Some(u) if u.role == Role::Admin))
    }
}

pub struct InMemoryVehicleRepository {
    store: Arc<TestStore>,
}

impl InMemoryVehicleRepository {
    pub fn new(store: Arc<TestStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl VehicleRepository for InMemoryVehicleRepository {
    async fn list(&self) -> Result<Vec<Vehicle>, AppError> {
        Ok(self.store.vehicles.lock().unwrap().clone())
    }

    async fn list_active(&self) -> Result<Vec<Vehicle>, AppError> {
        Ok(self
            .store
            .vehicles
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.is_active.is_active())
            .cloned()
            .collect())
    }

    async fn get_by_license_plate(&self, license_plate: &str) -> Result<Option<Vehicle>, AppError> {
        Ok(self.store.vehicle(license_plate))
    }

    async fn get_by_user_id(&self, user_id: i32) -> Result<Vec<Vehicle>, AppError> {
        Ok(self
            .store
            .vehicles
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn exists_by_license_plate(&self, license_plate: &str) -> Result<bool, AppError> {
        Ok(self.store.vehicle(license_plate).is_some())
    }

    async fn add(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError> {
        self.store.vehicles.lock().unwrap().push(vehicle.clone());
        Ok(vehicle.clone())
    }

    async fn update(&self, license_plate: &str, vehicle: &Vehicle) -> Result<(), AppError> {
        let mut vehicles = self.store.vehicles.lock().unwrap();
        if let Some(existing) = vehicles.iter_mut().find(|v| v.license_plate == license_plate) {
            *existing = vehicle.clone();
        }
        Ok(())
    }

    async fn get_entity_state(
        &self,
        license_plate: &str,
    ) -> Result<Option<EntityState>, AppError> {
        Ok(self.store.vehicle(license_plate).map(|v| v.is_active))
    }

    async fn toggle_status(&self, license_plate: &str) -> Result<EntityState, AppError> {
        let mut vehicles = self.store.vehicles.lock().unwrap();
        let vehicle = vehicles
            .iter_mut()
            .find(|v| v.license_plate == license_plate)
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;
        vehicle.is_active = vehicle.is_active.toggled();
        Ok(vehicle.is_active)
    }

    async fn get_event_vehicle_ids(&self, license_plate: &str) -> Result<Vec<i32>, AppError> {
        Ok(self
            .store
            .event_vehicles
            .lock()
            .unwrap()
            .iter()
            .filter(|ev| ev.license_plate == license_plate)
            .map(|ev| ev.id)
            .collect())
    }

    async fn adjust_available(&self, license_plate: &str, delta: i32) -> Result<i32, AppError> {
        let mut vehicles = self.store.vehicles.lock().unwrap();
        let vehicle = vehicles
            .iter_mut()
            .find(|v| v.license_plate == license_plate)
            .ok_or_else(|| {
                AppError::Conflict("No hay asientos disponibles suficientes".to_string())
            })?;
        if vehicle.available + delta < 0 {
            return Err(AppError::Conflict(
                "No hay asientos disponibles suficientes".to_string(),
            ));
        }
        vehicle.available += delta;
        Ok(vehicle.available)
    }
}

pub struct InMemoryEventRepository {
    store: Arc<TestStore>,
}

impl InMemoryEventRepository {
    pub fn new(store: Arc<TestStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn list(&self) -> Result<Vec<Event>, AppError> {
        Ok(self.store.events.lock().unwrap().clone())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Event>, AppError> {
        Ok(self.store.event(id))
    }

    async fn get_by_user_id(&self, user_id: i32) -> Result<Vec<Event>, AppError> {
        Ok(self
            .store
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn add(&self, event: &Event) -> Result<Event, AppError> {
        let mut events = self.store.events.lock().unwrap();
        let mut stored = event.clone();
        stored.id = events.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        events.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, event: &Event) -> Result<(), AppError> {
        let mut events = self.store.events.lock().unwrap();
        if let Some(existing) = events.iter_mut().find(|e| e.id == event.id) {
            *existing = event.clone();
        }
        Ok(())
    }

    async fn get_entity_state(&self, id: i32) -> Result<Option<EntityState>, AppError> {
        Ok(self.store.event(id).map(|e| e.is_active))
    }

    async fn toggle_status(&self, id: i32) -> Result<EntityState, AppError> {
        let mut events = self.store.events.lock().unwrap();
        let event = events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;
        event.is_active = event.is_active.toggled();
        Ok(event.is_active)
    }

    async fn get_event_vehicle_ids(&self, event_id: i32) -> Result<Vec<i32>, AppError> {
        Ok(self
            .store
            .event_vehicles
            .lock()
            .unwrap()
            .iter()
            .filter(|ev| ev.event_id == event_id)
            .map(|ev| ev.id)
            .collect())
    }
}

pub struct InMemoryEventVehicleRepository {
    store: Arc<TestStore>,
}

impl InMemoryEventVehicleRepository {
    pub fn new(store: Arc<TestStore>) -> Self {
        Self { store }
    }

    fn detail(&self, ev: &EventVehicle) -> EventVehicleDetail {
        let vehicle = self.store.vehicle(&ev.license_plate);
        let owner = vehicle
            .as_ref()
            .and_then(|v| self.store.user(v.user_id));
        EventVehicleDetail {
            id: ev.id,
            event_id: ev.event_id,
            license_plate: ev.license_plate.clone(),
            date: ev.date,
            price: ev.price,
            description: ev.description.clone(),
            is_active: ev.is_active,
            vehicle_name: vehicle.as_ref().map(|v| v.name.clone()).unwrap_or_default(),
            driver_name: vehicle
                .as_ref()
                .map(|v| v.driver_name.clone())
                .unwrap_or_default(),
            capacity: vehicle.as_ref().map(|v| v.capacity).unwrap_or_default(),
            available: vehicle.as_ref().map(|v| v.available).unwrap_or_default(),
            owner_first_name: owner
                .as_ref()
                .map(|u| u.first_name.clone())
                .unwrap_or_default(),
            owner_last_name: owner
                .as_ref()
                .map(|u| u.last_name.clone())
                .unwrap_or_default(),
            owner_city: "Ciudad de prueba".to_string(),
        }
    }
}

#[async_trait]
impl EventVehicleRepository for InMemoryEventVehicleRepository {
    async fn list(&self) -> Result<Vec<EventVehicle>, AppError> {
        Ok(self.store.event_vehicles.lock().unwrap().clone())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<EventVehicle>, AppError> {
        Ok(self.store.event_vehicle(id))
    }

    async fn get_detail_by_id(&self, id: i32) -> Result<Option<EventVehicleDetail>, AppError> {
        Ok(self.store.event_vehicle(id).map(|ev| self.detail(&ev)))
    }

    async fn get_by_event(&self, event_id: i32) -> Result<Vec<EventVehicleDetail>, AppError> {
        let rows = self.store.event_vehicles.lock().unwrap().clone();
        Ok(rows
            .iter()
            .filter(|ev| ev.event_id == event_id)
            .map(|ev| self.detail(ev))
            .collect())
    }

    async fn get_active_by_event(
        &self,
        event_id: i32,
    ) -> Result<Vec<EventVehicleDetail>, AppError> {
        let rows = self.store.event_vehicles.lock().unwrap().clone();
        Ok(rows
            .iter()
            .filter(|ev| ev.event_id == event_id && ev.is_active.is_active())
            .map(|ev| self.detail(ev))
            .collect())
    }

    async fn get_by_event_and_license_plate(
        &self,
        event_id: i32,
        license_plate: &str,
    ) -> Result<Option<EventVehicle>, AppError> {
        Ok(self
            .store
            .event_vehicles
            .lock()
            .unwrap()
            .iter()
            .find(|ev| ev.event_id == event_id && ev.license_plate == license_plate)
            .cloned())
    }

    async fn get_by_user_id(&self, user_id: i32) -> Result<Vec<EventVehicle>, AppError> {
        let plates: Vec<String> = self
            .store
            .vehicles
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.user_id == user_id)
            .map(|v| v.license_plate.clone())
            .collect();

        Ok(self
            .store
            .event_vehicles
            .lock()
            .unwrap()
            .iter()
            .filter(|ev| plates.contains(&ev.license_plate))
            .cloned()
            .collect())
    }

    async fn add(&self, event_vehicle: &EventVehicle) -> Result<EventVehicle, AppError> {
        let mut rows = self.store.event_vehicles.lock().unwrap();
        let mut stored = event_vehicle.clone();
        stored.id = rows.iter().map(|ev| ev.id).max().unwrap_or(0) + 1;
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, event_vehicle: &EventVehicle) -> Result<(), AppError> {
        let mut rows = self.store.event_vehicles.lock().unwrap();
        if let Some(existing) = rows.iter_mut().find(|ev| ev.id == event_vehicle.id) {
            *existing = event_vehicle.clone();
        }
        Ok(())
    }

    async fn toggle_status(&self, id: i32) -> Result<EntityState, AppError> {
        let mut rows = self.store.event_vehicles.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|ev| ev.id == id)
            .ok_or_else(|| AppError::NotFound("EventVehicle not found".to_string()))?;
        row.is_active = row.is_active.toggled();
        Ok(row.is_active)
    }
}

pub struct InMemoryBookingRepository {
    store: Arc<TestStore>,
}

impl InMemoryBookingRepository {
    pub fn new(store: Arc<TestStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn list(&self) -> Result<Vec<Booking>, AppError> {
        Ok(self.store.bookings.lock().unwrap().clone())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Booking>, AppError> {
        Ok(self.store.booking(id))
    }

    async fn get_by_user(&self, user_id: i32) -> Result<Vec<Booking>, AppError> {
        Ok(self
            .store
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn add(&self, booking: &Booking) -> Result<Booking, AppError> {
        let mut bookings = self.store.bookings.lock().unwrap();
        let mut stored = booking.clone();
        stored.id = bookings.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        bookings.push(stored.clone());
        Ok(stored)
    }

    async fn update_status(&self, id: i32, status: BookingStatus) -> Result<(), AppError> {
        let mut bookings = self.store.bookings.lock().unwrap();
        if let Some(booking) = bookings.iter_mut().find(|b| b.id == id) {
            booking.status = status;
        }
        Ok(())
    }

    async fn list_upcoming(&self, hours: i64) -> Result<Vec<UpcomingBooking>, AppError> {
        let now = Utc::now();
        let limit = now + chrono::Duration::hours(hours);

        let bookings = self.store.bookings.lock().unwrap().clone();
        let mut upcoming = Vec::new();
        for booking in bookings {
            if booking.status != BookingStatus::Confirmed {
                continue;
            }
            let Some(ev) = self.store.event_vehicle(booking.event_vehicle_id) else {
                continue;
            };
            if ev.date <= now || ev.date > limit {
                continue;
            }
            let Some(user) = self.store.user(booking.user_id) else {
                continue;
            };
            let event_name = self
                .store
                .event(ev.event_id)
                .map(|e| e.name)
                .unwrap_or_default();

            upcoming.push(UpcomingBooking {
                booking_id: booking.id,
                seats: booking.seats,
                date: ev.date,
                user_email: user.email,
                user_first_name: user.first_name,
                event_name,
            });
        }

        Ok(upcoming)
    }
}

pub struct InMemoryPaymentRepository {
    store: Arc<TestStore>,
}

impl InMemoryPaymentRepository {
    pub fn new(store: Arc<TestStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn get_by_id(&self, id: i32) -> Result<Option<Payment>, AppError> {
        Ok(self.store.payment(id))
    }

    async fn add(&self, payment: &Payment) -> Result<Payment, AppError> {
        let mut payments = self.store.payments.lock().unwrap();
        let mut stored = payment.clone();
        stored.id = payments.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        payments.push(stored.clone());
        Ok(stored)
    }

    async fn update_status(&self, id: i32, status: PaymentStatus) -> Result<(), AppError> {
        let mut payments = self.store.payments.lock().unwrap();
        if let Some(payment) = payments.iter_mut().find(|p| p.id == id) {
            payment.payment_status = status;
        }
        Ok(())
    }
}

/// Email service que registra los envíos en el store
pub struct RecordingEmailService {
    store: Arc<TestStore>,
}

impl RecordingEmailService {
    pub fn new(store: Arc<TestStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl EmailService for RecordingEmailService {
    async fn send_email(&self, to: &str, subject: &str, _html_body: &str) -> Result<(), AppError> {
        self.store
            .sent_emails
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string()));
        Ok(())
    }
}
