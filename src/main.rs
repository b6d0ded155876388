mod config;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use services::email_service::{EmailService, HttpEmailService, LogEmailService};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚌 Massivo App - API de reservas de vehículos para eventos");
    info!("==========================================================");

    let config = EnvironmentConfig::default();

    // Inicializar base de datos
    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    // Aplicar migraciones pendientes
    sqlx::migrate!().run(&pool).await?;

    // Elegir el proveedor de mails: HTTP si está configurado, log en desarrollo
    let email_service: Arc<dyn EmailService> =
        match (config.mail_api_url.clone(), config.mail_api_key.clone()) {
            (Some(api_url), Some(api_key)) => {
                info!("✉️ Proveedor de mails configurado");
                Arc::new(HttpEmailService::new(
                    api_url,
                    api_key,
                    config.mail_from.clone(),
                ))
            }
            _ => {
                info!("✉️ Sin proveedor de mails: los envíos se loguean");
                Arc::new(LogEmailService)
            }
        };

    // Elegir CORS según los orígenes configurados
    let cors = if config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };

    let port = config.port;
    let app_state = AppState::new(pool, config, email_service);

    let app = Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", routes::auth_routes::create_auth_router())
        .nest("/api/user", routes::user_routes::create_user_router())
        .nest("/api/vehicle", routes::vehicle_routes::create_vehicle_router())
        .nest("/api/event", routes::event_routes::create_event_router())
        .nest(
            "/api/event-vehicle",
            routes::event_vehicle_routes::create_event_vehicle_router(),
        )
        .nest("/api/booking", routes::booking_routes::create_booking_router())
        .nest("/api/province", routes::location_routes::create_province_router())
        .nest("/api/city", routes::location_routes::create_city_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    let addr: SocketAddr = format!("0.0.0.0:{}", port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("👤 Endpoints - User:");
    info!("   POST /api/user/signup - Registro de usuario");
    info!("   POST /api/user/activate - Activación de cuenta");
    info!("   POST /api/user/recovery - Recuperación de contraseña");
    info!("   POST /api/user/reset-password - Reseteo con clave provisoria");
    info!("   PUT  /api/user/:id/toggle-status - Alta/baja en cascada");
    info!("🔑 Endpoints - Auth:");
    info!("   POST /api/auth/login - Login con email y contraseña");
    info!("🚗 Endpoints - Vehicle:");
    info!("   POST /api/vehicle - Crear vehículo");
    info!("   GET  /api/vehicle - Listar vehículos");
    info!("   GET  /api/vehicle/:patente - Obtener vehículo");
    info!("   PUT  /api/vehicle/:patente/toggle-status - Alta/baja en cascada");
    info!("🎫 Endpoints - Event / EventVehicle:");
    info!("   POST /api/event - Crear evento");
    info!("   POST /api/event-vehicle - Asociar vehículo a evento");
    info!("   GET  /api/event-vehicle/event/:id/active - Asociaciones activas");
    info!("📝 Endpoints - Booking:");
    info!("   POST /api/booking - Crear reserva");
    info!("   DELETE /api/booking/:id - Cancelar reserva");
    info!("   PUT  /api/booking/:id/complete - Completar reserva");
    info!("   POST /api/booking/notify-upcoming - Recordatorios de viajes");
    info!("📍 Endpoints - Location:");
    info!("   GET  /api/province - Listar provincias");
    info!("   GET  /api/city/province/:id - Ciudades por provincia");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "service": "massivo-api",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
