//! Servicio de emails
//!
//! Las notificaciones salen por un proveedor transaccional HTTP. En
//! desarrollo se usa la implementación que solo loguea.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use crate::utils::errors::AppError;

/// Colaborador de envío de emails inyectado en los servicios
#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send_email(&self, to: &str, subject: &str, html_body: &str) -> Result<(), AppError>;
}

/// Implementación contra la API HTTP del proveedor de mails
pub struct HttpEmailService {
    client: Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl HttpEmailService {
    pub fn new(api_url: String, api_key: String, from: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
            from,
        }
    }
}

#[async_trait]
impl EmailService for HttpEmailService {
    async fn send_email(&self, to: &str, subject: &str, html_body: &str) -> Result<(), AppError> {
        let payload = json!({
            "from": self.from,
            "to": to,
            "subject": subject,
            "html": html_body,
        });

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Error enviando email: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "El proveedor de mails respondió {}: {}",
                status, body
            )));
        }

        log::info!("Email enviado a {} ({})", to, subject);
        Ok(())
    }
}

/// Implementación para desarrollo: loguea en lugar de enviar
pub struct LogEmailService;

#[async_trait]
impl EmailService for LogEmailService {
    async fn send_email(&self, to: &str, subject: &str, _html_body: &str) -> Result<(), AppError> {
        log::info!("[dev] Email a {}: {}", to, subject);
        Ok(())
    }
}

/// Cuerpos de las notificaciones de la plataforma
pub mod notifications {
    /// Email de activación de cuenta con el código de recuperación
    pub fn account_activation(first_name: &str, recovery_code: &str) -> (String, String) {
        let subject = "🚀 Activación de cuenta en Massivo App".to_string();
        let body = format!(
            r#"
            <p>¡Hola {first_name}!</p>
            <p>Gracias por registrarte. Para activar tu cuenta, ingresá el siguiente código:</p>
            <p style='font-size: 18px; font-weight: bold;'>{recovery_code}</p>
            <p>⚠️ Si no te registraste, ignorá este mensaje.</p>
            <br/>
            <p>El equipo de soporte de Massivo App.</p>"#
        );
        (subject, body)
    }

    /// Email de recuperación de contraseña con la clave provisoria
    pub fn password_recovery(recovery_code: &str) -> (String, String) {
        let subject = "🔒 Recuperación de contraseña – Tu clave provisoria".to_string();
        let body = format!(
            r#"
            <p>Hola,</p>
            <p>Recibimos tu solicitud para restablecer tu contraseña.</p>
            <p><strong>Tu clave provisoria es:</strong> <span style='font-size:18px;'>{recovery_code} 🔑</span></p>
            <p>⚠️ Si no solicitaste este cambio, ignorá este mensaje.</p>
            <br/>
            <p>Saludos,<br/>El equipo de soporte de Massivo App.</p>"#
        );
        (subject, body)
    }

    /// Aviso al dueño de que su vehículo quedó registrado
    pub fn vehicle_created(vehicle_name: &str, license_plate: &str) -> (String, String) {
        let subject = "🚌 Tu vehículo fue registrado en Massivo App".to_string();
        let body = format!(
            r#"
            <p>¡Hola!</p>
            <p>Tu vehículo <strong>{vehicle_name}</strong> (patente <strong>{license_plate}</strong>) ya está registrado.</p>
            <p>Desde tu panel podés asociarlo a eventos y empezar a recibir reservas.</p>
            <br/>
            <p>El equipo de soporte de Massivo App.</p>"#
        );
        (subject, body)
    }

    /// Confirmación de reserva
    pub fn booking_confirmed(event_name: &str, seats: i32) -> (String, String) {
        let subject = "✅ Tu reserva en Massivo App está confirmada".to_string();
        let body = format!(
            r#"
            <p>¡Hola!</p>
            <p>Reservaste <strong>{seats}</strong> lugar(es) para <strong>{event_name}</strong>.</p>
            <p>Te vamos a avisar cuando se acerque la fecha del viaje.</p>
            <br/>
            <p>El equipo de soporte de Massivo App.</p>"#
        );
        (subject, body)
    }

    /// Recordatorio de viaje próximo
    pub fn upcoming_booking(first_name: &str, event_name: &str, date: &str) -> (String, String) {
        let subject = "⏰ Tu viaje con Massivo App está por salir".to_string();
        let body = format!(
            r#"
            <p>¡Hola {first_name}!</p>
            <p>Te recordamos que tu viaje para <strong>{event_name}</strong> sale el <strong>{date}</strong>.</p>
            <p>¡Buen viaje!</p>
            <br/>
            <p>El equipo de soporte de Massivo App.</p>"#
        );
        (subject, body)
    }

}
