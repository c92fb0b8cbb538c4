//! Email service for booking confirmations, reminders and reports
//!
//! Delivery is best-effort everywhere: callers log failures and never let
//! them abort or roll back the triggering operation.

use lettre::{
    message::{header::ContentType, Mailbox, Message, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    SmtpTransport, Transport,
};
use std::str::FromStr;

use crate::{
    config::EmailConfig,
    error::{AppError, AppResult},
};

#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Booking confirmation sent to the client once payment is confirmed
    pub async fn send_booking_confirmation(
        &self,
        to: &str,
        client_name: &str,
        business_name: &str,
        address: Option<&str>,
        service_name: &str,
        date: &str,
        time: &str,
        code: &str,
        refund_hours: i32,
    ) -> AppResult<()> {
        let subject = format!("Reserva Confirmada - {}", business_name);
        let address_line = address
            .map(|a| format!("- Direccion: {}\n", a))
            .unwrap_or_default();
        let body = format!(
            r#"
Hola {client_name},

Tu reserva ha sido confirmada exitosamente.

Detalles de tu reserva:
- Servicio: {service_name}
- Fecha: {date}
- Hora: {time}
- Lugar: {business_name}
{address_line}
Codigo de reserva: {code}

Recuerda que puedes cancelar tu reserva hasta {refund_hours} horas antes para obtener reembolso completo.

Te esperamos!

{business_name}
"#
        );

        self.send_email(to, &subject, &body).await
    }

    /// Cancellation notice sent to the client
    pub async fn send_cancellation(
        &self,
        to: &str,
        client_name: &str,
        business_name: &str,
        service_name: &str,
        date: &str,
        time: &str,
        code: &str,
        reason: Option<&str>,
    ) -> AppResult<()> {
        let subject = format!("Reserva Cancelada - {}", business_name);
        let reason_line = reason
            .filter(|r| !r.is_empty())
            .map(|r| format!("Motivo: {}\n", r))
            .unwrap_or_default();
        let body = format!(
            r#"
Hola {client_name},

Tu reserva ha sido cancelada.

Detalles de la reserva cancelada:
- Servicio: {service_name}
- Fecha: {date}
- Hora: {time}
- Codigo: {code}

{reason_line}
Si la cancelacion fue realizada dentro del plazo permitido, el reembolso se procesara en los proximos dias.

Puedes hacer una nueva reserva cuando lo desees.

{business_name}
"#
        );

        self.send_email(to, &subject, &body).await
    }

    /// Next-day reminder sent to the client
    pub async fn send_reminder(
        &self,
        to: &str,
        client_name: &str,
        business_name: &str,
        address: Option<&str>,
        service_name: &str,
        date: &str,
        time: &str,
    ) -> AppResult<()> {
        let subject = "Recordatorio: Tu reserva es manana".to_string();
        let address_line = address
            .map(|a| format!("- Direccion: {}\n", a))
            .unwrap_or_default();
        let body = format!(
            r#"
Hola {client_name},

Te recordamos que tienes una reserva para manana.

Detalles:
- Servicio: {service_name}
- Fecha: {date}
- Hora: {time}
- Lugar: {business_name}
{address_line}
Te esperamos!

{business_name}
"#
        );

        self.send_email(to, &subject, &body).await
    }

    /// Refund confirmation sent to the client
    pub async fn send_refund_notice(
        &self,
        to: &str,
        client_name: &str,
        business_name: &str,
        code: &str,
        amount: &str,
    ) -> AppResult<()> {
        let subject = "Devolucion Procesada".to_string();
        let body = format!(
            r#"
Hola {client_name},

Te informamos que se ha procesado la devolucion de tu reserva cancelada.

Detalles:
- Codigo de reserva: {code}
- Monto devuelto: ${amount}

El reembolso sera acreditado en tu medio de pago en los proximos 5 a 10 dias habiles.

Gracias por tu comprension.

{business_name}
"#
        );

        self.send_email(to, &subject, &body).await
    }

    /// Daily report sent to the provider
    pub async fn send_daily_report(&self, to: &str, date: &str, report: &str) -> AppResult<()> {
        let subject = format!("Reporte Diario - {}", date);
        self.send_email(to, &subject, report).await
    }

    /// Generic email sending function
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
        let from_name = self
            .config
            .smtp_from_name
            .as_deref()
            .unwrap_or("Turnos");
        let from_mailbox = Mailbox::from_str(&format!("{} <{}>", from_name, self.config.smtp_from))
            .map_err(|e| AppError::Internal(format!("Invalid from address: {}", e)))?;

        let to_mailbox = Mailbox::from_str(to)
            .map_err(|e| AppError::Internal(format!("Invalid to address: {}", e)))?;

        let email = Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(format!(
                                r#"<html><body><pre>{}</pre></body></html>"#,
                                body.replace('\n', "<br>")
                            )),
                    ),
            )
            .map_err(|e| AppError::Internal(format!("Failed to build email: {}", e)))?;

        let mailer_builder = if self.config.smtp_use_tls {
            SmtpTransport::starttls_relay(&self.config.smtp_host)
                .map_err(|e| AppError::Internal(format!("Failed to create SMTP transport: {}", e)))?
        } else {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
        }
        .port(self.config.smtp_port);

        let mailer_builder = if let (Some(username), Some(password)) = (
            &self.config.smtp_username,
            &self.config.smtp_password,
        ) {
            mailer_builder.credentials(Credentials::new(
                username.clone(),
                password.clone(),
            ))
        } else {
            mailer_builder
        };

        let mailer = mailer_builder.build();

        mailer
            .send(&email)
            .map_err(|e| AppError::Internal(format!("Failed to send email: {}", e)))?;

        Ok(())
    }
}
