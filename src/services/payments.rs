//! Payment processor client (MercadoPago-style checkout API)
//!
//! Each provider carries its own access token, so the client is stateless
//! apart from the HTTP connection pool and the configurable API base URL
//! (pointed at a stub in tests).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    config::PaymentsConfig,
    error::{AppError, AppResult},
};

/// A created checkout preference
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct PaymentPreference {
    /// Opaque preference identifier
    pub id: String,
    /// Redirect target for completing payment
    pub init_point: String,
}

#[derive(Clone)]
pub struct PaymentsService {
    client: reqwest::Client,
    api_base_url: String,
    public_base_url: String,
}

impl PaymentsService {
    pub fn new(config: PaymentsConfig, public_base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base_url: config.api_base_url,
            public_base_url,
        }
    }

    /// Create a checkout preference for the given amount, tagged with the
    /// reservation code as external correlation reference.
    pub async fn create_preference(
        &self,
        access_token: &str,
        title: &str,
        amount: Decimal,
        external_reference: &str,
    ) -> AppResult<PaymentPreference> {
        let body = json!({
            "items": [{
                "title": title,
                "quantity": 1,
                "unit_price": amount,
            }],
            "back_urls": {
                "success": format!("{}/reserva/exito?reserva={}", self.public_base_url, external_reference),
                "failure": format!("{}/reserva/fallo", self.public_base_url),
                "pending": format!("{}/reserva/pendiente", self.public_base_url),
            },
            "external_reference": external_reference,
        });

        let response = self
            .client
            .post(format!("{}/checkout/preferences", self.api_base_url))
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Payment processor unreachable: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "Payment processor rejected preference: HTTP {}",
                response.status()
            )));
        }

        response
            .json::<PaymentPreference>()
            .await
            .map_err(|e| AppError::ExternalService(format!("Malformed processor response: {}", e)))
    }

    /// Request a full refund of a processed payment
    pub async fn refund(&self, access_token: &str, payment_id: &str) -> AppResult<()> {
        let response = self
            .client
            .post(format!("{}/v1/payments/{}/refunds", self.api_base_url, payment_id))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Payment processor unreachable: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "Refund rejected: HTTP {}",
                response.status()
            )));
        }

        Ok(())
    }
}
