//! Directory service: providers, agendas, services, clients, notifications
//!
//! Thin pass-through over the repositories, plus the ownership checks the
//! dashboard endpoints need (every nested resource must belong to the
//! provider in the URL).

use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::agenda::{Agenda, CreateAgenda, UpdateAgenda},
    models::client::{Client, ClientDetails, CreateClient},
    models::notification::Notification,
    models::provider::{CreateProvider, Provider, ProviderPublic, UpdateProvider},
    models::service::{CreateService, Service, UpdateService},
    repository::Repository,
};

/// Everything the public booking page needs in one response
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingPage {
    pub provider: ProviderPublic,
    pub services: Vec<Service>,
    pub agendas: Vec<Agenda>,
}

#[derive(Clone)]
pub struct DirectoryService {
    repository: Repository,
}

impl DirectoryService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    // ---- Providers ----

    pub async fn create_provider(&self, data: &CreateProvider) -> AppResult<Provider> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.providers.create(data).await
    }

    pub async fn get_provider(&self, id: i32) -> AppResult<Provider> {
        self.repository.providers.get_by_id(id).await
    }

    pub async fn list_providers(&self) -> AppResult<Vec<Provider>> {
        self.repository.providers.list().await
    }

    pub async fn update_provider(&self, id: i32, data: &UpdateProvider) -> AppResult<Provider> {
        self.repository.providers.update(id, data).await
    }

    /// Public booking page for a slug: provider plus active services/agendas
    pub async fn booking_page(&self, slug: &str) -> AppResult<BookingPage> {
        let provider = self.repository.providers.get_public_by_slug(slug).await?;
        let services = self
            .repository
            .services
            .list_active_for_provider(provider.id)
            .await?;
        let agendas = self
            .repository
            .agendas
            .list_active_for_provider(provider.id)
            .await?;
        Ok(BookingPage {
            provider,
            services,
            agendas,
        })
    }

    // ---- Agendas ----

    pub async fn list_agendas(&self, provider_id: i32) -> AppResult<Vec<Agenda>> {
        self.repository.providers.get_by_id(provider_id).await?;
        self.repository.agendas.list_for_provider(provider_id).await
    }

    pub async fn create_agenda(&self, provider_id: i32, data: &CreateAgenda) -> AppResult<Agenda> {
        self.repository.providers.get_by_id(provider_id).await?;
        self.repository.agendas.create(provider_id, data).await
    }

    pub async fn update_agenda(
        &self,
        provider_id: i32,
        agenda_id: i32,
        data: &UpdateAgenda,
    ) -> AppResult<Agenda> {
        self.owned_agenda(provider_id, agenda_id).await?;
        self.repository.agendas.update(agenda_id, data).await
    }

    pub async fn delete_agenda(&self, provider_id: i32, agenda_id: i32) -> AppResult<()> {
        self.owned_agenda(provider_id, agenda_id).await?;
        self.repository.agendas.delete(agenda_id).await
    }

    async fn owned_agenda(&self, provider_id: i32, agenda_id: i32) -> AppResult<Agenda> {
        let agenda = self.repository.agendas.get_by_id(agenda_id).await?;
        if agenda.provider_id != provider_id {
            return Err(AppError::NotFound(format!(
                "Agenda with id {} not found",
                agenda_id
            )));
        }
        Ok(agenda)
    }

    // ---- Services ----

    pub async fn list_services(&self, provider_id: i32) -> AppResult<Vec<Service>> {
        self.repository.providers.get_by_id(provider_id).await?;
        self.repository.services.list_for_provider(provider_id).await
    }

    pub async fn create_service(&self, provider_id: i32, data: &CreateService) -> AppResult<Service> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.providers.get_by_id(provider_id).await?;
        self.repository.services.create(provider_id, data).await
    }

    pub async fn update_service(
        &self,
        provider_id: i32,
        service_id: i32,
        data: &UpdateService,
    ) -> AppResult<Service> {
        self.owned_service(provider_id, service_id).await?;
        self.repository.services.update(service_id, data).await
    }

    pub async fn delete_service(&self, provider_id: i32, service_id: i32) -> AppResult<()> {
        self.owned_service(provider_id, service_id).await?;
        self.repository.services.delete(service_id).await
    }

    async fn owned_service(&self, provider_id: i32, service_id: i32) -> AppResult<Service> {
        let service = self.repository.services.get_by_id(service_id).await?;
        if service.provider_id != provider_id {
            return Err(AppError::NotFound(format!(
                "Service with id {} not found",
                service_id
            )));
        }
        Ok(service)
    }

    // ---- Clients ----

    pub async fn list_clients(
        &self,
        provider_id: i32,
        search: Option<&str>,
    ) -> AppResult<Vec<Client>> {
        self.repository.providers.get_by_id(provider_id).await?;
        self.repository.clients.list_for_provider(provider_id, search).await
    }

    pub async fn create_client(&self, provider_id: i32, data: &CreateClient) -> AppResult<Client> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.providers.get_by_id(provider_id).await?;
        self.repository.clients.create(provider_id, data).await
    }

    pub async fn client_details(&self, provider_id: i32, client_id: i32) -> AppResult<ClientDetails> {
        self.owned_client(provider_id, client_id).await?;
        self.repository.clients.get_details(client_id).await
    }

    /// Toggle the blocked flag
    pub async fn toggle_client_blocked(&self, provider_id: i32, client_id: i32) -> AppResult<Client> {
        let client = self.owned_client(provider_id, client_id).await?;
        self.repository.clients.set_blocked(client_id, !client.blocked).await
    }

    async fn owned_client(&self, provider_id: i32, client_id: i32) -> AppResult<Client> {
        let client = self.repository.clients.get_by_id(client_id).await?;
        if client.provider_id != provider_id {
            return Err(AppError::NotFound(format!(
                "Client with id {} not found",
                client_id
            )));
        }
        Ok(client)
    }

    // ---- Notifications ----

    pub async fn list_notifications(&self, provider_id: i32) -> AppResult<Vec<Notification>> {
        self.repository.providers.get_by_id(provider_id).await?;
        self.repository.notifications.list_for_provider(provider_id).await
    }

    pub async fn mark_notification_read(&self, id: i32) -> AppResult<Notification> {
        self.repository.notifications.mark_read(id).await
    }
}
