//! Repository layer for database operations

pub mod agendas;
pub mod clients;
pub mod notifications;
pub mod providers;
pub mod reservations;
pub mod services;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub providers: providers::ProvidersRepository,
    pub agendas: agendas::AgendasRepository,
    pub services: services::ServicesRepository,
    pub clients: clients::ClientsRepository,
    pub reservations: reservations::ReservationsRepository,
    pub notifications: notifications::NotificationsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            providers: providers::ProvidersRepository::new(pool.clone()),
            agendas: agendas::AgendasRepository::new(pool.clone()),
            services: services::ServicesRepository::new(pool.clone()),
            clients: clients::ClientsRepository::new(pool.clone()),
            reservations: reservations::ReservationsRepository::new(pool.clone()),
            notifications: notifications::NotificationsRepository::new(pool.clone()),
            pool,
        }
    }
}
