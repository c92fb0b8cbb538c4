//! Turnos appointment booking server
//!
//! A multi-tenant appointment booking platform: providers publish a public
//! booking page under a unique slug, customers book free slots without
//! authentication, and externally-triggered jobs handle reminders, no-show
//! marking and reporting.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
