//! API handlers for the Turnos REST endpoints
//!
//! Authentication is handled outside this service (reverse proxy / gateway);
//! the public booking endpoints take no credentials at all.

pub mod agendas;
pub mod clients;
pub mod health;
pub mod jobs;
pub mod notifications;
pub mod openapi;
pub mod providers;
pub mod public;
pub mod reservations;
pub mod services;
pub mod stats;
