//! Data models for the Turnos server

pub mod agenda;
pub mod client;
pub mod enums;
pub mod notification;
pub mod provider;
pub mod reservation;
pub mod service;

// Re-export commonly used types
pub use agenda::Agenda;
pub use client::Client;
pub use enums::{NotificationType, PaymentStatus, ReservationStatus};
pub use notification::Notification;
pub use provider::Provider;
pub use reservation::Reservation;
pub use service::Service;
