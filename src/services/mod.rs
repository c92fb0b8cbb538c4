//! Business logic services

pub mod availability;
pub mod booking;
pub mod cancellation;
pub mod directory;
pub mod email;
pub mod jobs;
pub mod payments;
pub mod stats;

use crate::{
    config::{BookingConfig, EmailConfig, PaymentsConfig},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub repository: Repository,
    pub availability: availability::AvailabilityService,
    pub booking: booking::BookingService,
    pub cancellation: cancellation::CancellationService,
    pub directory: directory::DirectoryService,
    pub jobs: jobs::JobsService,
    pub stats: stats::StatsService,
    pub email: email::EmailService,
    pub payments: payments::PaymentsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        booking_config: BookingConfig,
        email_config: EmailConfig,
        payments_config: PaymentsConfig,
    ) -> Self {
        let email = email::EmailService::new(email_config);
        let payments = payments::PaymentsService::new(
            payments_config,
            booking_config.public_base_url.clone(),
        );

        Self {
            repository: repository.clone(),
            availability: availability::AvailabilityService::new(
                repository.clone(),
                booking_config.slot_step_minutes,
            ),
            booking: booking::BookingService::new(
                repository.clone(),
                payments.clone(),
                email.clone(),
            ),
            cancellation: cancellation::CancellationService::new(
                repository.clone(),
                payments.clone(),
                email.clone(),
            ),
            directory: directory::DirectoryService::new(repository.clone()),
            jobs: jobs::JobsService::new(
                repository.clone(),
                email.clone(),
                booking_config.notification_retention_days,
            ),
            stats: stats::StatsService::new(repository),
            email,
            payments,
        }
    }
}
