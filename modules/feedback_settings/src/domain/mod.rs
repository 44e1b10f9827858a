//! Domain layer - business logic and services

pub mod clock;
pub mod reconcile;
pub mod repository;
pub mod service;
pub mod validation;

pub use clock::{Clock, SystemClock};
pub use repository::{FeedbackSettingsRepository, Page, RepositoryError, RepositoryResult};
pub use service::Service;
