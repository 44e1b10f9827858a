//! Module assembly and lifecycle
//!
//! Builds the storage, domain service, native client and REST router from a
//! database connection and typed configuration.

use crate::api::native::NativeClient;
use crate::config::Config;
use crate::contract::FeedbackSettingsApi;
use crate::domain::{Clock, FeedbackSettingsRepository, Service, SystemClock};
use crate::infra::storage::{Migrator, SeaOrmFeedbackSettingsRepository};
use anyhow::{Context, Result};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;

/// Feedback settings module
pub struct FeedbackSettingsModule {
    config: Config,
    service: Arc<Service>,
}

impl FeedbackSettingsModule {
    /// Wire the module on an open database connection
    pub async fn init(config: Config, db: DatabaseConnection) -> Result<Self> {
        if config.run_migrations {
            Self::migrate(&db).await?;
        }

        let repo = Arc::new(SeaOrmFeedbackSettingsRepository::new(Arc::new(db)));
        let module = Self::with_repository(config, repo);

        tracing::info!(service_id = %module.config.service_id, "Feedback settings module initialized");
        Ok(module)
    }

    /// Wire the module on any repository implementation
    pub fn with_repository(config: Config, repo: Arc<dyn FeedbackSettingsRepository>) -> Self {
        Self::with_clock(config, repo, Arc::new(SystemClock))
    }

    pub fn with_clock(
        config: Config,
        repo: Arc<dyn FeedbackSettingsRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            service: Arc::new(Service::with_clock(repo, clock)),
        }
    }

    /// Apply pending schema migrations
    pub async fn migrate(db: &DatabaseConnection) -> Result<()> {
        Migrator::up(db, None)
            .await
            .context("failed to run feedback settings migrations")?;
        tracing::info!("Feedback settings migrations completed");
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    /// In-process client for other modules
    pub fn client(&self) -> Arc<dyn FeedbackSettingsApi> {
        Arc::new(NativeClient::new(self.service.clone()))
    }

    /// REST routes, ready to be served or merged into a larger router
    pub fn router(&self) -> axum::Router {
        tracing::info!("Registering feedback settings REST routes");
        crate::api::rest::router(self.service.clone(), self.config.service_id.as_str())
    }
}
