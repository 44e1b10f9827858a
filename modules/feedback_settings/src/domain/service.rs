//! Domain service - business logic orchestration

use super::clock::{Clock, SystemClock};
use super::reconcile;
use super::repository::{FeedbackSettingsRepository, RepositoryError};
use super::validation::{self, Violations};
use crate::contract::{
    FeedbackSettings, FeedbackSettingsError, FeedbackSettingsPatch, NewFeedbackSettings, PageMeta,
    PageRequest, SearchFilter, SearchResult,
};
use std::sync::Arc;
use uuid::Uuid;

impl From<RepositoryError> for FeedbackSettingsError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Duplicate(detail) => Self::Conflict { message: detail },
            RepositoryError::Stale(id) => Self::concurrently_modified(id),
            RepositoryError::Other(e) => {
                tracing::error!(error = ?e, "Feedback settings storage failure");
                Self::internal(e)
            }
        }
    }
}

/// Domain service for feedback settings management
pub struct Service {
    repo: Arc<dyn FeedbackSettingsRepository>,
    clock: Arc<dyn Clock>,
}

impl Service {
    /// Create a new service instance using the system clock
    pub fn new(repo: Arc<dyn FeedbackSettingsRepository>) -> Self {
        Self::with_clock(repo, Arc::new(SystemClock))
    }

    /// Create a new service instance with an explicit time source
    pub fn with_clock(repo: Arc<dyn FeedbackSettingsRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Create settings for a person, or for a person representing an organization.
    ///
    /// The existence check is a fast path; a concurrent insert of the same
    /// pair is rejected by storage and reported as the same conflict.
    pub async fn create_settings(
        &self,
        new_settings: NewFeedbackSettings,
    ) -> Result<FeedbackSettings, FeedbackSettingsError> {
        validation::validate_feedback_channels("channels", &new_settings.channels)?;

        let NewFeedbackSettings {
            person_id,
            organization_id,
            channels,
        } = new_settings;

        self.verify_non_existing_settings(person_id, organization_id)
            .await?;

        let settings = FeedbackSettings {
            id: Uuid::new_v4(),
            person_id,
            organization_id,
            channels,
            created: self.clock.now(),
            modified: None,
            version: 0,
        };

        let created = match self.repo.insert(&settings).await {
            Ok(created) => created,
            Err(RepositoryError::Duplicate(detail)) => {
                tracing::warn!(%person_id, ?organization_id, %detail, "Lost race creating feedback settings");
                return Err(FeedbackSettingsError::already_exists(
                    person_id,
                    organization_id,
                ));
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            id = %created.id,
            %person_id,
            ?organization_id,
            channels = created.channels.len(),
            "Created feedback settings"
        );
        Ok(created)
    }

    /// Reconcile the channel set of existing settings with the requested one
    pub async fn update_settings(
        &self,
        id: Uuid,
        patch: FeedbackSettingsPatch,
    ) -> Result<FeedbackSettings, FeedbackSettingsError> {
        if let Some(channels) = &patch.channels {
            validation::validate_feedback_channels("channels", channels)?;
        }

        let mut settings = self.find_existing(id).await?;

        let changed = reconcile::merge(&mut settings, patch.channels.as_deref(), self.clock.now());
        if !changed {
            tracing::debug!(%id, "No channel changes detected, nothing to persist");
            return Ok(settings);
        }

        let updated = self.repo.update(&settings).await?;
        tracing::info!(%id, channels = updated.channels.len(), "Updated feedback settings");
        Ok(updated)
    }

    /// Get settings by id
    pub async fn get_settings(&self, id: Uuid) -> Result<FeedbackSettings, FeedbackSettingsError> {
        tracing::debug!(%id, "Fetching feedback settings");
        self.find_existing(id).await
    }

    /// Paginated search with optional exact-match filters.
    ///
    /// A page past the last one yields no items but still reports the true
    /// totals.
    pub async fn search_settings(
        &self,
        filter: SearchFilter,
        page: PageRequest,
    ) -> Result<SearchResult, FeedbackSettingsError> {
        let mut violations = Violations::new();
        violations.at_least_one("page", i64::try_from(page.page).unwrap_or(i64::MAX));
        violations.at_least_one("limit", i64::try_from(page.limit).unwrap_or(i64::MAX));
        violations.into_result()?;

        tracing::debug!(?filter, page = page.page, limit = page.limit, "Searching feedback settings");

        // Storage pages are zero-based
        let found = self
            .repo
            .find_page(filter, page.page - 1, page.limit)
            .await?;

        let items = if page.page > found.total_pages {
            Vec::new()
        } else {
            found.items
        };

        Ok(SearchResult {
            meta: PageMeta {
                page: page.page,
                limit: page.limit,
                count: items.len() as u64,
                total_pages: found.total_pages,
                total_records: found.total_records,
            },
            items,
        })
    }

    /// Delete settings by id
    pub async fn delete_settings(&self, id: Uuid) -> Result<(), FeedbackSettingsError> {
        self.find_existing(id).await?;

        if !self.repo.delete(id).await? {
            return Err(FeedbackSettingsError::NotFound { id });
        }

        tracing::info!(%id, "Deleted feedback settings");
        Ok(())
    }

    // ===== Helper Methods =====

    async fn find_existing(&self, id: Uuid) -> Result<FeedbackSettings, FeedbackSettingsError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(FeedbackSettingsError::NotFound { id })
    }

    async fn verify_non_existing_settings(
        &self,
        person_id: Uuid,
        organization_id: Option<Uuid>,
    ) -> Result<(), FeedbackSettingsError> {
        if self.repo.exists(person_id, organization_id).await? {
            tracing::warn!(%person_id, ?organization_id, "Feedback settings already exist");
            return Err(FeedbackSettingsError::already_exists(
                person_id,
                organization_id,
            ));
        }
        Ok(())
    }
}
