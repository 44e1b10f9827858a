//! Native client trait for inter-module communication
//!
//! This trait defines the API that other modules use to interact with feedback settings.
//! NO HTTP - direct function calls for performance.

use super::{
    error::FeedbackSettingsError,
    model::{
        FeedbackSettings, FeedbackSettingsPatch, NewFeedbackSettings, PageRequest, SearchFilter,
        SearchResult,
    },
};
use async_trait::async_trait;
use uuid::Uuid;

/// Feedback settings API for inter-module communication
#[async_trait]
pub trait FeedbackSettingsApi: Send + Sync {
    /// Create settings for a person, optionally as representative of an organization
    async fn create_settings(
        &self,
        new_settings: NewFeedbackSettings,
    ) -> Result<FeedbackSettings, FeedbackSettingsError>;

    /// Reconcile the channel set of existing settings
    async fn update_settings(
        &self,
        id: Uuid,
        patch: FeedbackSettingsPatch,
    ) -> Result<FeedbackSettings, FeedbackSettingsError>;

    /// Get settings by id
    async fn get_settings(&self, id: Uuid) -> Result<FeedbackSettings, FeedbackSettingsError>;

    /// Paginated search
    async fn search_settings(
        &self,
        filter: SearchFilter,
        page: PageRequest,
    ) -> Result<SearchResult, FeedbackSettingsError>;

    /// Delete settings by id
    async fn delete_settings(&self, id: Uuid) -> Result<(), FeedbackSettingsError>;
}
