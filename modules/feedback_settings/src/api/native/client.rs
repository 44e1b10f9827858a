//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{
    FeedbackSettings, FeedbackSettingsApi, FeedbackSettingsError, FeedbackSettingsPatch,
    NewFeedbackSettings, PageRequest, SearchFilter, SearchResult,
};
use crate::domain::Service;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Native client implementation that directly calls the domain service
///
/// Used by in-process consumers without HTTP overhead.
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    /// Create a new native client
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl FeedbackSettingsApi for NativeClient {
    async fn create_settings(
        &self,
        new_settings: NewFeedbackSettings,
    ) -> Result<FeedbackSettings, FeedbackSettingsError> {
        self.service.create_settings(new_settings).await
    }

    async fn update_settings(
        &self,
        id: Uuid,
        patch: FeedbackSettingsPatch,
    ) -> Result<FeedbackSettings, FeedbackSettingsError> {
        self.service.update_settings(id, patch).await
    }

    async fn get_settings(&self, id: Uuid) -> Result<FeedbackSettings, FeedbackSettingsError> {
        self.service.get_settings(id).await
    }

    async fn search_settings(
        &self,
        filter: SearchFilter,
        page: PageRequest,
    ) -> Result<SearchResult, FeedbackSettingsError> {
        self.service.search_settings(filter, page).await
    }

    async fn delete_settings(&self, id: Uuid) -> Result<(), FeedbackSettingsError> {
        self.service.delete_settings(id).await
    }
}
