//! Repository trait for data access
//!
//! This trait defines the storage contract the service depends on.
//! Implementations are in infra/storage/repositories.rs

use crate::contract::{FeedbackSettings, SearchFilter};
use async_trait::async_trait;
use uuid::Uuid;

/// Storage failures the service distinguishes
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// A unique constraint rejected the write
    #[error("unique constraint violated: {0}")]
    Duplicate(String),

    /// The stored version no longer matches the one that was loaded
    #[error("settings {0} were changed by another writer")]
    Stale(Uuid),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// One zero-based page of search results with dataset totals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub items: Vec<FeedbackSettings>,
    pub total_records: u64,
    pub total_pages: u64,
}

/// Repository for feedback settings
#[async_trait]
pub trait FeedbackSettingsRepository: Send + Sync {
    /// Find settings by id
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<FeedbackSettings>>;

    /// Find one zero-based page of settings matching the filter
    async fn find_page(
        &self,
        filter: SearchFilter,
        page_index: u64,
        limit: u64,
    ) -> RepositoryResult<Page>;

    /// Whether settings exist for the exact person/organization pair.
    /// `organization_id: None` matches personal settings only.
    async fn exists(&self, person_id: Uuid, organization_id: Option<Uuid>) -> RepositoryResult<bool>;

    /// Persist new settings, atomically with their channels
    async fn insert(&self, settings: &FeedbackSettings) -> RepositoryResult<FeedbackSettings>;

    /// Persist changed settings if the stored version still matches
    /// `settings.version`; returns the stored state with the next version
    async fn update(&self, settings: &FeedbackSettings) -> RepositoryResult<FeedbackSettings>;

    /// Delete settings and their channels; returns whether a row was removed
    async fn delete(&self, id: Uuid) -> RepositoryResult<bool>;
}
