//! Common test utilities: in-memory repository, fixed clock, fixtures

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use feedback_settings::contract::{ContactMethod, FeedbackChannel, FeedbackSettings, SearchFilter};
use feedback_settings::domain::{
    Clock, FeedbackSettingsRepository, Page, RepositoryError, RepositoryResult,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

pub const PERSON_ID: &str = "15aee472-46ab-4f03-9605-68bd64ebc73f";
pub const ORGANIZATION_ID: &str = "81471222-5798-11e9-ae24-57fa13b361e1";
pub const MOBILE_NUMBER: &str = "0701234567";
pub const EMAIL: &str = "valid.email@host.org";

pub fn person_id() -> Uuid {
    Uuid::parse_str(PERSON_ID).unwrap()
}

pub fn organization_id() -> Uuid {
    Uuid::parse_str(ORGANIZATION_ID).unwrap()
}

pub fn sms(destination: &str, send_feedback: bool) -> FeedbackChannel {
    FeedbackChannel::new(ContactMethod::Sms, destination, send_feedback)
}

pub fn email(destination: &str, send_feedback: bool) -> FeedbackChannel {
    FeedbackChannel::new(ContactMethod::Email, destination, send_feedback)
}

pub fn print_test_header(test_name: &str, purpose: &str) {
    println!("\n🧪 TEST: {test_name}");
    println!("📋 PURPOSE: {purpose}");
}

// ===== Clock =====

/// Clock that returns a settable instant
pub struct FixedClock {
    now: RwLock<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    pub fn at_default() -> Self {
        Self::new(Utc.with_ymd_and_hms(2022, 1, 20, 10, 30, 9).unwrap())
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.write() = now;
    }

    pub fn advance_secs(&self, secs: i64) {
        let mut now = self.now.write();
        *now += chrono::Duration::seconds(secs);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read()
    }
}

// ===== Repository =====

/// Failure injected into the next write
#[derive(Debug, Clone)]
pub enum Failure {
    Duplicate,
    Stale,
    Other(String),
}

impl Failure {
    fn into_error(self, id: Uuid) -> RepositoryError {
        match self {
            Failure::Duplicate => RepositoryError::Duplicate("uq_feedback_settings_person_organization".into()),
            Failure::Stale => RepositoryError::Stale(id),
            Failure::Other(message) => RepositoryError::Other(anyhow::anyhow!(message)),
        }
    }
}

/// In-memory repository honoring uniqueness and versions like the database
#[derive(Clone, Default)]
pub struct MockFeedbackSettingsRepo {
    data: Arc<RwLock<HashMap<Uuid, FeedbackSettings>>>,
    next_failure: Arc<RwLock<Option<Failure>>>,
    writes: Arc<RwLock<usize>>,
}

impl MockFeedbackSettingsRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next insert/update/delete fail
    pub fn fail_next_write(&self, failure: Failure) {
        *self.next_failure.write() = Some(failure);
    }

    /// Number of successful writes
    pub fn writes(&self) -> usize {
        *self.writes.read()
    }

    pub fn count(&self) -> usize {
        self.data.read().len()
    }

    pub fn stored(&self, id: Uuid) -> Option<FeedbackSettings> {
        self.data.read().get(&id).cloned()
    }

    /// Store directly, bypassing the service
    pub fn seed(&self, settings: FeedbackSettings) {
        self.data.write().insert(settings.id, settings);
    }

    /// Print verbose information about repository state
    pub fn print_state(&self, context: &str) {
        let data = self.data.read();
        println!("\n========== Repository State: {context} ==========");
        println!("Total settings: {}", data.len());
        for settings in data.values() {
            println!("  {} person={} org={:?} v{}", settings.id, settings.person_id, settings.organization_id, settings.version);
            for channel in &settings.channels {
                println!("    {} {} send={}", channel.contact_method, channel.destination, channel.send_feedback);
            }
        }
        println!("=================================================\n");
    }

    fn take_failure(&self, id: Uuid) -> RepositoryResult<()> {
        match self.next_failure.write().take() {
            Some(failure) => Err(failure.into_error(id)),
            None => Ok(()),
        }
    }

    fn record_write(&self) {
        *self.writes.write() += 1;
    }
}

#[async_trait]
impl FeedbackSettingsRepository for MockFeedbackSettingsRepo {
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<FeedbackSettings>> {
        Ok(self.data.read().get(&id).cloned())
    }

    async fn find_page(
        &self,
        filter: SearchFilter,
        page_index: u64,
        limit: u64,
    ) -> RepositoryResult<Page> {
        let mut matching: Vec<FeedbackSettings> = self
            .data
            .read()
            .values()
            .filter(|s| filter.person_id.map_or(true, |p| s.person_id == p))
            .filter(|s| filter.organization_id.map_or(true, |o| s.organization_id == Some(o)))
            .cloned()
            .collect();
        matching.sort_by_key(|s| (s.created, s.id));

        let total_records = matching.len() as u64;
        let total_pages = total_records.div_ceil(limit);
        let items = matching
            .into_iter()
            .skip(page_index.saturating_mul(limit) as usize)
            .take(limit as usize)
            .collect();

        Ok(Page {
            items,
            total_records,
            total_pages,
        })
    }

    async fn exists(&self, person_id: Uuid, organization_id: Option<Uuid>) -> RepositoryResult<bool> {
        Ok(self
            .data
            .read()
            .values()
            .any(|s| s.person_id == person_id && s.organization_id == organization_id))
    }

    async fn insert(&self, settings: &FeedbackSettings) -> RepositoryResult<FeedbackSettings> {
        self.take_failure(settings.id)?;

        let mut data = self.data.write();
        if data.values().any(|s| {
            s.person_id == settings.person_id && s.organization_id == settings.organization_id
        }) {
            return Err(Failure::Duplicate.into_error(settings.id));
        }
        data.insert(settings.id, settings.clone());
        drop(data);

        self.record_write();
        Ok(settings.clone())
    }

    async fn update(&self, settings: &FeedbackSettings) -> RepositoryResult<FeedbackSettings> {
        self.take_failure(settings.id)?;

        let mut data = self.data.write();
        let stored = data
            .get_mut(&settings.id)
            .filter(|stored| stored.version == settings.version)
            .ok_or(RepositoryError::Stale(settings.id))?;

        *stored = FeedbackSettings {
            version: settings.version + 1,
            ..settings.clone()
        };
        let updated = stored.clone();
        drop(data);

        self.record_write();
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<bool> {
        self.take_failure(id)?;

        let removed = self.data.write().remove(&id).is_some();
        if removed {
            self.record_write();
        }
        Ok(removed)
    }
}
