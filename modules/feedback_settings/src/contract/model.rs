//! Contract models for feedback settings
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - these are pure domain models.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Method used to reach a person for feedback requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactMethod {
    Sms,
    Email,
}

impl ContactMethod {
    /// Canonical wire name (`SMS`, `EMAIL`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sms => "SMS",
            Self::Email => "EMAIL",
        }
    }
}

impl fmt::Display for ContactMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a known contact method
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid value for enum ContactMethod: {0}")]
pub struct InvalidContactMethod(pub String);

impl FromStr for ContactMethod {
    type Err = InvalidContactMethod;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.eq_ignore_ascii_case("SMS") {
            Ok(Self::Sms)
        } else if value.eq_ignore_ascii_case("EMAIL") {
            Ok(Self::Email)
        } else {
            Err(InvalidContactMethod(value.to_string()))
        }
    }
}

/// One way of reaching a person, with its opt-in flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackChannel {
    pub contact_method: ContactMethod,
    pub destination: String,
    pub send_feedback: bool,
}

impl FeedbackChannel {
    pub fn new(contact_method: ContactMethod, destination: impl Into<String>, send_feedback: bool) -> Self {
        Self {
            contact_method,
            destination: destination.into(),
            send_feedback,
        }
    }

    /// Channel identity: equal contact method and case-insensitively equal
    /// destination. `send_feedback` is not part of the identity.
    pub fn same_channel(&self, other: &FeedbackChannel) -> bool {
        self.contact_method == other.contact_method
            && self.destination.to_lowercase() == other.destination.to_lowercase()
    }
}

/// Feedback settings aggregate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackSettings {
    /// Unique identifier
    pub id: Uuid,
    /// Person the settings apply to
    pub person_id: Uuid,
    /// Organization the person represents, absent for personal settings
    pub organization_id: Option<Uuid>,
    /// Contact channels, unique by identity
    pub channels: Vec<FeedbackChannel>,
    /// Creation timestamp, set once
    pub created: DateTime<Utc>,
    /// Last time the channel set changed
    pub modified: Option<DateTime<Utc>>,
    /// Optimistic concurrency token maintained by storage
    pub version: i32,
}

/// Input for creating feedback settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedbackSettings {
    pub person_id: Uuid,
    pub organization_id: Option<Uuid>,
    pub channels: Vec<FeedbackChannel>,
}

/// Partial update; `channels: None` means no change requested
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackSettingsPatch {
    pub channels: Option<Vec<FeedbackChannel>>,
}

/// Exact-match search predicates; `None` disables the predicate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchFilter {
    pub person_id: Option<Uuid>,
    pub organization_id: Option<Uuid>,
}

/// One-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    pub const DEFAULT_PAGE: u64 = 1;
    pub const DEFAULT_LIMIT: u64 = 20;
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

/// Pagination metadata of a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    pub page: u64,
    pub limit: u64,
    pub count: u64,
    pub total_pages: u64,
    pub total_records: u64,
}

/// Search result page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub meta: PageMeta,
    pub items: Vec<FeedbackSettings>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_contact_method_case_insensitively() {
        assert_eq!("SMS".parse::<ContactMethod>(), Ok(ContactMethod::Sms));
        assert_eq!("email".parse::<ContactMethod>(), Ok(ContactMethod::Email));
        assert_eq!("Email".parse::<ContactMethod>(), Ok(ContactMethod::Email));
    }

    #[test]
    fn rejects_unknown_contact_method() {
        let err = "UNKNOWN".parse::<ContactMethod>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for enum ContactMethod: UNKNOWN");
    }

    #[test]
    fn identity_ignores_destination_case_and_send_feedback() {
        let a = FeedbackChannel::new(ContactMethod::Email, "First.Last@Host.org", true);
        let b = FeedbackChannel::new(ContactMethod::Email, "first.last@host.org", false);
        let c = FeedbackChannel::new(ContactMethod::Sms, "first.last@host.org", false);

        assert!(a.same_channel(&b));
        assert!(!a.same_channel(&c));
        assert_ne!(a, b);
    }
}
