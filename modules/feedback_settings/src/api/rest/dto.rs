//! REST DTOs with serde derives for HTTP API
//!
//! Request DTOs keep every field optional and identifiers as strings so
//! missing or malformed input is reported as validation violations instead
//! of opaque parse failures.

use crate::contract::{ContactMethod, InvalidContactMethod};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

// ===== Contact Method =====

/// Contact method on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum ContactMethodDto {
    Sms,
    Email,
}

impl TryFrom<String> for ContactMethodDto {
    type Error = InvalidContactMethod;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse::<ContactMethod>().map(Into::into)
    }
}

// ===== Request DTOs =====

/// Channel as sent by clients
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestedFeedbackChannelDto {
    #[schema(example = "SMS")]
    pub contact_method: Option<ContactMethodDto>,

    /// Mobile number (`07[02369]nnnnnnn`) or email address
    #[schema(example = "0701234567")]
    pub destination: Option<String>,

    pub send_feedback: Option<bool>,
}

/// Create settings request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedbackSettingsRequest {
    #[schema(example = "15aee472-46ab-4f03-9605-68bd64ebc73f")]
    pub person_id: Option<String>,

    /// Present when the person represents an organization
    #[schema(example = "81471222-5798-11e9-ae24-57fa13b361e1")]
    pub organization_id: Option<String>,

    pub channels: Option<Vec<Option<RequestedFeedbackChannelDto>>>,
}

/// Update settings request; an absent `channels` leaves channels untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFeedbackSettingsRequest {
    pub channels: Option<Vec<Option<RequestedFeedbackChannelDto>>>,
}

/// Search query parameters
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Exact match on person id
    pub person_id: Option<String>,

    /// Exact match on organization id
    pub organization_id: Option<String>,

    /// One-based page number, defaults to 1
    pub page: Option<i32>,

    /// Page size, defaults to 20
    pub limit: Option<i32>,
}

// ===== Response DTOs =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackChannelDto {
    pub contact_method: ContactMethodDto,
    pub destination: String,
    pub send_feedback: bool,
}

/// Feedback settings response DTO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSettingsDto {
    pub id: Uuid,

    pub person_id: Uuid,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<Uuid>,

    pub channels: Vec<FeedbackChannelDto>,

    pub created: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetaDataDto {
    pub page: u64,
    pub limit: u64,
    pub count: u64,
    pub total_pages: u64,
    pub total_records: u64,
}

/// Search response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultDto {
    #[serde(rename = "_meta")]
    pub meta: MetaDataDto,

    pub feedback_settings: Vec<FeedbackSettingsDto>,
}

/// Liveness probe response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthDto {
    #[schema(example = "ok")]
    pub status: String,
}
