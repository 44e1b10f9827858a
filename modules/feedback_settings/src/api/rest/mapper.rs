//! Mapper implementations for converting between DTOs and contract models
//!
//! Request conversions validate as they go: every check runs and all
//! violations are reported together.

use super::dto::*;
use crate::contract::{
    self, ContactMethod, FeedbackSettingsError, PageRequest, SearchFilter, Violation,
};
use crate::domain::validation::{RequestedChannel, Violations, MUST_NOT_BE_NULL};
use uuid::Uuid;

// ===== Contact method conversions =====

impl From<ContactMethod> for ContactMethodDto {
    fn from(method: ContactMethod) -> Self {
        match method {
            ContactMethod::Sms => Self::Sms,
            ContactMethod::Email => Self::Email,
        }
    }
}

impl From<ContactMethodDto> for ContactMethod {
    fn from(method: ContactMethodDto) -> Self {
        match method {
            ContactMethodDto::Sms => Self::Sms,
            ContactMethodDto::Email => Self::Email,
        }
    }
}

// ===== Response conversions =====

impl From<contract::FeedbackChannel> for FeedbackChannelDto {
    fn from(channel: contract::FeedbackChannel) -> Self {
        Self {
            contact_method: channel.contact_method.into(),
            destination: channel.destination,
            send_feedback: channel.send_feedback,
        }
    }
}

impl From<contract::FeedbackSettings> for FeedbackSettingsDto {
    fn from(settings: contract::FeedbackSettings) -> Self {
        Self {
            id: settings.id,
            person_id: settings.person_id,
            organization_id: settings.organization_id,
            channels: settings.channels.into_iter().map(Into::into).collect(),
            created: settings.created,
            modified: settings.modified,
        }
    }
}

impl From<contract::PageMeta> for MetaDataDto {
    fn from(meta: contract::PageMeta) -> Self {
        Self {
            page: meta.page,
            limit: meta.limit,
            count: meta.count,
            total_pages: meta.total_pages,
            total_records: meta.total_records,
        }
    }
}

impl From<contract::SearchResult> for SearchResultDto {
    fn from(result: contract::SearchResult) -> Self {
        Self {
            meta: result.meta.into(),
            feedback_settings: result.items.into_iter().map(Into::into).collect(),
        }
    }
}

// ===== Request conversions =====

impl From<RequestedFeedbackChannelDto> for RequestedChannel {
    fn from(dto: RequestedFeedbackChannelDto) -> Self {
        Self {
            contact_method: dto.contact_method.map(Into::into),
            destination: dto.destination,
            send_feedback: dto.send_feedback,
        }
    }
}

/// Validate requested channels and keep the complete, non-null ones
fn requested_channels(
    violations: &mut Violations,
    field: &str,
    channels: Vec<Option<RequestedFeedbackChannelDto>>,
) -> Vec<contract::FeedbackChannel> {
    let requested: Vec<Option<RequestedChannel>> = channels
        .into_iter()
        .map(|channel| channel.map(Into::into))
        .collect();

    violations.channels(field, &requested);

    requested
        .into_iter()
        .flatten()
        .filter_map(RequestedChannel::into_channel)
        .collect()
}

fn missing(field: &str) -> FeedbackSettingsError {
    FeedbackSettingsError::validation(vec![Violation::new(field, MUST_NOT_BE_NULL)])
}

/// Create request to domain input
pub fn new_settings_from_request(
    body: Option<CreateFeedbackSettingsRequest>,
) -> Result<contract::NewFeedbackSettings, FeedbackSettingsError> {
    let body = body.ok_or_else(|| missing("body"))?;
    let mut violations = Violations::new();

    let person_id = violations.required_uuid("body.personId", body.person_id.as_deref());
    let organization_id = violations.uuid("body.organizationId", body.organization_id.as_deref());
    let channels = requested_channels(
        &mut violations,
        "body.channels",
        body.channels.unwrap_or_default(),
    );

    violations.into_result()?;
    let person_id = person_id.ok_or_else(|| missing("body.personId"))?;

    Ok(contract::NewFeedbackSettings {
        person_id,
        organization_id,
        channels,
    })
}

/// Path id and update request to domain patch
pub fn update_from_request(
    id: &str,
    body: Option<UpdateFeedbackSettingsRequest>,
) -> Result<(Uuid, contract::FeedbackSettingsPatch), FeedbackSettingsError> {
    let mut violations = Violations::new();

    let parsed_id = violations.uuid("id", Some(id));
    let channels = match body {
        Some(body) => body
            .channels
            .map(|channels| requested_channels(&mut violations, "body.channels", channels)),
        None => {
            violations.push("body", MUST_NOT_BE_NULL);
            None
        }
    };

    violations.into_result()?;
    let id = parsed_id.ok_or_else(|| missing("id"))?;

    Ok((id, contract::FeedbackSettingsPatch { channels }))
}

/// Path id, reported as `id` when malformed
pub fn id_from_path(id: &str) -> Result<Uuid, FeedbackSettingsError> {
    let mut violations = Violations::new();
    let parsed = violations.uuid("id", Some(id));
    violations.into_result()?;
    parsed.ok_or_else(|| missing("id"))
}

/// Search query to filter and page
pub fn search_from_query(
    query: SearchQuery,
) -> Result<(SearchFilter, PageRequest), FeedbackSettingsError> {
    let mut violations = Violations::new();

    let person_id = violations.uuid("personId", query.person_id.as_deref());
    let organization_id = violations.uuid("organizationId", query.organization_id.as_deref());

    let page = query.page.map_or(PageRequest::DEFAULT_PAGE as i64, i64::from);
    let limit = query.limit.map_or(PageRequest::DEFAULT_LIMIT as i64, i64::from);
    violations.at_least_one("page", page);
    violations.at_least_one("limit", limit);

    violations.into_result()?;

    Ok((
        SearchFilter {
            person_id,
            organization_id,
        },
        PageRequest {
            page: page.unsigned_abs(),
            limit: limit.unsigned_abs(),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(err: FeedbackSettingsError) -> Vec<String> {
        match err {
            FeedbackSettingsError::Validation { violations } => {
                violations.iter().map(ToString::to_string).collect()
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    fn channel(
        method: Option<ContactMethodDto>,
        destination: Option<&str>,
        send: Option<bool>,
    ) -> RequestedFeedbackChannelDto {
        RequestedFeedbackChannelDto {
            contact_method: method,
            destination: destination.map(str::to_owned),
            send_feedback: send,
        }
    }

    #[test]
    fn missing_create_body() {
        assert_eq!(
            rendered(new_settings_from_request(None).unwrap_err()),
            vec!["body: must not be null"]
        );
    }

    #[test]
    fn empty_create_body_requires_person_id() {
        let err = new_settings_from_request(Some(CreateFeedbackSettingsRequest::default())).unwrap_err();
        assert_eq!(rendered(err), vec!["body.personId: must not be null"]);
    }

    #[test]
    fn create_reports_every_violation_sorted() {
        let body = CreateFeedbackSettingsRequest {
            person_id: Some("not-valid".into()),
            organization_id: Some("not-valid".into()),
            channels: Some(vec![Some(channel(None, Some("not-valid"), None))]),
        };

        assert_eq!(
            rendered(new_settings_from_request(Some(body)).unwrap_err()),
            vec![
                "body.channels[0].contactMethod: must not be null",
                "body.channels[0].sendFeedback: must not be null",
                "body.channels[0]: format for destination is not compliable with provided contact method",
                "body.organizationId: must be a valid UUID",
                "body.personId: must be a valid UUID",
            ]
        );
    }

    #[test]
    fn create_drops_null_channel_entries() {
        let person_id = Uuid::new_v4();
        let body = CreateFeedbackSettingsRequest {
            person_id: Some(person_id.to_string()),
            organization_id: None,
            channels: Some(vec![
                None,
                Some(channel(Some(ContactMethodDto::Sms), Some("0701234567"), Some(true))),
            ]),
        };

        let new_settings = new_settings_from_request(Some(body)).unwrap();
        assert_eq!(new_settings.person_id, person_id);
        assert_eq!(new_settings.organization_id, None);
        assert_eq!(
            new_settings.channels,
            vec![contract::FeedbackChannel::new(ContactMethod::Sms, "0701234567", true)]
        );
    }

    #[test]
    fn patch_without_channels_requests_no_change() {
        let id = Uuid::new_v4();
        let (parsed, patch) =
            update_from_request(&id.to_string(), Some(UpdateFeedbackSettingsRequest::default())).unwrap();
        assert_eq!(parsed, id);
        assert_eq!(patch.channels, None);
    }

    #[test]
    fn patch_with_empty_channels_clears() {
        let (_, patch) = update_from_request(
            &Uuid::new_v4().to_string(),
            Some(UpdateFeedbackSettingsRequest {
                channels: Some(vec![]),
            }),
        )
        .unwrap();
        assert_eq!(patch.channels, Some(vec![]));
    }

    #[test]
    fn patch_reports_path_and_body_together() {
        let err = update_from_request("not-valid", None).unwrap_err();
        assert_eq!(rendered(err), vec!["body: must not be null", "id: must be a valid UUID"]);
    }

    #[test]
    fn patch_reports_duplicates_once() {
        let sms = Some(channel(Some(ContactMethodDto::Sms), Some("0701234567"), Some(true)));
        let err = update_from_request(
            &Uuid::new_v4().to_string(),
            Some(UpdateFeedbackSettingsRequest {
                channels: Some(vec![sms.clone(), sms.clone(), sms]),
            }),
        )
        .unwrap_err();

        assert_eq!(
            rendered(err),
            vec!["body.channels: the collection contains two or more elements with equal contactMethod and destination, these values must be unique"]
        );
    }

    #[test]
    fn path_id_must_be_uuid() {
        assert_eq!(rendered(id_from_path("not-valid").unwrap_err()), vec!["id: must be a valid UUID"]);
        let id = Uuid::new_v4();
        assert_eq!(id_from_path(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn search_defaults_and_bounds() {
        let (filter, page) = search_from_query(SearchQuery::default()).unwrap();
        assert_eq!(filter, SearchFilter::default());
        assert_eq!(page, PageRequest::default());

        let err = search_from_query(SearchQuery {
            person_id: Some("non-valid".into()),
            organization_id: Some("non-valid".into()),
            page: Some(0),
            limit: Some(0),
        })
        .unwrap_err();
        assert_eq!(
            rendered(err),
            vec![
                "limit: must be greater than or equal to 1",
                "organizationId: must be a valid UUID",
                "page: must be greater than or equal to 1",
                "personId: must be a valid UUID",
            ]
        );
    }
}
