//! Request validation
//!
//! Every check runs to completion and records at most one [`Violation`];
//! the collected violations are sorted by their rendered `field: message`
//! form when turned into an error.

use crate::contract::{ContactMethod, FeedbackChannel, FeedbackSettingsError, Violation};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use uuid::Uuid;

pub const MUST_NOT_BE_NULL: &str = "must not be null";
pub const MUST_BE_VALID_UUID: &str = "must be a valid UUID";
pub const MUST_BE_AT_LEAST_ONE: &str = "must be greater than or equal to 1";
pub const DESTINATION_NOT_COMPLIABLE: &str =
    "format for destination is not compliable with provided contact method";
pub const INVALID_SMS_DESTINATION: &str =
    "destination must match pattern 07[02369]nnnnnnn when provided contact method is SMS";
pub const INVALID_EMAIL_DESTINATION: &str =
    "destination must be a well-formed email address when provided contact method is EMAIL";
pub const CHANNELS_NOT_UNIQUE: &str = "the collection contains two or more elements with equal contactMethod and destination, these values must be unique";

/// Swedish mobile number: 07, one of 0/2/3/6/9, then seven digits
#[allow(clippy::expect_used)]
static SMS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^07[02369][0-9]{7}$").expect("valid SMS pattern"));

/// Dot-atom local part and dotted host name; letters and digits may be
/// non-ASCII so internationalized addresses pass
#[allow(clippy::expect_used)]
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[\p{L}\p{N}!#$%&'*+/=?^_`{|}~-]+(\.[\p{L}\p{N}!#$%&'*+/=?^_`{|}~-]+)*@[\p{L}\p{N}]([\p{L}\p{N}-]*[\p{L}\p{N}])?(\.[\p{L}\p{N}]([\p{L}\p{N}-]*[\p{L}\p{N}])?)*$",
    )
    .expect("valid email pattern")
});

const MAX_EMAIL_LENGTH: usize = 254;
const MAX_LOCAL_PART_LENGTH: usize = 64;

/// Whether `destination` is a Swedish mobile number
pub fn is_valid_sms_destination(destination: &str) -> bool {
    SMS_PATTERN.is_match(destination)
}

/// Whether `destination` is a well-formed email address
pub fn is_valid_email_destination(destination: &str) -> bool {
    if destination.chars().count() > MAX_EMAIL_LENGTH {
        return false;
    }
    match destination.split_once('@') {
        Some((local, _)) if local.chars().count() <= MAX_LOCAL_PART_LENGTH => {
            EMAIL_PATTERN.is_match(destination)
        }
        _ => false,
    }
}

/// Destination format rule for a channel, conditional on its contact method.
///
/// Returns the violation message, or `None` when the destination complies.
pub fn destination_violation(
    contact_method: Option<ContactMethod>,
    destination: Option<&str>,
) -> Option<&'static str> {
    let destination = destination.unwrap_or_default();
    match contact_method {
        None => Some(DESTINATION_NOT_COMPLIABLE),
        Some(ContactMethod::Sms) if !is_valid_sms_destination(destination) => {
            Some(INVALID_SMS_DESTINATION)
        }
        Some(ContactMethod::Email) if !is_valid_email_destination(destination) => {
            Some(INVALID_EMAIL_DESTINATION)
        }
        Some(_) => None,
    }
}

/// Whether two or more entries share contact method and destination.
///
/// Destinations are compared case-sensitively here, unlike channel identity
/// during reconciliation.
pub fn has_duplicate_channels<'a, I>(channels: I) -> bool
where
    I: IntoIterator<Item = (Option<ContactMethod>, Option<&'a str>)>,
{
    let mut seen = HashSet::new();
    channels.into_iter().any(|key| !seen.insert(key))
}

/// A channel as requested by a client, before completeness is known
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestedChannel {
    pub contact_method: Option<ContactMethod>,
    pub destination: Option<String>,
    pub send_feedback: Option<bool>,
}

impl RequestedChannel {
    /// Complete channel, or `None` while mandatory fields are missing
    pub fn into_channel(self) -> Option<FeedbackChannel> {
        Some(FeedbackChannel {
            contact_method: self.contact_method?,
            destination: self.destination?,
            send_feedback: self.send_feedback?,
        })
    }
}

impl From<&FeedbackChannel> for RequestedChannel {
    fn from(channel: &FeedbackChannel) -> Self {
        Self {
            contact_method: Some(channel.contact_method),
            destination: Some(channel.destination.clone()),
            send_feedback: Some(channel.send_feedback),
        }
    }
}

/// Collects violations from independent checks
#[derive(Debug, Default)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.violations.push(Violation::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Records a violation when a mandatory value is absent
    pub fn require<T: ?Sized>(&mut self, field: &str, value: Option<&T>) {
        if value.is_none() {
            self.push(field, MUST_NOT_BE_NULL);
        }
    }

    /// Parses an optional identifier; absence is allowed.
    ///
    /// Records a violation and returns `None` for malformed input.
    pub fn uuid(&mut self, field: &str, value: Option<&str>) -> Option<Uuid> {
        let value = value?;
        match Uuid::parse_str(value) {
            Ok(uuid) => Some(uuid),
            Err(_) => {
                self.push(field, MUST_BE_VALID_UUID);
                None
            }
        }
    }

    /// Parses a mandatory identifier
    pub fn required_uuid(&mut self, field: &str, value: Option<&str>) -> Option<Uuid> {
        self.require(field, value);
        self.uuid(field, value)
    }

    pub fn at_least_one(&mut self, field: &str, value: i64) {
        if value < 1 {
            self.push(field, MUST_BE_AT_LEAST_ONE);
        }
    }

    /// Per-element completeness and destination format of one channel
    pub fn channel(&mut self, field: &str, channel: &RequestedChannel) {
        self.require(&format!("{field}.contactMethod"), channel.contact_method.as_ref());
        self.require(&format!("{field}.sendFeedback"), channel.send_feedback.as_ref());
        if let Some(message) =
            destination_violation(channel.contact_method, channel.destination.as_deref())
        {
            self.push(field, message);
        }
    }

    /// Element checks plus one collection-level uniqueness check.
    ///
    /// Null entries are skipped by both.
    pub fn channels(&mut self, field: &str, channels: &[Option<RequestedChannel>]) {
        for (index, channel) in channels.iter().enumerate() {
            if let Some(channel) = channel {
                self.channel(&format!("{field}[{index}]"), channel);
            }
        }

        let keys = channels
            .iter()
            .flatten()
            .map(|c| (c.contact_method, c.destination.as_deref()));
        if has_duplicate_channels(keys) {
            self.push(field, CHANNELS_NOT_UNIQUE);
        }
    }

    /// Sorted violations, or `Ok` when every check passed
    pub fn into_result(self) -> Result<(), FeedbackSettingsError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(FeedbackSettingsError::validation(self.violations))
        }
    }
}

/// Validates already-typed channels handed to the service directly
pub fn validate_feedback_channels(
    field: &str,
    channels: &[FeedbackChannel],
) -> Result<(), FeedbackSettingsError> {
    let requested: Vec<Option<RequestedChannel>> =
        channels.iter().map(|c| Some(RequestedChannel::from(c))).collect();
    let mut violations = Violations::new();
    violations.channels(field, &requested);
    violations.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requested(method: Option<ContactMethod>, destination: &str, send: Option<bool>) -> RequestedChannel {
        RequestedChannel {
            contact_method: method,
            destination: Some(destination.to_string()),
            send_feedback: send,
        }
    }

    fn rendered(err: FeedbackSettingsError) -> Vec<String> {
        match err {
            FeedbackSettingsError::Validation { violations } => {
                violations.iter().map(ToString::to_string).collect()
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_sms_destinations() {
        assert!(is_valid_sms_destination("0701234567"));
        assert!(is_valid_sms_destination("0721234567"));
        assert!(is_valid_sms_destination("0731234567"));
        assert!(is_valid_sms_destination("0761234567"));
        assert!(is_valid_sms_destination("0791234567"));

        assert!(!is_valid_sms_destination("0711234567"));
        assert!(!is_valid_sms_destination("0741234567"));
        assert!(!is_valid_sms_destination("0751234567"));
        assert!(!is_valid_sms_destination("0771234567"));
        assert!(!is_valid_sms_destination("0781234567"));
        assert!(!is_valid_sms_destination("46701234567"));
        assert!(!is_valid_sms_destination("070123456"));
        assert!(!is_valid_sms_destination("07012345678"));
        assert!(!is_valid_sms_destination(""));
        assert!(!is_valid_sms_destination(" "));
    }

    #[test]
    fn test_email_destinations() {
        assert!(is_valid_email_destination("valid.email@host.org"));
        assert!(is_valid_email_destination("first+tag@sub.host.se"));
        assert!(is_valid_email_destination("åsa@host.se"));
        assert!(is_valid_email_destination("jörgen.öst@exämpel.se"));

        assert!(!is_valid_email_destination("invalid"));
        assert!(!is_valid_email_destination("invalid@value."));
        assert!(!is_valid_email_destination(".invalid@value"));
        assert!(!is_valid_email_destination("in..valid@value"));
        assert!(!is_valid_email_destination("invalid@"));
        assert!(!is_valid_email_destination(""));
        assert!(!is_valid_email_destination(" "));
        assert!(!is_valid_email_destination("å sa@host.se"));
        assert!(!is_valid_email_destination(&format!("{}@host.se", "å".repeat(65))));
    }

    #[test]
    fn test_destination_rule_depends_on_contact_method() {
        assert_eq!(destination_violation(Some(ContactMethod::Sms), Some("0701234567")), None);
        assert_eq!(
            destination_violation(Some(ContactMethod::Email), Some("0701234567")),
            Some(INVALID_EMAIL_DESTINATION)
        );
        assert_eq!(
            destination_violation(Some(ContactMethod::Sms), Some("valid.email@host.org")),
            Some(INVALID_SMS_DESTINATION)
        );
        assert_eq!(destination_violation(Some(ContactMethod::Sms), None), Some(INVALID_SMS_DESTINATION));
        assert_eq!(destination_violation(None, Some("0701234567")), Some(DESTINATION_NOT_COMPLIABLE));
        assert_eq!(destination_violation(None, None), Some(DESTINATION_NOT_COMPLIABLE));
    }

    #[test]
    fn test_incomplete_channel_reports_every_field() {
        let mut violations = Violations::new();
        violations.channels("body.channels", &[Some(RequestedChannel::default())]);

        assert_eq!(
            rendered(violations.into_result().unwrap_err()),
            vec![
                "body.channels[0].contactMethod: must not be null",
                "body.channels[0].sendFeedback: must not be null",
                "body.channels[0]: format for destination is not compliable with provided contact method",
            ]
        );
    }

    #[test]
    fn test_duplicates_yield_single_violation() {
        let sms = requested(Some(ContactMethod::Sms), "0701234567", Some(true));
        let mut violations = Violations::new();
        violations.channels(
            "body.channels",
            &[Some(sms.clone()), Some(sms.clone()), Some(requested(Some(ContactMethod::Sms), "0701234567", Some(false))), Some(sms)],
        );

        assert_eq!(
            rendered(violations.into_result().unwrap_err()),
            vec![format!("body.channels: {CHANNELS_NOT_UNIQUE}")]
        );
    }

    #[test]
    fn test_uniqueness_is_case_sensitive() {
        let mut violations = Violations::new();
        violations.channels(
            "body.channels",
            &[
                Some(requested(Some(ContactMethod::Email), "a.b@host.org", Some(true))),
                Some(requested(Some(ContactMethod::Email), "A.B@host.org", Some(true))),
            ],
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn test_null_entries_are_ignored() {
        let mut violations = Violations::new();
        violations.channels(
            "body.channels",
            &[None, Some(requested(Some(ContactMethod::Sms), "0701234567", Some(true))), None],
        );
        assert!(violations.into_result().is_ok());
    }

    #[test]
    fn test_uuid_checks() {
        let mut violations = Violations::new();
        let id = Uuid::new_v4();

        assert_eq!(violations.uuid("personId", Some(&id.to_string())), Some(id));
        assert_eq!(violations.uuid("organizationId", None), None);
        assert!(violations.is_empty());

        assert_eq!(violations.uuid("personId", Some("not-a-uuid")), None);
        assert_eq!(violations.required_uuid("body.personId", None), None);

        assert_eq!(
            rendered(violations.into_result().unwrap_err()),
            vec!["body.personId: must not be null", "personId: must be a valid UUID"]
        );
    }

    #[test]
    fn test_required_uuid() {
        let mut violations = Violations::new();
        let id = Uuid::new_v4();

        assert_eq!(violations.required_uuid("body.personId", Some(&id.to_string())), Some(id));
        assert!(violations.is_empty());

        violations.require::<str>("body.destination", None);
        assert_eq!(
            rendered(violations.into_result().unwrap_err()),
            vec!["body.destination: must not be null"]
        );
    }

    #[test]
    fn test_page_bounds() {
        let mut violations = Violations::new();
        violations.at_least_one("page", 1);
        violations.at_least_one("limit", 0);
        assert_eq!(
            rendered(violations.into_result().unwrap_err()),
            vec!["limit: must be greater than or equal to 1"]
        );
    }

    #[test]
    fn test_validate_feedback_channels() {
        let ok = vec![
            FeedbackChannel::new(ContactMethod::Sms, "0701234567", true),
            FeedbackChannel::new(ContactMethod::Email, "valid.email@host.org", false),
        ];
        assert!(validate_feedback_channels("channels", &ok).is_ok());

        let bad = vec![FeedbackChannel::new(ContactMethod::Sms, "0711234567", true)];
        assert_eq!(
            rendered(validate_feedback_channels("channels", &bad).unwrap_err()),
            vec![format!("channels[0]: {INVALID_SMS_DESTINATION}")]
        );
    }
}
