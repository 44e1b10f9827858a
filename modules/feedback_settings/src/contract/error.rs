//! Contract error types for feedback settings
//!
//! These errors are transport-agnostic and used for inter-module communication.

use std::fmt;
use uuid::Uuid;

/// A single violated validation rule
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Violation {
    /// Property path, e.g. `body.channels[0].contactMethod`
    pub field: String,
    /// Rule message
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Feedback settings domain errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeedbackSettingsError {
    /// Client input malformed or incomplete
    #[error("Request validation failed")]
    Validation {
        /// Violations, sorted by rendered form
        violations: Vec<Violation>,
    },

    /// Settings already exist for the person/organization combination,
    /// or a concurrent write won
    #[error("{message}")]
    Conflict { message: String },

    /// No settings with the given id
    #[error("No settings found for id '{id}'")]
    NotFound { id: Uuid },

    /// Anything unanticipated, typically storage failures
    #[error("{message}")]
    Internal { message: String },
}

impl FeedbackSettingsError {
    /// Build a validation error, sorting violations by their rendered form
    pub fn validation(mut violations: Vec<Violation>) -> Self {
        violations.sort_by_key(|v| v.to_string());
        Self::Validation { violations }
    }

    pub fn already_exists(person_id: Uuid, organization_id: Option<Uuid>) -> Self {
        let message = match organization_id {
            None => format!("Settings already exist for personId '{person_id}'"),
            Some(organization_id) => format!(
                "Settings already exist for personId '{person_id}' and organizationId '{organization_id}'"
            ),
        };
        Self::Conflict { message }
    }

    pub fn concurrently_modified(id: Uuid) -> Self {
        Self::Conflict {
            message: format!("Settings with id '{id}' were modified concurrently"),
        }
    }

    pub fn internal(error: impl fmt::Display) -> Self {
        Self::Internal {
            message: error.to_string(),
        }
    }

    /// Short name of the error kind, used in technical details
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "Validation",
            Self::Conflict { .. } => "Conflict",
            Self::NotFound { .. } => "NotFound",
            Self::Internal { .. } => "Internal",
        }
    }
}
