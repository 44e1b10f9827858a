//! HTTP error mapping to the service error response body
//!
//! Every error body carries the configured service id and ends its details
//! with `Request: <path>`.

use crate::contract::FeedbackSettingsError;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequestParts,
    },
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use utoipa::ToSchema;

pub const VALIDATION_FAILED: &str = "Request validation failed";
pub const CONSTRAINT_VIOLATION: &str = "Constraint violation";
pub const BAD_REQUEST_FORMAT: &str = "Bad request format";
pub const SERVICE_ERROR: &str = "Service error";

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceErrorResponse {
    pub message: String,
    pub http_code: u16,
    pub technical_details: TechnicalDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalDetails {
    pub root_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_cause: Option<String>,
    pub service_id: String,
    pub details: Vec<String>,
}

/// Service id stamped into error bodies, installed as a request extension
#[derive(Debug, Clone)]
pub struct ServiceId(pub Arc<str>);

/// What went wrong, before it is tied to a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub status: StatusCode,
    pub message: String,
    pub root_cause: Option<String>,
    pub details: Vec<String>,
}

impl Problem {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            root_cause: None,
            details: Vec::new(),
        }
    }

    pub fn with_root_cause(mut self, root_cause: impl Into<String>) -> Self {
        self.root_cause = Some(root_cause.into());
        self
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    /// 400 for bodies or query strings that could not be parsed at all
    pub fn bad_request_format(root_cause: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, BAD_REQUEST_FORMAT).with_root_cause(root_cause)
    }
}

/// Error response bound to a request
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ServiceErrorResponse,
}

impl ApiError {
    pub fn body(&self) -> &ServiceErrorResponse {
        &self.body
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::debug!(status = %self.status, message = %self.body.message, "Returning error response");
        (self.status, Json(self.body)).into_response()
    }
}

/// Per-request data needed to render errors
#[derive(Debug, Clone)]
pub struct RequestContext {
    service_id: Arc<str>,
    path: String,
}

impl RequestContext {
    pub fn new(service_id: impl Into<Arc<str>>, path: impl Into<String>) -> Self {
        Self {
            service_id: service_id.into(),
            path: path.into(),
        }
    }

    pub fn from_parts(parts: &Parts) -> Self {
        let service_id = parts
            .extensions
            .get::<ServiceId>()
            .map(|id| id.0.clone())
            .unwrap_or_else(|| Arc::from(crate::config::DEFAULT_SERVICE_ID));
        Self::new(service_id, parts.uri.path())
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Render a problem for this request
    pub fn reject(&self, problem: Problem) -> ApiError {
        let mut details = problem.details;
        details.push(format!("Request: {}", self.path));

        ApiError {
            status: problem.status,
            body: ServiceErrorResponse {
                message: problem.message,
                http_code: problem.status.as_u16(),
                technical_details: TechnicalDetails {
                    root_code: problem.status.as_u16(),
                    root_cause: problem.root_cause,
                    service_id: self.service_id.to_string(),
                    details,
                },
            },
        }
    }

    /// Render a domain error for this request
    pub fn fail(&self, error: FeedbackSettingsError) -> ApiError {
        self.reject(map_domain_error(error))
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}

/// Map domain errors to problems
pub fn map_domain_error(error: FeedbackSettingsError) -> Problem {
    match error {
        FeedbackSettingsError::Validation { violations } => {
            Problem::new(StatusCode::BAD_REQUEST, VALIDATION_FAILED)
                .with_root_cause(CONSTRAINT_VIOLATION)
                .with_details(violations.iter().map(ToString::to_string).collect())
        }

        // Conflicts are reported as 400 to existing clients
        FeedbackSettingsError::Conflict { message } => Problem::new(StatusCode::BAD_REQUEST, message),

        error @ FeedbackSettingsError::NotFound { .. } => {
            Problem::new(StatusCode::NOT_FOUND, error.to_string())
        }

        error @ FeedbackSettingsError::Internal { .. } => {
            tracing::error!(error = %error, "Unexpected error while handling request");
            Problem::new(StatusCode::INTERNAL_SERVER_ERROR, SERVICE_ERROR)
                .with_root_cause(error.to_string())
                .with_details(vec![format!("Type: {}", error.kind())])
        }
    }
}

/// Map JSON body rejections; data errors count as validation failures
pub fn map_json_rejection(rejection: JsonRejection) -> Problem {
    match rejection {
        JsonRejection::JsonDataError(err) => Problem::new(StatusCode::BAD_REQUEST, VALIDATION_FAILED)
            .with_root_cause(err.body_text()),
        other => Problem::bad_request_format(other.body_text()),
    }
}

pub fn map_query_rejection(rejection: QueryRejection) -> Problem {
    Problem::bad_request_format(rejection.body_text())
}
