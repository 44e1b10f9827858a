//! Request extractors that report failures in the service error format

use super::error::{map_json_rejection, ApiError, Problem, RequestContext};
use axum::{
    body::Body,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

/// Upper bound for request bodies
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// JSON request body that may be missing.
///
/// An empty body or a literal `null` yields `None` so handlers can report
/// `body: must not be null` alongside other violations.
#[derive(Debug)]
pub struct OptionalJson<T>(pub Option<T>);

impl<S, T> FromRequest<S> for OptionalJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.into_parts();
        let context = RequestContext::from_parts(&parts);

        let bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
            .await
            .map_err(|e| context.reject(Problem::bad_request_format(e.to_string())))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(None));
        }

        let req = Request::from_parts(parts, Body::from(bytes));
        let Json(value) = Json::<Option<T>>::from_request(req, state)
            .await
            .map_err(|rejection| context.reject(map_json_rejection(rejection)))?;

        Ok(Self(value))
    }
}
