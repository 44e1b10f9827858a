//! Route registration with OpenAPI documentation

use super::{
    dto::*,
    error::{ApiError, RequestContext, ServiceErrorResponse, ServiceId, TechnicalDetails},
    extract::OptionalJson,
    handlers,
};
use crate::domain::Service;
use axum::{
    extract::{rejection::QueryRejection, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

/// OpenAPI document for the feedback settings API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Feedback Settings",
        description = "Contact channel preferences for feedback requests"
    ),
    paths(
        create_settings_handler,
        search_settings_handler,
        get_settings_handler,
        update_settings_handler,
        delete_settings_handler,
        health_handler,
    ),
    components(schemas(
        ContactMethodDto,
        RequestedFeedbackChannelDto,
        CreateFeedbackSettingsRequest,
        UpdateFeedbackSettingsRequest,
        FeedbackChannelDto,
        FeedbackSettingsDto,
        MetaDataDto,
        SearchResultDto,
        HealthDto,
        ServiceErrorResponse,
        TechnicalDetails,
    )),
    tags((name = "feedback-settings", description = "Feedback settings management"))
)]
pub struct ApiDoc;

pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

/// Build the REST router.
///
/// `service_id` is reported in every error body.
pub fn router(service: Arc<Service>, service_id: impl Into<Arc<str>>) -> Router {
    Router::new()
        .route(
            "/settings",
            get(search_settings_handler).post(create_settings_handler),
        )
        .route(
            "/settings/{id}",
            get(get_settings_handler)
                .patch(update_settings_handler)
                .delete(delete_settings_handler),
        )
        .route("/health", get(health_handler))
        .route("/api-docs/openapi.json", get(openapi_handler))
        .layer(Extension(service))
        .layer(Extension(ServiceId(service_id.into())))
        .layer(TraceLayer::new_for_http())
}

// ===== Handler wrappers that extract service from Extension =====

#[utoipa::path(
    post,
    path = "/settings",
    tag = "feedback-settings",
    request_body = CreateFeedbackSettingsRequest,
    responses(
        (status = 201, description = "Settings created", body = FeedbackSettingsDto,
            headers(("Location" = String, description = "Path of the created settings"))),
        (status = 400, description = "Validation failure or settings already exist", body = ServiceErrorResponse),
        (status = 500, description = "Unexpected error", body = ServiceErrorResponse),
    )
)]
async fn create_settings_handler(
    Extension(service): Extension<Arc<Service>>,
    ctx: RequestContext,
    OptionalJson(body): OptionalJson<CreateFeedbackSettingsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    handlers::create_settings(service, ctx, body).await
}

#[utoipa::path(
    get,
    path = "/settings",
    tag = "feedback-settings",
    params(SearchQuery),
    responses(
        (status = 200, description = "One page of matching settings", body = SearchResultDto),
        (status = 400, description = "Invalid query parameters", body = ServiceErrorResponse),
        (status = 500, description = "Unexpected error", body = ServiceErrorResponse),
    )
)]
async fn search_settings_handler(
    Extension(service): Extension<Arc<Service>>,
    ctx: RequestContext,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<SearchResultDto>, ApiError> {
    handlers::search_settings(service, ctx, query).await
}

#[utoipa::path(
    get,
    path = "/settings/{id}",
    tag = "feedback-settings",
    params(("id" = String, Path, description = "Settings id (UUID)")),
    responses(
        (status = 200, description = "Settings found", body = FeedbackSettingsDto),
        (status = 400, description = "Malformed id", body = ServiceErrorResponse),
        (status = 404, description = "No settings with this id", body = ServiceErrorResponse),
        (status = 500, description = "Unexpected error", body = ServiceErrorResponse),
    )
)]
async fn get_settings_handler(
    Extension(service): Extension<Arc<Service>>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> Result<Json<FeedbackSettingsDto>, ApiError> {
    handlers::get_settings(service, ctx, id).await
}

#[utoipa::path(
    patch,
    path = "/settings/{id}",
    tag = "feedback-settings",
    params(("id" = String, Path, description = "Settings id (UUID)")),
    request_body = UpdateFeedbackSettingsRequest,
    responses(
        (status = 200, description = "Settings updated", body = FeedbackSettingsDto),
        (status = 400, description = "Validation failure", body = ServiceErrorResponse),
        (status = 404, description = "No settings with this id", body = ServiceErrorResponse),
        (status = 500, description = "Unexpected error", body = ServiceErrorResponse),
    )
)]
async fn update_settings_handler(
    Extension(service): Extension<Arc<Service>>,
    ctx: RequestContext,
    Path(id): Path<String>,
    OptionalJson(body): OptionalJson<UpdateFeedbackSettingsRequest>,
) -> Result<Json<FeedbackSettingsDto>, ApiError> {
    handlers::update_settings(service, ctx, id, body).await
}

#[utoipa::path(
    delete,
    path = "/settings/{id}",
    tag = "feedback-settings",
    params(("id" = String, Path, description = "Settings id (UUID)")),
    responses(
        (status = 204, description = "Settings deleted"),
        (status = 400, description = "Malformed id", body = ServiceErrorResponse),
        (status = 404, description = "No settings with this id", body = ServiceErrorResponse),
        (status = 500, description = "Unexpected error", body = ServiceErrorResponse),
    )
)]
async fn delete_settings_handler(
    Extension(service): Extension<Arc<Service>>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    handlers::delete_settings(service, ctx, id).await
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "feedback-settings",
    responses((status = 200, description = "Service is alive", body = HealthDto))
)]
async fn health_handler() -> Json<HealthDto> {
    handlers::health().await
}

async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(openapi())
}
