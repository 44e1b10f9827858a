//! HTTP request handlers - thin layer that delegates to domain service

use super::{
    dto::*,
    error::{map_query_rejection, ApiError, RequestContext},
    mapper,
};
use crate::domain::Service;
use axum::{
    extract::{rejection::QueryRejection, Query},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

/// Create settings; responds 201 with a `Location` header
pub async fn create_settings(
    service: Arc<Service>,
    ctx: RequestContext,
    body: Option<CreateFeedbackSettingsRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let new_settings = mapper::new_settings_from_request(body).map_err(|e| ctx.fail(e))?;

    let settings = service
        .create_settings(new_settings)
        .await
        .map_err(|e| ctx.fail(e))?;

    let location = format!("/settings/{}", settings.id);
    let dto: FeedbackSettingsDto = settings.into();
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(dto)))
}

/// Reconcile the channels of existing settings
pub async fn update_settings(
    service: Arc<Service>,
    ctx: RequestContext,
    id: String,
    body: Option<UpdateFeedbackSettingsRequest>,
) -> Result<Json<FeedbackSettingsDto>, ApiError> {
    let (id, patch) = mapper::update_from_request(&id, body).map_err(|e| ctx.fail(e))?;

    let settings = service
        .update_settings(id, patch)
        .await
        .map_err(|e| ctx.fail(e))?;

    Ok(Json(settings.into()))
}

/// Get settings by id
pub async fn get_settings(
    service: Arc<Service>,
    ctx: RequestContext,
    id: String,
) -> Result<Json<FeedbackSettingsDto>, ApiError> {
    let id = mapper::id_from_path(&id).map_err(|e| ctx.fail(e))?;

    let settings = service.get_settings(id).await.map_err(|e| ctx.fail(e))?;

    Ok(Json(settings.into()))
}

/// Paginated search
pub async fn search_settings(
    service: Arc<Service>,
    ctx: RequestContext,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<SearchResultDto>, ApiError> {
    let Query(query) = query.map_err(|rejection| ctx.reject(map_query_rejection(rejection)))?;
    let (filter, page) = mapper::search_from_query(query).map_err(|e| ctx.fail(e))?;

    let result = service
        .search_settings(filter, page)
        .await
        .map_err(|e| ctx.fail(e))?;

    Ok(Json(result.into()))
}

/// Delete settings by id
pub async fn delete_settings(
    service: Arc<Service>,
    ctx: RequestContext,
    id: String,
) -> Result<StatusCode, ApiError> {
    let id = mapper::id_from_path(&id).map_err(|e| ctx.fail(e))?;

    service.delete_settings(id).await.map_err(|e| ctx.fail(e))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Liveness probe
pub async fn health() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_owned(),
    })
}
