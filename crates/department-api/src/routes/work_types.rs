//! # Additional Work Types API
//!
//! Kinds of non-teaching work (curatorship, supervision, committees).
//! Deleting a type removes every assignment of it.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use department_core::{AdditionalWorkType, RegistryError, WorkTypeDraft};

use crate::error::AppError;
use crate::extractors::{extract_id, extract_json};
use crate::state::AppState;

/// Build the additional work types router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/additional-work-types",
            get(list_work_types).post(create_work_type),
        )
        .route(
            "/v1/additional-work-types/{id}",
            get(get_work_type).put(update_work_type).delete(delete_work_type),
        )
}

#[utoipa::path(
    get,
    path = "/v1/additional-work-types",
    responses(
        (status = 200, description = "All work types by name", body = Vec<AdditionalWorkType>),
    ),
    tag = "additional_work"
)]
pub(crate) async fn list_work_types(State(state): State<AppState>) -> Json<Vec<AdditionalWorkType>> {
    Json(state.read(|reg| reg.list_work_types()))
}

#[utoipa::path(
    post,
    path = "/v1/additional-work-types",
    request_body = WorkTypeDraft,
    responses(
        (status = 201, description = "Work type created", body = AdditionalWorkType),
        (status = 409, description = "Name taken", body = crate::error::ErrorBody),
        (status = 422, description = "Validation failed", body = crate::error::ErrorBody),
    ),
    tag = "additional_work"
)]
pub(crate) async fn create_work_type(
    State(state): State<AppState>,
    body: Result<Json<WorkTypeDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<AdditionalWorkType>), AppError> {
    let draft = extract_json(body)?;
    let work_type = state.transact(|reg| reg.create_work_type(draft)).await?;
    tracing::info!(work_type_id = %work_type.id, name = %work_type.name, "work type created");
    Ok((StatusCode::CREATED, Json(work_type)))
}

#[utoipa::path(
    get,
    path = "/v1/additional-work-types/{id}",
    params(("id" = uuid::Uuid, Path, description = "Work type ID")),
    responses(
        (status = 200, description = "Work type found", body = AdditionalWorkType),
        (status = 404, description = "Work type not found", body = crate::error::ErrorBody),
    ),
    tag = "additional_work"
)]
pub(crate) async fn get_work_type(
    State(state): State<AppState>,
    id: Result<Path<uuid::Uuid>, PathRejection>,
) -> Result<Json<AdditionalWorkType>, AppError> {
    let id = extract_id(id)?;
    state
        .read(|reg| reg.work_type(id).cloned())
        .map(Json)
        .ok_or_else(|| {
            RegistryError::NotFound {
                kind: "additional work type",
                id,
            }
            .into()
        })
}

#[utoipa::path(
    put,
    path = "/v1/additional-work-types/{id}",
    params(("id" = uuid::Uuid, Path, description = "Work type ID")),
    request_body = WorkTypeDraft,
    responses(
        (status = 200, description = "Work type updated", body = AdditionalWorkType),
        (status = 404, description = "Work type not found", body = crate::error::ErrorBody),
        (status = 409, description = "Name taken", body = crate::error::ErrorBody),
        (status = 422, description = "Validation failed", body = crate::error::ErrorBody),
    ),
    tag = "additional_work"
)]
pub(crate) async fn update_work_type(
    State(state): State<AppState>,
    id: Result<Path<uuid::Uuid>, PathRejection>,
    body: Result<Json<WorkTypeDraft>, JsonRejection>,
) -> Result<Json<AdditionalWorkType>, AppError> {
    let id = extract_id(id)?;
    let draft = extract_json(body)?;
    Ok(Json(state.transact(|reg| reg.update_work_type(id, draft)).await?))
}

#[utoipa::path(
    delete,
    path = "/v1/additional-work-types/{id}",
    params(("id" = uuid::Uuid, Path, description = "Work type ID")),
    responses(
        (status = 200, description = "Work type and its assignments removed", body = AdditionalWorkType),
        (status = 404, description = "Work type not found", body = crate::error::ErrorBody),
    ),
    tag = "additional_work"
)]
pub(crate) async fn delete_work_type(
    State(state): State<AppState>,
    id: Result<Path<uuid::Uuid>, PathRejection>,
) -> Result<Json<AdditionalWorkType>, AppError> {
    let id = extract_id(id)?;
    let removed = state.transact(|reg| reg.delete_work_type(id)).await?;
    tracing::info!(work_type_id = %removed.id, "work type removed");
    Ok(Json(removed))
}
