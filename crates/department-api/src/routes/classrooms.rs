//! # Classrooms API
//!
//! Standalone classroom management. Deleting a classroom frees the
//! workplace of any teacher assigned to it.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use department_core::{Classroom, ClassroomDetail, ClassroomDraft, ClassroomFilter, ClassroomList};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::AppError;
use crate::extractors::{extract_id, extract_json, extract_query, non_blank, parse_page};
use crate::state::AppState;

/// Query parameters for the classroom list.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClassroomListParams {
    /// Case-insensitive match on room number and description.
    pub search: Option<String>,
    pub page: Option<String>,
}

/// Build the classrooms router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/classrooms", get(list_classrooms).post(create_classroom))
        .route(
            "/v1/classrooms/{id}",
            get(get_classroom).put(update_classroom).delete(delete_classroom),
        )
}

/// GET /v1/classrooms: paginated list with capacity and occupancy totals.
#[utoipa::path(
    get,
    path = "/v1/classrooms",
    params(ClassroomListParams),
    responses(
        (status = 200, description = "Classroom page", body = ClassroomList),
        (status = 404, description = "Page out of range", body = crate::error::ErrorBody),
    ),
    tag = "classrooms"
)]
pub(crate) async fn list_classrooms(
    State(state): State<AppState>,
    query: Result<Query<ClassroomListParams>, QueryRejection>,
) -> Result<Json<ClassroomList>, AppError> {
    let params = extract_query(query)?;
    let filter = ClassroomFilter {
        search: non_blank(params.search),
    };
    let page = parse_page(params.page)?;
    Ok(Json(state.read(|reg| reg.list_classrooms(&filter, page))?))
}

#[utoipa::path(
    post,
    path = "/v1/classrooms",
    request_body = ClassroomDraft,
    responses(
        (status = 201, description = "Classroom created", body = Classroom),
        (status = 409, description = "Room number taken", body = crate::error::ErrorBody),
        (status = 422, description = "Validation failed", body = crate::error::ErrorBody),
    ),
    tag = "classrooms"
)]
pub(crate) async fn create_classroom(
    State(state): State<AppState>,
    body: Result<Json<ClassroomDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Classroom>), AppError> {
    let draft = extract_json(body)?;
    let classroom = state.transact(|reg| reg.create_classroom(draft)).await?;
    tracing::info!(classroom_id = %classroom.id, room_number = %classroom.room_number, "classroom created");
    Ok((StatusCode::CREATED, Json(classroom)))
}

#[utoipa::path(
    get,
    path = "/v1/classrooms/{id}",
    params(("id" = uuid::Uuid, Path, description = "Classroom ID")),
    responses(
        (status = 200, description = "Classroom with its teachers", body = ClassroomDetail),
        (status = 404, description = "Classroom not found", body = crate::error::ErrorBody),
    ),
    tag = "classrooms"
)]
pub(crate) async fn get_classroom(
    State(state): State<AppState>,
    id: Result<Path<uuid::Uuid>, PathRejection>,
) -> Result<Json<ClassroomDetail>, AppError> {
    let id = extract_id(id)?;
    Ok(Json(state.read(|reg| reg.classroom_detail(id))?))
}

#[utoipa::path(
    put,
    path = "/v1/classrooms/{id}",
    params(("id" = uuid::Uuid, Path, description = "Classroom ID")),
    request_body = ClassroomDraft,
    responses(
        (status = 200, description = "Classroom updated", body = Classroom),
        (status = 404, description = "Classroom not found", body = crate::error::ErrorBody),
        (status = 409, description = "Room number taken", body = crate::error::ErrorBody),
        (status = 422, description = "Validation failed", body = crate::error::ErrorBody),
    ),
    tag = "classrooms"
)]
pub(crate) async fn update_classroom(
    State(state): State<AppState>,
    id: Result<Path<uuid::Uuid>, PathRejection>,
    body: Result<Json<ClassroomDraft>, JsonRejection>,
) -> Result<Json<Classroom>, AppError> {
    let id = extract_id(id)?;
    let draft = extract_json(body)?;
    let classroom = state.transact(|reg| reg.update_classroom(id, draft)).await?;
    Ok(Json(classroom))
}

#[utoipa::path(
    delete,
    path = "/v1/classrooms/{id}",
    params(("id" = uuid::Uuid, Path, description = "Classroom ID")),
    responses(
        (status = 200, description = "Classroom removed", body = Classroom),
        (status = 404, description = "Classroom not found", body = crate::error::ErrorBody),
    ),
    tag = "classrooms"
)]
pub(crate) async fn delete_classroom(
    State(state): State<AppState>,
    id: Result<Path<uuid::Uuid>, PathRejection>,
) -> Result<Json<Classroom>, AppError> {
    let id = extract_id(id)?;
    let removed = state.transact(|reg| reg.delete_classroom(id)).await?;
    tracing::info!(classroom_id = %removed.id, room_number = %removed.room_number, "classroom removed");
    Ok(Json(removed))
}
