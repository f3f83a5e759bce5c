//! # Teacher Additional Work API
//!
//! Assignments of a teacher to a kind of additional work, with a start
//! date and an optional end date. A teacher holds at most one assignment
//! per work type.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use department_core::{AssignmentDraft, AssignmentRow, TeacherAdditionalWork};

use crate::error::AppError;
use crate::extractors::{extract_id, extract_json};
use crate::state::AppState;

/// Build the teacher additional work router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/teacher-additional-works",
            get(list_assignments).post(create_assignment),
        )
        .route(
            "/v1/teacher-additional-works/{id}",
            get(get_assignment)
                .put(update_assignment)
                .delete(delete_assignment),
        )
}

#[utoipa::path(
    get,
    path = "/v1/teacher-additional-works",
    responses(
        (status = 200, description = "All assignments, newest first", body = Vec<AssignmentRow>),
    ),
    tag = "additional_work"
)]
pub(crate) async fn list_assignments(State(state): State<AppState>) -> Json<Vec<AssignmentRow>> {
    Json(state.read(|reg| reg.list_assignments()))
}

#[utoipa::path(
    post,
    path = "/v1/teacher-additional-works",
    request_body = AssignmentDraft,
    responses(
        (status = 201, description = "Assignment created", body = TeacherAdditionalWork),
        (status = 409, description = "Teacher already has this work type", body = crate::error::ErrorBody),
        (status = 422, description = "Validation failed or unknown reference", body = crate::error::ErrorBody),
    ),
    tag = "additional_work"
)]
pub(crate) async fn create_assignment(
    State(state): State<AppState>,
    body: Result<Json<AssignmentDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<TeacherAdditionalWork>), AppError> {
    let draft = extract_json(body)?;
    let assignment = state.transact(|reg| reg.create_assignment(draft)).await?;
    tracing::info!(
        assignment_id = %assignment.id,
        teacher_id = %assignment.teacher_id,
        work_type_id = %assignment.work_type_id,
        "additional work assigned"
    );
    Ok((StatusCode::CREATED, Json(assignment)))
}

#[utoipa::path(
    get,
    path = "/v1/teacher-additional-works/{id}",
    params(("id" = uuid::Uuid, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Assignment found", body = AssignmentRow),
        (status = 404, description = "Assignment not found", body = crate::error::ErrorBody),
    ),
    tag = "additional_work"
)]
pub(crate) async fn get_assignment(
    State(state): State<AppState>,
    id: Result<Path<uuid::Uuid>, PathRejection>,
) -> Result<Json<AssignmentRow>, AppError> {
    let id = extract_id(id)?;
    Ok(Json(state.read(|reg| reg.assignment_detail(id))?))
}

#[utoipa::path(
    put,
    path = "/v1/teacher-additional-works/{id}",
    params(("id" = uuid::Uuid, Path, description = "Assignment ID")),
    request_body = AssignmentDraft,
    responses(
        (status = 200, description = "Assignment updated", body = TeacherAdditionalWork),
        (status = 404, description = "Assignment not found", body = crate::error::ErrorBody),
        (status = 409, description = "Teacher already has this work type", body = crate::error::ErrorBody),
        (status = 422, description = "Validation failed or unknown reference", body = crate::error::ErrorBody),
    ),
    tag = "additional_work"
)]
pub(crate) async fn update_assignment(
    State(state): State<AppState>,
    id: Result<Path<uuid::Uuid>, PathRejection>,
    body: Result<Json<AssignmentDraft>, JsonRejection>,
) -> Result<Json<TeacherAdditionalWork>, AppError> {
    let id = extract_id(id)?;
    let draft = extract_json(body)?;
    Ok(Json(state.transact(|reg| reg.update_assignment(id, draft)).await?))
}

#[utoipa::path(
    delete,
    path = "/v1/teacher-additional-works/{id}",
    params(("id" = uuid::Uuid, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Assignment removed", body = TeacherAdditionalWork),
        (status = 404, description = "Assignment not found", body = crate::error::ErrorBody),
    ),
    tag = "additional_work"
)]
pub(crate) async fn delete_assignment(
    State(state): State<AppState>,
    id: Result<Path<uuid::Uuid>, PathRejection>,
) -> Result<Json<TeacherAdditionalWork>, AppError> {
    let id = extract_id(id)?;
    let removed = state.transact(|reg| reg.delete_assignment(id)).await?;
    tracing::info!(assignment_id = %removed.id, "additional work removed");
    Ok(Json(removed))
}
