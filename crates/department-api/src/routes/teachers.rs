//! # Teachers API
//!
//! Teachers are always saved together with their workplace classroom: the
//! request carries the classroom's room number, capacity and description,
//! and the registry creates the classroom or updates the existing one in
//! the same unit of work. A room number held by another classroom is
//! rejected with 409 and names the current occupant.
//!
//! Routes:
//! - GET    /v1/teachers              list (employment_type, search, page)
//! - POST   /v1/teachers              create teacher and workplace
//! - GET    /v1/teachers/{id}         detail with workplace, disciplines, additional work
//! - PUT    /v1/teachers/{id}         update teacher and workplace
//! - DELETE /v1/teachers/{id}         remove teacher (workplace stays)
//! - GET    /v1/teachers/{id}/form    current values in request shape

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use department_core::{SavedTeacher, Teacher, TeacherDetail, TeacherDraft, TeacherFilter, TeacherList};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::AppError;
use crate::extractors::{
    extract_id, extract_json, extract_query, non_blank, parse_employment_type, parse_page,
};
use crate::state::AppState;

/// Query parameters for the teacher list.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TeacherListParams {
    /// `full` or `part`. Blank means all.
    pub employment_type: Option<String>,
    /// Case-insensitive match on names and position.
    pub search: Option<String>,
    /// 1-based page number.
    pub page: Option<String>,
}

/// Build the teachers router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/teachers", get(list_teachers).post(create_teacher))
        .route(
            "/v1/teachers/{id}",
            get(get_teacher).put(update_teacher).delete(delete_teacher),
        )
        .route("/v1/teachers/{id}/form", get(teacher_form))
}

/// GET /v1/teachers: filtered, paginated list with staff counters.
#[utoipa::path(
    get,
    path = "/v1/teachers",
    params(TeacherListParams),
    responses(
        (status = 200, description = "Teacher page", body = TeacherList),
        (status = 404, description = "Page out of range", body = crate::error::ErrorBody),
        (status = 422, description = "Invalid filter value", body = crate::error::ErrorBody),
    ),
    tag = "teachers"
)]
pub(crate) async fn list_teachers(
    State(state): State<AppState>,
    query: Result<Query<TeacherListParams>, QueryRejection>,
) -> Result<Json<TeacherList>, AppError> {
    let params = extract_query(query)?;
    let filter = TeacherFilter {
        employment_type: parse_employment_type(params.employment_type)?,
        search: non_blank(params.search),
    };
    let page = parse_page(params.page)?;
    let list = state.read(|reg| reg.list_teachers(&filter, page))?;
    Ok(Json(list))
}

/// POST /v1/teachers: create a teacher and its workplace.
#[utoipa::path(
    post,
    path = "/v1/teachers",
    request_body = TeacherDraft,
    responses(
        (status = 201, description = "Teacher created", body = SavedTeacher),
        (status = 409, description = "Room number taken", body = crate::error::ErrorBody),
        (status = 422, description = "Validation failed", body = crate::error::ErrorBody),
    ),
    tag = "teachers"
)]
pub(crate) async fn create_teacher(
    State(state): State<AppState>,
    body: Result<Json<TeacherDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<SavedTeacher>), AppError> {
    let draft = extract_json(body)?;
    let saved = state.transact(|reg| reg.save_teacher(None, draft)).await?;

    tracing::info!(
        teacher_id = %saved.teacher.id,
        room_number = %saved.workplace.room_number,
        workplace_created = saved.workplace_created,
        "teacher created"
    );
    Ok((StatusCode::CREATED, Json(saved)))
}

/// GET /v1/teachers/{id}: teacher with workplace, disciplines and additional work.
#[utoipa::path(
    get,
    path = "/v1/teachers/{id}",
    params(("id" = uuid::Uuid, Path, description = "Teacher ID")),
    responses(
        (status = 200, description = "Teacher found", body = TeacherDetail),
        (status = 404, description = "Teacher not found", body = crate::error::ErrorBody),
    ),
    tag = "teachers"
)]
pub(crate) async fn get_teacher(
    State(state): State<AppState>,
    id: Result<Path<uuid::Uuid>, PathRejection>,
) -> Result<Json<TeacherDetail>, AppError> {
    let id = extract_id(id)?;
    let detail = state.read(|reg| reg.teacher_detail(id))?;
    Ok(Json(detail))
}

/// PUT /v1/teachers/{id}: update a teacher and its workplace.
#[utoipa::path(
    put,
    path = "/v1/teachers/{id}",
    params(("id" = uuid::Uuid, Path, description = "Teacher ID")),
    request_body = TeacherDraft,
    responses(
        (status = 200, description = "Teacher updated", body = SavedTeacher),
        (status = 404, description = "Teacher not found", body = crate::error::ErrorBody),
        (status = 409, description = "Room number taken", body = crate::error::ErrorBody),
        (status = 422, description = "Validation failed", body = crate::error::ErrorBody),
    ),
    tag = "teachers"
)]
pub(crate) async fn update_teacher(
    State(state): State<AppState>,
    id: Result<Path<uuid::Uuid>, PathRejection>,
    body: Result<Json<TeacherDraft>, JsonRejection>,
) -> Result<Json<SavedTeacher>, AppError> {
    let id = extract_id(id)?;
    let draft = extract_json(body)?;
    let saved = state.transact(|reg| reg.save_teacher(Some(id), draft)).await?;

    tracing::info!(
        teacher_id = %saved.teacher.id,
        room_number = %saved.workplace.room_number,
        workplace_created = saved.workplace_created,
        "teacher updated"
    );
    Ok(Json(saved))
}

/// DELETE /v1/teachers/{id}: remove a teacher and its additional work.
#[utoipa::path(
    delete,
    path = "/v1/teachers/{id}",
    params(("id" = uuid::Uuid, Path, description = "Teacher ID")),
    responses(
        (status = 200, description = "Teacher removed", body = Teacher),
        (status = 404, description = "Teacher not found", body = crate::error::ErrorBody),
    ),
    tag = "teachers"
)]
pub(crate) async fn delete_teacher(
    State(state): State<AppState>,
    id: Result<Path<uuid::Uuid>, PathRejection>,
) -> Result<Json<Teacher>, AppError> {
    let id = extract_id(id)?;
    let removed = state.transact(|reg| reg.delete_teacher(id)).await?;
    tracing::info!(teacher_id = %removed.id, "teacher removed");
    Ok(Json(removed))
}

/// GET /v1/teachers/{id}/form: the teacher and its workplace as an editable draft.
#[utoipa::path(
    get,
    path = "/v1/teachers/{id}/form",
    params(("id" = uuid::Uuid, Path, description = "Teacher ID")),
    responses(
        (status = 200, description = "Prefilled form", body = TeacherDraft),
        (status = 404, description = "Teacher not found", body = crate::error::ErrorBody),
    ),
    tag = "teachers"
)]
pub(crate) async fn teacher_form(
    State(state): State<AppState>,
    id: Result<Path<uuid::Uuid>, PathRejection>,
) -> Result<Json<TeacherDraft>, AppError> {
    let id = extract_id(id)?;
    let form = state.read(|reg| reg.teacher_form(id))?;
    Ok(Json(form))
}
