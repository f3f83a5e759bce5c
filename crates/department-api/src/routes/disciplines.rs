//! # Disciplines API
//!
//! Course catalogue. A discipline name is unique per semester; deleting a
//! discipline removes it from every teacher's set.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use department_core::{
    Discipline, DisciplineDetail, DisciplineDraft, DisciplineFilter, DisciplineList,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::AppError;
use crate::extractors::{
    extract_id, extract_json, extract_query, non_blank, parse_page, parse_semester,
};
use crate::state::AppState;

/// Query parameters for the discipline list.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DisciplineListParams {
    /// Semester 1 to 12. Blank means all.
    pub semester: Option<String>,
    /// Case-insensitive match on name and description.
    pub search: Option<String>,
    pub page: Option<String>,
}

/// Build the disciplines router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/disciplines", get(list_disciplines).post(create_discipline))
        .route(
            "/v1/disciplines/{id}",
            get(get_discipline)
                .put(update_discipline)
                .delete(delete_discipline),
        )
}

#[utoipa::path(
    get,
    path = "/v1/disciplines",
    params(DisciplineListParams),
    responses(
        (status = 200, description = "Discipline page", body = DisciplineList),
        (status = 404, description = "Page out of range", body = crate::error::ErrorBody),
        (status = 422, description = "Invalid filter value", body = crate::error::ErrorBody),
    ),
    tag = "disciplines"
)]
pub(crate) async fn list_disciplines(
    State(state): State<AppState>,
    query: Result<Query<DisciplineListParams>, QueryRejection>,
) -> Result<Json<DisciplineList>, AppError> {
    let params = extract_query(query)?;
    let filter = DisciplineFilter {
        semester: parse_semester(params.semester)?,
        search: non_blank(params.search),
    };
    let page = parse_page(params.page)?;
    Ok(Json(state.read(|reg| reg.list_disciplines(&filter, page))?))
}

#[utoipa::path(
    post,
    path = "/v1/disciplines",
    request_body = DisciplineDraft,
    responses(
        (status = 201, description = "Discipline created", body = Discipline),
        (status = 409, description = "Name taken in this semester", body = crate::error::ErrorBody),
        (status = 422, description = "Validation failed", body = crate::error::ErrorBody),
    ),
    tag = "disciplines"
)]
pub(crate) async fn create_discipline(
    State(state): State<AppState>,
    body: Result<Json<DisciplineDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Discipline>), AppError> {
    let draft = extract_json(body)?;
    let discipline = state.transact(|reg| reg.create_discipline(draft)).await?;
    tracing::info!(discipline_id = %discipline.id, semester = discipline.semester, "discipline created");
    Ok((StatusCode::CREATED, Json(discipline)))
}

#[utoipa::path(
    get,
    path = "/v1/disciplines/{id}",
    params(("id" = uuid::Uuid, Path, description = "Discipline ID")),
    responses(
        (status = 200, description = "Discipline with its teachers", body = DisciplineDetail),
        (status = 404, description = "Discipline not found", body = crate::error::ErrorBody),
    ),
    tag = "disciplines"
)]
pub(crate) async fn get_discipline(
    State(state): State<AppState>,
    id: Result<Path<uuid::Uuid>, PathRejection>,
) -> Result<Json<DisciplineDetail>, AppError> {
    let id = extract_id(id)?;
    Ok(Json(state.read(|reg| reg.discipline_detail(id))?))
}

#[utoipa::path(
    put,
    path = "/v1/disciplines/{id}",
    params(("id" = uuid::Uuid, Path, description = "Discipline ID")),
    request_body = DisciplineDraft,
    responses(
        (status = 200, description = "Discipline updated", body = Discipline),
        (status = 404, description = "Discipline not found", body = crate::error::ErrorBody),
        (status = 409, description = "Name taken in this semester", body = crate::error::ErrorBody),
        (status = 422, description = "Validation failed", body = crate::error::ErrorBody),
    ),
    tag = "disciplines"
)]
pub(crate) async fn update_discipline(
    State(state): State<AppState>,
    id: Result<Path<uuid::Uuid>, PathRejection>,
    body: Result<Json<DisciplineDraft>, JsonRejection>,
) -> Result<Json<Discipline>, AppError> {
    let id = extract_id(id)?;
    let draft = extract_json(body)?;
    Ok(Json(state.transact(|reg| reg.update_discipline(id, draft)).await?))
}

#[utoipa::path(
    delete,
    path = "/v1/disciplines/{id}",
    params(("id" = uuid::Uuid, Path, description = "Discipline ID")),
    responses(
        (status = 200, description = "Discipline removed", body = Discipline),
        (status = 404, description = "Discipline not found", body = crate::error::ErrorBody),
    ),
    tag = "disciplines"
)]
pub(crate) async fn delete_discipline(
    State(state): State<AppState>,
    id: Result<Path<uuid::Uuid>, PathRejection>,
) -> Result<Json<Discipline>, AppError> {
    let id = extract_id(id)?;
    let removed = state.transact(|reg| reg.delete_discipline(id)).await?;
    tracing::info!(discipline_id = %removed.id, "discipline removed");
    Ok(Json(removed))
}
