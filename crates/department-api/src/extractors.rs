//! # Custom Extractors & Validation
//!
//! Helpers that turn axum rejections into [`AppError`]s with JSON bodies.
//! Field rules live on the department-core drafts and run inside the
//! registry, so handlers only deal with parse failures here.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::Json;
use department_core::validation::SEMESTER_RANGE;
use department_core::{EmploymentType, ValidationError};
use uuid::Uuid;

use crate::error::AppError;

/// Extract a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
///
/// ```ignore
/// async fn handler(body: Result<Json<T>, JsonRejection>) -> Result<..., AppError> {
///     let req = extract_json(body)?;
/// }
/// ```
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extract query parameters, mapping parse errors to [`AppError::BadRequest`].
pub fn extract_query<T>(result: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    result
        .map(|Query(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extract a record id from the path, mapping malformed ids to
/// [`AppError::BadRequest`].
pub fn extract_id(result: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, AppError> {
    result
        .map(|Path(id)| id)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Treat a missing or blank query value as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a `page` query value. Blank means the first page.
pub fn parse_page(value: Option<String>) -> Result<Option<usize>, AppError> {
    non_blank(value)
        .map(|v| {
            v.parse::<usize>().map_err(|_| {
                AppError::Validation(format!("page must be a positive integer, got {v:?}"))
            })
        })
        .transpose()
}

/// Parse an `employment_type` filter. Blank means no filter.
pub fn parse_employment_type(value: Option<String>) -> Result<Option<EmploymentType>, AppError> {
    non_blank(value)
        .map(|v| v.parse::<EmploymentType>().map_err(AppError::from))
        .transpose()
}

/// Parse a `semester` filter. Blank means no filter.
pub fn parse_semester(value: Option<String>) -> Result<Option<i32>, AppError> {
    let Some(v) = non_blank(value) else {
        return Ok(None);
    };
    let semester: i32 = v
        .parse()
        .map_err(|_| AppError::Validation(format!("semester must be an integer, got {v:?}")))?;
    let (min, max) = SEMESTER_RANGE;
    if !(min..=max).contains(&semester) {
        return Err(ValidationError::OutOfRange {
            field: "semester",
            min: min.into(),
            max: max.into(),
            value: semester.into(),
        }
        .into());
    }
    Ok(Some(semester))
}
