//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI document,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::state::AppState;

/// Adds the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .description(Some(
                            "Static bearer token. Set via AUTH_TOKEN env var; unset disables auth.",
                        ))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Department Registry API",
        version = "0.1.0",
        description = "Records of a university department: teachers and their workplaces, classrooms, disciplines, and additional work.\n\nSaving a teacher creates or updates its workplace classroom in the same unit of work. Room numbers are unique across all classrooms.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
    ),
    security(
        ("bearer_auth" = [])
    ),
    paths(
        crate::routes::dashboard::dashboard,
        crate::routes::teachers::list_teachers,
        crate::routes::teachers::create_teacher,
        crate::routes::teachers::get_teacher,
        crate::routes::teachers::update_teacher,
        crate::routes::teachers::delete_teacher,
        crate::routes::teachers::teacher_form,
        crate::routes::classrooms::list_classrooms,
        crate::routes::classrooms::create_classroom,
        crate::routes::classrooms::get_classroom,
        crate::routes::classrooms::update_classroom,
        crate::routes::classrooms::delete_classroom,
        crate::routes::disciplines::list_disciplines,
        crate::routes::disciplines::create_discipline,
        crate::routes::disciplines::get_discipline,
        crate::routes::disciplines::update_discipline,
        crate::routes::disciplines::delete_discipline,
        crate::routes::work_types::list_work_types,
        crate::routes::work_types::create_work_type,
        crate::routes::work_types::get_work_type,
        crate::routes::work_types::update_work_type,
        crate::routes::work_types::delete_work_type,
        crate::routes::assignments::list_assignments,
        crate::routes::assignments::create_assignment,
        crate::routes::assignments::get_assignment,
        crate::routes::assignments::update_assignment,
        crate::routes::assignments::delete_assignment,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        department_core::Classroom,
        department_core::Discipline,
        department_core::AdditionalWorkType,
        department_core::EmploymentType,
        department_core::Teacher,
        department_core::TeacherAdditionalWork,
        department_core::ClassroomDraft,
        department_core::DisciplineDraft,
        department_core::WorkTypeDraft,
        department_core::TeacherDraft,
        department_core::AssignmentDraft,
        department_core::SavedTeacher,
        department_core::PageInfo,
        department_core::TeacherRow,
        department_core::TeacherStats,
        department_core::TeacherList,
        department_core::TeacherDetail,
        department_core::ClassroomRow,
        department_core::ClassroomList,
        department_core::ClassroomDetail,
        department_core::DisciplineRow,
        department_core::DisciplineList,
        department_core::DisciplineDetail,
        department_core::AssignmentRow,
        department_core::AdditionalWorkDetail,
        department_core::Dashboard,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "dashboard", description = "Department counters"),
        (name = "teachers", description = "Teachers and their workplaces"),
        (name = "classrooms", description = "Classrooms"),
        (name = "disciplines", description = "Course catalogue"),
        (name = "additional_work", description = "Additional work types and assignments"),
    )
)]
pub struct ApiDoc;

/// Router serving the OpenAPI document.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
