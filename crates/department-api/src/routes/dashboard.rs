//! # Dashboard
//!
//! Headline counters for the department home page.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use department_core::Dashboard;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/v1/dashboard", get(dashboard))
}

/// GET /v1/dashboard: teacher, classroom and discipline counts.
#[utoipa::path(
    get,
    path = "/v1/dashboard",
    responses(
        (status = 200, description = "Department counters", body = Dashboard),
    ),
    tag = "dashboard"
)]
pub(crate) async fn dashboard(State(state): State<AppState>) -> Json<Dashboard> {
    Json(state.read(|reg| reg.dashboard()))
}
