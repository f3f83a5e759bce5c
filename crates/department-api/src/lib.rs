//! # department-api: Axum API Service
//!
//! HTTP surface over the department registry, built on Axum/Tower/Tokio.
//!
//! ## API Surface
//!
//! | Prefix                              | Module                       |
//! |-------------------------------------|------------------------------|
//! | `/v1/dashboard`                     | [`routes::dashboard`]        |
//! | `/v1/teachers/*`                    | [`routes::teachers`]         |
//! | `/v1/classrooms/*`                  | [`routes::classrooms`]       |
//! | `/v1/disciplines/*`                 | [`routes::disciplines`]      |
//! | `/v1/additional-work-types/*`       | [`routes::work_types`]       |
//! | `/v1/teacher-additional-works/*`    | [`routes::assignments`]      |
//! | `/openapi.json`                     | [`openapi`]                  |
//! | `/health/*`, `/metrics`             | unauthenticated probes       |
//!
//! ## Middleware Stack (outermost first)
//!
//! TraceLayer → MetricsMiddleware → AuthMiddleware → Handler
//!
//! ## Crate Policy
//!
//! - No business logic in route handlers; the registry in department-core
//!   owns every rule.
//! - All errors map to structured JSON responses via [`AppError`].

pub mod auth;
pub mod db;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, StatusCode};
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::{Extension, Router};
use tower_http::trace::TraceLayer;

use crate::auth::AuthConfig;
use crate::middleware::metrics::{record_dashboard, ApiMetrics};

pub use error::AppError;
pub use state::{AppConfig, AppState};

/// Build the complete application router.
pub fn app(state: AppState) -> Router {
    let auth_config = AuthConfig {
        token: state.config.auth_token.clone(),
    };
    let metrics = ApiMetrics::new();

    let api = Router::new()
        .merge(routes::dashboard::router())
        .merge(routes::teachers::router())
        .merge(routes::classrooms::router())
        .merge(routes::disciplines::router())
        .merge(routes::work_types::router())
        .merge(routes::assignments::router())
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(from_fn(auth::auth_middleware))
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(auth_config))
        .layer(Extension(metrics.clone()))
        .with_state(state.clone());

    let unauthenticated = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness))
        .route("/metrics", axum::routing::get(prometheus_metrics))
        .layer(Extension(metrics))
        .with_state(state);

    Router::new().merge(unauthenticated).merge(api)
}

/// GET /health/liveness: the process is up.
async fn liveness() -> &'static str {
    "ok"
}

/// GET /health/readiness: the backing store is reachable.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    if state.ready().await {
        (StatusCode::OK, "ready")
    } else {
        tracing::warn!("readiness check failed: database unreachable");
        (StatusCode::SERVICE_UNAVAILABLE, "database unavailable")
    }
}

/// GET /metrics: Prometheus scrape endpoint.
///
/// Department gauges are refreshed from the registry on each scrape.
async fn prometheus_metrics(
    State(state): State<AppState>,
    Extension(metrics): Extension<ApiMetrics>,
) -> impl IntoResponse {
    let dashboard = state.read(|reg| reg.dashboard());
    record_dashboard(&dashboard);

    let body = match &state.metrics_handle {
        Some(handle) => handle.render(),
        None => metrics.render(&dashboard),
    };
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
}
