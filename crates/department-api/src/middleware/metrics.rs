//! # Request Metrics
//!
//! In-process request and error counters, mirrored into the `metrics`
//! facade. When a Prometheus recorder is installed (see `main.rs`) the
//! facade series are exported by it; otherwise `/metrics` renders the
//! in-process counters directly.

use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use department_core::Dashboard;

/// Shared metrics state.
#[derive(Debug, Clone)]
pub struct ApiMetrics {
    pub request_count: Arc<AtomicU64>,
    pub error_count: Arc<AtomicU64>,
}

impl ApiMetrics {
    /// Create a new metrics instance.
    pub fn new() -> Self {
        Self {
            request_count: Arc::new(AtomicU64::new(0)),
            error_count: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Return current request count.
    pub fn requests(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Return current error count.
    pub fn errors(&self) -> u64 {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Prometheus text exposition of the in-process counters and the
    /// department gauges.
    pub fn render(&self, dashboard: &Dashboard) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# TYPE department_http_requests_total counter");
        let _ = writeln!(out, "department_http_requests_total {}", self.requests());
        let _ = writeln!(out, "# TYPE department_http_errors_total counter");
        let _ = writeln!(out, "department_http_errors_total {}", self.errors());
        let _ = writeln!(out, "# TYPE department_teachers gauge");
        let _ = writeln!(
            out,
            "department_teachers{{employment_type=\"full\"}} {}",
            dashboard.full_time_teachers
        );
        let _ = writeln!(
            out,
            "department_teachers{{employment_type=\"part\"}} {}",
            dashboard.part_time_teachers
        );
        let _ = writeln!(out, "# TYPE department_classrooms gauge");
        let _ = writeln!(out, "department_classrooms {}", dashboard.total_classrooms);
        let _ = writeln!(out, "# TYPE department_disciplines gauge");
        let _ = writeln!(out, "department_disciplines {}", dashboard.total_disciplines);
        out
    }
}

impl Default for ApiMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Publish the department gauges through the `metrics` facade.
pub fn record_dashboard(dashboard: &Dashboard) {
    metrics::gauge!("department_teachers", "employment_type" => "full")
        .set(dashboard.full_time_teachers as f64);
    metrics::gauge!("department_teachers", "employment_type" => "part")
        .set(dashboard.part_time_teachers as f64);
    metrics::gauge!("department_classrooms").set(dashboard.total_classrooms as f64);
    metrics::gauge!("department_disciplines").set(dashboard.total_disciplines as f64);
}

/// Middleware that counts requests and errors and records latency.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let metrics = request.extensions().get::<ApiMetrics>().cloned();
    let method = request.method().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let failed = status.is_client_error() || status.is_server_error();
    if let Some(m) = metrics {
        m.request_count.fetch_add(1, Ordering::Relaxed);
        if failed {
            m.error_count.fetch_add(1, Ordering::Relaxed);
        }
    }

    metrics::counter!(
        "department_http_requests_total",
        "method" => method.clone(),
        "status" => status.as_u16().to_string()
    )
    .increment(1);
    if failed {
        metrics::counter!("department_http_errors_total", "method" => method.clone()).increment(1);
    }
    metrics::histogram!("department_http_request_duration_seconds", "method" => method)
        .record(started.elapsed().as_secs_f64());

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::middleware::from_fn;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    fn app(metrics: ApiMetrics) -> Router {
        Router::new()
            .route("/ok", get(|| async { "ok" }))
            .route("/fail", get(|| async { StatusCode::CONFLICT }))
            .layer(from_fn(metrics_middleware))
            .layer(axum::Extension(metrics))
    }

    #[tokio::test]
    async fn counts_requests_and_errors() {
        let metrics = ApiMetrics::new();
        for uri in ["/ok", "/ok", "/fail"] {
            app(metrics.clone())
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
        }
        assert_eq!(metrics.requests(), 3);
        assert_eq!(metrics.errors(), 1);
    }

    #[test]
    fn render_includes_gauges() {
        let metrics = ApiMetrics::new();
        let dashboard = Dashboard {
            total_teachers: 3,
            full_time_teachers: 2,
            part_time_teachers: 1,
            total_classrooms: 4,
            total_disciplines: 5,
        };
        let text = metrics.render(&dashboard);
        assert!(text.contains("department_http_requests_total 0"));
        assert!(text.contains("department_teachers{employment_type=\"full\"} 2"));
        assert!(text.contains("department_classrooms 4"));
        assert!(text.contains("department_disciplines 5"));
    }
}
