//! # Integration Tests for department-api
//!
//! Drives the full router in memory: teacher/workplace co-creation and
//! room conflicts, list filters and pagination, cascades, additional work
//! rules, authentication, health probes, metrics and the OpenAPI document.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use department_api::state::{AppConfig, AppState};

/// Helper: build the test app with auth disabled and no database.
fn test_app() -> Router {
    department_api::app(AppState::new())
}

/// Helper: build the test app with auth enabled.
fn test_app_with_auth(token: &str) -> Router {
    let config = AppConfig {
        port: 8080,
        auth_token: Some(token.to_string()),
    };
    department_api::app(AppState::with_config(config, None))
}

/// Helper: read response body as string.
async fn body_string(response: axum::http::Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Helper: send a request and decode the JSON response.
async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let text = body_string(response).await;
    let json = serde_json::from_str(&text).unwrap_or(Value::Null);
    (status, json)
}

fn teacher_json(last_name: &str, room_number: &str) -> Value {
    json!({
        "last_name": last_name,
        "first_name": "Anna",
        "middle_name": "Igorevna",
        "email": format!("{}.a@university.edu", last_name.to_lowercase()),
        "phone": "+7(912)-345-67-89",
        "position": "Associate Professor",
        "academic_degree": "Candidate of Technical Sciences",
        "employment_date": "2021-09-01",
        "employment_type": "full",
        "rate": 1.0,
        "room_number": room_number,
        "capacity": 2,
        "classroom_description": "Staff office"
    })
}

async fn create_teacher(app: &Router, last_name: &str, room_number: &str) -> Value {
    let (status, body) = call(app, "POST", "/v1/teachers", Some(teacher_json(last_name, room_number))).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn test_liveness_probe() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/health/liveness")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_readiness_probe_in_memory() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/health/readiness")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ready");
}

// -- Teachers and workplaces --------------------------------------------------

#[tokio::test]
async fn test_create_teacher_creates_workplace() {
    let app = test_app();
    let saved = create_teacher(&app, "Petrova", "305").await;

    assert_eq!(saved["workplace_created"], true);
    assert_eq!(saved["workplace"]["room_number"], "305");
    assert_eq!(saved["workplace"]["capacity"], 2);
    assert_eq!(saved["teacher"]["workplace_id"], saved["workplace"]["id"]);

    let classroom_id = saved["workplace"]["id"].as_str().unwrap();
    let (status, detail) = call(&app, "GET", &format!("/v1/classrooms/{classroom_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["teacher_count"], 1);
    assert_eq!(detail["teachers"][0]["full_name"], "Petrova Anna Igorevna");

    let (_, dashboard) = call(&app, "GET", "/v1/dashboard", None).await;
    assert_eq!(dashboard["total_teachers"], 1);
    assert_eq!(dashboard["full_time_teachers"], 1);
    assert_eq!(dashboard["total_classrooms"], 1);
}

#[tokio::test]
async fn test_taken_room_returns_409_with_occupant() {
    let app = test_app();
    create_teacher(&app, "Petrova", "305").await;

    let (status, body) = call(&app, "POST", "/v1/teachers", Some(teacher_json("Sokolova", "305"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
    let message = body["error"]["message"].as_str().unwrap();
    assert!(message.contains("305"), "{message}");
    assert!(message.contains("Petrova Anna Igorevna"), "{message}");

    // Nothing from the rejected save is visible.
    let (_, dashboard) = call(&app, "GET", "/v1/dashboard", None).await;
    assert_eq!(dashboard["total_teachers"], 1);
    assert_eq!(dashboard["total_classrooms"], 1);
}

#[tokio::test]
async fn test_update_teacher_renumbers_same_classroom() {
    let app = test_app();
    let saved = create_teacher(&app, "Petrova", "305").await;
    let id = saved["teacher"]["id"].as_str().unwrap();

    let (status, form) = call(&app, "GET", &format!("/v1/teachers/{id}/form"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(form["room_number"], "305");
    assert_eq!(form["capacity"], 2);

    let mut form = form;
    form["room_number"] = json!("306");
    form["employment_type"] = json!("part");
    form["rate"] = json!(0.5);
    let (status, updated) = call(&app, "PUT", &format!("/v1/teachers/{id}"), Some(form)).await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["workplace_created"], false);
    assert_eq!(updated["workplace"]["id"], saved["workplace"]["id"]);
    assert_eq!(updated["workplace"]["room_number"], "306");

    // The old number is free again.
    create_teacher(&app, "Sokolova", "305").await;

    let (_, detail) = call(&app, "GET", &format!("/v1/teachers/{id}"), None).await;
    assert_eq!(detail["room_number"], "306");
    assert_eq!(detail["employment_type_display"], "Part-time");
    assert_eq!(detail["workplace"]["room_number"], "306");
}

#[tokio::test]
async fn test_update_missing_teacher_returns_404() {
    let app = test_app();
    let uri = format!("/v1/teachers/{}", uuid::Uuid::new_v4());
    let (status, body) = call(&app, "PUT", &uri, Some(teacher_json("Petrova", "305"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_invalid_rate_returns_422() {
    let app = test_app();
    let mut draft = teacher_json("Petrova", "305");
    draft["rate"] = json!(0.1);
    let (status, body) = call(&app, "POST", "/v1/teachers", Some(draft)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["details"]["field"], "rate");

    let (_, classrooms) = call(&app, "GET", "/v1/classrooms", None).await;
    assert_eq!(classrooms["page"]["total"], 0);
}

#[tokio::test]
async fn test_invalid_email_returns_422() {
    let app = test_app();
    let mut draft = teacher_json("Petrova", "305");
    draft["email"] = json!("petrova.university.edu");
    let (status, body) = call(&app, "POST", "/v1/teachers", Some(draft)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["details"]["field"], "email");
}

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/teachers")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_malformed_id_returns_400() {
    let (status, _) = call(&test_app(), "GET", "/v1/teachers/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_teacher_keeps_classroom() {
    let app = test_app();
    let saved = create_teacher(&app, "Petrova", "305").await;
    let id = saved["teacher"]["id"].as_str().unwrap();

    let (status, removed) = call(&app, "DELETE", &format!("/v1/teachers/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed["last_name"], "Petrova");

    let (status, _) = call(&app, "GET", &format!("/v1/teachers/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let classroom_id = saved["workplace"]["id"].as_str().unwrap();
    let (status, classroom) = call(&app, "GET", &format!("/v1/classrooms/{classroom_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(classroom["teacher_count"], 0);

    // The standalone classroom still blocks its number.
    let (status, body) = call(&app, "POST", "/v1/teachers", Some(teacher_json("Sokolova", "305"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"]["message"].as_str().unwrap().contains("none"));
}

#[tokio::test]
async fn test_delete_classroom_frees_teacher_workplace() {
    let app = test_app();
    let saved = create_teacher(&app, "Petrova", "305").await;
    let classroom_id = saved["workplace"]["id"].as_str().unwrap();
    let teacher_id = saved["teacher"]["id"].as_str().unwrap();

    let (status, _) = call(&app, "DELETE", &format!("/v1/classrooms/{classroom_id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, detail) = call(&app, "GET", &format!("/v1/teachers/{teacher_id}"), None).await;
    assert_eq!(detail["workplace_id"], Value::Null);
    assert_eq!(detail["workplace"], Value::Null);

    // Saving the teacher again creates a fresh workplace.
    let (status, saved) = call(
        &app,
        "PUT",
        &format!("/v1/teachers/{teacher_id}"),
        Some(teacher_json("Petrova", "305")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["workplace_created"], true);
}

#[tokio::test]
async fn test_update_teacher_into_other_classroom_returns_409() {
    let app = test_app();
    let (status, _) = call(
        &app,
        "POST",
        "/v1/classrooms",
        Some(json!({"room_number": "410", "capacity": 40, "description": "Lab"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let saved = create_teacher(&app, "Petrova", "305").await;
    let id = saved["teacher"]["id"].as_str().unwrap();

    let (status, body) = call(
        &app,
        "PUT",
        &format!("/v1/teachers/{id}"),
        Some(teacher_json("Petrova", "410")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    let message = body["error"]["message"].as_str().unwrap();
    assert!(message.contains("410"), "{message}");
    assert!(message.contains("none"), "{message}");

    // Nothing moved.
    let (_, detail) = call(&app, "GET", &format!("/v1/teachers/{id}"), None).await;
    assert_eq!(detail["workplace"]["room_number"], "305");
    let (_, classrooms) = call(&app, "GET", "/v1/classrooms", None).await;
    assert_eq!(classrooms["page"]["total"], 2);
}

// -- Classrooms ---------------------------------------------------------------

#[tokio::test]
async fn test_classroom_create_and_update() {
    let app = test_app();
    let (status, created) = call(
        &app,
        "POST",
        "/v1/classrooms",
        Some(json!({"room_number": "101", "capacity": 30, "description": "Seminar room"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["room_number"], "101");
    let id = created["id"].as_str().unwrap();

    // Keeping its own number is not a conflict.
    let (status, updated) = call(
        &app,
        "PUT",
        &format!("/v1/classrooms/{id}"),
        Some(json!({"room_number": "101", "capacity": 45, "description": "Seminar room"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["capacity"], 45);
}

#[tokio::test]
async fn test_classroom_duplicate_room_returns_409() {
    let app = test_app();
    let draft = json!({"room_number": "101", "capacity": 30, "description": ""});
    let (status, _) = call(&app, "POST", "/v1/classrooms", Some(draft.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call(&app, "POST", "/v1/classrooms", Some(draft)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");

    let (status, other) = call(
        &app,
        "POST",
        "/v1/classrooms",
        Some(json!({"room_number": "102", "capacity": 30, "description": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let other_id = other["id"].as_str().unwrap();

    let (status, _) = call(
        &app,
        "PUT",
        &format!("/v1/classrooms/{other_id}"),
        Some(json!({"room_number": "101", "capacity": 30, "description": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_classroom_zero_capacity_returns_422() {
    let app = test_app();
    let (status, body) = call(
        &app,
        "POST",
        "/v1/classrooms",
        Some(json!({"room_number": "101", "capacity": 0, "description": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["details"]["field"], "capacity");

    let (_, list) = call(&app, "GET", "/v1/classrooms", None).await;
    assert_eq!(list["page"]["total"], 0);
}

// -- Lists --------------------------------------------------------------------

#[tokio::test]
async fn test_teacher_list_filters_and_stats() {
    let app = test_app();
    create_teacher(&app, "Petrova", "301").await;
    let mut part = teacher_json("Sokolova", "302");
    part["employment_type"] = json!("part");
    part["rate"] = json!(0.5);
    part["position"] = json!("Senior Lecturer");
    let (status, _) = call(&app, "POST", "/v1/teachers", Some(part)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, list) = call(&app, "GET", "/v1/teachers?employment_type=part", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["page"]["total"], 1);
    assert_eq!(list["teachers"][0]["last_name"], "Sokolova");
    assert_eq!(list["teachers"][0]["room_number"], "302");
    assert_eq!(list["stats"]["total_count"], 2);
    assert_eq!(list["stats"]["part_time_count"], 1);

    let (_, list) = call(&app, "GET", "/v1/teachers?search=lecturer", None).await;
    assert_eq!(list["page"]["total"], 1);

    // Blank filters mean no filter.
    let (_, list) = call(&app, "GET", "/v1/teachers?employment_type=&search=", None).await;
    assert_eq!(list["page"]["total"], 2);
}

#[tokio::test]
async fn test_teacher_list_rejects_bad_filter_and_page() {
    let app = test_app();
    let (status, _) = call(&app, "GET", "/v1/teachers?employment_type=contract", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = call(&app, "GET", "/v1/teachers?page=abc", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // An empty list still has page 1 and nothing beyond it.
    let (status, list) = call(&app, "GET", "/v1/teachers?page=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["page"]["pages"], 1);
    let (status, _) = call(&app, "GET", "/v1/teachers?page=2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_seeded_department_paginates() {
    let (registry, summary) = department_core::seed::demo_department(9).unwrap();
    let app = department_api::app(AppState::with_registry(registry));

    let (status, list) = call(&app, "GET", "/v1/teachers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["teachers"].as_array().unwrap().len(), 10);
    assert_eq!(list["page"]["pages"], 3);
    assert_eq!(list["stats"]["total_count"], summary.teachers);

    let (_, last) = call(&app, "GET", "/v1/teachers?page=3", None).await;
    assert_eq!(last["teachers"].as_array().unwrap().len(), 5);

    let (_, classrooms) = call(&app, "GET", "/v1/classrooms", None).await;
    assert_eq!(classrooms["page"]["total"], 25);
    assert_eq!(classrooms["total_teachers"], 25);
    assert_eq!(classrooms["total_capacity"], 25);

    let (_, assignments) = call(&app, "GET", "/v1/teacher-additional-works", None).await;
    assert_eq!(assignments.as_array().unwrap().len(), summary.assignments);
}

// -- Disciplines --------------------------------------------------------------

#[tokio::test]
async fn test_discipline_uniqueness_per_semester() {
    let app = test_app();
    let draft = json!({"name": "Databases", "semester": 3, "hours": 72});
    let (status, _) = call(&app, "POST", "/v1/disciplines", Some(draft)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = call(
        &app,
        "POST",
        "/v1/disciplines",
        Some(json!({"name": "databases", "semester": 3, "hours": 36})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = call(
        &app,
        "POST",
        "/v1/disciplines",
        Some(json!({"name": "Databases", "semester": 4, "hours": 36})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, list) = call(&app, "GET", "/v1/disciplines?semester=4", None).await;
    assert_eq!(list["page"]["total"], 1);
    assert_eq!(list["total_hours"], 36);

    let (status, _) = call(&app, "GET", "/v1/disciplines?semester=13", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_teacher_disciplines_follow_discipline_delete() {
    let app = test_app();
    let (_, discipline) = call(
        &app,
        "POST",
        "/v1/disciplines",
        Some(json!({"name": "Calculus", "semester": 1, "hours": 144})),
    )
    .await;
    let discipline_id = discipline["id"].as_str().unwrap().to_string();

    let mut draft = teacher_json("Petrova", "305");
    draft["discipline_ids"] = json!([discipline_id]);
    let (status, saved) = call(&app, "POST", "/v1/teachers", Some(draft)).await;
    assert_eq!(status, StatusCode::CREATED);
    let teacher_id = saved["teacher"]["id"].as_str().unwrap();

    let (_, detail) = call(&app, "GET", &format!("/v1/disciplines/{discipline_id}"), None).await;
    assert_eq!(detail["teacher_count"], 1);

    let (status, _) = call(&app, "DELETE", &format!("/v1/disciplines/{discipline_id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, teacher) = call(&app, "GET", &format!("/v1/teachers/{teacher_id}"), None).await;
    assert_eq!(teacher["discipline_ids"], json!([]));
    assert_eq!(teacher["disciplines"], json!([]));
}

#[tokio::test]
async fn test_unknown_discipline_reference_returns_422() {
    let app = test_app();
    let mut draft = teacher_json("Petrova", "305");
    draft["discipline_ids"] = json!([uuid::Uuid::new_v4()]);
    let (status, _) = call(&app, "POST", "/v1/teachers", Some(draft)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

// -- Additional work ----------------------------------------------------------

#[tokio::test]
async fn test_additional_work_rules() {
    let app = test_app();
    let saved = create_teacher(&app, "Petrova", "305").await;
    let teacher_id = saved["teacher"]["id"].as_str().unwrap().to_string();

    let (status, work_type) = call(
        &app,
        "POST",
        "/v1/additional-work-types",
        Some(json!({"name": "Curatorship", "description": "Student group curator"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(work_type["hours_per_week"], 2);
    let work_type_id = work_type["id"].as_str().unwrap().to_string();

    let (status, _) = call(
        &app,
        "POST",
        "/v1/additional-work-types",
        Some(json!({"name": "curatorship"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let assignment = json!({
        "teacher_id": teacher_id,
        "work_type_id": work_type_id,
        "start_date": "2024-09-01",
        "end_date": "2025-06-30"
    });
    let (status, created) = call(&app, "POST", "/v1/teacher-additional-works", Some(assignment.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let assignment_id = created["id"].as_str().unwrap().to_string();

    let (status, _) = call(&app, "POST", "/v1/teacher-additional-works", Some(assignment)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = call(
        &app,
        "POST",
        "/v1/teacher-additional-works",
        Some(json!({
            "teacher_id": teacher_id,
            "work_type_id": work_type_id,
            "start_date": "2024-09-01",
            "end_date": "2024-01-01"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = call(
        &app,
        "POST",
        "/v1/teacher-additional-works",
        Some(json!({
            "teacher_id": uuid::Uuid::new_v4(),
            "work_type_id": work_type_id,
            "start_date": "2024-09-01"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, row) = call(&app, "GET", &format!("/v1/teacher-additional-works/{assignment_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(row["teacher_name"], "Petrova Anna Igorevna");
    assert_eq!(row["work_type_name"], "Curatorship");

    let (_, detail) = call(&app, "GET", &format!("/v1/teachers/{teacher_id}"), None).await;
    assert_eq!(detail["additional_works"][0]["work_type"]["name"], "Curatorship");

    // Deleting the work type removes its assignments.
    let (status, _) = call(&app, "DELETE", &format!("/v1/additional-work-types/{work_type_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call(&app, "GET", &format!("/v1/teacher-additional-works/{assignment_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// -- Authentication -----------------------------------------------------------

#[tokio::test]
async fn test_auth_required_when_token_set() {
    let app = test_app_with_auth("secret-token");
    let (status, body) = call(&app, "GET", "/v1/dashboard", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/v1/dashboard")
                .header("authorization", "Bearer secret-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_bypasses_auth() {
    let app = test_app_with_auth("secret-token");
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health/liveness")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// -- Metrics & OpenAPI --------------------------------------------------------

#[tokio::test]
async fn test_metrics_endpoint_counts_requests() {
    let app = test_app();
    create_teacher(&app, "Petrova", "305").await;
    call(&app, "GET", "/v1/teachers/not-a-uuid", None).await;

    let response = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let text = body_string(response).await;
    assert!(text.contains("department_http_requests_total 2"), "{text}");
    assert!(text.contains("department_http_errors_total 1"), "{text}");
    assert!(text.contains("department_classrooms 1"), "{text}");
}

#[tokio::test]
async fn test_openapi_document_served() {
    let (status, doc) = call(&test_app(), "GET", "/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["info"]["title"], "Department Registry API");
    assert!(doc["paths"]["/v1/teachers"].is_object());
}
