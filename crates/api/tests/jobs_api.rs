//! Integration tests for the asynchronous dispatch path.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use serde_json::json;
use uuid::Uuid;

/// Poll a job until it reaches a terminal state, returning its final view.
async fn wait_for_terminal(app: &axum::Router, job_id: &str) -> serde_json::Value {
    for _ in 0..500 {
        let response = get(app.clone(), &format!("/api/v1/jobs/{job_id}")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let status = body["data"]["status"].as_str().expect("status").to_string();
        if status == "completed" || status == "error" {
            return body;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("job {job_id} did not reach a terminal state in time");
}

// ---------------------------------------------------------------------------
// Test: POST /api/v1/jobs returns 201 with a queued job id
// ---------------------------------------------------------------------------

#[tokio::test]
async fn submit_returns_created_and_queued() {
    let (app, _service) = common::build_test_app();

    let response = post_json(app, "/api/v1/jobs", json!({"command": "sort a list"})).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["data"]["status"], "queued");
    assert!(
        Uuid::parse_str(body["data"]["job_id"].as_str().expect("job_id")).is_ok(),
        "job_id must be a UUID"
    );
}

// ---------------------------------------------------------------------------
// Test: a submitted job completes and exposes its result
// ---------------------------------------------------------------------------

#[tokio::test]
async fn submitted_job_completes_with_result() {
    let (app, service) = common::build_test_app();

    let response = post_json(
        app.clone(),
        "/api/v1/jobs",
        json!({"command": "print the answer"}),
    )
    .await;
    let body = body_json(response).await;
    let job_id = body["data"]["job_id"].as_str().expect("job_id").to_string();

    let done = wait_for_terminal(&app, &job_id).await;
    assert_eq!(done["data"]["status"], "completed");
    assert_eq!(done["data"]["result"]["code"], "print(42)");
    assert!(done["data"]["error"].is_null());

    // The worker logged exactly one history entry for the job.
    assert_eq!(service.history().len().await, 1);
}

// ---------------------------------------------------------------------------
// Test: empty command is rejected before enqueue
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_command_is_rejected_before_enqueue() {
    let (app, service) = common::build_test_app();

    let response = post_json(app, "/api/v1/jobs", json!({"command": ""})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(service.registry().len().await, 0);
}

// ---------------------------------------------------------------------------
// Test: unknown job id is 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_job_id_is_not_found() {
    let (app, _service) = common::build_test_app();

    let response = get(app, &format!("/api/v1/jobs/{}", Uuid::new_v4())).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["code"], "NOT_FOUND");
}
