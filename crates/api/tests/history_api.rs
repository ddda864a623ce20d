//! Integration tests for the `/history` resource.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get};
use snipforge_core::history::HistoryEntry;
use snipforge_core::service::SnippetService;
use snipforge_core::types::{GenerateRequest, Snippet};
use uuid::Uuid;

/// Seed `count` history entries directly through the service.
async fn seed_history(service: &SnippetService, count: usize) -> Vec<Uuid> {
    let mut ids = Vec::new();
    for i in 0..count {
        let entry = HistoryEntry::new(
            &GenerateRequest {
                command: format!("command {i}"),
                model: "gemini-1.5-pro".to_string(),
                config: "default".to_string(),
            },
            &Snippet {
                code: format!("print({i})"),
                explanation: format!("Prints {i}."),
            },
        );
        ids.push(entry.id);
        service.history().append(entry).await;
    }
    ids
}

// ---------------------------------------------------------------------------
// Test: pagination over 25 entries
// ---------------------------------------------------------------------------

#[tokio::test]
async fn second_page_of_25_entries() {
    let (app, service) = common::build_test_app();
    seed_history(&service, 25).await;

    let response = get(app, "/api/v1/history?page=2&per_page=10").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["total"], 25);
    assert_eq!(body["data"]["page"], 2);
    assert_eq!(body["data"]["per_page"], 10);
    assert_eq!(body["data"]["total_pages"], 3);

    let items = body["data"]["items"].as_array().expect("items");
    assert_eq!(items.len(), 10);
    // Newest first: page 2 starts at the 11th most recent entry.
    assert_eq!(items[0]["command"], "command 14");
    assert_eq!(items[9]["command"], "command 5");
}

#[tokio::test]
async fn out_of_range_page_is_empty() {
    let (app, service) = common::build_test_app();
    seed_history(&service, 3).await;

    let response = get(app, "/api/v1/history?page=7&per_page=10").await;
    let body = body_json(response).await;
    assert!(body["data"]["items"].as_array().expect("items").is_empty());
    assert_eq!(body["data"]["total"], 3);
}

// ---------------------------------------------------------------------------
// Test: entry lookup and deletion
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_then_delete_entry() {
    let (app, service) = common::build_test_app();
    let ids = seed_history(&service, 1).await;
    let id = ids[0];

    let response = get(app.clone(), &format!("/api/v1/history/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["command"], "command 0");

    let response = delete(app.clone(), &format!("/api/v1/history/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app, &format!("/api/v1/history/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_unknown_entry_is_not_found() {
    let (app, _service) = common::build_test_app();

    let response = delete(app, &format!("/api/v1/history/{}", Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Test: search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_is_case_insensitive() {
    let (app, service) = common::build_test_app();
    service
        .history()
        .append(HistoryEntry::new(
            &GenerateRequest {
                command: "Sort a List".to_string(),
                model: "gemini-1.5-pro".to_string(),
                config: "default".to_string(),
            },
            &Snippet {
                code: "sorted(xs)".to_string(),
                explanation: "Sorts the list.".to_string(),
            },
        ))
        .await;

    let response = get(app, "/api/v1/history/search?q=sort").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["count"], 1);
    assert_eq!(body["data"]["items"][0]["command"], "Sort a List");
}

// ---------------------------------------------------------------------------
// Test: stats
// ---------------------------------------------------------------------------

#[tokio::test]
async fn stats_group_by_model_and_config() {
    let (app, service) = common::build_test_app();
    seed_history(&service, 4).await;

    let response = get(app, "/api/v1/history/stats").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["by_model"]["gemini-1.5-pro"], 4);
    assert_eq!(body["data"]["by_config"]["default"], 4);
}
