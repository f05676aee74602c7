//! End-to-end tests for the JSON API, driving the router in-process
//! against an in-memory database.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::util::ServiceExt;

use agora_core::storage::Database;
use agora_server::{AppState, router};

async fn test_app() -> Router {
    let db = Database::in_memory()
        .await
        .expect("Failed to create in-memory database");
    router(AppState { db })
}

/// Send a request and return (status, parsed JSON body).
async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .expect("Failed to build request"),
        None => builder.body(Body::empty()).expect("Failed to build request"),
    };

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Request should complete");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Body should be JSON")
    };

    (status, value)
}

fn agent_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": "Reviews pull requests",
        "prompt": "You are a meticulous code reviewer.",
        "tools": ["diff", "search"],
    })
}

async fn create_agent(app: &Router, title: &str) -> String {
    let (status, body) = send(app, "POST", "/agents", Some(agent_body(title))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().expect("id should be a string").to_string()
}

async fn post_review(app: &Router, agent_id: &str, rating: i64) -> StatusCode {
    let (status, _) = send(
        app,
        "POST",
        "/reviews",
        Some(json!({
            "agentId": agent_id,
            "authorName": "harper",
            "rating": rating,
        })),
    )
    .await;
    status
}

#[tokio::test]
async fn health_probe_responds() {
    let app = test_app().await;
    let (status, _) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn create_agent_derives_slug() {
    let app = test_app().await;

    let (status, body) = send(&app, "POST", "/agents", Some(agent_body("My Cool Agent!"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["title"], "My Cool Agent!");
    assert_eq!(body["slug"], "my-cool-agent");
    assert_eq!(body["shareCount"], 0);
    assert!(body["id"].is_string());
    // Create responses carry no aggregate fields
    assert!(body.get("averageRating").is_none());
    assert!(body.get("reviewCount").is_none());
}

#[tokio::test]
async fn create_agent_missing_prompt_writes_nothing() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/agents",
        Some(json!({
            "title": "Promptless",
            "description": "Has no prompt",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("prompt"));

    let (status, body) = send(&app, "GET", "/agents", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn get_agent_error_statuses() {
    let app = test_app().await;

    let (status, _) = send(&app, "GET", "/agents/not-a-number", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "GET", "/agents/12345", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Agent not found");
}

#[tokio::test]
async fn list_caps_at_fifty_newest_first() {
    let app = test_app().await;

    for i in 1..=55 {
        create_agent(&app, &format!("Agent {}", i)).await;
    }

    let (status, body) = send(&app, "GET", "/agents", None).await;
    assert_eq!(status, StatusCode::OK);

    let agents = body.as_array().unwrap();
    assert_eq!(agents.len(), 50);
    assert_eq!(agents[0]["title"], "Agent 55");

    // Descending ids throughout
    let ids: Vec<i64> = agents
        .iter()
        .map(|a| a["id"].as_str().unwrap().parse().unwrap())
        .collect();
    assert!(ids.windows(2).all(|pair| pair[0] > pair[1]));
}

#[tokio::test]
async fn rating_aggregates_on_get_and_list() {
    let app = test_app().await;
    let id = create_agent(&app, "Rated Agent").await;

    assert_eq!(post_review(&app, &id, 3).await, StatusCode::CREATED);
    assert_eq!(post_review(&app, &id, 5).await, StatusCode::CREATED);

    let (status, body) = send(&app, "GET", &format!("/agents/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["averageRating"], 4.0);
    assert_eq!(body["reviewCount"], 2);

    let (_, listing) = send(&app, "GET", "/agents", None).await;
    let entry = &listing.as_array().unwrap()[0];
    assert_eq!(entry["averageRating"], 4.0);
    assert_eq!(entry["reviewCount"], 2);
}

#[tokio::test]
async fn agent_without_reviews_omits_average() {
    let app = test_app().await;
    let id = create_agent(&app, "Quiet Agent").await;

    let (_, body) = send(&app, "GET", &format!("/agents/{}", id), None).await;
    assert!(body.get("averageRating").is_none());
    assert_eq!(body["reviewCount"], 0);
}

#[tokio::test]
async fn review_rating_bounds() {
    let app = test_app().await;
    let id = create_agent(&app, "Boundary Agent").await;

    assert_eq!(post_review(&app, &id, 6).await, StatusCode::BAD_REQUEST);
    assert_eq!(post_review(&app, &id, 0).await, StatusCode::BAD_REQUEST);
    assert_eq!(post_review(&app, &id, 3).await, StatusCode::CREATED);
}

#[tokio::test]
async fn review_listing_requires_agent_id() {
    let app = test_app().await;

    let (status, _) = send(&app, "GET", "/reviews", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "GET", "/reviews?agentId=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn reviews_listed_newest_first() {
    let app = test_app().await;
    let id = create_agent(&app, "Review Magnet").await;

    post_review(&app, &id, 2).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    post_review(&app, &id, 5).await;

    let (status, body) = send(&app, "GET", &format!("/reviews?agentId={}", id), None).await;
    assert_eq!(status, StatusCode::OK);

    let reviews = body.as_array().unwrap();
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0]["rating"], 5);
    assert_eq!(reviews[1]["rating"], 2);
    assert_eq!(reviews[0]["agentId"], id);
}

#[tokio::test]
async fn slug_lookup_skips_aggregates() {
    let app = test_app().await;
    let id = create_agent(&app, "Findable Agent").await;
    post_review(&app, &id, 4).await;

    let (status, body) = send(&app, "GET", "/agents/slug/findable-agent", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);
    assert!(body.get("averageRating").is_none());
    assert!(body.get("reviewCount").is_none());

    let (status, _) = send(&app, "GET", "/agents/slug/no-such-slug", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_agent_keeps_slug() {
    let app = test_app().await;
    let id = create_agent(&app, "Original Title").await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/agents/{}", id),
        Some(json!({
            "title": "Renamed Title",
            "description": "Still reviews pull requests",
            "prompt": "You are a friendly code reviewer.",
            "tools": ["diff"],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Renamed Title");
    assert_eq!(body["slug"], "original-title");

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/agents/{}", id),
        Some(json!({ "title": "Only A Title" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "PUT",
        "/agents/9999",
        Some(json!({
            "title": "Ghost",
            "description": "d",
            "prompt": "p",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn share_increments_counter() {
    let app = test_app().await;
    let id = create_agent(&app, "Viral Agent").await;

    let (status, body) = send(&app, "POST", &format!("/agents/{}/share", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    send(&app, "POST", &format!("/agents/{}/share", id), None).await;

    let (_, body) = send(&app, "GET", &format!("/agents/{}", id), None).await;
    assert_eq!(body["shareCount"], 2);

    let (status, _) = send(&app, "POST", "/agents/9999/share", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_leaves_reviews_orphaned() {
    let app = test_app().await;
    let id = create_agent(&app, "Doomed Agent").await;
    post_review(&app, &id, 5).await;

    let (status, body) = send(&app, "DELETE", &format!("/agents/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _) = send(&app, "GET", &format!("/agents/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &format!("/agents/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The agent's reviews remain queryable after deletion
    let (status, body) = send(&app, "GET", &format!("/reviews?agentId={}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}
