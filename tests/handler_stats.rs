mod common;

use axum_test::TestServer;
use chrono::{Duration, Utc};
use serde_json::json;
use shortener_service::api::dto::stats::StatsResponse;
use shortener_service::prelude::*;

#[tokio::test]
async fn test_stats_without_redirects() {
    let (state, repo) = common::memory_state(EngineOptions::default());
    common::insert_url(repo.as_ref(), "quiet", "https://example.com", None).await;

    let server = TestServer::new(common::app(state)).unwrap();

    let response = server.get("/quiet/stats").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["code"], "quiet");
    assert_eq!(json["redirect_count"], 0);
    assert!(json.get("last_accessed").is_none());
    assert_eq!(json["referrers"], json!([]));
}

#[tokio::test]
async fn test_stats_not_found() {
    let (state, _) = common::memory_state(EngineOptions::default());
    let server = TestServer::new(common::app(state)).unwrap();

    let response = server.get("/missing/stats").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_shorten_redirect_stats_flow() {
    let (state, _) = common::memory_state(EngineOptions::default());
    let server = TestServer::new(common::app(state)).unwrap();

    let code = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com/a" }))
        .await
        .json::<serde_json::Value>()["code"]
        .as_str()
        .unwrap()
        .to_string();

    for _ in 0..2 {
        server
            .get(&format!("/{code}"))
            .add_header("Referer", "https://ref.com")
            .await;
    }

    let stats = server
        .get(&format!("/{code}/stats"))
        .await
        .json::<StatsResponse>();

    assert_eq!(stats.redirect_count, 2);
    assert_eq!(stats.referrers, vec!["https://ref.com"]);
    assert!(stats.last_accessed.is_some());
}

#[tokio::test]
async fn test_stats_available_after_expiry() {
    let (state, repo) = common::memory_state(EngineOptions::default());
    common::insert_url(
        repo.as_ref(),
        "old",
        "https://example.com",
        Some(Utc::now() - Duration::days(1)),
    )
    .await;

    let server = TestServer::new(common::app(state)).unwrap();

    server.get("/old/stats").await.assert_status_ok();
}
