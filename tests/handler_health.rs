mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use common::FailingLogRepository;
use shortener_service::api::dto::health::HealthResponse;
use shortener_service::prelude::*;
use std::sync::Arc;

#[tokio::test]
async fn test_health_ok() {
    let (state, _) = common::memory_state(EngineOptions::default());
    let server = TestServer::new(common::app(state)).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let body = response.json::<HealthResponse>();
    assert_eq!(body.status, "healthy");
    assert_eq!(body.checks.storage.status, "ok");
    assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_health_degraded_when_storage_unreachable() {
    let state = AppState::new(
        Arc::new(FailingLogRepository::default()),
        EngineOptions::default(),
        common::BASE_URL,
    );
    let server = TestServer::new(common::app(state)).unwrap();

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let body = response.json::<HealthResponse>();
    assert_eq!(body.status, "degraded");
    assert_eq!(body.checks.storage.status, "error");
    assert!(body.checks.storage.message.is_some());
}
