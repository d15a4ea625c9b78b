#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::extract::ConnectInfo;
use chrono::{DateTime, Utc};
use shortener_service::api::routes::public_routes;
use shortener_service::domain::clock::{Clock, SystemClock};
use shortener_service::prelude::*;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;
use uuid::Uuid;

pub const BASE_URL: &str = "http://short.test";

/// State over a fresh in-memory store, plus a handle on that store.
pub fn memory_state(options: EngineOptions) -> (AppState, Arc<InMemoryUrlRepository>) {
    let repo = Arc::new(InMemoryUrlRepository::new());
    let state = AppState::new(repo.clone(), options, BASE_URL);
    (state, repo)
}

pub fn app(state: AppState) -> Router {
    public_routes().with_state(state)
}

pub fn url_record(code: &str, url: &str, expires_at: Option<DateTime<Utc>>) -> UrlRecord {
    UrlRecord::new(
        Uuid::new_v4(),
        url.to_string(),
        code.to_string(),
        None,
        SystemClock.now(),
        expires_at,
    )
}

pub async fn insert_url(
    repo: &dyn UrlRepository,
    code: &str,
    url: &str,
    expires_at: Option<DateTime<Utc>>,
) {
    repo.save_url(url_record(code, url, expires_at))
        .await
        .unwrap();
}

/// In-memory store whose redirect-log writes always fail.
#[derive(Default)]
pub struct FailingLogRepository {
    pub inner: InMemoryUrlRepository,
}

#[async_trait]
impl UrlRepository for FailingLogRepository {
    async fn save_url(&self, record: UrlRecord) -> Result<(), StoreError> {
        self.inner.save_url(record).await
    }

    async fn get_url(&self, short_code: &str) -> Result<UrlRecord, StoreError> {
        self.inner.get_url(short_code).await
    }

    async fn save_redirect_log(&self, _entry: RedirectLog) -> Result<(), StoreError> {
        Err(StoreError::Backend("redirect_logs unavailable".to_string()))
    }

    async fn get_stats(&self, short_code: &str) -> Result<UrlStats, StoreError> {
        self.inner.get_stats(short_code).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Backend("connection refused".to_string()))
    }
}

/// Inserts a fixed peer address so per-IP middleware works under `TestServer`.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
