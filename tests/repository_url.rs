mod common;

use chrono::{Duration, Utc};
use shortener_service::domain::clock::{Clock, SystemClock};
use shortener_service::prelude::*;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

fn log(code: &str, referrer: Option<&str>) -> RedirectLog {
    RedirectLog::new(
        Uuid::new_v4(),
        code.to_string(),
        SystemClock.now(),
        referrer.map(str::to_string),
    )
}

#[sqlx::test]
async fn test_save_and_get_url(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));
    let expires_at = SystemClock.now() + Duration::hours(1);

    let mut record = common::url_record("abc123", "https://example.com", Some(expires_at));
    record.custom_alias = Some("abc123".to_string());
    repo.save_url(record.clone()).await.unwrap();

    let stored = repo.get_url("abc123").await.unwrap();
    assert_eq!(stored, record);
}

#[sqlx::test]
async fn test_get_url_not_found(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    let err = repo.get_url("notfound").await.unwrap_err();

    assert_eq!(err, StoreError::NotFound("notfound".to_string()));
}

#[sqlx::test]
async fn test_duplicate_code_is_conflict(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    repo.save_url(common::url_record("dup", "https://first.com", None))
        .await
        .unwrap();

    let err = repo
        .save_url(common::url_record("dup", "https://second.com", None))
        .await
        .unwrap_err();

    assert_eq!(err, StoreError::Conflict("dup".to_string()));
    assert_eq!(
        repo.get_url("dup").await.unwrap().original_url,
        "https://first.com"
    );
}

#[sqlx::test]
async fn test_expired_rows_are_kept(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    repo.save_url(common::url_record(
        "old",
        "https://example.com",
        Some(Utc::now() - Duration::days(1)),
    ))
    .await
    .unwrap();

    assert!(repo.get_url("old").await.is_ok());
}

#[sqlx::test]
async fn test_stats_aggregation(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));
    repo.save_url(common::url_record("abc123", "https://example.com", None))
        .await
        .unwrap();

    repo.save_redirect_log(log("abc123", Some("https://ref.com")))
        .await
        .unwrap();
    repo.save_redirect_log(log("abc123", Some("https://ref.com")))
        .await
        .unwrap();
    repo.save_redirect_log(log("abc123", Some("https://other.com")))
        .await
        .unwrap();
    let last = log("abc123", None);
    let last_at = last.accessed_at;
    repo.save_redirect_log(last).await.unwrap();
    repo.save_redirect_log(log("someone-else", Some("https://x.com")))
        .await
        .unwrap();

    let stats = repo.get_stats("abc123").await.unwrap();

    assert_eq!(stats.redirect_count, 4);
    assert_eq!(stats.last_accessed, Some(last_at));
    assert_eq!(stats.referrers, vec!["https://other.com", "https://ref.com"]);
}

#[sqlx::test]
async fn test_stats_without_logs(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));
    repo.save_url(common::url_record("quiet", "https://example.com", None))
        .await
        .unwrap();

    let stats = repo.get_stats("quiet").await.unwrap();

    assert_eq!(stats.redirect_count, 0);
    assert!(stats.last_accessed.is_none());
    assert!(stats.referrers.is_empty());
}

#[sqlx::test]
async fn test_stats_not_found(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    let err = repo.get_stats("missing").await.unwrap_err();

    assert!(err.is_not_found());
}

#[sqlx::test]
async fn test_redirect_log_without_url_row(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool.clone()));

    repo.save_redirect_log(log("orphan", None)).await.unwrap();

    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM redirect_logs WHERE short_code = 'orphan'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test]
async fn test_ping(pool: PgPool) {
    let repo = PgUrlRepository::new(Arc::new(pool));

    assert!(repo.ping().await.is_ok());
}

#[sqlx::test]
async fn test_engine_against_postgres(pool: PgPool) {
    let state = AppState::new(
        Arc::new(PgUrlRepository::new(Arc::new(pool))),
        EngineOptions::default(),
        common::BASE_URL,
    );
    let engine = &state.url_service;

    let code = engine
        .create_short_url("https://example.com/a".to_string(), None, None)
        .await
        .unwrap();
    assert_eq!(
        engine.get_original_url(&code).await.unwrap(),
        "https://example.com/a"
    );

    engine
        .resolve_redirect(&code, Some("https://ref.com".to_string()))
        .await
        .unwrap();
    engine
        .resolve_redirect(&code, Some("https://ref.com".to_string()))
        .await
        .unwrap();

    let stats = engine.get_stats(&code).await.unwrap();
    assert_eq!(stats.redirect_count, 2);
    assert_eq!(stats.referrers, vec!["https://ref.com"]);

    let err = engine
        .create_short_url("https://other.com".to_string(), Some(code.clone()), None)
        .await
        .unwrap_err();
    assert!(matches!(err, ShortenerError::AliasConflict(_)));
}
