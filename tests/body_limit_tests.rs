use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use logins_api::db::LoginsStorage;
use logins_api::router::{LoginsState, logins_router};
use logins_api::service::gateway::CredentialGateway;
use std::{
    fs,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn signup_route_returns_413_for_oversized_body() {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "logins-body-limit-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));

    let database_url = format!("sqlite:{}", temp_path.display());
    let storage = LoginsStorage::connect(&database_url, 1)
        .await
        .expect("failed to open sqlite file");
    storage.init_schema().await.expect("failed to init schema");

    let cfg = logins_api::config::Config::default();
    let gateway = CredentialGateway::new(Arc::new(storage.clone()), cfg.store_timeout());
    let app = logins_router(LoginsState::new(gateway), cfg.body_limit_bytes);

    let oversized_password = "a".repeat(cfg.body_limit_bytes + 1024);
    let oversized_payload =
        format!(r#"{{"usernames":"alice","passwords":"{oversized_password}"}}"#);

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/signup")
                .header("content-type", "application/json")
                .body(Body::from(oversized_payload))
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let body_str = std::str::from_utf8(&body).expect("response body was not utf-8");
    assert!(body_str.contains(r#""status":"error""#));
    assert!(body_str.contains(r#""message":"Request entity too large""#));

    assert_eq!(common::count_rows(&storage, "alice").await, 0);

    storage.pool().close().await;
    let _ = fs::remove_file(&temp_path);
}

#[tokio::test]
async fn body_just_under_limit_is_accepted() {
    let storage = LoginsStorage::in_memory()
        .await
        .expect("failed to open in-memory store");
    let gateway = CredentialGateway::new(
        Arc::new(storage.clone()),
        std::time::Duration::from_secs(5),
    );
    let app = logins_router(LoginsState::new(gateway), 1024);

    let password = "p".repeat(900);
    let payload = format!(r#"{{"usernames":"bob","passwords":"{password}"}}"#);

    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/signup")
                .header("content-type", "application/json")
                .body(Body::from(payload))
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(common::count_rows(&storage, "bob").await, 1);
}
