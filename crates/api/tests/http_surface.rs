//! End-to-end tests through the HTTP router: health, authentication
//! round-trip, and bearer-token enforcement.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{build_test_app, seed_student};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_health_endpoint(pool: PgPool) {
    let app = build_test_app(pool);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_achievements_require_bearer_token(pool: PgPool) {
    let app = build_test_app(pool);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/achievements")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_then_list_achievements(pool: PgPool) {
    // The seeded student's password is fixed by the test helper.
    seed_student(&pool, "alice", None).await;
    let app = build_test_app(pool);

    let login = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({ "username": "alice", "password": "secret-password-1" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(login.status(), StatusCode::OK);
    let login_body = body_json(login).await;
    let token = login_body["access_token"].as_str().unwrap().to_string();
    assert_eq!(login_body["user"]["role"], "student");
    assert!(login_body["user"]["permissions"]
        .as_array()
        .unwrap()
        .iter()
        .any(|p| p == "create_achievement"));

    let list = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/achievements")
                .header("authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(list.status(), StatusCode::OK);
    let list_body = body_json(list).await;
    assert_eq!(list_body["total"], 0);
    assert_eq!(list_body["data"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_wrong_password_rejected(pool: PgPool) {
    seed_student(&pool, "bob", None).await;
    let app = build_test_app(pool);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/login")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({ "username": "bob", "password": "not-the-password" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
