//! End-to-end tests for the user routes, driven through the router against
//! the in-memory repository.

use std::sync::Arc;

use api::{AppState, router::router};
use auth::{AuthService, TokenSigner};
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use storage::MemoryAccountRepository;
use tower::ServiceExt;

fn test_app() -> Router {
    let repo = Arc::new(MemoryAccountRepository::new());
    let auth_service = AuthService::new(repo.clone(), TokenSigner::new("test_secret"));
    router(Arc::new(AppState::new(auth_service, repo)))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    bearer: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn signup(app: &Router, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, "/api/v1/user/signup", Some(body), None).await
}

async fn signin(app: &Router, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, "/api/v1/user/signin", Some(body), None).await
}

fn alice() -> Value {
    json!({
        "username": "alice@x.com",
        "password": "secret1",
        "firstName": "Alice",
        "lastName": "A",
    })
}

#[tokio::test]
async fn test_signup_signin_update_search_scenario() {
    let app = test_app();

    // Fresh signup succeeds and yields a token.
    let (status, body) = signup(&app, alice()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User created successfully");
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

    // Repeating the same username fails with the vague shared message.
    let (status, body) = signup(&app, alice()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email already taken / Incorrect inputs");

    // Wrong password is rejected without a token.
    let (status, body) = signin(
        &app,
        json!({"username": "alice@x.com", "password": "wrong1"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Incorrect password");
    assert!(body.get("token").is_none());

    // Correct credentials yield a token.
    let (status, body) = signin(
        &app,
        json!({"username": "alice@x.com", "password": "secret1"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    // Authenticated partial update.
    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/v1/user",
        Some(json!({"firstName": "Alicia"})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User information updated successfully");

    // The updated record is found by first-name substring.
    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/user/bulk?filter=lici",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let users = body["user"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["username"], "alice@x.com");
    assert_eq!(users[0]["firstName"], "Alicia");
    assert_eq!(users[0]["lastName"], "A");
    assert!(users[0]["id"].as_str().is_some_and(|id| !id.is_empty()));
}

#[tokio::test]
async fn test_signup_normalizes_username() {
    let app = test_app();

    let (status, _) = signup(
        &app,
        json!({
            "username": "  Bob@Example.Com ",
            "password": "secret1",
            "firstName": "Bob",
            "lastName": "B",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Signin against the normalized form works.
    let (status, _) = signin(
        &app,
        json!({"username": "bob@example.com", "password": "secret1"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_signup_validation_shares_vague_message() {
    let app = test_app();

    for bad in [
        json!({"username": "bad", "password": "secret1", "firstName": "A", "lastName": "B"}),
        json!({"username": "alice@x.com", "password": "short", "firstName": "A", "lastName": "B"}),
        json!({
            "username": "alice@x.com",
            "password": "secret1",
            "firstName": "x".repeat(51),
            "lastName": "B",
        }),
    ] {
        let (status, body) = signup(&app, bad).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Email already taken / Incorrect inputs");
        assert!(body.get("errors").is_none());
    }
}

#[tokio::test]
async fn test_signin_unknown_user() {
    let app = test_app();

    let (status, body) = signin(
        &app,
        json!({"username": "nobody@x.com", "password": "secret1"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn test_update_requires_valid_bearer() {
    let app = test_app();

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/v1/user",
        Some(json!({"firstName": "X"})),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/v1/user",
        Some(json!({"firstName": "X"})),
        Some("not-a-token"),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_empty_payload_is_noop_success() {
    let app = test_app();

    let (_, body) = signup(&app, alice()).await;
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = send(&app, Method::PUT, "/api/v1/user", Some(json!({})), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User information updated successfully");
}

#[tokio::test]
async fn test_update_validation_reports_structured_errors() {
    let app = test_app();

    let (_, body) = signup(&app, alice()).await;
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/v1/user",
        Some(json!({"password": "no"})),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation failed");
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors[0]["field"], "password");
}

#[tokio::test]
async fn test_update_with_token_for_missing_user_is_not_found() {
    let app = test_app();

    // A validly signed token whose subject never existed in the store.
    let stray = TokenSigner::new("test_secret").issue("ghost-id").unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/v1/user",
        Some(json!({"firstName": "Ghost"})),
        Some(&stray),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found or no changes made");
}

#[tokio::test]
async fn test_search_is_open_and_never_leaks_hashes() {
    let app = test_app();
    signup(&app, alice()).await;
    signup(
        &app,
        json!({
            "username": "carol@x.com",
            "password": "secret2",
            "firstName": "Carol",
            "lastName": "Jones",
        }),
    )
    .await;

    // Empty filter returns everyone.
    let (status, body) = send(&app, Method::GET, "/api/v1/user/bulk", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let users = body["user"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    for user in users {
        let fields: Vec<&String> = user.as_object().unwrap().keys().collect();
        assert!(!fields.iter().any(|k| k.contains("password") || k.contains("hash")));
    }

    // Non-matching filter returns an empty list.
    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/user/bulk?filter=zzz",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["user"].as_array().unwrap().is_empty());
}
