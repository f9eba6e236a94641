mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use serde_json::json;

use common::{
    body_json, build_test_app, get, get_with_token, login, send, send_json, test_state_with_users,
    test_tokens,
};
use todo_rbac_api::auth::{issue_token, issue_token_with_expiry, User, UserStore};
use todo_rbac_api::types::Role;

#[tokio::test]
async fn login_returns_bearer_token() {
    let app = build_test_app();
    let response = send_json(
        &app,
        Method::POST,
        "/token",
        json!({ "username": "johndoe", "password": "secret" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["token_type"], "bearer");
    assert!(body["access_token"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn login_accepts_form_body() {
    let app = build_test_app();
    let request = Request::post("/token")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("username=user1&password=usersecret"))
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["token_type"], "bearer");
}

#[tokio::test]
async fn wrong_password_is_401_with_challenge() {
    let app = build_test_app();
    let response = send_json(
        &app,
        Method::POST,
        "/token",
        json!({ "username": "johndoe", "password": "nope" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Bearer");
    let body = body_json(response).await;
    assert_eq!(body["message"], "Incorrect username or password");
}

#[tokio::test]
async fn unknown_user_fails_like_wrong_password() {
    let app = build_test_app();
    let response = send_json(
        &app,
        Method::POST,
        "/token",
        json!({ "username": "mallory", "password": "secret" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Incorrect username or password");
}

#[tokio::test]
async fn missing_header_is_401() {
    let app = build_test_app();
    let response = get(&app, "/admin").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Not authenticated");
}

#[tokio::test]
async fn garbage_token_is_401() {
    let app = build_test_app();
    let response = get_with_token(&app, "/info", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Could not validate credentials");
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let app = build_test_app();
    let token =
        issue_token_with_expiry("johndoe", chrono::Duration::minutes(-5), &test_tokens()).unwrap();
    let response = get_with_token(&app, "/admin", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_for_unknown_subject_is_rejected() {
    let app = build_test_app();
    let token = issue_token("ghost", &test_tokens()).unwrap();
    let response = get_with_token(&app, "/resource_for_authorized", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_route_allows_only_admin() {
    let app = build_test_app();
    let admin = login(&app, "johndoe", "secret").await;
    let user = login(&app, "user1", "usersecret").await;

    let response = get_with_token(&app, "/admin", &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["message"], "Welcome Admin!");

    let response = get_with_token(&app, "/admin", &user).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Not correct access rights");
}

#[tokio::test]
async fn user_route_is_not_a_hierarchy() {
    let app = build_test_app();
    let admin = login(&app, "johndoe", "secret").await;
    let user = login(&app, "user1", "usersecret").await;

    let response = get_with_token(&app, "/user", &user).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["message"], "Welcome User!");

    let response = get_with_token(&app, "/user", &admin).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn guest_reaches_only_the_any_role_resource() {
    let app = build_test_app();
    let guest = login(&app, "guest", "guestsecret").await;

    let response = get_with_token(&app, "/resource_for_authorized", &guest).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["message"], "Welcome to resource for authorized users!");

    let response = get_with_token(&app, "/protected_resource", &guest).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let user = login(&app, "user1", "usersecret").await;
    let response = get_with_token(&app, "/protected_resource", &user).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unprotected_resource_needs_no_token() {
    let app = build_test_app();
    let response = get(&app, "/unprotected_resource").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["message"], "Welcome!");
}

#[tokio::test]
async fn info_returns_profile_without_hash() {
    let app = build_test_app();
    let token = login(&app, "johndoe", "secret").await;
    let response = get_with_token(&app, "/info", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["username"], "johndoe");
    assert_eq!(body["data"]["email"], "johndoe@example.com");
    assert_eq!(body["data"]["role"], "admin");
    assert!(body["data"].get("hashed_password").is_none());
}

#[tokio::test]
async fn disabled_user_is_forbidden_on_info() {
    let users = UserStore::from_users([User::new(
        "sleepy",
        "Sleepy",
        "sleepy@example.com",
        "zzz",
        Role::Admin,
    )
    .unwrap()
    .disabled()]);
    let app = todo_rbac_api::app(test_state_with_users(Arc::new(users)));
    let token = login(&app, "sleepy", "zzz").await;

    let response = get_with_token(&app, "/info", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["message"], "User inactive");
}

#[tokio::test]
async fn token_with_only_subject_and_expiry_is_accepted() {
    let app = build_test_app();
    let claims = json!({
        "sub": "johndoe",
        "exp": chrono::Utc::now().timestamp() + 600,
    });
    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(common::TEST_SECRET.as_bytes()),
    )
    .unwrap();

    let response = get_with_token(&app, "/admin", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}
