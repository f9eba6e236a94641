mod common;

use anyhow::Result;
use serde_json::Value;

#[tokio::test]
async fn spawned_server_answers_health_and_token() -> Result<()> {
    let server = common::start_server().await?;
    let base_url = server.base_url.clone();
    let client = reqwest::Client::new();

    let health: Value = client
        .get(format!("{}/health", server.base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(health["success"], true);
    assert_eq!(health["data"]["database"], "ok");

    let resp = client
        .post(format!("{}/token", server.base_url))
        .form(&[("username", "johndoe"), ("password", "secret")])
        .send()
        .await?;
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let token: Value = resp.json().await?;
    assert_eq!(token["token_type"], "bearer");

    let admin = client
        .get(format!("{}/admin", server.base_url))
        .bearer_auth(token["access_token"].as_str().unwrap_or_default())
        .send()
        .await?;
    assert_eq!(admin.status(), reqwest::StatusCode::OK);

    drop(server);
    let gone = reqwest::Client::new()
        .get(format!("{}/health", base_url))
        .timeout(std::time::Duration::from_secs(2))
        .send()
        .await;
    assert!(gone.is_err(), "server process outlived its guard");
    Ok(())
}

#[tokio::test]
async fn index_lists_endpoints() {
    let app = common::build_test_app();
    let response = common::get(&app, "/").await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["data"]["name"], "Todo RBAC API");
    assert!(body["data"]["endpoints"]["todo"].is_string());
}
