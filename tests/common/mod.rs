#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use todo_rbac_api::auth::{TokenConfig, UserStore};
use todo_rbac_api::database::{MemoryTodoStore, MemoryUserRecordStore};
use todo_rbac_api::{app, AppState};

pub const TEST_SECRET: &str = "test-secret";

static DEMO_USERS: OnceLock<Arc<UserStore>> = OnceLock::new();

/// Argon2 hashing is slow in debug builds, so the demo table is built once per test binary
pub fn demo_users() -> Arc<UserStore> {
    DEMO_USERS
        .get_or_init(|| Arc::new(UserStore::demo().expect("demo users")))
        .clone()
}

pub fn test_tokens() -> TokenConfig {
    TokenConfig::new(TEST_SECRET, 30)
}

pub fn test_state_with_users(users: Arc<UserStore>) -> AppState {
    AppState::new(
        Arc::new(MemoryTodoStore::new()),
        Arc::new(MemoryUserRecordStore::new()),
        users,
        test_tokens(),
    )
}

/// Router over a fresh in-memory store and the demo users
pub fn build_test_app() -> Router {
    app(test_state_with_users(demo_users()))
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.expect("router is infallible")
}

pub async fn get(app: &Router, uri: &str) -> Response {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn get_with_token(app: &Router, uri: &str, token: &str) -> Response {
    let request = Request::get(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn send_json(app: &Router, method: Method, uri: &str, body: Value) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("body is JSON")
}

/// POST /token and return the access token
pub async fn login(app: &Router, username: &str, password: &str) -> String {
    let response = send_json(
        app,
        Method::POST,
        "/token",
        serde_json::json!({ "username": username, "password": password }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK, "login as {} failed", username);
    let body = body_json(response).await;
    body["access_token"]
        .as_str()
        .expect("access_token in token response")
        .to_string()
}

/// The real binary on a free port, backed by the in-memory store.
/// The child process is killed when the guard is dropped.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_todo-rbac-api"));
        cmd.env("APP_ENV", "development")
            .env("TODO_STORE", "memory")
            .env("PORT", port.to_string())
            .env_remove("TODO_API_PORT")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self {
            port,
            base_url,
            child,
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        let url = format!("{}/health", self.base_url);
        while Instant::now() < deadline {
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == reqwest::StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Spawn a fresh server for one test and wait until `/health` answers
pub async fn start_server() -> Result<TestServer> {
    let server = TestServer::spawn()?;
    server.wait_ready(Duration::from_secs(20)).await?;
    Ok(server)
}
