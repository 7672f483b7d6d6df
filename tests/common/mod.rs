#![allow(dead_code)]

use axum_test::TestServer;
use devconnect::{api, auth::JwtCodec, db::Store, github::GithubClient, AppState};
use serde_json::json;
use std::sync::Arc;

/// Signing secret shared by the test apps.
pub const TEST_SECRET: &str = "test-secret-key-that-is-at-least-32-chars";

/// Default token lifetime used by the test apps (100 hours, in seconds).
pub const TEST_TTL: i64 = 360_000;

/// Spawns an app over an in-memory store with the default codec.
pub async fn spawn_app() -> TestServer {
    spawn_app_with(TEST_TTL, "https://api.github.com").await
}

/// Spawns an app with a custom token lifetime and GitHub base URL.
pub async fn spawn_app_with(ttl_seconds: i64, github_base_url: &str) -> TestServer {
    let state = AppState {
        store: Arc::new(Store::new_memory().await.expect("in-memory store")),
        codec: Arc::new(JwtCodec::new(TEST_SECRET, ttl_seconds)),
        github: Arc::new(
            GithubClient::with_base_url(github_base_url, None).expect("github client"),
        ),
    };

    TestServer::new(api::create_router().with_state(state)).expect("test server")
}

/// Registers a user and returns their token.
pub async fn register(server: &TestServer, name: &str, email: &str, password: &str) -> String {
    let response = server
        .post("/api/users")
        .json(&json!({ "name": name, "email": email, "password": password }))
        .await;

    response.assert_status_ok();
    response.json::<serde_json::Value>()["token"]
        .as_str()
        .expect("token in registration response")
        .to_string()
}

/// Creates a minimal profile for the given token and returns the response body.
pub async fn create_profile(server: &TestServer, token: &str) -> serde_json::Value {
    let response = server
        .post("/api/profile")
        .add_header("x-auth-token", token)
        .json(&json!({ "status": "Developer", "skills": "Rust, SQL" }))
        .await;

    response.assert_status_ok();
    response.json()
}
