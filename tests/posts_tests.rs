//! Post CRUD and the ownership policy on deletion.

mod common;

use axum::http::StatusCode;
use common::{register, spawn_app};
use serde_json::{json, Value};

#[tokio::test]
async fn posts_require_authentication() {
    let server = spawn_app().await;

    let response = server.get("/api/posts").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn created_post_carries_author_name_and_avatar() {
    let server = spawn_app().await;
    let token = register(&server, "Uma", "u1@example.com", "secret123").await;

    let response = server
        .post("/api/posts")
        .add_header("x-auth-token", token)
        .json(&json!({ "text": "hello world" }))
        .await;

    response.assert_status_ok();
    let post: Value = response.json();
    assert_eq!(post["text"], "hello world");
    assert_eq!(post["name"], "Uma");
    assert!(post["avatar"]
        .as_str()
        .unwrap()
        .starts_with("https://www.gravatar.com/avatar/"));
}

#[tokio::test]
async fn empty_post_text_is_rejected() {
    let server = spawn_app().await;
    let token = register(&server, "Uma", "u1@example.com", "secret123").await;

    let response = server
        .post("/api/posts")
        .add_header("x-auth-token", token)
        .json(&json!({ "text": "   " }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["errors"][0]["msg"], "Text is required");
}

#[tokio::test]
async fn listing_returns_newest_first() {
    let server = spawn_app().await;
    let token = register(&server, "Uma", "u1@example.com", "secret123").await;

    for text in ["first", "second", "third"] {
        server
            .post("/api/posts")
            .add_header("x-auth-token", token.clone())
            .json(&json!({ "text": text }))
            .await
            .assert_status_ok();
    }

    let response = server
        .get("/api/posts")
        .add_header("x-auth-token", token)
        .await;
    response.assert_status_ok();

    let texts: Vec<String> = response
        .json::<Vec<Value>>()
        .iter()
        .map(|p| p["text"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(texts, vec!["third", "second", "first"]);
}

#[tokio::test]
async fn fetching_unknown_post_is_not_found() {
    let server = spawn_app().await;
    let token = register(&server, "Uma", "u1@example.com", "secret123").await;

    let response = server
        .get("/api/posts/no-such-id")
        .add_header("x-auth-token", token)
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["msg"], "Post not found");
}

#[tokio::test]
async fn only_the_owner_may_delete_a_post() {
    let server = spawn_app().await;
    let owner = register(&server, "Uma", "u1@example.com", "secret123").await;
    let other = register(&server, "Vik", "u2@example.com", "secret456").await;

    let post: Value = server
        .post("/api/posts")
        .add_header("x-auth-token", owner.clone())
        .json(&json!({ "text": "mine" }))
        .await
        .json();
    let post_id = post["id"].as_str().unwrap();

    // Non-owner: denied, and the post survives.
    let denied = server
        .delete(&format!("/api/posts/{}", post_id))
        .add_header("x-auth-token", other)
        .await;
    assert_eq!(denied.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(denied.json::<Value>()["msg"], "User not authorised");

    // Owner: allowed.
    let deleted = server
        .delete(&format!("/api/posts/{}", post_id))
        .add_header("x-auth-token", owner.clone())
        .await;
    deleted.assert_status_ok();
    assert_eq!(deleted.json::<Value>()["msg"], "Post is deleted");

    // Existence is reported before ownership: the repeat delete is 404.
    let repeat = server
        .delete(&format!("/api/posts/{}", post_id))
        .add_header("x-auth-token", owner)
        .await;
    assert_eq!(repeat.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(repeat.json::<Value>()["msg"], "Post not found");
}
