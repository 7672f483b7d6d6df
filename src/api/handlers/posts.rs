use crate::{
    auth::{policy, AuthUser},
    types::{AppError, Post, PostRequest, Result},
    AppState,
};
use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

/// Create a post. The author's name and avatar are denormalized onto the
/// post at creation time.
#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = PostRequest,
    responses(
        (status = 200, description = "The created post", body = Post),
        (status = 400, description = "Validation failure"),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "posts"
)]
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<PostRequest>,
) -> Result<Json<Post>> {
    if payload.text.trim().is_empty() {
        return Err(AppError::Validation(vec!["Text is required".to_string()]));
    }

    let user = state
        .store
        .get_user_by_id(&user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let post = Post {
        id: Uuid::new_v4().to_string(),
        user_id,
        text: payload.text,
        name: user.name,
        avatar: user.avatar,
        created_at: chrono::Utc::now().timestamp(),
    };
    state.store.create_post(&post).await?;

    Ok(Json(post))
}

/// List all posts, newest first.
#[utoipa::path(
    get,
    path = "/api/posts",
    responses(
        (status = 200, description = "All posts, newest first", body = [Post]),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "posts"
)]
pub async fn list_posts(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
) -> Result<Json<Vec<Post>>> {
    Ok(Json(state.store.list_posts().await?))
}

/// Fetch a single post by id.
#[utoipa::path(
    get,
    path = "/api/posts/{post_id}",
    params(("post_id" = String, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "The post", body = Post),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Post not found")
    ),
    tag = "posts"
)]
pub async fn get_post(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(post_id): Path<String>,
) -> Result<Json<Post>> {
    let post = state
        .store
        .get_post(&post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    Ok(Json(post))
}

/// Delete a post. Existence is checked before ownership, so a nonexistent
/// post is 404 even for a caller who would not have owned it.
#[utoipa::path(
    delete,
    path = "/api/posts/{post_id}",
    params(("post_id" = String, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post deleted"),
        (status = 401, description = "Missing/invalid token, or caller is not the owner"),
        (status = 404, description = "Post not found")
    ),
    tag = "posts"
)]
pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(post_id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let post = state
        .store
        .get_post(&post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    policy::authorize(&post.user_id, &user_id)?;

    state.store.delete_post(&post_id).await?;

    Ok(Json(serde_json::json!({ "msg": "Post is deleted" })))
}
