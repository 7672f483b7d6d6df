use crate::{
    auth::{password, AuthUser},
    types::{AppError, LoginRequest, Result, TokenResponse, User},
    AppState,
};
use axum::{extract::State, Json};

/// Login with email and password; returns a fresh token.
///
/// Unknown email and wrong password produce the identical generic response
/// so the endpoint cannot be used to enumerate accounts.
#[utoipa::path(
    post,
    path = "/api/auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Validation failure or invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    let mut errors = Vec::new();
    if !payload.email.contains('@') {
        errors.push("Please enter a valid email".to_string());
    }
    if payload.password.is_empty() {
        errors.push("Password is required".to_string());
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let user = state
        .store
        .get_user_by_email(&payload.email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !password::verify_password(&payload.password, &user.password_hash)? {
        return Err(AppError::InvalidCredentials);
    }

    let token = state.codec.issue(&user.id)?;
    Ok(Json(TokenResponse { token }))
}

/// Return the authenticated caller's user record (without the credential).
#[utoipa::path(
    get,
    path = "/api/auth",
    responses(
        (status = 200, description = "The caller's user record", body = User),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Account no longer exists")
    ),
    tag = "auth"
)]
pub async fn current_user(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<User>> {
    let user = state
        .store
        .get_user_by_id(&user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}
