use crate::{
    auth::password,
    types::{AppError, RegisterRequest, Result, TokenResponse, User},
    utils::gravatar,
    AppState,
};
use axum::{extract::State, Json};
use uuid::Uuid;

/// Minimal syntactic email check; real validation is delivery.
fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

/// Register a new user and issue their first token.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User registered", body = TokenResponse),
        (status = 400, description = "Validation failure or duplicate email")
    ),
    tag = "users"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<TokenResponse>> {
    let mut errors = Vec::new();
    if payload.name.trim().is_empty() {
        errors.push("Please enter a name".to_string());
    }
    if !is_valid_email(&payload.email) {
        errors.push("Please enter a valid email".to_string());
    }
    if payload.password.len() < 6 {
        errors.push("Please enter a password with 6 or more characters".to_string());
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    if state
        .store
        .get_user_by_email(&payload.email)
        .await?
        .is_some()
    {
        return Err(AppError::Validation(vec!["User already exists".to_string()]));
    }

    let user = User {
        id: Uuid::new_v4().to_string(),
        avatar: gravatar::avatar_url(&payload.email),
        password_hash: password::hash_password(&payload.password)?,
        email: payload.email,
        name: payload.name,
        created_at: chrono::Utc::now().timestamp(),
    };
    state.store.create_user(&user).await?;
    tracing::info!(user_id = %user.id, "user registered");

    let token = state.codec.issue(&user.id)?;
    Ok(Json(TokenResponse { token }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("dev@example.com", true)]
    #[case("a@b.co", true)]
    #[case("no-at-sign", false)]
    #[case("@example.com", false)]
    #[case("dev@nodot", false)]
    #[case("dev@.com", false)]
    fn email_check(#[case] email: &str, #[case] expected: bool) {
        assert_eq!(is_valid_email(email), expected);
    }
}
