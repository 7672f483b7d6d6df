use crate::{
    types::{AppError, Result},
    AppState,
};
use axum::{extract::FromRequestParts, http::request::Parts};

/// Header carrying the bearer token on authenticated requests.
pub const AUTH_HEADER: &str = "x-auth-token";

/// Extractor that gates every private route.
///
/// Reads the `x-auth-token` header and verifies it through the state's
/// [`TokenCodec`](crate::auth::TokenCodec). A missing header is rejected
/// before any verification is attempted; every other failure collapses into
/// the single invalid-token rejection. On success the handler receives the
/// verified identity and nothing else - the guard knows nothing about what
/// the handler will do with it.
#[derive(Debug, Clone)]
pub struct AuthUser(pub String);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self> {
        let token = parts
            .headers
            .get(AUTH_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::MissingToken)?;

        let identity = state.codec.verify(token).map_err(|_| AppError::InvalidToken)?;

        Ok(AuthUser(identity))
    }
}
