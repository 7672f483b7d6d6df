//! Core types: domain records, request/response payloads, and error handling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============= Domain Records =============

/// A registered user.
///
/// `password_hash` is never serialized; responses that return a user carry
/// everything except the credential.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct User {
    /// Unique user identifier (UUIDv4)
    pub id: String,
    /// Unique email address
    pub email: String,
    /// Argon2id PHC hash of the password
    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub password_hash: String,
    /// Display name
    pub name: String,
    /// Gravatar URL derived from the email
    pub avatar: String,
    /// Unix timestamp of registration
    pub created_at: i64,
}

/// A post, with the author's name and avatar denormalized at creation time.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Post {
    /// Unique post identifier
    pub id: String,
    /// Identity of the post's owner
    pub user_id: String,
    /// Post body
    pub text: String,
    /// Author name at creation time
    pub name: String,
    /// Author avatar at creation time
    pub avatar: String,
    /// Unix timestamp of creation
    pub created_at: i64,
}

/// A developer profile, including its ordered experience/education entries
/// and the owner's name and avatar.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Profile {
    /// Identity of the profile's owner
    pub user_id: String,
    /// Owner display name
    pub name: String,
    /// Owner avatar URL
    pub avatar: String,
    /// Professional status (e.g. "Developer")
    pub status: String,
    /// Skill list
    pub skills: Vec<String>,
    /// Current company
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Personal website (normalized URL)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Short biography
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// GitHub username used by the repository listing route
    #[serde(rename = "githubusername", skip_serializing_if = "Option::is_none")]
    pub github_username: Option<String>,
    /// Social links (normalized URLs)
    pub social: Social,
    /// Work history, newest entry first
    pub experience: Vec<Experience>,
    /// Education history, newest entry first
    pub education: Vec<Education>,
    /// Unix timestamp of creation
    pub created_at: i64,
    /// Unix timestamp of the last update
    pub updated_at: i64,
}

/// Social links attached to a profile.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct Social {
    /// YouTube channel URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    /// Twitter profile URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    /// Instagram profile URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    /// LinkedIn profile URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    /// Facebook profile URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
}

/// A work-experience entry inside a profile's ordered sub-collection.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Experience {
    /// Generated entry identifier, used for deletion
    pub id: String,
    /// Job title
    pub title: String,
    /// Company name
    pub company: String,
    /// Location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Start date
    pub from: String,
    /// End date, absent while `current`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// Whether this is the current position
    pub current: bool,
    /// Role description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An education entry inside a profile's ordered sub-collection.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Education {
    /// Generated entry identifier, used for deletion
    pub id: String,
    /// School name
    pub school: String,
    /// Degree obtained
    pub degree: String,
    /// Field of study
    #[serde(rename = "fieldofstudy")]
    pub field_of_study: String,
    /// Start date
    pub from: String,
    /// End date, absent while `current`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// Whether this is ongoing
    pub current: bool,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ============= API Request/Response Types =============

/// Registration payload for `POST /api/users`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Email address (becomes the login identifier)
    #[serde(default)]
    pub email: String,
    /// Plaintext password, minimum 6 characters
    #[serde(default)]
    pub password: String,
}

/// Login payload for `POST /api/auth`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Email address
    #[serde(default)]
    pub email: String,
    /// Plaintext password
    #[serde(default)]
    pub password: String,
}

/// Successful login/registration response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// Signed bearer token for the `x-auth-token` header
    pub token: String,
}

/// Post creation payload.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PostRequest {
    /// Post body
    #[serde(default)]
    pub text: String,
}

/// Skills field of a profile payload: either a JSON array or a
/// comma-separated string.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum Skills {
    /// Already-split skill list
    List(Vec<String>),
    /// Comma-separated skills, split and trimmed on input
    Csv(String),
}

impl Skills {
    /// Normalizes either representation into a trimmed list.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Skills::List(list) => list
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Skills::Csv(csv) => csv
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

/// Create-or-update payload for `POST /api/profile`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProfileRequest {
    /// Professional status (required)
    pub status: Option<String>,
    /// Skills (required), array or comma-separated string
    pub skills: Option<Skills>,
    /// Current company
    pub company: Option<String>,
    /// Personal website
    pub website: Option<String>,
    /// Location
    pub location: Option<String>,
    /// Short biography
    pub bio: Option<String>,
    /// GitHub username
    #[serde(rename = "githubusername")]
    pub github_username: Option<String>,
    /// YouTube channel
    pub youtube: Option<String>,
    /// Twitter profile
    pub twitter: Option<String>,
    /// Instagram profile
    pub instagram: Option<String>,
    /// LinkedIn profile
    pub linkedin: Option<String>,
    /// Facebook profile
    pub facebook: Option<String>,
}

/// Payload for `PUT /api/profile/experience`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ExperienceRequest {
    /// Job title (required)
    pub title: Option<String>,
    /// Company name (required)
    pub company: Option<String>,
    /// Location
    pub location: Option<String>,
    /// Start date (required)
    pub from: Option<String>,
    /// End date
    pub to: Option<String>,
    /// Whether this is the current position
    #[serde(default)]
    pub current: bool,
    /// Role description
    pub description: Option<String>,
}

/// Payload for `PUT /api/profile/education`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct EducationRequest {
    /// School name (required)
    pub school: Option<String>,
    /// Degree (required)
    pub degree: Option<String>,
    /// Field of study (required)
    #[serde(rename = "fieldofstudy")]
    pub field_of_study: Option<String>,
    /// Start date (required)
    pub from: Option<String>,
    /// End date
    pub to: Option<String>,
    /// Whether this is ongoing
    #[serde(default)]
    pub current: bool,
    /// Description
    pub description: Option<String>,
}

/// A repository entry returned by the GitHub listing route.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GithubRepo {
    /// Repository name
    pub name: String,
    /// Repository web URL
    pub html_url: String,
    /// Repository description
    #[serde(default)]
    pub description: Option<String>,
    /// Star count
    #[serde(default)]
    pub stargazers_count: i64,
    /// Watcher count
    #[serde(default)]
    pub watchers_count: i64,
    /// Fork count
    #[serde(default)]
    pub forks_count: i64,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

// ============= Error Types =============

/// Application error taxonomy.
///
/// The `Display` output is for logs; the wire shape is produced by the
/// [`IntoResponse`](axum::response::IntoResponse) impl below and follows the
/// API's two body conventions: `{"msg": ...}` for auth/lookup conditions and
/// `{"errors": [{"msg": ...}, ...]}` for operation failures.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No token in the `x-auth-token` header
    #[error("missing auth token")]
    MissingToken,

    /// Token rejected: malformed, forged, or expired (deliberately merged)
    #[error("invalid auth token")]
    InvalidToken,

    /// Unknown email or wrong password (deliberately merged)
    #[error("credential mismatch")]
    InvalidCredentials,

    /// Request payload failed one or more validation rules
    #[error("validation failed: {0:?}")]
    Validation(Vec<String>),

    /// Signing a new token failed
    #[error("token creation failed: {0}")]
    TokenCreation(String),

    /// Caller is not the owner of the resource it tried to mutate
    #[error("not authorised")]
    NotAuthorized,

    /// Resource absent; the message is the user-facing body
    #[error("not found: {0}")]
    NotFound(String),

    /// Malformed stored hash or similar configuration/integrity fault
    #[error("integrity error: {0}")]
    Integrity(String),

    /// Storage layer failure
    #[error("database error: {0}")]
    Database(String),

    /// Unexpected internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<libsql::Error> for AppError {
    fn from(e: libsql::Error) -> Self {
        AppError::Database(e.to_string())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let (status, body) = match &self {
            AppError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                serde_json::json!({ "msg": "Access denied, Not authorised" }),
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                serde_json::json!({ "msg": "Invalid token" }),
            ),
            AppError::InvalidCredentials => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "errors": [{ "msg": "Invalid Credentials" }] }),
            ),
            AppError::Validation(msgs) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({
                    "errors": msgs
                        .iter()
                        .map(|m| serde_json::json!({ "msg": m }))
                        .collect::<Vec<_>>()
                }),
            ),
            AppError::TokenCreation(_) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "errors": [{ "msg": "error while creating jwt" }] }),
            ),
            AppError::NotAuthorized => (
                StatusCode::UNAUTHORIZED,
                serde_json::json!({ "msg": "User not authorised" }),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, serde_json::json!({ "msg": msg })),
            AppError::Integrity(_) | AppError::Database(_) | AppError::Internal(_) => {
                // Details stay in the log; the client sees a generic body.
                tracing::error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "errors": [{ "msg": "Server Error" }] }),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Convenience result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skills_from_list_trims_entries() {
        let skills = Skills::List(vec![" Rust ".into(), "SQL".into(), "".into()]);
        assert_eq!(skills.into_vec(), vec!["Rust", "SQL"]);
    }

    #[test]
    fn skills_from_csv_splits_and_trims() {
        let skills = Skills::Csv("Rust, SQL ,,HTTP".into());
        assert_eq!(skills.into_vec(), vec!["Rust", "SQL", "HTTP"]);
    }

    #[test]
    fn user_serialization_omits_password_hash() {
        let user = User {
            id: "u1".into(),
            email: "dev@example.com".into(),
            password_hash: "$argon2id$secret".into(),
            name: "Dev".into(),
            avatar: "https://example.com/a".into(),
            created_at: 0,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "dev@example.com");
    }
}
