use crate::{
    auth::AuthUser,
    db::store::{ProfileFields, ProfileRow},
    types::{
        AppError, Education, EducationRequest, Experience, ExperienceRequest, GithubRepo, Profile,
        ProfileRequest, Result, Social, User,
    },
    utils::links,
    AppState,
};
use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

fn assemble(row: ProfileRow, user: &User, experience: Vec<Experience>, education: Vec<Education>) -> Profile {
    Profile {
        user_id: row.user_id,
        name: user.name.clone(),
        avatar: user.avatar.clone(),
        status: row.status,
        skills: row.skills,
        company: row.company,
        website: row.website,
        location: row.location,
        bio: row.bio,
        github_username: row.github_username,
        social: Social {
            youtube: row.youtube,
            twitter: row.twitter,
            instagram: row.instagram,
            linkedin: row.linkedin,
            facebook: row.facebook,
        },
        experience,
        education,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

/// Fetches a full profile view (row + owner + ordered entries), or `None`
/// when either the profile or its owner is absent.
async fn load_profile(state: &AppState, user_id: &str) -> Result<Option<Profile>> {
    let Some(row) = state.store.get_profile(user_id).await? else {
        return Ok(None);
    };
    let Some(user) = state.store.get_user_by_id(user_id).await? else {
        return Ok(None);
    };
    let experience = state.store.list_experience(user_id).await?;
    let education = state.store.list_education(user_id).await?;

    Ok(Some(assemble(row, &user, experience, education)))
}

async fn require_profile(state: &AppState, user_id: &str) -> Result<Profile> {
    load_profile(state, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("There is no profile for this user".to_string()))
}

/// Validates and normalizes a profile payload into storable fields.
fn build_fields(payload: ProfileRequest) -> Result<ProfileFields> {
    let mut errors = Vec::new();

    let status = match payload.status.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => {
            errors.push("Status is required".to_string());
            String::new()
        }
    };
    let skills = match payload.skills {
        Some(skills) => {
            let list = skills.into_vec();
            if list.is_empty() {
                errors.push("Skills are required".to_string());
            }
            list
        }
        None => {
            errors.push("Skills are required".to_string());
            Vec::new()
        }
    };

    let mut normalize = |field: &str, value: Option<String>| -> Option<String> {
        let raw = value.filter(|v| !v.trim().is_empty())?;
        match links::normalize_link(&raw) {
            Some(normalized) => Some(normalized),
            None => {
                errors.push(format!("Please enter a valid URL for {}", field));
                None
            }
        }
    };
    let website = normalize("website", payload.website);
    let youtube = normalize("youtube", payload.youtube);
    let twitter = normalize("twitter", payload.twitter);
    let instagram = normalize("instagram", payload.instagram);
    let linkedin = normalize("linkedin", payload.linkedin);
    let facebook = normalize("facebook", payload.facebook);

    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    Ok(ProfileFields {
        status,
        skills,
        company: payload.company.filter(|v| !v.trim().is_empty()),
        website,
        location: payload.location.filter(|v| !v.trim().is_empty()),
        bio: payload.bio.filter(|v| !v.trim().is_empty()),
        github_username: payload.github_username.filter(|v| !v.trim().is_empty()),
        youtube,
        twitter,
        instagram,
        linkedin,
        facebook,
    })
}

/// Return the authenticated caller's profile.
#[utoipa::path(
    get,
    path = "/api/profile/me",
    responses(
        (status = 200, description = "The caller's profile", body = Profile),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No profile for this user")
    ),
    tag = "profile"
)]
pub async fn my_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Profile>> {
    Ok(Json(require_profile(&state, &user_id).await?))
}

/// Create or update the caller's profile.
#[utoipa::path(
    post,
    path = "/api/profile",
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "The stored profile", body = Profile),
        (status = 400, description = "Validation failure"),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "profile"
)]
pub async fn upsert_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ProfileRequest>,
) -> Result<Json<Profile>> {
    let fields = build_fields(payload)?;

    // Account must still exist; a valid token can outlive its account.
    if state.store.get_user_by_id(&user_id).await?.is_none() {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    state.store.upsert_profile(&user_id, &fields).await?;

    Ok(Json(require_profile(&state, &user_id).await?))
}

/// List all profiles (public).
#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "All profiles", body = [Profile])
    ),
    tag = "profile"
)]
pub async fn list_profiles(State(state): State<AppState>) -> Result<Json<Vec<Profile>>> {
    let rows = state.store.list_profiles().await?;

    let mut profiles = Vec::with_capacity(rows.len());
    for row in rows {
        // An orphaned row (owner deleted mid-listing) is skipped, not an error.
        if let Some(profile) = load_profile(&state, &row.user_id).await? {
            profiles.push(profile);
        }
    }

    Ok(Json(profiles))
}

/// Fetch a profile by its owner's user id (public).
#[utoipa::path(
    get,
    path = "/api/profile/user/{user_id}",
    params(("user_id" = String, Path, description = "Owner identity")),
    responses(
        (status = 200, description = "The profile", body = Profile),
        (status = 404, description = "Profile not found")
    ),
    tag = "profile"
)]
pub async fn profile_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Profile>> {
    let profile = load_profile(&state, &user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    Ok(Json(profile))
}

/// Delete the caller's account: posts, profile with its entries, and the
/// user record itself.
#[utoipa::path(
    delete,
    path = "/api/profile",
    responses(
        (status = 200, description = "Account deleted"),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "profile"
)]
pub async fn delete_account(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<serde_json::Value>> {
    state.store.delete_account(&user_id).await?;
    tracing::info!(%user_id, "account deleted");

    Ok(Json(serde_json::json!({ "msg": "User deleted" })))
}

/// Prepend an experience entry to the caller's profile.
#[utoipa::path(
    put,
    path = "/api/profile/experience",
    request_body = ExperienceRequest,
    responses(
        (status = 200, description = "The updated profile", body = Profile),
        (status = 400, description = "Validation failure"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No profile for this user")
    ),
    tag = "profile"
)]
pub async fn add_experience(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ExperienceRequest>,
) -> Result<Json<Profile>> {
    let mut errors = Vec::new();
    let title = required_field(payload.title, "Title is required", &mut errors);
    let company = required_field(payload.company, "Company is required", &mut errors);
    let from = required_field(payload.from, "From date is required", &mut errors);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    // The entry hangs off an existing profile; adding to a nonexistent one
    // is a lookup failure, not a silent create.
    if state.store.get_profile(&user_id).await?.is_none() {
        return Err(AppError::NotFound(
            "There is no profile for this user".to_string(),
        ));
    }

    let entry = Experience {
        id: Uuid::new_v4().to_string(),
        title,
        company,
        location: payload.location,
        from,
        to: payload.to,
        current: payload.current,
        description: payload.description,
    };
    state.store.add_experience(&user_id, &entry).await?;

    Ok(Json(require_profile(&state, &user_id).await?))
}

/// Remove an experience entry by id. An absent id is a 404, not a no-op.
#[utoipa::path(
    delete,
    path = "/api/profile/experience/{exp_id}",
    params(("exp_id" = String, Path, description = "Experience entry identifier")),
    responses(
        (status = 200, description = "The updated profile", body = Profile),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Entry not found")
    ),
    tag = "profile"
)]
pub async fn delete_experience(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(exp_id): Path<String>,
) -> Result<Json<Profile>> {
    let affected = state.store.delete_experience(&user_id, &exp_id).await?;
    if affected == 0 {
        return Err(AppError::NotFound("Experience entry not found".to_string()));
    }

    Ok(Json(require_profile(&state, &user_id).await?))
}

/// Prepend an education entry to the caller's profile.
#[utoipa::path(
    put,
    path = "/api/profile/education",
    request_body = EducationRequest,
    responses(
        (status = 200, description = "The updated profile", body = Profile),
        (status = 400, description = "Validation failure"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No profile for this user")
    ),
    tag = "profile"
)]
pub async fn add_education(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<EducationRequest>,
) -> Result<Json<Profile>> {
    let mut errors = Vec::new();
    let school = required_field(payload.school, "School is required", &mut errors);
    let degree = required_field(payload.degree, "Degree is required", &mut errors);
    let field_of_study = required_field(
        payload.field_of_study,
        "Field of study is required",
        &mut errors,
    );
    let from = required_field(payload.from, "From date is required", &mut errors);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    if state.store.get_profile(&user_id).await?.is_none() {
        return Err(AppError::NotFound(
            "There is no profile for this user".to_string(),
        ));
    }

    let entry = Education {
        id: Uuid::new_v4().to_string(),
        school,
        degree,
        field_of_study,
        from,
        to: payload.to,
        current: payload.current,
        description: payload.description,
    };
    state.store.add_education(&user_id, &entry).await?;

    Ok(Json(require_profile(&state, &user_id).await?))
}

/// Remove an education entry by id. An absent id is a 404, not a no-op.
#[utoipa::path(
    delete,
    path = "/api/profile/education/{edu_id}",
    params(("edu_id" = String, Path, description = "Education entry identifier")),
    responses(
        (status = 200, description = "The updated profile", body = Profile),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Entry not found")
    ),
    tag = "profile"
)]
pub async fn delete_education(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(edu_id): Path<String>,
) -> Result<Json<Profile>> {
    let affected = state.store.delete_education(&user_id, &edu_id).await?;
    if affected == 0 {
        return Err(AppError::NotFound("Education entry not found".to_string()));
    }

    Ok(Json(require_profile(&state, &user_id).await?))
}

/// Proxy a user's five most recent GitHub repositories (public).
#[utoipa::path(
    get,
    path = "/api/profile/github/{username}",
    params(("username" = String, Path, description = "GitHub username")),
    responses(
        (status = 200, description = "Recent repositories", body = [GithubRepo]),
        (status = 404, description = "No Github profile found")
    ),
    tag = "profile"
)]
pub async fn github_repos(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Vec<GithubRepo>>> {
    Ok(Json(state.github.recent_repos(&username).await?))
}

fn required_field(value: Option<String>, message: &str, errors: &mut Vec<String>) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => {
            errors.push(message.to_string());
            String::new()
        }
    }
}
