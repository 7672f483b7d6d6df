//! REST API surface: handlers, router, and OpenAPI document.

/// Route handlers.
pub mod handlers;
/// Router construction.
pub mod routes;

pub use routes::create_router;

use utoipa::OpenApi;

/// OpenAPI document covering every route.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "DevConnect API",
        description = "Social network backend for developers: users, auth, posts, profiles"
    ),
    paths(
        handlers::users::register,
        handlers::auth::login,
        handlers::auth::current_user,
        handlers::posts::create_post,
        handlers::posts::list_posts,
        handlers::posts::get_post,
        handlers::posts::delete_post,
        handlers::profile::my_profile,
        handlers::profile::upsert_profile,
        handlers::profile::list_profiles,
        handlers::profile::profile_by_user,
        handlers::profile::delete_account,
        handlers::profile::add_experience,
        handlers::profile::delete_experience,
        handlers::profile::add_education,
        handlers::profile::delete_education,
        handlers::profile::github_repos,
    ),
    components(schemas(
        crate::types::User,
        crate::types::Post,
        crate::types::Profile,
        crate::types::Social,
        crate::types::Experience,
        crate::types::Education,
        crate::types::RegisterRequest,
        crate::types::LoginRequest,
        crate::types::TokenResponse,
        crate::types::PostRequest,
        crate::types::ProfileRequest,
        crate::types::ExperienceRequest,
        crate::types::EducationRequest,
        crate::types::GithubRepo,
    )),
    tags(
        (name = "users", description = "Registration"),
        (name = "auth", description = "Login and identity"),
        (name = "posts", description = "Posts"),
        (name = "profile", description = "Developer profiles")
    )
)]
pub struct ApiDoc;
