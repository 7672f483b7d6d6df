use crate::api::handlers;
use crate::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};

async fn root() -> &'static str {
    "Hello World !!"
}

/// Builds the full application router.
///
/// Private routes are not gated by a layer: each one declares the
/// [`AuthUser`](crate::auth::AuthUser) extractor, which is the single
/// verification choke point.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        // Users and auth
        .route("/api/users", post(handlers::users::register))
        .route(
            "/api/auth",
            post(handlers::auth::login).get(handlers::auth::current_user),
        )
        // Posts
        .route(
            "/api/posts",
            post(handlers::posts::create_post).get(handlers::posts::list_posts),
        )
        .route(
            "/api/posts/{post_id}",
            get(handlers::posts::get_post).delete(handlers::posts::delete_post),
        )
        // Profiles
        .route("/api/profile/me", get(handlers::profile::my_profile))
        .route(
            "/api/profile",
            post(handlers::profile::upsert_profile)
                .get(handlers::profile::list_profiles)
                .delete(handlers::profile::delete_account),
        )
        .route(
            "/api/profile/user/{user_id}",
            get(handlers::profile::profile_by_user),
        )
        .route(
            "/api/profile/experience",
            put(handlers::profile::add_experience),
        )
        .route(
            "/api/profile/experience/{exp_id}",
            delete(handlers::profile::delete_experience),
        )
        .route(
            "/api/profile/education",
            put(handlers::profile::add_education),
        )
        .route(
            "/api/profile/education/{edu_id}",
            delete(handlers::profile::delete_education),
        )
        .route(
            "/api/profile/github/{username}",
            get(handlers::profile::github_repos),
        )
}
