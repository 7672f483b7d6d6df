//! Route handlers, grouped by resource.

/// Login and current-user lookup.
pub mod auth;
/// Post CRUD.
pub mod posts;
/// Profile CRUD, experience/education entries, and GitHub repos.
pub mod profile;
/// Registration.
pub mod users;
