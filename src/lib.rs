//! # DevConnect
//!
//! A social network backend for developers: registration, login, posts, and
//! rich profiles with ordered experience/education entries and a GitHub
//! repository listing.
//!
//! ## Overview
//!
//! DevConnect can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `devconnect-server` binary
//! 2. **As a library** - Mount [`api::create_router`] inside your own axum
//!    application with an [`AppState`] you construct
//!
//! ## Architecture
//!
//! The authentication and authorization core is the heart of the design:
//!
//! - [`auth::password`] hashes and verifies credentials with Argon2id
//! - [`auth::token`] issues and verifies signed, time-limited identity
//!   tokens behind the pluggable [`auth::TokenCodec`] trait
//! - [`auth::guard`] extracts and verifies the `x-auth-token` header on
//!   every private route
//! - [`auth::policy`] is the single ownership predicate gating mutation of
//!   owned resources
//!
//! Everything else is CRUD glue: handlers in [`api`] validate input, call
//! the [`db::Store`], and return JSON.
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use devconnect::{api, auth::JwtCodec, db::Store, github::GithubClient, AppState};
//! use std::sync::Arc;
//!
//! let state = AppState {
//!     store: Arc::new(Store::new_memory().await?),
//!     codec: Arc::new(JwtCodec::new(secret, 360_000)),
//!     github: Arc::new(GithubClient::new(None)?),
//! };
//! let app = api::create_router().with_state(state);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers, router, and OpenAPI document.
pub mod api;
/// Authentication and authorization core.
pub mod auth;
/// Document storage over libsql.
pub mod db;
/// Outbound GitHub repository listing client.
pub mod github;
/// Core types (records, payloads, errors).
pub mod types;
/// Configuration and shared helpers.
pub mod utils;

// Re-export commonly used types
pub use auth::{AuthUser, JwtCodec, TokenCodec};
pub use db::{DatabaseProvider, Store};
pub use types::{AppError, Result};
pub use utils::config::Config;

use github::GithubClient;
use std::sync::Arc;

/// Application state shared across handlers.
///
/// Everything here is read-only after startup; requests share it without
/// locking.
#[derive(Clone)]
pub struct AppState {
    /// Document store
    pub store: Arc<Store>,
    /// Identity token codec (the signing secret lives inside)
    pub codec: Arc<dyn TokenCodec>,
    /// GitHub API client
    pub github: Arc<GithubClient>,
}
