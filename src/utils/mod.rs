//! Configuration and small shared helpers.

/// Environment-based configuration loading.
pub mod config;
/// Gravatar avatar URL derivation.
pub mod gravatar;
/// URL normalization for website and social links.
pub mod links;
