use serde::Deserialize;
use std::env;

/// Process-wide configuration, loaded once at startup and read-only after.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// HTTP listener settings
    pub server: ServerConfig,
    /// Token signing settings
    pub auth: AuthConfig,
    /// Outbound GitHub API settings
    pub github: GithubConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
}

/// Token signing settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Secret for signing identity tokens; startup-fatal if absent
    pub jwt_secret: String,
    /// Token lifetime in seconds
    pub jwt_expiry: i64,
}

/// Outbound GitHub API settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubConfig {
    /// Optional bearer token for higher rate limits
    pub token: Option<String>,
}

impl Config {
    /// Loads configuration from the environment (and `.env` if present).
    ///
    /// A missing `JWT_SECRET` is a startup-fatal error, never a per-request
    /// one.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()?,
            },
            auth: AuthConfig {
                jwt_secret: env::var("JWT_SECRET")
                    .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set"))?,
                jwt_expiry: env::var("JWT_EXPIRY")
                    .unwrap_or_else(|_| "360000".to_string())
                    .parse()?,
            },
            github: GithubConfig {
                token: env::var("GITHUB_TOKEN").ok(),
            },
        })
    }
}
