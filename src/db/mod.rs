//! Document storage over libsql.
//!
//! The server runs against an in-memory database (tests, ephemeral dev), a
//! local SQLite file, or a remote libsql replica - selected through
//! [`DatabaseProvider`] from environment variables. All queries live in
//! [`store::Store`]; handlers never touch SQL.

/// The libsql-backed store and its record types.
pub mod store;

pub use store::Store;

use crate::types::Result;

/// Database backend configuration.
#[derive(Debug, Clone, Default)]
pub enum DatabaseProvider {
    /// In-memory SQLite database (ephemeral, lost on restart)
    #[default]
    Memory,
    /// File-based SQLite database
    Local {
        /// Path to the SQLite database file
        path: String,
    },
    /// Remote libsql database (requires network access)
    Remote {
        /// The database URL (e.g. `libsql://your-db.turso.io`)
        url: String,
        /// Authentication token for the remote database
        auth_token: String,
    },
}

impl DatabaseProvider {
    /// Connects to the configured backend and initializes the schema.
    pub async fn connect(&self) -> Result<Store> {
        match self {
            DatabaseProvider::Memory => Store::new_memory().await,
            DatabaseProvider::Local { path } => Store::new_local(path).await,
            DatabaseProvider::Remote { url, auth_token } => {
                Store::new_remote(url.clone(), auth_token.clone()).await
            }
        }
    }

    /// Selects a backend from environment variables.
    ///
    /// `LIBSQL_URL` + `LIBSQL_AUTH_TOKEN` pick the remote backend;
    /// otherwise `DATABASE_PATH` picks a local file (`:memory:` or unset
    /// falls back to the in-memory backend).
    pub fn from_env() -> Self {
        if let (Ok(url), Ok(token)) = (
            std::env::var("LIBSQL_URL"),
            std::env::var("LIBSQL_AUTH_TOKEN"),
        ) {
            if !url.is_empty() && !token.is_empty() {
                return DatabaseProvider::Remote {
                    url,
                    auth_token: token,
                };
            }
        }

        if let Ok(path) = std::env::var("DATABASE_PATH") {
            if !path.is_empty() && path != ":memory:" {
                return DatabaseProvider::Local { path };
            }
        }

        DatabaseProvider::Memory
    }
}
