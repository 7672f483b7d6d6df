//! DevConnect server binary.

use anyhow::Context;
use clap::Parser;
use devconnect::{api, auth::JwtCodec, github::GithubClient, AppState, Config, DatabaseProvider};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// DevConnect - social network backend for developers.
#[derive(Parser, Debug)]
#[command(
    name = "devconnect-server",
    author = "Dirmacs <build@dirmacs.com>",
    version,
    about = "DevConnect - social network backend for developers",
    long_about = "A REST backend for a developer social network: registration, login,\n\
                  posts, and rich profiles with experience/education entries and a\n\
                  GitHub repository listing.\n\n\
                  Configuration comes from the environment (or a .env file);\n\
                  JWT_SECRET is required."
)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long)]
    verbose: bool,

    /// Override the bind address from HOST
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port from PORT
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env().context("failed to load configuration")?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let provider = DatabaseProvider::from_env();
    let store = provider
        .connect()
        .await
        .map_err(|e| anyhow::anyhow!("failed to open database: {}", e))?;

    let codec = JwtCodec::new(config.auth.jwt_secret.clone(), config.auth.jwt_expiry);
    let github = GithubClient::new(config.github.token.clone())
        .map_err(|e| anyhow::anyhow!("failed to build github client: {}", e))?;

    let state = AppState {
        store: Arc::new(store),
        codec: Arc::new(codec),
        github: Arc::new(github),
    };

    let app = api::create_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    #[cfg(feature = "swagger-ui")]
    let app = {
        use utoipa::OpenApi;
        app.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", api::ApiDoc::openapi()),
        )
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!("Server started on {}", addr);
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
