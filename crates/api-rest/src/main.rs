//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! Useful during development when only the HTTP surface is needed. The workspace's main
//! `posts-run` binary additionally loads a `.env` file before serving.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::RestConfig;
use posts_core::{config::posts_dir_from_env_value, CoreConfig, PostService};

/// Starts the REST API server.
///
/// # Environment Variables
/// - `POSTS_DIR`: posts directory (default: "source/_posts"); must exist
/// - `POSTS_REST_ADDR`: server address (default: "0.0.0.0:3000")
/// - `POSTS_CORS_ORIGIN`: restrict CORS to one origin (default: any origin)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the posts directory does not exist,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("posts_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = CoreConfig::new(posts_dir_from_env_value(std::env::var("POSTS_DIR").ok()))?;
    let rest_cfg = RestConfig::from_env();

    tracing::info!("-- Starting posts REST API on {}", rest_cfg.addr);
    tracing::info!("-- Posts directory: {}", cfg.posts_dir().display());

    api_rest::serve(PostService::with_config(&cfg), &rest_cfg).await
}
