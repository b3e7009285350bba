use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::RestConfig;
use posts_core::{CoreConfig, PostService, config::posts_dir_from_env_value};

/// Main entry point for the blog posts application
///
/// Loads `.env`, resolves configuration once and serves the REST API.
///
/// # Environment Variables
/// - `POSTS_DIR`: posts directory (default: "source/_posts"); must already exist
/// - `POSTS_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `POSTS_CORS_ORIGIN`: only allow this browser origin, with credentials (default: any origin)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, startup or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("posts=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = CoreConfig::new(posts_dir_from_env_value(std::env::var("POSTS_DIR").ok()))?;
    let rest_cfg = RestConfig::from_env();

    tracing::info!("++ Starting posts REST on {}", rest_cfg.addr);
    tracing::info!("++ Posts directory: {}", cfg.posts_dir().display());
    if let Some(origin) = &rest_cfg.cors_origin {
        tracing::info!("++ CORS restricted to {}", origin);
    }

    api_rest::serve(PostService::with_config(&cfg), &rest_cfg).await
}
