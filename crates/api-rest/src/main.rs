//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! Useful for development and debugging. The workspace's main `medimage-run` binary also loads
//! `.env` files before starting the same server.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use medimage_core::{
    config::{related_limit_from_env_value, resolve_manifest_path},
    Catalog, CoreConfig, ImageResolver, MANIFEST_PATH_ENV, RELATED_LIMIT_ENV,
};

/// Main entry point for the medimage REST API server
///
/// # Environment Variables
/// - `MEDIMAGE_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `MEDIMAGE_MANIFEST_PATH`: Manifest file to serve instead of the builtin catalog
/// - `MEDIMAGE_RELATED_LIMIT`: Default related-image limit (default: 6)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration or catalog cannot be loaded,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("medimage_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("MEDIMAGE_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = CoreConfig::new(
        resolve_manifest_path(std::env::var(MANIFEST_PATH_ENV).ok())?,
        related_limit_from_env_value(std::env::var(RELATED_LIMIT_ENV).ok())?,
    )?;
    let catalog = Catalog::from_config(&cfg)?;
    let resolver = ImageResolver::with_related_limit(catalog, cfg.related_limit());

    api_rest::serve(&addr, AppState::new(resolver)).await
}
