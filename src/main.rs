use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use medimage_core::{
    Catalog, CoreConfig, ImageResolver, MANIFEST_PATH_ENV, RELATED_LIMIT_ENV,
    config::{related_limit_from_env_value, resolve_manifest_path},
};

/// Main entry point for the medimage application
///
/// Loads `.env`, resolves configuration once, loads the catalog and serves the REST API.
///
/// # Environment Variables
/// - `MEDIMAGE_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `MEDIMAGE_MANIFEST_PATH`: Manifest file to serve instead of the builtin catalog
/// - `MEDIMAGE_RELATED_LIMIT`: Default related-image limit (default: 6)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, catalog loading or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("medimage_run=info".parse()?)
                .add_directive("medimage_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("MEDIMAGE_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = CoreConfig::new(
        resolve_manifest_path(std::env::var(MANIFEST_PATH_ENV).ok())?,
        related_limit_from_env_value(std::env::var(RELATED_LIMIT_ENV).ok())?,
    )?;
    let catalog = Catalog::from_config(&cfg)?;
    tracing::info!("++ Catalog ready with {} images", catalog.len());

    let resolver = ImageResolver::with_related_limit(catalog, cfg.related_limit());
    api_rest::serve(&rest_addr, AppState::new(resolver)).await
}
