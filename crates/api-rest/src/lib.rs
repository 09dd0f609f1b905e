//! # API REST
//!
//! REST API implementation for the medical image catalog.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status codes)
//!
//! Uses `api-shared` for response types and `medimage-core` for the queries themselves.

#![warn(rust_2018_idioms)]

pub mod handlers;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::HealthService;
use medimage_core::ImageResolver;

/// Application state shared across REST API handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub resolver: ImageResolver,
    pub health: HealthService,
}

impl AppState {
    pub fn new(resolver: ImageResolver) -> Self {
        let health = HealthService::new(resolver.catalog().clone());
        Self { resolver, health }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::list_images,
        handlers::search_images,
        handlers::featured_images,
        handlers::image_statistics,
        handlers::unmapped_images,
        handlers::get_image,
        handlers::related_images,
        handlers::list_entries,
        handlers::entries_without_images,
        handlers::entry_images,
        handlers::entry_has_images,
        handlers::images_by_category,
        handlers::images_by_system,
        handlers::images_by_level,
        handlers::images_by_tag,
        handlers::images_by_license,
    ),
    components(schemas(
        api_shared::HealthRes,
        api_shared::AttributionRes,
        api_shared::ImageRes,
        api_shared::ListImagesRes,
        api_shared::EncyclopediaImageRes,
        api_shared::EntryImagesRes,
        api_shared::EntryHasImagesRes,
        api_shared::EntriesRes,
        api_shared::StatisticsRes,
    ))
)]
pub struct ApiDoc;

/// Build the REST router with Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/images", get(handlers::list_images))
        .route("/images/search", get(handlers::search_images))
        .route("/images/featured", get(handlers::featured_images))
        .route("/images/statistics", get(handlers::image_statistics))
        .route("/images/unmapped", get(handlers::unmapped_images))
        .route("/images/:id", get(handlers::get_image))
        .route("/images/:id/related", get(handlers::related_images))
        .route("/entries", get(handlers::list_entries))
        .route(
            "/entries/without-images",
            get(handlers::entries_without_images),
        )
        .route("/entries/:entry_id/images", get(handlers::entry_images))
        .route(
            "/entries/:entry_id/has-images",
            get(handlers::entry_has_images),
        )
        .route(
            "/categories/:category/images",
            get(handlers::images_by_category),
        )
        .route("/systems/:system/images", get(handlers::images_by_system))
        .route("/levels/:level/images", get(handlers::images_by_level))
        .route("/tags/:tag/images", get(handlers::images_by_tag))
        .route("/licenses/:license/images", get(handlers::images_by_license))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve the REST API until the process is stopped.
///
/// # Errors
/// Returns an error if the address cannot be bound or the HTTP server fails while running.
pub async fn serve(addr: &str, state: AppState) -> anyhow::Result<()> {
    tracing::info!("-- Starting medimage REST API on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
