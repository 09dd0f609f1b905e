//! REST handlers.
//!
//! Each handler forwards to the [`ImageResolver`](medimage_core::ImageResolver) held in
//! [`AppState`]. Absent records become `404`; unparseable enum values or limits become `400`.

use axum::{
    extract::{Path as AxumPath, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::AppState;
use api_shared::{
    EncyclopediaImageRes, EntriesRes, EntryHasImagesRes, EntryImagesRes, HealthRes, ImageRes,
    ListImagesRes, StatisticsRes,
};
use medimage_core::{
    config::validate_related_limit, AudienceLevel, ImageCategory, ImageFilter, ParseEnumError,
};

type ApiError = (StatusCode, String);

/// Query parameters accepted by `GET /images`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ImageQueryParams {
    /// Image category, e.g. `histology`
    pub category: Option<String>,
    /// Body system, matched case-insensitively
    pub system: Option<String>,
    /// Audience level: `patient`, `intermediate` or `professional`
    pub level: Option<String>,
    /// Related content entry id
    pub entry: Option<String>,
    /// Attribution license, matched case-insensitively
    pub license: Option<String>,
    /// Case-insensitive substring search
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Case-insensitive substring search
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EntryIdsParams {
    /// Comma-separated content entry ids
    #[serde(default)]
    pub ids: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RelatedParams {
    /// Maximum number of images to return
    pub limit: Option<usize>,
}

fn bad_request(err: ParseEnumError) -> ApiError {
    tracing::warn!("rejected request: {err}");
    (StatusCode::BAD_REQUEST, err.to_string())
}

fn not_found(what: &str, id: &str) -> ApiError {
    (StatusCode::NOT_FOUND, format!("{what} not found: {id}"))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> Json<HealthRes> {
    Json(state.health.check_health())
}

#[utoipa::path(
    get,
    path = "/images",
    params(ImageQueryParams),
    responses(
        (status = 200, description = "Images matching every supplied filter", body = ListImagesRes),
        (status = 400, description = "Unknown category or level")
    )
)]
/// List images, optionally narrowed by category, system, level, entry and search text.
#[axum::debug_handler]
pub async fn list_images(
    State(state): State<AppState>,
    Query(params): Query<ImageQueryParams>,
) -> Result<Json<ListImagesRes>, ApiError> {
    let filter = ImageFilter {
        category: params
            .category
            .as_deref()
            .map(str::parse::<ImageCategory>)
            .transpose()
            .map_err(bad_request)?,
        system: params.system,
        level: params
            .level
            .as_deref()
            .map(str::parse::<AudienceLevel>)
            .transpose()
            .map_err(bad_request)?,
        entry_id: params.entry,
        license: params.license,
        query: params.q,
    };
    tracing::debug!("list images: {:?}", filter);

    let images = state.resolver.filter_images(&filter);
    Ok(Json(ListImagesRes::from_images(images)))
}

#[utoipa::path(
    get,
    path = "/images/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Images whose title, description, tags or systems contain the query", body = ListImagesRes)
    )
)]
/// Case-insensitive substring search.
#[axum::debug_handler]
pub async fn search_images(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<ListImagesRes> {
    tracing::debug!("search images: {:?}", params.q);
    Json(ListImagesRes::from_images(
        state.resolver.search_images(&params.q),
    ))
}

#[utoipa::path(
    get,
    path = "/images/featured",
    responses(
        (status = 200, description = "One image per gallery category", body = ListImagesRes)
    )
)]
/// Gallery preview: the first image of each gallery category.
#[axum::debug_handler]
pub async fn featured_images(State(state): State<AppState>) -> Json<ListImagesRes> {
    Json(ListImagesRes::from_images(state.resolver.featured_images()))
}

#[utoipa::path(
    get,
    path = "/images/statistics",
    responses(
        (status = 200, description = "Catalog statistics", body = StatisticsRes)
    )
)]
#[axum::debug_handler]
pub async fn image_statistics(State(state): State<AppState>) -> Json<StatisticsRes> {
    Json(StatisticsRes::from(state.resolver.image_statistics()))
}

#[utoipa::path(
    get,
    path = "/images/unmapped",
    responses(
        (status = 200, description = "Images not attached to any content entry", body = ListImagesRes)
    )
)]
#[axum::debug_handler]
pub async fn unmapped_images(State(state): State<AppState>) -> Json<ListImagesRes> {
    Json(ListImagesRes::from_images(state.resolver.unmapped_images()))
}

#[utoipa::path(
    get,
    path = "/images/{id}",
    params(("id" = String, Path, description = "Image id")),
    responses(
        (status = 200, description = "The image", body = ImageRes),
        (status = 404, description = "No image with this id")
    )
)]
#[axum::debug_handler]
pub async fn get_image(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<ImageRes>, ApiError> {
    state
        .resolver
        .get_image_by_id(&id)
        .map(|image| Json(ImageRes::from(image)))
        .ok_or_else(|| not_found("image", &id))
}

#[utoipa::path(
    get,
    path = "/images/{id}/related",
    params(("id" = String, Path, description = "Image id"), RelatedParams),
    responses(
        (status = 200, description = "Images sharing a category, system or entry", body = ListImagesRes),
        (status = 400, description = "Limit out of range"),
        (status = 404, description = "No image with this id")
    )
)]
#[axum::debug_handler]
pub async fn related_images(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Query(params): Query<RelatedParams>,
) -> Result<Json<ListImagesRes>, ApiError> {
    if let Some(limit) = params.limit {
        validate_related_limit(limit).map_err(|err| {
            tracing::warn!("rejected request: {err}");
            (StatusCode::BAD_REQUEST, err.to_string())
        })?;
    }
    if state.resolver.get_image_by_id(&id).is_none() {
        return Err(not_found("image", &id));
    }

    Ok(Json(ListImagesRes::from_images(
        state.resolver.related_images(&id, params.limit),
    )))
}

#[utoipa::path(
    get,
    path = "/entries",
    responses(
        (status = 200, description = "Every entry id referenced by an image", body = EntriesRes)
    )
)]
#[axum::debug_handler]
pub async fn list_entries(State(state): State<AppState>) -> Json<EntriesRes> {
    Json(EntriesRes {
        entry_ids: state.resolver.entries_with_images().into_iter().collect(),
    })
}

#[utoipa::path(
    get,
    path = "/entries/without-images",
    params(EntryIdsParams),
    responses(
        (status = 200, description = "The supplied entry ids that no image references", body = EntriesRes)
    )
)]
/// Check a list of content entries for missing images.
#[axum::debug_handler]
pub async fn entries_without_images(
    State(state): State<AppState>,
    Query(params): Query<EntryIdsParams>,
) -> Json<EntriesRes> {
    let ids: Vec<&str> = params
        .ids
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .collect();
    Json(EntriesRes {
        entry_ids: state.resolver.entries_without_images(&ids),
    })
}

#[utoipa::path(
    get,
    path = "/entries/{entry_id}/images",
    params(("entry_id" = String, Path, description = "Content entry id")),
    responses(
        (status = 200, description = "Display views of the entry's images; empty when none", body = EntryImagesRes)
    )
)]
/// Images for a content entry, shaped for the encyclopedia display layer.
#[axum::debug_handler]
pub async fn entry_images(
    State(state): State<AppState>,
    AxumPath(entry_id): AxumPath<String>,
) -> Json<EntryImagesRes> {
    let images = state
        .resolver
        .entry_image_views(&entry_id)
        .into_iter()
        .map(EncyclopediaImageRes::from)
        .collect();
    Json(EntryImagesRes { entry_id, images })
}

#[utoipa::path(
    get,
    path = "/entries/{entry_id}/has-images",
    params(("entry_id" = String, Path, description = "Content entry id")),
    responses(
        (status = 200, description = "Whether any image references the entry", body = EntryHasImagesRes)
    )
)]
#[axum::debug_handler]
pub async fn entry_has_images(
    State(state): State<AppState>,
    AxumPath(entry_id): AxumPath<String>,
) -> Json<EntryHasImagesRes> {
    let has_images = state.resolver.entry_has_images(&entry_id);
    Json(EntryHasImagesRes {
        entry_id,
        has_images,
    })
}

#[utoipa::path(
    get,
    path = "/categories/{category}/images",
    params(("category" = String, Path, description = "Image category")),
    responses(
        (status = 200, description = "Images in the category", body = ListImagesRes),
        (status = 400, description = "Unknown category")
    )
)]
#[axum::debug_handler]
pub async fn images_by_category(
    State(state): State<AppState>,
    AxumPath(category): AxumPath<String>,
) -> Result<Json<ListImagesRes>, ApiError> {
    let category: ImageCategory = category.parse().map_err(bad_request)?;
    Ok(Json(ListImagesRes::from_images(
        state.resolver.images_by_category(category),
    )))
}

#[utoipa::path(
    get,
    path = "/systems/{system}/images",
    params(("system" = String, Path, description = "Body system, case-insensitive")),
    responses(
        (status = 200, description = "Images for the body system", body = ListImagesRes)
    )
)]
#[axum::debug_handler]
pub async fn images_by_system(
    State(state): State<AppState>,
    AxumPath(system): AxumPath<String>,
) -> Json<ListImagesRes> {
    Json(ListImagesRes::from_images(
        state.resolver.images_by_system(&system),
    ))
}

#[utoipa::path(
    get,
    path = "/levels/{level}/images",
    params(("level" = String, Path, description = "Audience level")),
    responses(
        (status = 200, description = "Images for the audience level", body = ListImagesRes),
        (status = 400, description = "Unknown level")
    )
)]
#[axum::debug_handler]
pub async fn images_by_level(
    State(state): State<AppState>,
    AxumPath(level): AxumPath<String>,
) -> Result<Json<ListImagesRes>, ApiError> {
    let level: AudienceLevel = level.parse().map_err(bad_request)?;
    Ok(Json(ListImagesRes::from_images(
        state.resolver.images_by_level(level),
    )))
}

#[utoipa::path(
    get,
    path = "/tags/{tag}/images",
    params(("tag" = String, Path, description = "Tag, case-insensitive")),
    responses(
        (status = 200, description = "Images carrying the tag", body = ListImagesRes)
    )
)]
#[axum::debug_handler]
pub async fn images_by_tag(
    State(state): State<AppState>,
    AxumPath(tag): AxumPath<String>,
) -> Json<ListImagesRes> {
    Json(ListImagesRes::from_images(state.resolver.images_by_tag(&tag)))
}

#[utoipa::path(
    get,
    path = "/licenses/{license}/images",
    params(("license" = String, Path, description = "Attribution license, case-insensitive")),
    responses(
        (status = 200, description = "Images published under the license", body = ListImagesRes)
    )
)]
#[axum::debug_handler]
pub async fn images_by_license(
    State(state): State<AppState>,
    AxumPath(license): AxumPath<String>,
) -> Json<ListImagesRes> {
    Json(ListImagesRes::from_images(
        state.resolver.images_by_license(&license),
    ))
}
