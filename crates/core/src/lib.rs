//! # Medimage Core
//!
//! Core logic for the medical image catalog.
//!
//! This crate contains pure, in-memory data operations:
//! - The [`Catalog`]: every image record, loaded once from a manifest and immutable afterwards
//! - The [`ImageResolver`]: read-only lookup, filter and search queries over the catalog
//! - View models for the encyclopedia display layer and catalog statistics
//!
//! **No API concerns**: HTTP servers and CLI presentation belong in `api-rest`, `api-shared` and
//! `medimage-cli`. Manifest file formats belong in the `manifest` crate.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod resolver;
pub mod statistics;
pub mod view;

#[cfg(test)]
mod test_support;

pub use catalog::Catalog;
pub use config::CoreConfig;
pub use constants::{DEFAULT_RELATED_LIMIT, MANIFEST_PATH_ENV, RELATED_LIMIT_ENV};
pub use error::{CatalogError, CatalogResult};
pub use resolver::{ImageFilter, ImageResolver};
pub use statistics::ImageStatistics;
pub use view::{to_view_model, EncyclopediaImage};

pub use medimage_types::{
    Attribution, AudienceLevel, ImageCategory, ImageFormat, MedicalImage, NonEmptyText,
    ParseEnumError,
};
