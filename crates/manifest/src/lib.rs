//! Image manifest wire/boundary support.
//!
//! This crate translates between the on-disk image manifest (YAML or JSON) and the
//! domain-level [`MedicalImage`] records held by the catalog:
//! - strict wire models (`deny_unknown_fields`)
//! - serialisation/deserialisation with field-path error reporting
//! - translation between domain records and wire structs
//!
//! Catalog-level invariants such as id uniqueness are enforced by `medimage-core`, not here.

pub mod image_manifest;

use std::path::Path;

pub use image_manifest::Manifest;
pub use medimage_types::MedicalImage;

/// On-disk encodings a manifest may use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ManifestFormat {
    Yaml,
    Json,
}

impl ManifestFormat {
    /// Pick a format from a file extension (`.yaml`, `.yml` or `.json`, case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Errors returned by the `manifest` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("translation error: {0}")]
    Translation(String),
}

/// Type alias for Results that can fail with a [`ManifestError`].
pub type ManifestResult<T> = Result<T, ManifestError>;
