//! The image catalog.
//!
//! A [`Catalog`] is built once at process start from a manifest and is read-only afterwards.
//! Clones share the same backing slice, so the catalog can be handed to any number of readers
//! (request handlers, CLI commands) without locking.

use crate::config::CoreConfig;
use crate::constants::BUILTIN_MANIFEST_YAML;
use crate::{CatalogError, CatalogResult};
use manifest::{Manifest, ManifestFormat};
use medimage_types::MedicalImage;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// Immutable, shared collection of every image record.
#[derive(Clone, Debug)]
pub struct Catalog {
    images: Arc<[MedicalImage]>,
}

impl Catalog {
    /// Build a catalog from already-translated records.
    ///
    /// Body systems are trimmed, lower-cased and de-duplicated.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two records share an id, or
    /// `CatalogError::InvalidInput` if a record lists a blank body system.
    pub fn from_images(mut images: Vec<MedicalImage>) -> CatalogResult<Self> {
        for image in &mut images {
            normalise_systems(image)?;
        }

        let mut seen = HashSet::with_capacity(images.len());
        for image in &images {
            if !seen.insert(image.id.as_str()) {
                return Err(CatalogError::DuplicateId(image.id.to_string()));
            }
        }

        Ok(Self {
            images: images.into(),
        })
    }

    /// A catalog with no images. Valid, if not very useful.
    pub fn empty() -> Self {
        Self {
            images: Arc::from(Vec::new()),
        }
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> CatalogResult<Self> {
        let catalog = Self::from_manifest_str(BUILTIN_MANIFEST_YAML, ManifestFormat::Yaml)?;
        tracing::info!("loaded builtin image catalog ({} images)", catalog.len());
        Ok(catalog)
    }

    /// Parse manifest text and build a catalog from it.
    pub fn from_manifest_str(text: &str, format: ManifestFormat) -> CatalogResult<Self> {
        let images = Manifest::parse(text, format)?;
        Self::from_images(images)
    }

    /// Load a catalog from a `.yaml`, `.yml` or `.json` manifest file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the extension is not supported, the file cannot be read,
    /// the manifest does not match the schema, or ids are duplicated.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let format = ManifestFormat::from_path(path)
            .ok_or_else(|| CatalogError::UnsupportedManifestFormat(path.to_path_buf()))?;

        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::from_manifest_str(&text, format)?;
        tracing::info!(
            "loaded image catalog from {} ({} images)",
            path.display(),
            catalog.len()
        );
        Ok(catalog)
    }

    /// Load the catalog selected by `cfg`: the configured manifest file, or the builtin one.
    pub fn from_config(cfg: &CoreConfig) -> CatalogResult<Self> {
        match cfg.manifest_path() {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    /// Every image, in manifest order.
    pub fn images(&self) -> &[MedicalImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

fn normalise_systems(image: &mut MedicalImage) -> CatalogResult<()> {
    let mut systems: Vec<String> = Vec::with_capacity(image.systems.len());
    for system in &image.systems {
        let system = system.trim().to_lowercase();
        if system.is_empty() {
            return Err(CatalogError::InvalidInput(format!(
                "image {} lists a blank body system",
                image.id
            )));
        }
        if !systems.contains(&system) {
            systems.push(system);
        }
    }
    image.systems = systems;
    Ok(())
}
