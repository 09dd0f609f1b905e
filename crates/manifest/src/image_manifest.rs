//! Image manifest wire models and translation helpers.
//!
//! Responsibilities:
//! - Define a strict wire model for the manifest document
//! - Parse YAML and JSON manifests, reporting the path of the failing field
//! - Translate wire records into domain [`MedicalImage`] values and back
//!
//! Notes:
//! - Body systems are trimmed, lower-cased and de-duplicated on the way in
//! - Attribution is carried through without validation

use crate::{ManifestError, ManifestFormat, ManifestResult};
use medimage_types::{
    Attribution, AudienceLevel, ImageCategory, ImageFormat, MedicalImage, NonEmptyText,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// Public Manifest operations
// ============================================================================

/// Manifest operations.
///
/// This is a zero-sized type used for namespacing manifest-related operations.
/// All methods are associated functions.
pub struct Manifest;

impl Manifest {
    /// Parse manifest text in the given format.
    pub fn parse(text: &str, format: ManifestFormat) -> ManifestResult<Vec<MedicalImage>> {
        match format {
            ManifestFormat::Yaml => Self::parse_yaml(text),
            ManifestFormat::Json => Self::parse_json(text),
        }
    }

    /// Parse a manifest from YAML text.
    ///
    /// This uses `serde_path_to_error` to surface a best-effort "path" (e.g. `images[3].format`)
    /// to the failing field when the YAML does not match the wire schema.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] if:
    /// - the YAML does not represent a valid manifest,
    /// - any field has an unexpected type or enum value,
    /// - any unknown keys are present (due to `#[serde(deny_unknown_fields)]`),
    /// - a required string is empty, or a system or related entry id is blank.
    pub fn parse_yaml(yaml_text: &str) -> ManifestResult<Vec<MedicalImage>> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);
        let wire = serde_path_to_error::deserialize::<_, ManifestWire>(deserializer)
            .map_err(schema_mismatch)?;

        wire_to_domain(wire)
    }

    /// Parse a manifest from JSON text.
    ///
    /// Same rules as [`Manifest::parse_yaml`]; trailing content after the document is rejected.
    pub fn parse_json(json_text: &str) -> ManifestResult<Vec<MedicalImage>> {
        let mut deserializer = serde_json::Deserializer::from_str(json_text);
        let wire = serde_path_to_error::deserialize::<_, ManifestWire>(&mut deserializer)
            .map_err(schema_mismatch)?;
        deserializer.end()?;

        wire_to_domain(wire)
    }

    /// Render images as a YAML manifest.
    pub fn render_yaml(images: &[MedicalImage]) -> ManifestResult<String> {
        let wire = domain_to_wire(images);
        serde_yaml::to_string(&wire)
            .map_err(|e| ManifestError::Translation(format!("Failed to serialize manifest: {e}")))
    }

    /// Render images as a pretty-printed JSON manifest.
    pub fn render_json(images: &[MedicalImage]) -> ManifestResult<String> {
        let wire = domain_to_wire(images);
        serde_json::to_string_pretty(&wire)
            .map_err(|e| ManifestError::Translation(format!("Failed to serialize manifest: {e}")))
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct ManifestWire {
    images: Vec<ImageWire>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct ImageWire {
    id: NonEmptyText,
    title: NonEmptyText,
    #[serde(default)]
    description: String,
    path: NonEmptyText,
    format: ImageFormat,
    category: ImageCategory,
    #[serde(default)]
    systems: Vec<String>,
    level: AudienceLevel,
    #[serde(default)]
    tags: Vec<String>,
    attribution: AttributionWire,
    #[serde(default)]
    related_entry_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    featured: bool,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct AttributionWire {
    source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    author: Option<String>,
    license: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    year: Option<u16>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn schema_mismatch<E: std::fmt::Display>(err: serde_path_to_error::Error<E>) -> ManifestError {
    let path = err.path().to_string();
    let source = err.into_inner();
    let path = if path.is_empty() || path == "." {
        "<root>"
    } else {
        path.as_str()
    };
    ManifestError::Translation(format!("Manifest schema mismatch at {path}: {source}"))
}

fn wire_to_domain(wire: ManifestWire) -> ManifestResult<Vec<MedicalImage>> {
    wire.images
        .into_iter()
        .enumerate()
        .map(|(index, image)| image_to_domain(index, image))
        .collect()
}

fn image_to_domain(index: usize, wire: ImageWire) -> ManifestResult<MedicalImage> {
    let mut systems: Vec<String> = Vec::with_capacity(wire.systems.len());
    for system in &wire.systems {
        let normalised = system.trim().to_lowercase();
        if normalised.is_empty() {
            return Err(ManifestError::InvalidInput(format!(
                "images[{index}].systems contains a blank value (id: {})",
                wire.id
            )));
        }
        if !systems.contains(&normalised) {
            systems.push(normalised);
        }
    }

    let mut related_entry_ids: Vec<String> = Vec::with_capacity(wire.related_entry_ids.len());
    for entry_id in &wire.related_entry_ids {
        let entry_id = entry_id.trim();
        if entry_id.is_empty() {
            return Err(ManifestError::InvalidInput(format!(
                "images[{index}].related_entry_ids contains a blank value (id: {})",
                wire.id
            )));
        }
        related_entry_ids.push(entry_id.to_owned());
    }

    Ok(MedicalImage {
        id: wire.id,
        title: wire.title,
        description: wire.description,
        path: wire.path,
        format: wire.format,
        category: wire.category,
        systems,
        level: wire.level,
        tags: wire.tags,
        attribution: Attribution {
            source: wire.attribution.source,
            author: wire.attribution.author,
            license: wire.attribution.license,
            url: wire.attribution.url,
            year: wire.attribution.year,
        },
        related_entry_ids,
        featured: wire.featured,
    })
}

fn domain_to_wire(images: &[MedicalImage]) -> ManifestWire {
    ManifestWire {
        images: images
            .iter()
            .map(|image| ImageWire {
                id: image.id.clone(),
                title: image.title.clone(),
                description: image.description.clone(),
                path: image.path.clone(),
                format: image.format,
                category: image.category,
                systems: image.systems.clone(),
                level: image.level,
                tags: image.tags.clone(),
                attribution: AttributionWire {
                    source: image.attribution.source.clone(),
                    author: image.attribution.author.clone(),
                    license: image.attribution.license.clone(),
                    url: image.attribution.url.clone(),
                    year: image.attribution.year,
                },
                related_entry_ids: image.related_entry_ids.clone(),
                featured: image.featured,
            })
            .collect(),
    }
}
