//! API response types.
//!
//! These mirror the domain types in `medimage-core` in the camelCase JSON shape expected by the
//! display layer, and carry OpenAPI schemas for the REST documentation.

use medimage_core::{Attribution, EncyclopediaImage, ImageStatistics, MedicalImage};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
    pub image_count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttributionRes {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub license: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
}

/// A catalog record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImageRes {
    pub id: String,
    pub title: String,
    pub description: String,
    pub path: String,
    pub format: String,
    pub category: String,
    pub systems: Vec<String>,
    pub level: String,
    pub tags: Vec<String>,
    pub attribution: AttributionRes,
    pub related_entry_ids: Vec<String>,
    pub featured: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListImagesRes {
    pub count: usize,
    pub images: Vec<ImageRes>,
}

/// Display view of an image attached to an encyclopedia entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EncyclopediaImageRes {
    pub image_id: String,
    pub title: String,
    pub path: String,
    #[serde(rename = "type")]
    pub image_type: String,
    pub alt_text: String,
    pub format: String,
    pub level: String,
    pub attribution: AttributionRes,
    pub is_featured: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryImagesRes {
    pub entry_id: String,
    pub images: Vec<EncyclopediaImageRes>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryHasImagesRes {
    pub entry_id: String,
    pub has_images: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntriesRes {
    pub entry_ids: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsRes {
    pub total: usize,
    pub by_category: BTreeMap<String, usize>,
    pub by_system: BTreeMap<String, usize>,
    pub by_license: BTreeMap<String, usize>,
}

impl From<&Attribution> for AttributionRes {
    fn from(attribution: &Attribution) -> Self {
        Self {
            source: attribution.source.clone(),
            author: attribution.author.clone(),
            license: attribution.license.clone(),
            url: attribution.url.clone(),
            year: attribution.year,
        }
    }
}

impl From<&MedicalImage> for ImageRes {
    fn from(image: &MedicalImage) -> Self {
        Self {
            id: image.id.to_string(),
            title: image.title.to_string(),
            description: image.description.clone(),
            path: image.path.to_string(),
            format: image.format.to_string(),
            category: image.category.to_string(),
            systems: image.systems.clone(),
            level: image.level.to_string(),
            tags: image.tags.clone(),
            attribution: AttributionRes::from(&image.attribution),
            related_entry_ids: image.related_entry_ids.clone(),
            featured: image.featured,
        }
    }
}

impl From<EncyclopediaImage> for EncyclopediaImageRes {
    fn from(view: EncyclopediaImage) -> Self {
        Self {
            image_id: view.image_id,
            title: view.title,
            path: view.path,
            image_type: view.image_type.to_string(),
            alt_text: view.alt_text,
            format: view.format.to_string(),
            level: view.level.to_string(),
            attribution: AttributionRes::from(&view.attribution),
            is_featured: view.is_featured,
        }
    }
}

impl From<ImageStatistics> for StatisticsRes {
    fn from(stats: ImageStatistics) -> Self {
        Self {
            total: stats.total,
            by_category: stats.by_category,
            by_system: stats.by_system,
            by_license: stats.by_license,
        }
    }
}

impl ListImagesRes {
    /// Build a listing from resolver output.
    pub fn from_images<'a>(images: impl IntoIterator<Item = &'a MedicalImage>) -> Self {
        let images: Vec<ImageRes> = images.into_iter().map(ImageRes::from).collect();
        Self {
            count: images.len(),
            images,
        }
    }
}
