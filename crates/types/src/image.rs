use crate::{NonEmptyText, ParseEnumError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// File format of the referenced image asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Svg,
    Png,
    Jpg,
    Webp,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 4] = [Self::Svg, Self::Png, Self::Jpg, Self::Webp];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Webp => "webp",
        }
    }
}

/// Kind of image, used for grouping in the gallery and in statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageCategory {
    Anatomical,
    Imaging,
    Histology,
    Pathology,
    Clinical,
    CrossSection,
    Chart,
    Diagram,
}

impl ImageCategory {
    pub const ALL: [ImageCategory; 8] = [
        Self::Anatomical,
        Self::Imaging,
        Self::Histology,
        Self::Pathology,
        Self::Clinical,
        Self::CrossSection,
        Self::Chart,
        Self::Diagram,
    ];

    /// Categories shown in the gallery preview, in display order.
    pub const GALLERY: [ImageCategory; 5] = [
        Self::Anatomical,
        Self::Histology,
        Self::Imaging,
        Self::Pathology,
        Self::Clinical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Anatomical => "anatomical",
            Self::Imaging => "imaging",
            Self::Histology => "histology",
            Self::Pathology => "pathology",
            Self::Clinical => "clinical",
            Self::CrossSection => "cross-section",
            Self::Chart => "chart",
            Self::Diagram => "diagram",
        }
    }
}

/// Audience complexity tier, mirroring the three reading levels of the educational content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudienceLevel {
    Patient,
    Intermediate,
    Professional,
}

impl AudienceLevel {
    pub const ALL: [AudienceLevel; 3] = [Self::Patient, Self::Intermediate, Self::Professional];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Intermediate => "intermediate",
            Self::Professional => "professional",
        }
    }
}

fn parse_from<T: Copy>(
    kind: &'static str,
    all: &[T],
    name: impl Fn(T) -> &'static str,
    s: &str,
) -> Result<T, ParseEnumError> {
    let wanted = s.trim().to_ascii_lowercase();
    all.iter()
        .copied()
        .find(|v| name(*v) == wanted)
        .ok_or_else(|| ParseEnumError::new(kind, s))
}

impl FromStr for ImageFormat {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_from("image format", &Self::ALL, Self::as_str, s)
    }
}

impl FromStr for ImageCategory {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_from("image category", &Self::ALL, Self::as_str, s)
    }
}

impl FromStr for AudienceLevel {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_from("audience level", &Self::ALL, Self::as_str, s)
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ImageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for AudienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provenance of an image. Never validated; passed through unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attribution {
    pub source: String,
    pub author: Option<String>,
    pub license: String,
    pub url: Option<String>,
    pub year: Option<u16>,
}

/// A single catalog record describing one medical image.
///
/// `systems` are held lower-cased; the manifest boundary normalises them on load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MedicalImage {
    /// Unique key within the catalog.
    pub id: NonEmptyText,
    pub title: NonEmptyText,
    pub description: String,
    /// Logical asset reference. Resolving this to bytes is the display layer's job.
    pub path: NonEmptyText,
    pub format: ImageFormat,
    pub category: ImageCategory,
    pub systems: Vec<String>,
    pub level: AudienceLevel,
    pub tags: Vec<String>,
    pub attribution: Attribution,
    /// Soft references into the content corpus. May dangle.
    pub related_entry_ids: Vec<String>,
    /// Explicitly curated as the lead image for its entries.
    pub featured: bool,
}
