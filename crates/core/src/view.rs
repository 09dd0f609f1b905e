//! Display view model.
//!
//! [`EncyclopediaImage`] is the shape handed to the encyclopedia display layer. It renames a few
//! catalog fields and carries an `is_featured` flag that the caller decides, not the record.

use medimage_types::{Attribution, AudienceLevel, ImageCategory, ImageFormat, MedicalImage};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncyclopediaImage {
    pub image_id: String,
    pub title: String,
    pub path: String,
    /// The catalog category.
    pub image_type: ImageCategory,
    /// The catalog description.
    pub alt_text: String,
    pub format: ImageFormat,
    pub level: AudienceLevel,
    pub attribution: Attribution,
    pub is_featured: bool,
}

/// Map a catalog record to its view model.
pub fn to_view_model(image: &MedicalImage, is_featured: bool) -> EncyclopediaImage {
    EncyclopediaImage {
        image_id: image.id.to_string(),
        title: image.title.to_string(),
        path: image.path.to_string(),
        image_type: image.category,
        alt_text: image.description.clone(),
        format: image.format,
        level: image.level,
        attribution: image.attribution.clone(),
        is_featured,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::image;

    #[test]
    fn renames_fields_and_preserves_values() {
        let source = image("heart-anatomy-anterior", ImageCategory::Anatomical);

        let view = to_view_model(&source, true);
        assert!(view.is_featured);
        assert_eq!(view.image_id, "heart-anatomy-anterior");
        assert_eq!(view.image_type, ImageCategory::Anatomical);
        assert_eq!(view.alt_text, source.description);
        assert_eq!(view.title, source.title.as_str());
        assert_eq!(view.path, source.path.as_str());
        assert_eq!(view.attribution, source.attribution);

        assert!(!to_view_model(&source, false).is_featured);
    }

    #[test]
    fn featured_flag_comes_from_caller_not_record() {
        let mut source = image("curated", ImageCategory::Pathology);
        source.featured = true;
        assert!(!to_view_model(&source, false).is_featured);
    }
}
