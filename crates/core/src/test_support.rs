//! Record builders shared by unit tests.

use medimage_types::{
    Attribution, AudienceLevel, ImageCategory, ImageFormat, MedicalImage, NonEmptyText,
};

pub(crate) fn image(id: &str, category: ImageCategory) -> MedicalImage {
    MedicalImage {
        id: NonEmptyText::new(id).expect("test id"),
        title: NonEmptyText::new(format!("Title {id}")).expect("test title"),
        description: format!("Description of {id}"),
        path: NonEmptyText::new(format!("images/{category}/{id}.png")).expect("test path"),
        format: ImageFormat::Png,
        category,
        systems: Vec::new(),
        level: AudienceLevel::Patient,
        tags: Vec::new(),
        attribution: Attribution {
            source: "Test Source".into(),
            author: None,
            license: "Public Domain".into(),
            url: None,
            year: None,
        },
        related_entry_ids: Vec::new(),
        featured: false,
    }
}

pub(crate) fn with_systems(mut image: MedicalImage, systems: &[&str]) -> MedicalImage {
    image.systems = systems.iter().map(|s| s.to_string()).collect();
    image
}

pub(crate) fn with_tags(mut image: MedicalImage, tags: &[&str]) -> MedicalImage {
    image.tags = tags.iter().map(|s| s.to_string()).collect();
    image
}

pub(crate) fn with_entries(mut image: MedicalImage, entries: &[&str]) -> MedicalImage {
    image.related_entry_ids = entries.iter().map(|s| s.to_string()).collect();
    image
}

pub(crate) fn with_level(mut image: MedicalImage, level: AudienceLevel) -> MedicalImage {
    image.level = level;
    image
}
