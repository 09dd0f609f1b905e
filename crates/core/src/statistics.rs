use medimage_types::MedicalImage;
use std::collections::BTreeMap;

/// Image counts over the whole catalog.
///
/// `by_system` counts one per (image, system) pair, so its values can sum past `total`.
/// `by_license` is keyed by the license text as written in the manifest.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageStatistics {
    pub total: usize,
    pub by_category: BTreeMap<String, usize>,
    pub by_system: BTreeMap<String, usize>,
    pub by_license: BTreeMap<String, usize>,
}

/// Tally images in a single pass.
pub fn tally(images: &[MedicalImage]) -> ImageStatistics {
    let mut stats = ImageStatistics {
        total: images.len(),
        ..ImageStatistics::default()
    };

    for image in images {
        *stats
            .by_category
            .entry(image.category.as_str().to_owned())
            .or_insert(0) += 1;

        *stats
            .by_license
            .entry(image.attribution.license.clone())
            .or_insert(0) += 1;

        for system in &image.systems {
            *stats.by_system.entry(system.clone()).or_insert(0) += 1;
        }
    }

    stats
}
