//! Read-only queries over the image catalog.
//!
//! Every query is a linear scan in catalog order and is total: nothing here fails. A missing id
//! or a filter that matches nothing yields `None` or an empty `Vec`.
//!
//! Case handling:
//! - body systems are stored lower-cased and queries are lower-cased before comparison
//! - search, tag and license lookups compare lower-cased text on both sides
//! - ids, entry ids and enum filters are exact

use crate::catalog::Catalog;
use crate::constants::DEFAULT_RELATED_LIMIT;
use crate::statistics::{self, ImageStatistics};
use crate::view::{to_view_model, EncyclopediaImage};
use medimage_types::{AudienceLevel, ImageCategory, MedicalImage};
use std::collections::BTreeSet;

/// Combined filter. Every criterion that is set must match; an empty filter matches all images.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImageFilter {
    pub category: Option<ImageCategory>,
    pub system: Option<String>,
    pub level: Option<AudienceLevel>,
    pub entry_id: Option<String>,
    pub license: Option<String>,
    pub query: Option<String>,
}

/// Query service over a [`Catalog`].
#[derive(Clone, Debug)]
pub struct ImageResolver {
    catalog: Catalog,
    related_limit: usize,
}

impl ImageResolver {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_related_limit(catalog, DEFAULT_RELATED_LIMIT)
    }

    /// Create a resolver whose [`ImageResolver::related_images`] default limit is `related_limit`.
    pub fn with_related_limit(catalog: Catalog, related_limit: usize) -> Self {
        Self {
            catalog,
            related_limit,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn related_limit(&self) -> usize {
        self.related_limit
    }

    /// Every image in the catalog.
    pub fn all_images(&self) -> &[MedicalImage] {
        self.catalog.images()
    }

    /// Images whose related entries include `entry_id`, in catalog order.
    pub fn images_for_entry(&self, entry_id: &str) -> Vec<&MedicalImage> {
        self.select(|image| is_related_to(image, entry_id))
    }

    pub fn images_by_category(&self, category: ImageCategory) -> Vec<&MedicalImage> {
        self.select(|image| image.category == category)
    }

    /// Images tagged with body `system`, compared case-insensitively.
    pub fn images_by_system(&self, system: &str) -> Vec<&MedicalImage> {
        let system = system.trim().to_lowercase();
        self.select(|image| has_system(image, &system))
    }

    pub fn images_by_level(&self, level: AudienceLevel) -> Vec<&MedicalImage> {
        self.select(|image| image.level == level)
    }

    /// Images carrying `tag`, compared case-insensitively on the whole tag.
    pub fn images_by_tag(&self, tag: &str) -> Vec<&MedicalImage> {
        let tag = tag.trim().to_lowercase();
        self.select(|image| image.tags.iter().any(|t| t.to_lowercase() == tag))
    }

    /// Images whose attribution license equals `license`, ignoring case and surrounding space.
    pub fn images_by_license(&self, license: &str) -> Vec<&MedicalImage> {
        let license = license.trim().to_lowercase();
        self.select(|image| has_license(image, &license))
    }

    /// Case-insensitive substring search over title, description, tags and systems.
    ///
    /// No ranking or tokenisation. An empty query matches every image.
    pub fn search_images(&self, query: &str) -> Vec<&MedicalImage> {
        let query = query.to_lowercase();
        self.select(|image| matches_query(image, &query))
    }

    pub fn get_image_by_id(&self, id: &str) -> Option<&MedicalImage> {
        self.all_images().iter().find(|image| image.id == *id)
    }

    /// Same criterion as [`ImageResolver::images_for_entry`].
    pub fn entry_has_images(&self, entry_id: &str) -> bool {
        self.all_images()
            .iter()
            .any(|image| is_related_to(image, entry_id))
    }

    /// Every entry id referenced by at least one image, de-duplicated and sorted.
    pub fn entries_with_images(&self) -> BTreeSet<String> {
        self.all_images()
            .iter()
            .flat_map(|image| image.related_entry_ids.iter().cloned())
            .collect()
    }

    /// Images not attached to any content entry.
    pub fn unmapped_images(&self) -> Vec<&MedicalImage> {
        self.select(|image| image.related_entry_ids.is_empty())
    }

    /// The ids from `entry_ids` that no image references, in the order given.
    pub fn entries_without_images<S: AsRef<str>>(&self, entry_ids: &[S]) -> Vec<String> {
        let mapped = self.entries_with_images();
        entry_ids
            .iter()
            .map(AsRef::as_ref)
            .filter(|entry_id| !mapped.contains(*entry_id))
            .map(str::to_owned)
            .collect()
    }

    /// First image of each gallery category, in [`ImageCategory::GALLERY`] order.
    ///
    /// Categories without images are skipped.
    pub fn featured_images(&self) -> Vec<&MedicalImage> {
        ImageCategory::GALLERY
            .iter()
            .filter_map(|category| {
                self.all_images()
                    .iter()
                    .find(|image| image.category == *category)
            })
            .collect()
    }

    /// View models for an entry's images.
    ///
    /// The first image curated as `featured` leads; when none is curated the first image in
    /// catalog order is marked featured instead. Exactly one view is featured unless the entry
    /// has no images.
    pub fn entry_image_views(&self, entry_id: &str) -> Vec<EncyclopediaImage> {
        let images = self.images_for_entry(entry_id);
        let featured_index = images
            .iter()
            .position(|image| image.featured)
            .unwrap_or(0);

        images
            .iter()
            .enumerate()
            .map(|(index, image)| to_view_model(image, index == featured_index))
            .collect()
    }

    /// Images sharing a category, a body system or a related entry with `image_id`.
    ///
    /// The image itself is excluded. Results keep catalog order and are truncated to `limit`,
    /// or to the resolver's default limit when `limit` is `None`. Unknown ids yield nothing.
    pub fn related_images(&self, image_id: &str, limit: Option<usize>) -> Vec<&MedicalImage> {
        let Some(source) = self.get_image_by_id(image_id) else {
            return Vec::new();
        };
        let limit = limit.unwrap_or(self.related_limit);

        self.all_images()
            .iter()
            .filter(|image| image.id != source.id)
            .filter(|image| {
                image.category == source.category
                    || image.systems.iter().any(|s| source.systems.contains(s))
                    || image
                        .related_entry_ids
                        .iter()
                        .any(|e| source.related_entry_ids.contains(e))
            })
            .take(limit)
            .collect()
    }

    /// Apply a combined [`ImageFilter`].
    pub fn filter_images(&self, filter: &ImageFilter) -> Vec<&MedicalImage> {
        let system = filter.system.as_deref().map(|s| s.trim().to_lowercase());
        let license = filter.license.as_deref().map(|l| l.trim().to_lowercase());
        let query = filter.query.as_deref().map(str::to_lowercase);

        self.select(|image| {
            filter.category.map_or(true, |c| image.category == c)
                && filter.level.map_or(true, |l| image.level == l)
                && system.as_deref().map_or(true, |s| has_system(image, s))
                && filter
                    .entry_id
                    .as_deref()
                    .map_or(true, |e| is_related_to(image, e))
                && license.as_deref().map_or(true, |l| has_license(image, l))
                && query.as_deref().map_or(true, |q| matches_query(image, q))
        })
    }

    pub fn image_statistics(&self) -> ImageStatistics {
        statistics::tally(self.all_images())
    }

    fn select(&self, predicate: impl Fn(&MedicalImage) -> bool) -> Vec<&MedicalImage> {
        self.all_images()
            .iter()
            .filter(|image| predicate(*image))
            .collect()
    }
}

fn is_related_to(image: &MedicalImage, entry_id: &str) -> bool {
    image.related_entry_ids.iter().any(|e| e == entry_id)
}

/// `system` must already be lower-cased; catalog systems always are.
fn has_system(image: &MedicalImage, system: &str) -> bool {
    image.systems.iter().any(|s| s == system)
}

/// `license` must already be lower-cased.
fn has_license(image: &MedicalImage, license: &str) -> bool {
    image.attribution.license.trim().to_lowercase() == license
}

/// `query` must already be lower-cased.
fn matches_query(image: &MedicalImage, query: &str) -> bool {
    image.title.as_str().to_lowercase().contains(query)
        || image.description.to_lowercase().contains(query)
        || image.tags.iter().any(|t| t.to_lowercase().contains(query))
        || image.systems.iter().any(|s| s.to_lowercase().contains(query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{image, with_entries, with_level, with_systems, with_tags};

    fn fixture() -> ImageResolver {
        let images = vec![
            with_tags(
                with_systems(
                    with_entries(
                        image("heart-anatomy-anterior", ImageCategory::Anatomical),
                        &["heart-anatomy", "cardiovascular-system"],
                    ),
                    &["cardiovascular"],
                ),
                &["heart", "anatomy"],
            ),
            with_level(
                with_tags(
                    with_systems(
                        with_entries(
                            image("ecg-normal-sinus", ImageCategory::Clinical),
                            &["heart-anatomy", "arrhythmia"],
                        ),
                        &["cardiovascular"],
                    ),
                    &["ECG", "EKG", "normal"],
                ),
                AudienceLevel::Intermediate,
            ),
            with_level(
                with_systems(
                    with_entries(
                        image("lung-alveoli-histology", ImageCategory::Histology),
                        &["lung-anatomy"],
                    ),
                    &["respiratory"],
                ),
                AudienceLevel::Professional,
            ),
            with_systems(
                with_entries(
                    image("myocardial-infarct", ImageCategory::Pathology),
                    &["myocardial-infarction", "ghost-entry"],
                ),
                &["cardiovascular"],
            ),
            with_systems(
                image("brain-ct-axial", ImageCategory::Imaging),
                &["nervous"],
            ),
        ];
        ImageResolver::new(Catalog::from_images(images).expect("fixture catalog"))
    }

    fn ids(images: &[&MedicalImage]) -> Vec<String> {
        images.iter().map(|image| image.id.to_string()).collect()
    }

    #[test]
    fn images_for_entry_preserves_catalog_order() {
        let resolver = fixture();
        assert_eq!(
            ids(&resolver.images_for_entry("heart-anatomy")),
            vec!["heart-anatomy-anterior", "ecg-normal-sinus"]
        );
        assert!(resolver.images_for_entry("nonexistent-entry").is_empty());
        assert!(resolver.images_for_entry("").is_empty());
    }

    #[test]
    fn every_related_entry_finds_its_image() {
        let resolver = fixture();
        for image in resolver.all_images() {
            for entry_id in &image.related_entry_ids {
                assert!(resolver
                    .images_for_entry(entry_id)
                    .iter()
                    .any(|found| found.id == image.id));
            }
        }
    }

    #[test]
    fn entry_has_images_agrees_with_images_for_entry() {
        let resolver = fixture();
        for entry_id in [
            "heart-anatomy",
            "ghost-entry",
            "lung-anatomy",
            "unknown",
            "",
        ] {
            assert_eq!(
                resolver.entry_has_images(entry_id),
                !resolver.images_for_entry(entry_id).is_empty(),
                "{entry_id}"
            );
        }
    }

    #[test]
    fn entries_with_images_is_the_union_of_related_ids() {
        let resolver = fixture();
        let entries = resolver.entries_with_images();
        let expected: BTreeSet<String> = [
            "arrhythmia",
            "cardiovascular-system",
            "ghost-entry",
            "heart-anatomy",
            "lung-anatomy",
            "myocardial-infarction",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        assert_eq!(entries, expected);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let resolver = fixture();
        assert_eq!(
            ids(&resolver.search_images("ekg")),
            vec!["ecg-normal-sinus"]
        );
        assert_eq!(
            ids(&resolver.search_images("RESPIR")),
            vec!["lung-alveoli-histology"]
        );
        assert_eq!(
            ids(&resolver.search_images("title brain")),
            vec!["brain-ct-axial"]
        );
        assert!(resolver.search_images("no such words").is_empty());
        assert_eq!(resolver.search_images("").len(), resolver.all_images().len());
    }

    #[test]
    fn search_matches_exactly_the_images_with_a_matching_field() {
        let resolver = fixture();
        let contains = |text: &str, query: &str| text.to_lowercase().contains(&query.to_lowercase());
        for query in ["heart", "CARDIO", "of", "Normal", "infarct", "description of lung", "xyz"] {
            let found = resolver.search_images(query);
            for image in resolver.all_images() {
                let expected = contains(image.title.as_str(), query)
                    || contains(&image.description, query)
                    || image.tags.iter().any(|tag| contains(tag, query))
                    || image.systems.iter().any(|system| contains(system, query));
                assert_eq!(
                    found.iter().any(|f| f.id == image.id),
                    expected,
                    "{query} / {}",
                    image.id
                );
            }
        }
    }

    #[test]
    fn search_reaches_descriptions() {
        let resolver = fixture();
        assert_eq!(
            ids(&resolver.search_images("Description of lung")),
            vec!["lung-alveoli-histology"]
        );
    }

    #[test]
    fn category_filters_partition_the_catalog() {
        let resolver = fixture();
        let mut total = 0;
        for category in ImageCategory::GALLERY {
            let images = resolver.images_by_category(category);
            assert!(images.iter().all(|image| image.category == category));
            total += images.len();
        }
        assert_eq!(total, resolver.all_images().len());
        assert!(resolver.images_by_category(ImageCategory::Chart).is_empty());
    }

    #[test]
    fn system_filter_ignores_case() {
        let resolver = fixture();
        let lower = resolver.images_by_system("cardiovascular");
        let upper = resolver.images_by_system("Cardiovascular");
        assert_eq!(ids(&lower), ids(&upper));
        assert_eq!(
            ids(&lower),
            vec![
                "heart-anatomy-anterior",
                "ecg-normal-sinus",
                "myocardial-infarct"
            ]
        );
        assert!(resolver.images_by_system("cardio").is_empty());
    }

    #[test]
    fn level_filter_is_exact() {
        let resolver = fixture();
        assert_eq!(
            ids(&resolver.images_by_level(AudienceLevel::Professional)),
            vec!["lung-alveoli-histology"]
        );
        assert_eq!(resolver.images_by_level(AudienceLevel::Patient).len(), 3);
    }

    #[test]
    fn tag_lookup_matches_whole_tags_case_insensitively() {
        let resolver = fixture();
        assert_eq!(ids(&resolver.images_by_tag("ekg")), vec!["ecg-normal-sinus"]);
        assert!(resolver.images_by_tag("ek").is_empty());
    }

    #[test]
    fn license_lookup_ignores_case() {
        let mut licensed = image("licensed", ImageCategory::Histology);
        licensed.attribution.license = "CC BY-SA 4.0".into();
        let catalog = Catalog::from_images(vec![image("plain", ImageCategory::Imaging), licensed])
            .expect("catalog");
        let resolver = ImageResolver::new(catalog);

        assert_eq!(ids(&resolver.images_by_license(" cc by-sa 4.0")), vec!["licensed"]);
        assert_eq!(ids(&resolver.images_by_license("Public Domain")), vec!["plain"]);
        assert!(resolver.images_by_license("CC BY").is_empty());

        let filter = ImageFilter {
            category: Some(ImageCategory::Imaging),
            license: Some("cc by-sa 4.0".into()),
            ..ImageFilter::default()
        };
        assert!(resolver.filter_images(&filter).is_empty());

        let stats = resolver.image_statistics();
        assert_eq!(stats.by_license.get("CC BY-SA 4.0"), Some(&1));
        assert_eq!(stats.by_license.get("Public Domain"), Some(&1));
    }

    #[test]
    fn unmapped_images_have_no_entries() {
        let resolver = fixture();
        assert_eq!(ids(&resolver.unmapped_images()), vec!["brain-ct-axial"]);
        assert!(resolver
            .unmapped_images()
            .iter()
            .all(|image| image.related_entry_ids.is_empty()));
    }

    #[test]
    fn entries_without_images_keeps_input_order() {
        let resolver = fixture();
        let missing = resolver.entries_without_images(&[
            "stroke",
            "heart-anatomy",
            "ghost-entry",
            "asthma",
        ]);
        assert_eq!(missing, vec!["stroke".to_string(), "asthma".to_string()]);

        let none: [&str; 0] = [];
        assert!(resolver.entries_without_images(&none).is_empty());
        for entry_id in &missing {
            assert!(!resolver.entry_has_images(entry_id));
        }
    }

    #[test]
    fn get_image_by_id_returns_absent_for_unknown() {
        let resolver = fixture();
        let found = resolver
            .get_image_by_id("heart-anatomy-anterior")
            .expect("known id");
        assert_eq!(found.category, ImageCategory::Anatomical);
        assert!(resolver.get_image_by_id("does-not-exist").is_none());
    }

    #[test]
    fn featured_images_follow_gallery_order() {
        let resolver = fixture();
        assert_eq!(
            ids(&resolver.featured_images()),
            vec![
                "heart-anatomy-anterior",
                "lung-alveoli-histology",
                "brain-ct-axial",
                "myocardial-infarct",
                "ecg-normal-sinus"
            ]
        );
    }

    #[test]
    fn featured_images_skip_empty_categories() {
        let catalog = Catalog::from_images(vec![
            image("a", ImageCategory::Pathology),
            image("b", ImageCategory::Pathology),
            image("c", ImageCategory::Diagram),
        ])
        .expect("catalog");
        let resolver = ImageResolver::new(catalog);
        assert_eq!(ids(&resolver.featured_images()), vec!["a"]);
    }

    #[test]
    fn entry_views_feature_first_image_by_default() {
        let resolver = fixture();
        let views = resolver.entry_image_views("heart-anatomy");
        assert_eq!(views.len(), 2);
        assert!(views[0].is_featured);
        assert!(!views[1].is_featured);
        assert_eq!(views[0].image_id, "heart-anatomy-anterior");
        assert!(resolver.entry_image_views("unknown").is_empty());
    }

    #[test]
    fn entry_views_prefer_curated_featured_image() {
        let mut curated = with_entries(image("second", ImageCategory::Imaging), &["entry"]);
        curated.featured = true;
        let catalog = Catalog::from_images(vec![
            with_entries(image("first", ImageCategory::Anatomical), &["entry"]),
            curated,
        ])
        .expect("catalog");
        let resolver = ImageResolver::new(catalog);

        let views = resolver.entry_image_views("entry");
        let featured: Vec<&str> = views
            .iter()
            .filter(|v| v.is_featured)
            .map(|v| v.image_id.as_str())
            .collect();
        assert_eq!(featured, vec!["second"]);
    }

    #[test]
    fn related_images_exclude_source_and_respect_limit() {
        let resolver = fixture();
        let related = resolver.related_images("heart-anatomy-anterior", None);
        assert_eq!(
            ids(&related),
            vec!["ecg-normal-sinus", "myocardial-infarct"]
        );

        let limited = resolver.related_images("heart-anatomy-anterior", Some(1));
        assert_eq!(ids(&limited), vec!["ecg-normal-sinus"]);

        assert!(resolver.related_images("brain-ct-axial", None).is_empty());
        assert!(resolver.related_images("does-not-exist", None).is_empty());
    }

    #[test]
    fn resolver_default_related_limit_applies() {
        let images = (0..10)
            .map(|i| image(&format!("img-{i}"), ImageCategory::Chart))
            .collect();
        let resolver =
            ImageResolver::with_related_limit(Catalog::from_images(images).expect("catalog"), 3);
        assert_eq!(resolver.related_images("img-0", None).len(), 3);
        assert_eq!(resolver.related_images("img-0", Some(20)).len(), 9);
    }

    #[test]
    fn filter_combines_criteria_with_and() {
        let resolver = fixture();
        assert_eq!(
            resolver.filter_images(&ImageFilter::default()).len(),
            resolver.all_images().len()
        );

        let filter = ImageFilter {
            system: Some("CARDIOVASCULAR".into()),
            level: Some(AudienceLevel::Patient),
            ..ImageFilter::default()
        };
        assert_eq!(
            ids(&resolver.filter_images(&filter)),
            vec!["heart-anatomy-anterior", "myocardial-infarct"]
        );

        let filter = ImageFilter {
            entry_id: Some("heart-anatomy".into()),
            query: Some("ekg".into()),
            ..ImageFilter::default()
        };
        assert_eq!(ids(&resolver.filter_images(&filter)), vec!["ecg-normal-sinus"]);

        let filter = ImageFilter {
            category: Some(ImageCategory::Histology),
            system: Some("nervous".into()),
            ..ImageFilter::default()
        };
        assert!(resolver.filter_images(&filter).is_empty());
    }

    #[test]
    fn statistics_sum_to_total() {
        let resolver = fixture();
        let stats = resolver.image_statistics();
        assert_eq!(stats.total, 5);
        assert_eq!(stats.by_category.get("histology"), Some(&1));
        assert_eq!(stats.by_category.get("pathology"), Some(&1));
        assert_eq!(stats.by_category.values().sum::<usize>(), stats.total);
        assert_eq!(stats.by_system.get("cardiovascular"), Some(&3));
    }

    #[test]
    fn queries_are_idempotent() {
        let resolver = fixture();
        assert_eq!(
            resolver.search_images("heart"),
            resolver.search_images("heart")
        );
        assert_eq!(
            resolver.entry_image_views("heart-anatomy"),
            resolver.entry_image_views("heart-anatomy")
        );
        assert_eq!(resolver.image_statistics(), resolver.image_statistics());
        assert_eq!(resolver.featured_images(), resolver.featured_images());
    }
}
