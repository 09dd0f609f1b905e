//! Constants used throughout the medimage core crate.

/// Manifest compiled into the binary and used when no manifest path is configured.
pub const BUILTIN_MANIFEST_YAML: &str = include_str!("../data/catalog.yaml");

/// Default number of images returned by related-image lookups.
pub const DEFAULT_RELATED_LIMIT: usize = 6;

/// Upper bound accepted for the related-image limit.
pub const MAX_RELATED_LIMIT: usize = 100;

/// Environment variable naming an external manifest file.
pub const MANIFEST_PATH_ENV: &str = "MEDIMAGE_MANIFEST_PATH";

/// Environment variable overriding the default related-image limit.
pub const RELATED_LIMIT_ENV: &str = "MEDIMAGE_RELATED_LIMIT";
