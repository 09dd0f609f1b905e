//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the catalog and
//! resolver. Nothing in this crate reads environment variables during request handling; the
//! binaries read them and hand the raw values to the helpers below.

use crate::constants::{DEFAULT_RELATED_LIMIT, MANIFEST_PATH_ENV, MAX_RELATED_LIMIT};
use crate::{CatalogError, CatalogResult};
use manifest::ManifestFormat;
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    manifest_path: Option<PathBuf>,
    related_limit: usize,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// `manifest_path` of `None` selects the builtin catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidInput` if `related_limit` is zero or above
    /// [`MAX_RELATED_LIMIT`].
    pub fn new(manifest_path: Option<PathBuf>, related_limit: usize) -> CatalogResult<Self> {
        validate_related_limit(related_limit)?;

        Ok(Self {
            manifest_path,
            related_limit,
        })
    }

    pub fn manifest_path(&self) -> Option<&Path> {
        self.manifest_path.as_deref()
    }

    pub fn related_limit(&self) -> usize {
        self.related_limit
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            manifest_path: None,
            related_limit: DEFAULT_RELATED_LIMIT,
        }
    }
}

/// Validate an optional manifest path override without reading environment variables.
///
/// Blank values are treated as absent. A provided path must be an existing file with a
/// `.yaml`, `.yml` or `.json` extension.
pub fn resolve_manifest_path(value: Option<String>) -> CatalogResult<Option<PathBuf>> {
    let Some(value) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    let path = PathBuf::from(value);
    if ManifestFormat::from_path(&path).is_none() {
        return Err(CatalogError::UnsupportedManifestFormat(path));
    }
    if !path.is_file() {
        return Err(CatalogError::InvalidInput(format!(
            "{MANIFEST_PATH_ENV} does not point to a file: {}",
            path.display()
        )));
    }

    Ok(Some(path))
}

/// Parse the related-image limit from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_RELATED_LIMIT`].
pub fn related_limit_from_env_value(value: Option<String>) -> CatalogResult<usize> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let limit = match value {
        Some(v) => v.parse::<usize>().map_err(|_| {
            CatalogError::InvalidInput(format!("related limit must be a positive integer: {v}"))
        })?,
        None => DEFAULT_RELATED_LIMIT,
    };

    validate_related_limit(limit)?;
    Ok(limit)
}

/// Check that a related-image limit is within `1..=MAX_RELATED_LIMIT`.
pub fn validate_related_limit(limit: usize) -> CatalogResult<()> {
    if limit == 0 || limit > MAX_RELATED_LIMIT {
        return Err(CatalogError::InvalidInput(format!(
            "related limit must be between 1 and {MAX_RELATED_LIMIT}, got {limit}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn related_limit_defaults_when_absent_or_blank() {
        assert_eq!(
            related_limit_from_env_value(None).expect("default"),
            DEFAULT_RELATED_LIMIT
        );
        assert_eq!(
            related_limit_from_env_value(Some("  ".into())).expect("default"),
            DEFAULT_RELATED_LIMIT
        );
    }

    #[test]
    fn related_limit_parses_and_bounds_values() {
        assert_eq!(related_limit_from_env_value(Some(" 12 ".into())).expect("parse"), 12);

        let err = related_limit_from_env_value(Some("0".into())).expect_err("zero rejected");
        assert!(matches!(err, CatalogError::InvalidInput(msg) if msg.contains("between 1 and")));

        let err = related_limit_from_env_value(Some("many".into())).expect_err("text rejected");
        assert!(matches!(err, CatalogError::InvalidInput(msg) if msg.contains("positive integer")));

        assert!(related_limit_from_env_value(Some("101".into())).is_err());
    }

    #[test]
    fn validate_related_limit_accepts_bounds() {
        assert!(validate_related_limit(1).is_ok());
        assert!(validate_related_limit(MAX_RELATED_LIMIT).is_ok());
        assert!(validate_related_limit(0).is_err());
        assert!(validate_related_limit(MAX_RELATED_LIMIT + 1).is_err());
    }

    #[test]
    fn manifest_path_absent_selects_builtin() {
        assert!(resolve_manifest_path(None).expect("none").is_none());
        assert!(resolve_manifest_path(Some("   ".into())).expect("blank").is_none());
    }

    #[test]
    fn manifest_path_must_exist_with_supported_extension() {
        let dir = tempfile::tempdir().expect("tempdir");

        let toml = dir.path().join("catalog.toml");
        std::fs::write(&toml, "").expect("write");
        let err = resolve_manifest_path(Some(toml.display().to_string())).expect_err("toml");
        assert!(matches!(err, CatalogError::UnsupportedManifestFormat(_)));

        let missing = dir.path().join("missing.yaml");
        let err =
            resolve_manifest_path(Some(missing.display().to_string())).expect_err("missing file");
        assert!(matches!(err, CatalogError::InvalidInput(msg) if msg.contains("does not point")));

        let yaml = dir.path().join("catalog.yaml");
        std::fs::write(&yaml, "images: []\n").expect("write");
        let resolved = resolve_manifest_path(Some(yaml.display().to_string())).expect("valid");
        assert_eq!(resolved.as_deref(), Some(yaml.as_path()));
    }

    #[test]
    fn core_config_rejects_zero_limit() {
        assert!(CoreConfig::new(None, 0).is_err());
        let cfg = CoreConfig::new(None, 3).expect("valid config");
        assert_eq!(cfg.related_limit(), 3);
        assert!(cfg.manifest_path().is_none());
    }
}
