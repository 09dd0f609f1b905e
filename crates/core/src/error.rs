#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to read manifest file {path}: {source}", path = path.display())]
    ManifestRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported manifest file type (expected .yaml, .yml or .json): {0}")]
    UnsupportedManifestFormat(std::path::PathBuf),
    #[error("manifest error: {0}")]
    Manifest(#[from] manifest::ManifestError),
    #[error("duplicate image id in catalog: {0}")]
    DuplicateId(String),
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
