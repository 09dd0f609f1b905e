use crate::dto::HealthRes;
use medimage_core::Catalog;

/// Simple health service shared by the API binaries.
///
/// Reports the service as alive together with the size of the loaded catalog.
#[derive(Clone, Debug)]
pub struct HealthService {
    catalog: Catalog,
}

impl HealthService {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Check health.
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy and how many images it serves.
    pub fn check_health(&self) -> HealthRes {
        HealthRes {
            ok: true,
            message: "medimage is alive".into(),
            image_count: self.catalog.len(),
        }
    }
}
