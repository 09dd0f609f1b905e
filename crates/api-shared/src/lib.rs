//! # API Shared
//!
//! Shared definitions for the medimage APIs.
//!
//! Contains:
//! - Response types with OpenAPI schemas (`dto` module)
//! - Shared services like `HealthService`
//!
//! Used by `api-rest`.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
