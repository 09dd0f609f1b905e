//! # Medimage Types
//!
//! Domain-level types shared by the catalog, the manifest boundary crate and the API crates.
//!
//! These types carry no knowledge of on-disk formats. Enumerations derive serde so the manifest
//! wire structs can use them directly; the record types themselves are plain data.

mod image;
mod text;

pub use image::{AudienceLevel, Attribution, ImageCategory, ImageFormat, MedicalImage};
pub use text::{NonEmptyText, TextError};

/// Error returned when parsing one of the enumerations from a string fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }

    /// The rejected input.
    pub fn value(&self) -> &str {
        &self.value
    }
}
