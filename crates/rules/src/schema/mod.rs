//! YAML document types for rule files.

mod metadata;

pub use metadata::CommonMetadata;

/// Only supported `apiVersion`.
pub const API_VERSION: &str = "v1";
