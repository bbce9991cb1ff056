//! API endpoint modules organized by resource.
//!
//! Each module adds typed `ApiClient` methods for one group of endpoints.

pub mod apps;
pub mod crash_groups;
pub mod crashes;
pub mod versions;

use reqwest::multipart::Part;

use hockey_core::error::{HockeyError, HockeyResult};
use hockey_models::Artifact;

/// Build a multipart file part from an artifact.
pub(crate) fn artifact_part(artifact: &Artifact) -> HockeyResult<Part> {
    Part::bytes(artifact.bytes.clone())
        .file_name(artifact.file_name.clone())
        .mime_str("application/octet-stream")
        .map_err(|e| HockeyError::Http(format!("invalid mime type: {e}")))
}
