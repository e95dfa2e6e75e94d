//! Metadata about the image being annotated.

use serde::{Deserialize, Serialize};

/// Descriptive data about the annotated image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadata {
    /// Backend identifier of the image
    pub id: u64,
    /// URL the image is served from
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub organisms: Vec<String>,
    #[serde(default)]
    pub uploaded_by: String,
    #[serde(default)]
    pub upload_date: String,
    /// Gene symbol used for genome browser links
    #[serde(default)]
    pub gene_symbol: String,
}

impl ImageMetadata {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// File name component of the image URL.
    pub fn file_name(&self) -> &str {
        self.url.rsplit('/').next().unwrap_or_default()
    }
}
