//! Error types for tag board operations.

use thiserror::Error;

use crate::model::GroupId;
use crate::service::ServiceError;

/// Errors that can occur while building, editing, or exporting a tag board.
#[derive(Error, Debug)]
pub enum BoardError {
    /// The referenced tag group is not known to the board
    #[error("Tag group not found: {id}")]
    UnknownGroup {
        /// The missing group ID
        id: GroupId,
    },

    /// A tag's point list is neither a 2-point diagonal nor a polygon
    #[error("Invalid tag geometry: expected 2 or at least 3 points, got {count}")]
    InvalidPoints {
        /// Number of points supplied
        count: usize,
    },

    /// The persistence service rejected a request
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// XML serialization error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The source image could not be inspected
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl BoardError {
    /// Create an invalid points error for a point list of the given length.
    pub fn invalid_points(count: usize) -> Self {
        Self::InvalidPoints { count }
    }
}
