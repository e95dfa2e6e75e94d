//! Persistence service seam.
//!
//! The board never talks to the backend directly. Hosts implement
//! [`TagService`] on top of whatever transport they use.

use serde::Deserialize;
use thiserror::Error;

use crate::model::{RawTagGroup, SavedTag, Tag};

/// A failed backend request. The message is shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ServiceError {
    pub message: String,
}

#[derive(Deserialize)]
struct ErrorPayload {
    message: String,
}

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Extract the `message` field from an error response body.
    ///
    /// Bodies that are not a JSON object with a `message` are passed through whole.
    pub fn from_response_body(body: &str) -> Self {
        match serde_json::from_str::<ErrorPayload>(body) {
            Ok(payload) => Self::new(payload.message),
            Err(e) => {
                log::debug!("Error response is not a message payload: {}", e);
                Self::new(body.trim())
            }
        }
    }
}

/// Backend operations the board depends on.
pub trait TagService {
    /// Persist a new tag and return its assigned identity.
    fn save_tag(&mut self, tag: &Tag) -> Result<SavedTag, ServiceError>;

    /// Create an empty tag group on an image.
    fn create_group(&mut self, image_id: u64, name: &str) -> Result<RawTagGroup, ServiceError>;

    /// Fetch the current tag groups of an image.
    fn fetch_groups(&mut self, image_id: u64) -> Result<Vec<RawTagGroup>, ServiceError>;
}
