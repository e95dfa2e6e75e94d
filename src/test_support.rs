//! Fixtures shared by the unit tests.

use crate::color::TagColor;
use crate::model::{RawTag, RawTagGroup, SavedTag, Tag};
use crate::geometry::Point;
use crate::service::{ServiceError, TagService};

/// Route log output through the test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// In-memory backend. Hands out increasing ids, or fails with a fixed message.
#[derive(Debug, Default)]
pub struct MockService {
    pub next_id: u64,
    pub failure: Option<String>,
    pub groups: Vec<RawTagGroup>,
    pub saved: Vec<Tag>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            next_id: 100,
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new()
        }
    }

    fn check(&self) -> Result<(), ServiceError> {
        match &self.failure {
            Some(message) => Err(ServiceError::new(message.clone())),
            None => Ok(()),
        }
    }
}

impl TagService for MockService {
    fn save_tag(&mut self, tag: &Tag) -> Result<SavedTag, ServiceError> {
        self.check()?;
        self.next_id += 1;
        self.saved.push(tag.clone());
        Ok(SavedTag {
            id: self.next_id,
            user: Some("tester".to_string()),
        })
    }

    fn create_group(&mut self, _image_id: u64, name: &str) -> Result<RawTagGroup, ServiceError> {
        self.check()?;
        self.next_id += 1;
        Ok(RawTagGroup {
            id: self.next_id,
            name: name.to_string(),
            tags: Vec::new(),
        })
    }

    fn fetch_groups(&mut self, _image_id: u64) -> Result<Vec<RawTagGroup>, ServiceError> {
        self.check()?;
        Ok(self.groups.clone())
    }
}

/// A raw rectangle tag spanning the diagonal `(x0, y0)-(x1, y1)`.
pub fn raw_rect(id: u64, color: [u8; 3], x0: f32, y0: f32, x1: f32, y1: f32) -> RawTag {
    RawTag {
        id: Some(id),
        color: TagColor(color),
        points: vec![Point::new(x0, y0), Point::new(x1, y1)],
        description: format!("tag {}", id),
        user: "tester".to_string(),
        gene_links: Vec::new(),
    }
}

pub fn raw_group(id: u64, name: &str, tags: Vec<RawTag>) -> RawTagGroup {
    RawTagGroup {
        id,
        name: name.to_string(),
        tags,
    }
}
