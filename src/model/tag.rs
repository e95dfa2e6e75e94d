//! Tag data model.
//!
//! A tag is a polygon annotation on the image, drawn in a group color and
//! carrying a description, its author and any gene links.

use serde::{Deserialize, Serialize};

use crate::color::TagColor;
use crate::error::BoardError;
use crate::geometry::Point;
use crate::model::{GeneLink, GroupId};

/// Server-issued identifier of a tag.
pub type TagId = u64;

/// Number of points in the compact rectangle encoding (two diagonal corners).
pub const RECTANGLE_POINTS: usize = 2;

/// Minimum number of points of an explicit polygon.
pub const MIN_POLYGON_POINTS: usize = 3;

/// Check that a point list is either a rectangle diagonal or a polygon.
pub fn validate_points(points: &[Point]) -> Result<(), BoardError> {
    match points.len() {
        RECTANGLE_POINTS => Ok(()),
        n if n >= MIN_POLYGON_POINTS => Ok(()),
        n => Err(BoardError::invalid_points(n)),
    }
}

/// A single polygon annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    id: Option<TagId>,
    color: TagColor,
    points: Vec<Point>,
    description: String,
    author: String,
    gene_links: Vec<GeneLink>,
    group_id: GroupId,
}

impl Tag {
    /// Create an unsaved tag in the given group.
    pub fn new(
        color: TagColor,
        points: Vec<Point>,
        description: impl Into<String>,
        group_id: GroupId,
    ) -> Self {
        Self {
            id: None,
            color,
            points,
            description: description.into(),
            author: String::new(),
            gene_links: Vec::new(),
            group_id,
        }
    }

    /// Build a tag from backend data.
    pub fn from_raw(raw: RawTag, group_id: GroupId) -> Self {
        Self {
            id: raw.id,
            color: raw.color,
            points: raw.points,
            description: raw.description,
            author: raw.user,
            gene_links: raw.gene_links,
            group_id,
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_gene_links(mut self, gene_links: Vec<GeneLink>) -> Self {
        self.gene_links = gene_links;
        self
    }

    pub fn id(&self) -> Option<TagId> {
        self.id
    }

    /// Record the identity assigned by the backend.
    pub fn set_id(&mut self, id: TagId) {
        self.id = Some(id);
    }

    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    pub fn color(&self) -> TagColor {
        self.color
    }

    /// Points in original image coordinates.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Whether the points are the two diagonal corners of a rectangle.
    pub fn is_rectangle(&self) -> bool {
        self.points.len() == RECTANGLE_POINTS
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn gene_links(&self) -> &[GeneLink] {
        &self.gene_links
    }

    pub fn group_id(&self) -> GroupId {
        self.group_id
    }
}

/// User input for a tag that has not been saved yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTag {
    pub color: TagColor,
    /// Points in original image coordinates
    pub points: Vec<Point>,
    pub description: String,
    pub group_id: GroupId,
}

impl NewTag {
    pub fn new(
        color: TagColor,
        points: Vec<Point>,
        description: impl Into<String>,
        group_id: GroupId,
    ) -> Self {
        Self {
            color,
            points,
            description: description.into(),
            group_id,
        }
    }
}

/// Tag as sent by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTag {
    #[serde(default)]
    pub id: Option<TagId>,
    pub color: TagColor,
    pub points: Vec<Point>,
    #[serde(default)]
    pub description: String,
    /// Name of the user who created the tag
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub gene_links: Vec<GeneLink>,
}

/// Backend response to a successful tag save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedTag {
    pub id: TagId,
    /// Name of the user the backend recorded as the author
    #[serde(default)]
    pub user: Option<String>,
}

impl SavedTag {
    pub fn new(id: TagId) -> Self {
        Self { id, user: None }
    }
}
