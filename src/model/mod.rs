//! Data models for tags, tag groups and image metadata.

mod gene_link;
mod metadata;
mod tag;
mod tag_group;

pub use gene_link::GeneLink;
pub use metadata::ImageMetadata;
pub use tag::{
    MIN_POLYGON_POINTS, NewTag, RECTANGLE_POINTS, RawTag, SavedTag, Tag, TagId, validate_points,
};
pub use tag_group::{GroupId, RawTagGroup, TagGroup};
