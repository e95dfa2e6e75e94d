//! Tag groups: named, ordered collections of tags.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::model::{RawTag, Tag};

/// Identifier and key of a tag group.
pub type GroupId = u64;

/// A named collection of tags. Tag order is insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct TagGroup {
    id: GroupId,
    name: String,
    tags: Vec<Rc<Tag>>,
}

impl TagGroup {
    pub fn new(id: GroupId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tags: Vec::new(),
        }
    }

    /// Build a group from backend data, skipping tags with unusable geometry.
    pub fn from_raw(raw: RawTagGroup) -> Self {
        let mut group = Self::new(raw.id, raw.name);
        for raw_tag in raw.tags {
            if let Err(e) = crate::model::validate_points(&raw_tag.points) {
                log::warn!(
                    "Skipping tag {:?} in group {}: {}",
                    raw_tag.id,
                    group.id,
                    e
                );
                continue;
            }
            group.tags.push(Rc::new(Tag::from_raw(raw_tag, raw.id)));
        }
        group
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    /// Key used in the board's current group set.
    pub fn key(&self) -> GroupId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tags(&self) -> &[Rc<Tag>] {
        &self.tags
    }

    pub fn add_tag(&mut self, tag: Rc<Tag>) {
        self.tags.push(tag);
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Tag group as sent by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTagGroup {
    pub id: GroupId,
    pub name: String,
    #[serde(default)]
    pub tags: Vec<RawTag>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_skips_degenerate_tags() {
        let raw: RawTagGroup = serde_json::from_str(
            r#"{
                "id": 1,
                "name": "Leaves",
                "tags": [
                    {"id": 10, "color": [1, 2, 3], "points": [{"x": 0, "y": 0}, {"x": 5, "y": 5}]},
                    {"id": 11, "color": [1, 2, 3], "points": [{"x": 0, "y": 0}]},
                    {"id": 12, "color": [1, 2, 3], "points": [{"x": 0, "y": 0}, {"x": 5, "y": 0}, {"x": 5, "y": 5}]}
                ]
            }"#,
        )
        .unwrap();

        let group = TagGroup::from_raw(raw);
        assert_eq!(group.name(), "Leaves");
        let ids: Vec<_> = group.tags().iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec![Some(10), Some(12)]);
        assert!(group.tags().iter().all(|t| t.group_id() == 1));
    }

    #[test]
    fn test_add_tag_keeps_insertion_order() {
        let mut group = TagGroup::new(2, "Roots");
        assert!(group.is_empty());
        for id in [5, 3, 8] {
            let mut tag = Tag::new(crate::color::TagColor::new(9, 9, 9), vec![], "", 2);
            tag.set_id(id);
            group.add_tag(Rc::new(tag));
        }
        let ids: Vec<_> = group.tags().iter().filter_map(|t| t.id()).collect();
        assert_eq!(ids, vec![5, 3, 8]);
        assert_eq!(group.key(), 2);
    }
}
