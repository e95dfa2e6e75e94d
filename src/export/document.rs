//! Intermediate representation shared by the export writers.

use serde::Serialize;

use crate::color::TagColor;
use crate::export::ExportRequest;
use crate::geometry::Point;
use crate::model::{GeneLink, ImageMetadata, Tag, TagGroup, TagId};

/// Everything an export file contains, already filtered by the request flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub image: ImageSection,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tag_groups: Vec<GroupSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSection {
    pub id: u64,
    pub url: String,
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organisms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSection {
    pub id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<TagSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagSection {
    pub id: Option<TagId>,
    pub color: TagColor,
    pub points: Vec<Point>,
    pub description: String,
    pub author: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub gene_links: Vec<GeneLinkSection>,
}

/// Gene link in export form: the feature fields are flattened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneLinkSection {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allele: Option<String>,
}

impl From<&GeneLink> for GeneLinkSection {
    fn from(link: &GeneLink) -> Self {
        Self {
            name: link.name.clone(),
            allele: link.allele().map(str::to_string),
        }
    }
}

impl ExportDocument {
    /// Collect the sections the request asks for.
    pub fn build<'a>(
        metadata: &ImageMetadata,
        groups: impl IntoIterator<Item = &'a TagGroup>,
        request: &ExportRequest,
    ) -> Self {
        let image = ImageSection {
            id: metadata.id,
            url: request.image_url.clone(),
            file: request.image_file.clone(),
            organisms: request.include_organisms.then(|| metadata.organisms.clone()),
            uploaded_by: request
                .include_upload_info
                .then(|| metadata.uploaded_by.clone()),
            upload_date: request
                .include_upload_info
                .then(|| metadata.upload_date.clone()),
        };

        let tag_groups = if request.include_tag_groups {
            groups
                .into_iter()
                .map(|group| GroupSection {
                    id: group.id(),
                    name: group.name().to_string(),
                    tags: if request.include_tags {
                        group
                            .tags()
                            .iter()
                            .map(|tag| TagSection::build(tag, request.include_gene_links))
                            .collect()
                    } else {
                        Vec::new()
                    },
                })
                .collect()
        } else {
            Vec::new()
        };

        Self { image, tag_groups }
    }

    pub fn tag_count(&self) -> usize {
        self.tag_groups.iter().map(|g| g.tags.len()).sum()
    }
}

impl TagSection {
    fn build(tag: &Tag, include_gene_links: bool) -> Self {
        Self {
            id: tag.id(),
            color: tag.color(),
            points: tag.points().to_vec(),
            description: tag.description().to_string(),
            author: tag.author().to_string(),
            gene_links: if include_gene_links {
                tag.gene_links().iter().map(GeneLinkSection::from).collect()
            } else {
                Vec::new()
            },
        }
    }
}
