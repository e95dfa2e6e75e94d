//! Gene links: cross references from a tag to a genome feature.

use serde::{Deserialize, Serialize};

/// A link from a tag to a named gene, optionally naming an allele.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawGeneLink", into = "RawGeneLink")]
pub struct GeneLink {
    pub id: Option<u64>,
    /// Feature name
    pub name: String,
    pub allele: Option<String>,
    pub organism_id: Option<u64>,
}

impl GeneLink {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            allele: None,
            organism_id: None,
        }
    }

    pub fn with_allele(mut self, allele: impl Into<String>) -> Self {
        self.allele = Some(allele.into());
        self
    }

    /// The allele, if one is set and non-empty.
    pub fn allele(&self) -> Option<&str> {
        self.allele.as_deref().filter(|a| !a.is_empty())
    }
}

/// Gene link as exchanged with the backend: the feature is nested.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGeneLink {
    #[serde(default)]
    id: Option<u64>,
    feature: RawFeature,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFeature {
    name: String,
    #[serde(default)]
    allele: Option<String>,
    #[serde(default)]
    organism_id: Option<u64>,
}

impl From<RawGeneLink> for GeneLink {
    fn from(raw: RawGeneLink) -> Self {
        Self {
            id: raw.id,
            name: raw.feature.name,
            allele: raw.feature.allele,
            organism_id: raw.feature.organism_id,
        }
    }
}

impl From<GeneLink> for RawGeneLink {
    fn from(link: GeneLink) -> Self {
        Self {
            id: link.id,
            feature: RawFeature {
                name: link.name,
                allele: link.allele,
                organism_id: link.organism_id,
            },
        }
    }
}
