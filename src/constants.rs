//! Global constants for the tag board

/// Default opacity of tag fills
pub const DEFAULT_FILL_ALPHA: f32 = 0.5;

/// Default outline width of tag polygons, in display pixels
pub const DEFAULT_STROKE_WIDTH: f32 = 1.0;

/// Allele pages, followed by the allele name
pub const DEFAULT_ALLELE_URL: &str = "https://www.maizegdb.org/data_center/variation/";

/// Genome browser, followed by the image's gene symbol
pub const DEFAULT_GBROWSE_URL: &str = "https://www.maizegdb.org/gbrowse/maize_v4test?l=MaizeDIG;q=";

/// Gene model pages, followed by the image's gene symbol
pub const DEFAULT_GENE_MODEL_URL: &str = "https://www.maizegdb.org/gene_center/gene/";

/// Info panel labels
pub mod labels {
    pub const TAG_NAME: &str = "Tag Name:";
    pub const COLOR: &str = "Color:";
    pub const GENE_LINKS: &str = "Gene Links:";
    pub const NO_GENE_LINKS: &str = "There are no gene links for this tag.";
    pub const GBROWSER: &str = "GBrowser";
    pub const GENE_MODEL: &str = "Gene Model";
}
