//! Data file export.
//!
//! A board can be exported as XML or JSON, either from the data it already
//! holds (cached) or from a fresh copy fetched through the [`TagService`].
//! The four combinations are the variants of [`ExportKind`]; each produces a
//! [`DataFile`].
//!
//! ```rust,ignore
//! let kind = ExportKind::new(ExportFormat::Json, Freshness::Cached);
//! let mut file = board.create_export(kind, &request, &mut service);
//! std::fs::write(file.file_name(), file.contents()?)?;
//! ```

mod document;
mod xml;

pub use document::{ExportDocument, GeneLinkSection, GroupSection, ImageSection, TagSection};

use crate::error::BoardError;
use crate::model::{ImageMetadata, TagGroup};
use crate::service::TagService;

/// Output syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xml,
    Json,
}

/// Where the exported tags come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// The groups already loaded in the board
    Cached,
    /// Groups fetched from the backend when the file is written
    Fresh,
}

/// One of the four export strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    XmlCached,
    XmlFresh,
    JsonCached,
    JsonFresh,
}

impl ExportKind {
    pub fn new(format: ExportFormat, freshness: Freshness) -> Self {
        match (format, freshness) {
            (ExportFormat::Xml, Freshness::Cached) => ExportKind::XmlCached,
            (ExportFormat::Xml, Freshness::Fresh) => ExportKind::XmlFresh,
            (ExportFormat::Json, Freshness::Cached) => ExportKind::JsonCached,
            (ExportFormat::Json, Freshness::Fresh) => ExportKind::JsonFresh,
        }
    }

    pub fn format(&self) -> ExportFormat {
        match self {
            ExportKind::XmlCached | ExportKind::XmlFresh => ExportFormat::Xml,
            ExportKind::JsonCached | ExportKind::JsonFresh => ExportFormat::Json,
        }
    }

    pub fn freshness(&self) -> Freshness {
        match self {
            ExportKind::XmlCached | ExportKind::JsonCached => Freshness::Cached,
            ExportKind::XmlFresh | ExportKind::JsonFresh => Freshness::Fresh,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self.format() {
            ExportFormat::Xml => "xml",
            ExportFormat::Json => "json",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self.format() {
            ExportFormat::Xml => "application/xml",
            ExportFormat::Json => "application/json",
        }
    }
}

/// What to put in an export file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportRequest {
    pub image_url: String,
    /// File name of the image, also the stem of the export file name
    pub image_file: String,
    pub include_organisms: bool,
    /// Include uploader and upload date
    pub include_upload_info: bool,
    pub include_tag_groups: bool,
    /// Include the tags of each group (requires tag groups)
    pub include_tags: bool,
    /// Include gene links of each tag (requires tags)
    pub include_gene_links: bool,
}

impl ExportRequest {
    /// A request that includes everything.
    pub fn full(image_url: impl Into<String>, image_file: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
            image_file: image_file.into(),
            include_organisms: true,
            include_upload_info: true,
            include_tag_groups: true,
            include_tags: true,
            include_gene_links: true,
        }
    }
}

/// A generated export file.
pub trait DataFile {
    fn kind(&self) -> ExportKind;

    /// Suggested file name, derived from the image file name.
    fn file_name(&self) -> String;

    fn mime_type(&self) -> &'static str {
        self.kind().mime_type()
    }

    /// Render the file contents.
    fn contents(&mut self) -> Result<String, BoardError>;
}

fn export_file_name(image_file: &str, kind: ExportKind) -> String {
    let stem = std::path::Path::new(image_file)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("image");
    format!("{}_tags.{}", stem, kind.extension())
}

fn write(format: ExportFormat, doc: &ExportDocument) -> Result<String, BoardError> {
    match format {
        ExportFormat::Xml => xml::write_document(doc),
        ExportFormat::Json => Ok(serde_json::to_string_pretty(doc)?),
    }
}

/// Export of the board's in-memory groups, captured at construction.
#[derive(Debug)]
pub struct CachedDataFile {
    kind: ExportKind,
    file_name: String,
    document: ExportDocument,
}

impl CachedDataFile {
    pub fn new<'a>(
        format: ExportFormat,
        metadata: &ImageMetadata,
        groups: impl IntoIterator<Item = &'a TagGroup>,
        request: &ExportRequest,
    ) -> Self {
        let kind = ExportKind::new(format, Freshness::Cached);
        Self {
            kind,
            file_name: export_file_name(&request.image_file, kind),
            document: ExportDocument::build(metadata, groups, request),
        }
    }

    pub fn document(&self) -> &ExportDocument {
        &self.document
    }
}

impl DataFile for CachedDataFile {
    fn kind(&self) -> ExportKind {
        self.kind
    }

    fn file_name(&self) -> String {
        self.file_name.clone()
    }

    fn contents(&mut self) -> Result<String, BoardError> {
        write(self.kind.format(), &self.document)
    }
}

/// Export that fetches the image's groups from the backend on every write.
pub struct FreshDataFile<'a> {
    kind: ExportKind,
    metadata: ImageMetadata,
    request: ExportRequest,
    service: &'a mut dyn TagService,
}

impl<'a> FreshDataFile<'a> {
    pub fn new(
        format: ExportFormat,
        metadata: &ImageMetadata,
        request: &ExportRequest,
        service: &'a mut dyn TagService,
    ) -> Self {
        Self {
            kind: ExportKind::new(format, Freshness::Fresh),
            metadata: metadata.clone(),
            request: request.clone(),
            service,
        }
    }
}

impl DataFile for FreshDataFile<'_> {
    fn kind(&self) -> ExportKind {
        self.kind
    }

    fn file_name(&self) -> String {
        export_file_name(&self.request.image_file, self.kind)
    }

    fn contents(&mut self) -> Result<String, BoardError> {
        let groups: Vec<TagGroup> = self
            .service
            .fetch_groups(self.metadata.id)?
            .into_iter()
            .map(TagGroup::from_raw)
            .collect();
        log::info!(
            "Fetched {} tag groups for fresh {} export of image {}",
            groups.len(),
            self.kind.extension(),
            self.metadata.id
        );
        let doc = ExportDocument::build(&self.metadata, &groups, &self.request);
        write(self.kind.format(), &doc)
    }
}
