//! Tagboard - interactive tag overlay for annotated images
//!
//! A [`TagBoard`] draws the polygon tags of an image's tag groups over the
//! displayed image, highlights the tags under the pointer, lists them in an
//! [`InfoPanel`] and supports adding tags and groups through a
//! [`TagService`] backend. Tag data can be exported as XML or JSON.

pub mod board;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod geometry;
pub mod info_panel;
pub mod model;
pub mod service;
pub mod surface;

#[cfg(test)]
mod test_support;

pub use board::TagBoard;
pub use color::{Paint, TagColor};
pub use config::{BoardConfig, ConfigError};
pub use error::BoardError;
pub use export::{DataFile, ExportFormat, ExportKind, ExportRequest, Freshness};
pub use geometry::{ImageView, Point};
pub use info_panel::{InfoPanel, PanelEntry};
pub use model::{GeneLink, GroupId, ImageMetadata, NewTag, RawTag, RawTagGroup, SavedTag, Tag, TagGroup, TagId};
pub use service::{ServiceError, TagService};
pub use surface::{Container, Painter};
