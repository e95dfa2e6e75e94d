//! Configuration file support for the tag board.
//!
//! Holds the backend site URL, the external reference link bases used by the
//! info panel, and overlay styling. Stored as versioned JSON.
//!
//! The board itself reads `links` and `style`. `site_url` and `log_level` are
//! settings for the host: the host's [`TagService`](crate::service::TagService)
//! implementation talks to `site_url`, and the host configures its logger
//! from `log_level`:
//!
//! ```rust,ignore
//! let config = BoardConfig::load_from_default_path().unwrap_or_default();
//! env_logger::Builder::new()
//!     .filter_level(config.log_level.to_level_filter())
//!     .init();
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color::Paint;
use crate::constants;

/// Log level setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Tag board configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Base URL of the annotation backend, used by the host's service
    #[serde(default)]
    pub site_url: String,

    /// External reference links shown for gene links
    #[serde(default)]
    pub links: ReferenceLinks,

    /// Overlay styling
    #[serde(default)]
    pub style: OverlayStyle,

    /// Log verbosity level the host applies to its logger
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Base URLs for the links rendered next to each gene link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceLinks {
    #[serde(default = "default_allele_url")]
    pub allele_url: String,
    #[serde(default = "default_gbrowse_url")]
    pub gbrowse_url: String,
    #[serde(default = "default_gene_model_url")]
    pub gene_model_url: String,
}

fn default_allele_url() -> String {
    constants::DEFAULT_ALLELE_URL.to_string()
}

fn default_gbrowse_url() -> String {
    constants::DEFAULT_GBROWSE_URL.to_string()
}

fn default_gene_model_url() -> String {
    constants::DEFAULT_GENE_MODEL_URL.to_string()
}

impl Default for ReferenceLinks {
    fn default() -> Self {
        Self {
            allele_url: default_allele_url(),
            gbrowse_url: default_gbrowse_url(),
            gene_model_url: default_gene_model_url(),
        }
    }
}

impl ReferenceLinks {
    pub fn allele(&self, allele: &str) -> String {
        format!("{}{}", self.allele_url, allele)
    }

    pub fn gbrowse(&self, gene_symbol: &str) -> String {
        format!("{}{}", self.gbrowse_url, gene_symbol)
    }

    pub fn gene_model(&self, gene_symbol: &str) -> String {
        format!("{}{}", self.gene_model_url, gene_symbol)
    }
}

/// How tag polygons are painted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayStyle {
    /// Opacity of tag fills
    #[serde(default = "default_fill_alpha")]
    pub fill_alpha: f32,
    /// Outline width
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f32,
    /// Outline of hovered polygons
    #[serde(default = "default_highlight_stroke")]
    pub highlight_stroke: Paint,
}

fn default_fill_alpha() -> f32 {
    constants::DEFAULT_FILL_ALPHA
}

fn default_stroke_width() -> f32 {
    constants::DEFAULT_STROKE_WIDTH
}

fn default_highlight_stroke() -> Paint {
    Paint::BLACK
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            fill_alpha: default_fill_alpha(),
            stroke_width: default_stroke_width(),
            highlight_stroke: default_highlight_stroke(),
        }
    }
}

impl BoardConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            site_url: String::new(),
            links: ReferenceLinks::default(),
            style: OverlayStyle::default(),
            log_level: LogLevel::default(),
        }
    }

    pub fn with_site_url(mut self, site_url: impl Into<String>) -> Self {
        self.site_url = site_url.into();
        self
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Get the default config file name.
    pub fn default_filename() -> &'static str {
        "tagboard.json"
    }

    /// Get the default config file path.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("tagboard").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("tagboard")
                    .join(Self::default_filename())
            })
        }
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    pub fn load_from_default_path() -> Option<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Save configuration to the default path.
    pub fn save_to_default_path(&self) -> Result<(), ConfigError> {
        let path = Self::default_path().ok_or_else(|| {
            ConfigError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;
        self.save_to(&path)
    }

    /// Try to load configuration from a file.
    /// Returns None if the file doesn't exist or can't be read.
    pub fn load_from(path: &Path) -> Option<Self> {
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded configuration from {:?}", path);
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse config file {:?}: {}", path, e);
                    None
                }
            },
            Err(e) => {
                log::warn!("Failed to read config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Save configuration to a file, creating its directory if needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json()?;
        std::fs::write(path, json)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
