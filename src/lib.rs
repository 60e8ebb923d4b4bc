//! Bilderfang: a website image harvester
//!
//! This crate crawls a website's navigation structure, renders every section
//! page in a headless browser, collects the images each page displays (both
//! `<img>` elements and CSS background images, embedded payloads included),
//! downloads the allowed ones into a timestamped archive, and writes an xlsx
//! audit log tying each stored file back to where it came from.

pub mod audit;
pub mod config;
pub mod crawler;
pub mod download;
pub mod render;
pub mod resource;
pub mod storage;

use thiserror::Error;

/// Main error type for Bilderfang operations
#[derive(Debug, Error)]
pub enum BilderfangError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Render error: {0}")]
    Render(#[from] render::RenderError),

    #[error("Audit log error: {0}")]
    Audit(#[from] audit::AuditError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Bilderfang operations
pub type Result<T> = std::result::Result<T, BilderfangError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use audit::{AuditLog, DownloadRecord};
pub use config::Config;
pub use crawler::{harvest, Coordinator, ImageLocator, LocatorKind, RunSummary, Section};
pub use download::{DownloadOutcome, Downloader};
pub use render::{PageRenderer, RenderError, RenderedPage};
pub use resource::{ResolvedResource, ALLOWED_EXTENSIONS};
pub use storage::RunLayout;
