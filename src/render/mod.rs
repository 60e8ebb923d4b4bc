//! Page rendering
//!
//! Sites assemble their galleries with JavaScript and style sheets, so the
//! raw HTTP response is not enough: background images only exist as computed
//! styles. This module renders pages in a headless browser and hands back
//! both the final DOM and the computed `background-image` values.
//!
//! The [`PageRenderer`] trait is the seam that keeps the rest of the
//! pipeline testable without a browser installed.

mod chrome;

pub use chrome::ChromeRenderer;

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// Errors that can occur while rendering a page
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("Navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Page {url} did not settle within {seconds}s")]
    Timeout { url: String, seconds: u64 },

    #[error("Browser protocol error: {0}")]
    Protocol(String),
}

/// A fully rendered page
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// The page's URL, base for resolving relative image references
    pub url: Url,

    /// Serialized DOM after scripts have run
    pub html: String,

    /// Computed `background-image` value of every div on the page, in
    /// document order; mostly `none`, occasionally `url(...)` tokens
    pub background_images: Vec<String>,
}

/// Renders pages and reports their computed background images
#[async_trait]
pub trait PageRenderer: Send {
    /// Renders `url` and returns the settled page
    async fn render(&mut self, url: &Url) -> Result<RenderedPage, RenderError>;

    /// Releases renderer resources; called once after the last page
    async fn shutdown(&mut self) {}
}
