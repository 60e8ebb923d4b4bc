//! Shared test fixtures
//!
//! Harvest tests run against a fixture renderer instead of a real browser,
//! so they need neither a Chromium installation nor network access for the
//! page rendering half of the pipeline.

use async_trait::async_trait;
use bilderfang::render::{PageRenderer, RenderError, RenderedPage};
use std::collections::HashMap;
use url::Url;

/// A renderer that serves pre-baked pages
#[derive(Default)]
pub struct FixtureRenderer {
    pages: HashMap<String, RenderedPage>,
}

impl FixtureRenderer {
    /// Adds a page the renderer will serve for `url`
    ///
    /// `backgrounds` plays the role of the computed background-image values
    /// a real browser would report for the page's divs.
    pub fn with_page(mut self, url: &str, html: &str, backgrounds: Vec<String>) -> Self {
        let parsed = Url::parse(url).expect("fixture URL must be valid");
        self.pages.insert(
            parsed.to_string(),
            RenderedPage {
                url: parsed,
                html: html.to_string(),
                background_images: backgrounds,
            },
        );
        self
    }
}

#[async_trait]
impl PageRenderer for FixtureRenderer {
    async fn render(&mut self, url: &Url) -> Result<RenderedPage, RenderError> {
        self.pages
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| RenderError::Navigation {
                url: url.to_string(),
                message: "no fixture for URL".to_string(),
            })
    }
}
