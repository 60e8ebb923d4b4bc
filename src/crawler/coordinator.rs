//! Harvest coordinator - main orchestration logic
//!
//! This module drives one complete harvest run:
//! - Rendering the home page and discovering sections
//! - Rendering each section and extracting its image locators
//! - Resolving, deduplicating, and downloading the images
//! - Collecting audit records and flushing the audit log

use crate::audit::{AuditLog, DownloadRecord};
use crate::config::Config;
use crate::crawler::extractor::extract;
use crate::crawler::navigation::{default_strategies, discover, NavStrategy};
use crate::download::{build_http_client, DownloadOutcome, Downloader};
use crate::render::PageRenderer;
use crate::resource::{self, display_locator};
use crate::storage::RunLayout;
use chrono::Local;
use std::path::PathBuf;
use url::Url;

/// What a completed harvest run produced
#[derive(Debug)]
pub struct RunSummary {
    /// Number of sections discovered on the home page
    pub sections: usize,

    /// Number of images that failed to resolve, fetch, or store
    pub failed: usize,

    /// One record per stored image, in discovery order
    pub records: Vec<DownloadRecord>,

    /// Where the audit log was written
    pub log_path: PathBuf,
}

impl RunSummary {
    /// Number of images stored
    pub fn stored(&self) -> usize {
        self.records.len()
    }
}

/// Main harvest coordinator structure
pub struct Coordinator {
    renderer: Box<dyn PageRenderer>,
    strategies: Vec<Box<dyn NavStrategy>>,
    config: Config,
}

impl Coordinator {
    /// Creates a coordinator with the default navigation strategies
    ///
    /// # Arguments
    ///
    /// * `renderer` - The page renderer to use for the whole run
    /// * `config` - The harvest configuration
    pub fn new(renderer: Box<dyn PageRenderer>, config: Config) -> Self {
        Coordinator {
            renderer,
            strategies: default_strategies(),
            config,
        }
    }

    /// Replaces the navigation strategy chain
    pub fn with_strategies(mut self, strategies: Vec<Box<dyn NavStrategy>>) -> Self {
        self.strategies = strategies;
        self
    }

    /// Runs one complete harvest of `site`
    ///
    /// The run proceeds through the sections sequentially:
    /// 1. Render the home page; failure here aborts the run
    /// 2. Discover sections from its navigation
    /// 3. Render each section; failures skip that section
    /// 4. Extract, resolve, and download each section's images
    /// 5. Flush the audit log into the run folder
    ///
    /// A single image failing never aborts the run; it is logged, counted,
    /// and the harvest moves on.
    ///
    /// # Arguments
    ///
    /// * `site` - URL of the site's home page
    ///
    /// # Returns
    ///
    /// * `Ok(RunSummary)` - The run finished and the audit log was written
    /// * `Err(BilderfangError)` - The home page could not be rendered or
    ///   the audit log could not be written
    pub async fn run(&mut self, site: &Url) -> crate::Result<RunSummary> {
        tracing::info!("Starting harvest of {}", site);

        let client = build_http_client(&self.config.download)?;
        let layout = RunLayout::new(&self.config.output.root_dir, site, Local::now());

        let home = match self.renderer.render(site).await {
            Ok(home) => home,
            Err(e) => {
                tracing::error!("Failed to render {}: {}", site, e);
                self.renderer.shutdown().await;
                return Err(e.into());
            }
        };

        let sections = discover(&home.html, &home.url, &self.strategies);
        tracing::info!("Discovered {} sections", sections.len());

        let mut downloader = Downloader::new(
            client,
            layout.clone(),
            self.config.output.dedup_identity,
        );
        let mut audit = AuditLog::new();
        let mut failed = 0;

        for section in &sections {
            tracing::info!("Section '{}': {}", section.label, section.url);

            let page = match self.renderer.render(&section.url).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!("Skipping section '{}': {}", section.label, e);
                    continue;
                }
            };

            for locator in extract(&page) {
                let resolved = match resource::resolve(&locator.raw_value) {
                    Ok(Some(resolved)) => resolved,
                    Ok(None) => continue,
                    Err(e) => {
                        tracing::warn!(
                            "Unusable locator {}: {}",
                            display_locator(&locator.raw_value),
                            e
                        );
                        failed += 1;
                        continue;
                    }
                };

                match downloader
                    .download(&locator, &resolved, &section.label)
                    .await
                {
                    DownloadOutcome::Stored(record) => audit.append(record),
                    DownloadOutcome::Failed => failed += 1,
                    DownloadOutcome::SkippedExtension | DownloadOutcome::SkippedDuplicate => {}
                }
            }
        }

        self.renderer.shutdown().await;

        let log_path = layout.log_path(&self.config.output.log_filename);
        audit.flush(&log_path)?;

        tracing::info!(
            "Harvest complete: {} images stored, {} failed",
            audit.len(),
            failed
        );

        Ok(RunSummary {
            sections: sections.len(),
            failed,
            records: audit.into_records(),
            log_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{RenderError, RenderedPage};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[derive(Default)]
    struct FixtureRenderer {
        pages: HashMap<String, RenderedPage>,
    }

    impl FixtureRenderer {
        fn with_page(mut self, url: &str, html: &str) -> Self {
            let parsed = Url::parse(url).unwrap();
            self.pages.insert(
                parsed.to_string(),
                RenderedPage {
                    url: parsed,
                    html: html.to_string(),
                    background_images: Vec::new(),
                },
            );
            self
        }
    }

    #[async_trait]
    impl PageRenderer for FixtureRenderer {
        async fn render(&mut self, url: &Url) -> Result<RenderedPage, RenderError> {
            self.pages.get(url.as_str()).cloned().ok_or_else(|| {
                RenderError::Navigation {
                    url: url.to_string(),
                    message: "no fixture for URL".to_string(),
                }
            })
        }
    }

    fn config_for(root: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.output.root_dir = root.to_path_buf();
        config
    }

    #[tokio::test]
    async fn test_embedded_image_is_harvested() {
        let dir = tempdir().unwrap();
        let renderer = FixtureRenderer::default()
            .with_page(
                "https://example.com/",
                r#"<html><body><nav><a href="/galerie">Galerie</a></nav></body></html>"#,
            )
            .with_page(
                "https://example.com/galerie",
                r#"<html><body><img src="data:image/png;base64,aGFsbG8=" alt="Gruss"></body></html>"#,
            );

        let mut coordinator =
            Coordinator::new(Box::new(renderer), config_for(dir.path()));
        let site = Url::parse("https://example.com/").unwrap();
        let summary = coordinator.run(&site).await.unwrap();

        assert_eq!(summary.sections, 1);
        assert_eq!(summary.stored(), 1);
        assert_eq!(summary.failed, 0);
        assert_eq!(summary.records[0].alt_text, "Gruss");
        assert!(std::path::Path::new(&summary.records[0].stored_path).exists());
        assert!(summary.log_path.exists());
    }

    #[tokio::test]
    async fn test_site_without_navigation_harvests_home() {
        let dir = tempdir().unwrap();
        let renderer = FixtureRenderer::default().with_page(
            "https://example.com/",
            r#"<html><body><img src="data:image/png;base64,aGFsbG8="></body></html>"#,
        );

        let mut coordinator =
            Coordinator::new(Box::new(renderer), config_for(dir.path()));
        let site = Url::parse("https://example.com/").unwrap();
        let summary = coordinator.run(&site).await.unwrap();

        assert_eq!(summary.sections, 1);
        assert_eq!(summary.stored(), 1);
        assert!(summary.records[0].stored_path.contains("Unkategorisiert"));
    }

    #[tokio::test]
    async fn test_unrenderable_home_page_aborts() {
        let dir = tempdir().unwrap();
        let renderer = FixtureRenderer::default();

        let mut coordinator =
            Coordinator::new(Box::new(renderer), config_for(dir.path()));
        let site = Url::parse("https://example.com/").unwrap();
        let result = coordinator.run(&site).await;

        assert!(result.is_err());
        // Nothing was flushed: the run folder never came into being
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
