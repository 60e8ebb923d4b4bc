//! Crawler module for section discovery and image harvesting
//!
//! This module contains the core harvest logic, including:
//! - Navigation discovery with fallback strategies
//! - Image extraction from markup and computed styles
//! - Overall harvest coordination

mod coordinator;
mod extractor;
mod navigation;

pub use coordinator::{Coordinator, RunSummary};
pub use extractor::{background_images, extract, markup_images, ImageLocator, LocatorKind};
pub use navigation::{
    default_strategies, discover, FooterNav, NavStrategy, PrimaryNav, Section,
    FALLBACK_SECTION_LABEL, UNNAMED_LINK_LABEL,
};

use crate::config::Config;
use crate::render::ChromeRenderer;
use crate::Result;
use std::time::Duration;
use url::Url;

/// Runs a complete harvest of one site
///
/// This is the main entry point for harvesting. It will:
/// 1. Launch a headless browser
/// 2. Render the home page and discover sections
/// 3. Render each section and download its images
/// 4. Write the audit log into the run folder
///
/// # Arguments
///
/// * `site` - URL of the site's home page
/// * `config` - The harvest configuration
///
/// # Returns
///
/// * `Ok(RunSummary)` - Harvest completed; audit log is on disk
/// * `Err(BilderfangError)` - Harvest failed before any section was processed
///
/// # Example
///
/// ```no_run
/// use bilderfang::config::Config;
/// use bilderfang::crawler::harvest;
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let site = Url::parse("https://example.com/")?;
/// let summary = harvest(&site, Config::default()).await?;
/// println!("Stored {} images", summary.stored());
/// # Ok(())
/// # }
/// ```
pub async fn harvest(site: &Url, config: Config) -> Result<RunSummary> {
    let renderer = ChromeRenderer::launch(Duration::from_secs(config.render.timeout_secs)).await?;
    let mut coordinator = Coordinator::new(Box::new(renderer), config);
    coordinator.run(site).await
}
