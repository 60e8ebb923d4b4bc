//! Navigation discovery
//!
//! The home page decides which pages get harvested: every link in the site's
//! navigation becomes one section. Strategies are tried in order until one
//! finds links, so a site without a `<nav>` element still gets its footer
//! links used, and a site with neither is harvested as a single section.

use scraper::{Html, Selector};
use url::Url;

/// Label for a navigation link whose text is empty
pub const UNNAMED_LINK_LABEL: &str = "Unbenannt";

/// Section label used when no navigation is found at all
pub const FALLBACK_SECTION_LABEL: &str = "Unkategorisiert";

/// One entry of the site's navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Visible link text, used as the section's folder name
    pub label: String,

    /// Absolute URL of the section page
    pub url: Url,
}

/// A way of reading sections out of the home page
pub trait NavStrategy: Send + Sync {
    /// Short name for log messages
    fn name(&self) -> &'static str;

    /// Sections this strategy finds, in document order
    fn sections(&self, document: &Html, base: &Url) -> Vec<Section>;
}

/// Reads links from the page's first `<nav>` element
pub struct PrimaryNav;

impl NavStrategy for PrimaryNav {
    fn name(&self) -> &'static str {
        "primary-nav"
    }

    fn sections(&self, document: &Html, base: &Url) -> Vec<Section> {
        sections_in_region(document, "nav", base)
    }
}

/// Reads links from the page's first `<footer>` element
pub struct FooterNav;

impl NavStrategy for FooterNav {
    fn name(&self) -> &'static str {
        "footer"
    }

    fn sections(&self, document: &Html, base: &Url) -> Vec<Section> {
        sections_in_region(document, "footer", base)
    }
}

/// The built-in strategy order: main navigation first, footer second
pub fn default_strategies() -> Vec<Box<dyn NavStrategy>> {
    vec![Box::new(PrimaryNav), Box::new(FooterNav)]
}

/// Collects the section links inside the first element matching `region`
fn sections_in_region(document: &Html, region: &str, base: &Url) -> Vec<Section> {
    let mut sections = Vec::new();

    let region_selector = match Selector::parse(region) {
        Ok(selector) => selector,
        Err(_) => return sections,
    };
    let link_selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(_) => return sections,
    };

    let region_element = match document.select(&region_selector).next() {
        Some(element) => element,
        None => return sections,
    };

    for link in region_element.select(&link_selector) {
        if let Some(href) = link.value().attr("href") {
            if let Some(url) = resolve_section_link(base, href) {
                let text = link.text().collect::<String>();
                let text = text.trim();
                let label = if text.is_empty() {
                    UNNAMED_LINK_LABEL.to_string()
                } else {
                    text.to_string()
                };

                sections.push(Section { label, url });
            }
        }
    }

    sections
}

/// Resolves a navigation href to an absolute URL and validates it
///
/// Returns None for hrefs that cannot name a section:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only anchors
/// - Invalid or non-HTTP(S) URLs after resolution
fn resolve_section_link(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    if href.starts_with('#') {
        return None;
    }

    match base.join(href) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Some(url),
        _ => None,
    }
}

/// Discovers the sections to harvest from the rendered home page
///
/// Strategies are consulted in order; the first one that finds any link
/// wins and the rest are not tried. Duplicate links are kept as they
/// appear, downstream duplicate handling decides what to do with them.
///
/// # Arguments
///
/// * `html` - The rendered home page DOM
/// * `home` - The home page URL, base for resolving relative links
/// * `strategies` - Strategy chain, usually [`default_strategies`]
///
/// # Returns
///
/// The discovered sections; never empty, since a page without navigation
/// yields the home page itself as a single fallback section.
pub fn discover(html: &str, home: &Url, strategies: &[Box<dyn NavStrategy>]) -> Vec<Section> {
    let document = Html::parse_document(html);

    for strategy in strategies {
        let sections = strategy.sections(&document, home);
        if !sections.is_empty() {
            tracing::debug!(
                "Strategy '{}' found {} sections",
                strategy.name(),
                sections.len()
            );
            return sections;
        }
    }

    tracing::warn!("No navigation found on {}, harvesting it as one section", home);

    vec![Section {
        label: FALLBACK_SECTION_LABEL.to_string(),
        url: home.clone(),
    }]
}
