//! Image extraction from rendered pages
//!
//! A rendered page is scanned in two passes: first the `<img>` elements in
//! the DOM, then the computed background images the renderer collected.
//! Both passes produce [`ImageLocator`]s, the unit everything downstream
//! works with.

use crate::render::RenderedPage;
use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

/// Matches the first `url(...)` token of a CSS background-image value
const CSS_URL_PATTERN: &str = r#"url\(\s*['"]?([^'")]+)['"]?\s*\)"#;

/// How an image was referenced on its page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocatorKind {
    /// An `<img>` element's src attribute
    InlineElement,

    /// A div's computed CSS background-image
    BackgroundStyle,
}

impl LocatorKind {
    /// The label this kind carries in the audit log
    pub fn audit_label(&self) -> &'static str {
        match self {
            LocatorKind::InlineElement => "<img>",
            LocatorKind::BackgroundStyle => "background",
        }
    }
}

/// One image reference found on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLocator {
    /// The page the reference was found on
    pub page: Url,

    /// The reference itself: an absolute URL, or a `data:` URI verbatim
    pub raw_value: String,

    /// Whether it came from markup or from a computed style
    pub kind: LocatorKind,

    /// The element's alt text, empty for backgrounds and missing attributes
    pub alt_text: String,
}

/// Extracts every image locator from a rendered page
///
/// Markup images come first, background images after, each group in
/// document order. That order is also the order images appear in the
/// audit log.
pub fn extract(page: &RenderedPage) -> Vec<ImageLocator> {
    let mut locators = markup_images(page);
    locators.extend(background_images(page));
    locators
}

/// Collects the locators of all `<img>` elements with a non-empty src
pub fn markup_images(page: &RenderedPage) -> Vec<ImageLocator> {
    let mut locators = Vec::new();
    let document = Html::parse_document(&page.html);

    if let Ok(img_selector) = Selector::parse("img[src]") {
        for element in document.select(&img_selector) {
            if let Some(src) = element.value().attr("src") {
                let src = src.trim();
                if src.is_empty() {
                    continue;
                }

                if let Some(raw_value) = resolve_locator(&page.url, src) {
                    let alt_text = element
                        .value()
                        .attr("alt")
                        .map(|alt| alt.trim().to_string())
                        .unwrap_or_default();

                    locators.push(ImageLocator {
                        page: page.url.clone(),
                        raw_value,
                        kind: LocatorKind::InlineElement,
                        alt_text,
                    });
                }
            }
        }
    }

    locators
}

/// Collects the locators hidden in computed background-image values
///
/// Values are mostly `none`; the rest carry one or more `url(...)` tokens.
/// Only the first token counts, matching what the browser paints topmost.
pub fn background_images(page: &RenderedPage) -> Vec<ImageLocator> {
    let mut locators = Vec::new();

    let pattern = match Regex::new(CSS_URL_PATTERN) {
        Ok(pattern) => pattern,
        Err(_) => return locators,
    };

    for value in &page.background_images {
        if let Some(captures) = pattern.captures(value) {
            if let Some(token) = captures.get(1) {
                if let Some(raw_value) = resolve_locator(&page.url, token.as_str()) {
                    locators.push(ImageLocator {
                        page: page.url.clone(),
                        raw_value,
                        kind: LocatorKind::BackgroundStyle,
                        alt_text: String::new(),
                    });
                }
            }
        }
    }

    locators
}

/// Resolves a reference into the form the resolver works with
///
/// `data:` URIs pass through untouched; anything else is resolved against
/// the page URL so relative references become absolute.
fn resolve_locator(page_url: &Url, value: &str) -> Option<String> {
    if value.starts_with("data:") {
        return Some(value.to_string());
    }

    page_url.join(value).ok().map(|url| url.to_string())
}
