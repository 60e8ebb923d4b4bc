//! Image resource handling
//!
//! This module turns the raw locator strings found on a page into something
//! the downloader can act on:
//! - Classifying locators as remote URLs or embedded `data:` payloads
//! - The file extension allow list, checked before any fetch or decode
//! - Stable file names for remote and embedded images
//! - Duplicate tracking so each image is stored at most once per run

mod dedup;
mod naming;
mod resolver;

pub use dedup::DedupTracker;
pub use naming::{embedded_file_name, remote_file_name};
pub use resolver::{resolve, ResolveError, ResolvedResource};

/// File extensions eligible for download, lowercase with leading dot
pub const ALLOWED_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".webp"];

/// Maximum characters of a locator shown in log messages
const LOCATOR_DISPLAY_LEN: usize = 60;

/// Checks whether a file name carries an allowed image extension
///
/// The comparison is case-insensitive, so `Foto.JPG` passes.
pub fn extension_allowed(file_name: &str) -> bool {
    let lower = file_name.to_lowercase();
    ALLOWED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Shortens a locator for display in log messages
///
/// Remote URLs are usually fine but embedded `data:` URIs can run to
/// megabytes, so anything past 60 characters is cut off.
pub fn display_locator(raw_value: &str) -> String {
    if raw_value.chars().count() <= LOCATOR_DISPLAY_LEN {
        return raw_value.to_string();
    }

    let truncated: String = raw_value.chars().take(LOCATOR_DISPLAY_LEN).collect();
    format!("{}...", truncated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_allowed() {
        assert!(extension_allowed("foto.jpg"));
        assert!(extension_allowed("foto.jpeg"));
        assert!(extension_allowed("foto.png"));
        assert!(extension_allowed("foto.webp"));
        assert!(extension_allowed("FOTO.JPG"));

        assert!(!extension_allowed("anleitung.pdf"));
        assert!(!extension_allowed("animation.gif"));
        assert!(!extension_allowed("logo.svg"));
        assert!(!extension_allowed("foto"));
        assert!(!extension_allowed(""));
    }

    #[test]
    fn test_display_locator_short_values_unchanged() {
        assert_eq!(
            display_locator("https://example.com/foto.jpg"),
            "https://example.com/foto.jpg"
        );
    }

    #[test]
    fn test_display_locator_truncates_long_values() {
        let long = format!("data:image/png;base64,{}", "A".repeat(200));
        let shown = display_locator(&long);
        assert_eq!(shown.chars().count(), 63);
        assert!(shown.ends_with("..."));
        assert!(shown.starts_with("data:image/png;base64,"));
    }
}
