use crate::storage::sanitize_file_name;
use sha2::{Digest, Sha256};
use url::Url;

/// Name used when a remote URL yields no usable file name
const GENERIC_REMOTE_NAME: &str = "bild.jpg";

/// Hex characters of the content digest kept in embedded image names
const EMBEDDED_DIGEST_LEN: usize = 32;

/// Derives the stored file name for a remote image from its URL
///
/// Takes the URL path's final segment and sanitizes it. URLs whose path
/// yields no base name (a bare host or a trailing slash) fall back to a
/// generic name, which later collides in the duplicate tracker rather than
/// producing a pile of unnamed files.
///
/// # Arguments
///
/// * `url` - The remote image URL
///
/// # Returns
///
/// * A sanitized file name, never empty
pub fn remote_file_name(url: &Url) -> String {
    let segment = url
        .path_segments()
        .and_then(|segments| segments.last())
        .filter(|s| !s.is_empty() && *s != "." && *s != "..");

    let name = match segment {
        Some(segment) => sanitize_file_name(segment),
        None => String::new(),
    };

    if name.is_empty() {
        GENERIC_REMOTE_NAME.to_string()
    } else {
        name
    }
}

/// Derives a stable file name for an embedded image
///
/// The name is `embedded_` plus the first 32 hex characters of the SHA-256
/// digest of the full locator, so the same payload gets the same name in
/// every run and across sections.
///
/// # Arguments
///
/// * `raw_value` - The complete `data:` URI as found on the page
/// * `extension` - Extension chosen from the URI's MIME type, with dot
pub fn embedded_file_name(raw_value: &str, extension: &str) -> String {
    let digest = Sha256::digest(raw_value.as_bytes());
    let hex_digest = hex::encode(digest);
    format!("embedded_{}{}", &hex_digest[..EMBEDDED_DIGEST_LEN], extension)
}
