use crate::resource::extension_allowed;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;
use url::Url;

/// Errors that can occur while resolving an image locator
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Malformed data URI: {0}")]
    MalformedDataUri(String),

    #[error("Unsupported data URI encoding for '{0}', only base64 is handled")]
    UnsupportedEncoding(String),

    #[error("Base64 decode failed: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// An image locator resolved into something the downloader can act on
#[derive(Debug, Clone)]
pub enum ResolvedResource {
    /// A remote image reachable over HTTP
    Remote { url: Url },

    /// An image embedded in the page as a base64 `data:` URI
    Inline {
        mime_type: String,
        extension: &'static str,
        bytes: Vec<u8>,
    },
}

/// Maps a data URI MIME type to the file extension it would be stored under
fn extension_for_mime(mime_type: &str) -> Option<&'static str> {
    match mime_type {
        "image/jpeg" | "image/jpg" => Some(".jpg"),
        "image/png" => Some(".png"),
        "image/webp" => Some(".webp"),
        "image/gif" => Some(".gif"),
        "image/svg+xml" => Some(".svg"),
        _ => None,
    }
}

/// Resolves a raw locator string into a downloadable resource
///
/// # Arguments
///
/// * `raw_value` - The locator exactly as found on the page, either an
///   absolute URL or a `data:` URI
///
/// # Returns
///
/// * `Ok(Some(ResolvedResource))` - The locator points at a usable image
/// * `Ok(None)` - The locator is well-formed but its type is not eligible
///   for download; nothing was decoded
/// * `Err(ResolveError)` - The locator is malformed
pub fn resolve(raw_value: &str) -> Result<Option<ResolvedResource>, ResolveError> {
    if let Some(rest) = raw_value.strip_prefix("data:") {
        return resolve_inline(rest);
    }

    let url = Url::parse(raw_value)?;
    Ok(Some(ResolvedResource::Remote { url }))
}

/// Resolves the part of a `data:` URI after the scheme
///
/// The extension check runs before any decoding, so a multi-megabyte GIF
/// payload is rejected without touching its base64 body.
fn resolve_inline(rest: &str) -> Result<Option<ResolvedResource>, ResolveError> {
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| ResolveError::MalformedDataUri("missing ',' separator".to_string()))?;

    let mut parts = header.split(';');
    let mime_type = parts.next().unwrap_or("").trim().to_lowercase();
    let is_base64 = parts.any(|p| p.trim().eq_ignore_ascii_case("base64"));

    let extension = match extension_for_mime(&mime_type) {
        Some(ext) => ext,
        None => return Ok(None),
    };

    if !extension_allowed(extension) {
        return Ok(None);
    }

    if !is_base64 {
        return Err(ResolveError::UnsupportedEncoding(mime_type));
    }

    let bytes = STANDARD.decode(payload.trim())?;

    Ok(Some(ResolvedResource::Inline {
        mime_type,
        extension,
        bytes,
    }))
}
