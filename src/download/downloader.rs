use crate::audit::DownloadRecord;
use crate::config::DedupIdentity;
use crate::crawler::ImageLocator;
use crate::download::DownloadError;
use crate::resource::{
    display_locator, embedded_file_name, extension_allowed, remote_file_name, DedupTracker,
    ResolvedResource,
};
use crate::storage::RunLayout;
use futures::StreamExt;
use reqwest::Client;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use url::Url;

/// Suffix for in-progress downloads, renamed away on completion
const TEMP_SUFFIX: &str = ".part";

/// Result of attempting to store one image
#[derive(Debug)]
pub enum DownloadOutcome {
    /// The image was stored; the record describes where
    Stored(DownloadRecord),

    /// The image's extension is not on the allow list; nothing was fetched
    SkippedExtension,

    /// The same image was already stored earlier in this run
    SkippedDuplicate,

    /// Fetching or writing failed; details were logged
    Failed,
}

/// Stores images into the run's archive, at most once each
///
/// Duplicate suppression claims an identity key before any fetch or write
/// happens, so repeated references to the same image cost one download no
/// matter how many pages carry them. Under digest identity two distinct
/// images can still map to the same file name; the later one is stored
/// under a numbered name instead of overwriting the first.
pub struct Downloader {
    client: Client,
    layout: RunLayout,
    dedup: DedupTracker,
    used_paths: DedupTracker,
    identity: DedupIdentity,
}

impl Downloader {
    /// Creates a downloader for one run
    ///
    /// # Arguments
    ///
    /// * `client` - HTTP client used for remote fetches
    /// * `layout` - Directory layout of the run's archive
    /// * `identity` - How duplicates are recognized
    pub fn new(client: Client, layout: RunLayout, identity: DedupIdentity) -> Self {
        Downloader {
            client,
            layout,
            dedup: DedupTracker::new(),
            used_paths: DedupTracker::new(),
            identity,
        }
    }

    /// Stores one resolved image into the section's folder
    ///
    /// # Arguments
    ///
    /// * `locator` - The locator the image was discovered under
    /// * `resource` - The resolved form of that locator
    /// * `section_label` - Label of the section the image belongs to
    pub async fn download(
        &mut self,
        locator: &ImageLocator,
        resource: &ResolvedResource,
        section_label: &str,
    ) -> DownloadOutcome {
        match resource {
            ResolvedResource::Remote { url } => self.fetch_remote(locator, url, section_label).await,
            ResolvedResource::Inline {
                extension, bytes, ..
            } => self.store_inline(locator, extension, bytes, section_label).await,
        }
    }

    async fn fetch_remote(
        &mut self,
        locator: &ImageLocator,
        url: &Url,
        section_label: &str,
    ) -> DownloadOutcome {
        let file_name = remote_file_name(url);

        // Checked before anything is fetched; a PDF link costs no request
        if !extension_allowed(&file_name) {
            return DownloadOutcome::SkippedExtension;
        }

        let mut destination = self.layout.destination(section_label, &file_name);

        if self.identity == DedupIdentity::Path {
            let key = destination.to_string_lossy();
            if !self.dedup.claim(&key) {
                return DownloadOutcome::SkippedDuplicate;
            }
        }

        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Failed to fetch {}: {}", display_locator(locator.raw_value.as_str()), e);
                return DownloadOutcome::Failed;
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                "HTTP {} for {}",
                status,
                display_locator(locator.raw_value.as_str())
            );
            return DownloadOutcome::Failed;
        }

        match self.identity {
            DedupIdentity::Path => {
                if let Err(e) = stream_to_file(response, &destination).await {
                    tracing::warn!(
                        "Failed to store {}: {}",
                        display_locator(locator.raw_value.as_str()),
                        e
                    );
                    return DownloadOutcome::Failed;
                }
            }
            DedupIdentity::Digest => {
                let bytes = match response.bytes().await {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        tracing::warn!(
                            "Failed to read body of {}: {}",
                            display_locator(locator.raw_value.as_str()),
                            e
                        );
                        return DownloadOutcome::Failed;
                    }
                };

                if !self.dedup.claim(&digest_key(&bytes)) {
                    return DownloadOutcome::SkippedDuplicate;
                }

                destination = self.reserve_destination(section_label, &file_name);

                if let Err(e) = write_bytes(&destination, &bytes).await {
                    tracing::warn!(
                        "Failed to store {}: {}",
                        display_locator(locator.raw_value.as_str()),
                        e
                    );
                    return DownloadOutcome::Failed;
                }
            }
        }

        DownloadOutcome::Stored(record(locator, &destination))
    }

    async fn store_inline(
        &mut self,
        locator: &ImageLocator,
        extension: &str,
        bytes: &[u8],
        section_label: &str,
    ) -> DownloadOutcome {
        let file_name = embedded_file_name(&locator.raw_value, extension);

        let destination = match self.identity {
            DedupIdentity::Path => {
                let destination = self.layout.destination(section_label, &file_name);
                if !self.dedup.claim(&destination.to_string_lossy()) {
                    return DownloadOutcome::SkippedDuplicate;
                }
                destination
            }
            DedupIdentity::Digest => {
                if !self.dedup.claim(&digest_key(bytes)) {
                    return DownloadOutcome::SkippedDuplicate;
                }
                self.reserve_destination(section_label, &file_name)
            }
        };

        if let Err(e) = write_bytes(&destination, bytes).await {
            tracing::warn!(
                "Failed to store {}: {}",
                display_locator(locator.raw_value.as_str()),
                e
            );
            return DownloadOutcome::Failed;
        }

        DownloadOutcome::Stored(record(locator, &destination))
    }

    /// Picks an unclaimed destination path for a file name
    ///
    /// Used under digest identity, where the duplicate claim is on content
    /// and says nothing about paths. The first taker gets the plain name;
    /// later distinct images with the same name get a numbered one.
    fn reserve_destination(&mut self, section_label: &str, file_name: &str) -> PathBuf {
        let destination = self.layout.destination(section_label, file_name);
        if self.used_paths.claim(&destination.to_string_lossy()) {
            return destination;
        }

        let (stem, extension) = split_file_name(file_name);
        let mut counter = 2;
        loop {
            let candidate = format!("{}_{}{}", stem, counter, extension);
            let destination = self.layout.destination(section_label, &candidate);
            if self.used_paths.claim(&destination.to_string_lossy()) {
                return destination;
            }
            counter += 1;
        }
    }
}

/// Splits a file name at its extension, `foto.jpg` -> (`foto`, `.jpg`)
fn split_file_name(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(dot) => file_name.split_at(dot),
        None => (file_name, ""),
    }
}

/// Builds the audit record for a stored image
fn record(locator: &ImageLocator, destination: &Path) -> DownloadRecord {
    DownloadRecord {
        page: locator.page.to_string(),
        resource: locator.raw_value.clone(),
        alt_text: locator.alt_text.clone(),
        stored_path: destination.to_string_lossy().into_owned(),
        kind: locator.kind.audit_label(),
    }
}

/// Identity key for digest-based duplicate detection
fn digest_key(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Temp path next to the destination, `foto.jpg` -> `foto.jpg.part`
fn temp_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(TEMP_SUFFIX);
    destination.with_file_name(name)
}

/// Writes a complete byte buffer to its destination via a temp file
///
/// The temp file is removed again if any step fails, leaving either the
/// complete image or nothing.
async fn write_bytes(destination: &Path, bytes: &[u8]) -> Result<(), DownloadError> {
    if let Some(parent) = destination.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let temp = temp_path(destination);
    if let Err(e) = tokio::fs::write(&temp, bytes).await {
        let _ = tokio::fs::remove_file(&temp).await;
        return Err(e.into());
    }

    finalize(&temp, destination).await
}

/// Streams a response body to its destination via a temp file
///
/// The temp file is removed again if any step fails, leaving either the
/// complete image or nothing.
async fn stream_to_file(
    response: reqwest::Response,
    destination: &Path,
) -> Result<(), DownloadError> {
    if let Some(parent) = destination.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let temp = temp_path(destination);
    if let Err(e) = copy_body(response, &temp).await {
        let _ = tokio::fs::remove_file(&temp).await;
        return Err(e);
    }

    finalize(&temp, destination).await
}

/// Moves a finished temp file onto its final name
async fn finalize(temp: &Path, destination: &Path) -> Result<(), DownloadError> {
    if let Err(e) = tokio::fs::rename(temp, destination).await {
        let _ = tokio::fs::remove_file(temp).await;
        return Err(e.into());
    }
    Ok(())
}

async fn copy_body(response: reqwest::Response, temp: &Path) -> Result<(), DownloadError> {
    let mut file = tokio::fs::File::create(temp).await?;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
    }

    file.flush().await?;
    Ok(())
}
