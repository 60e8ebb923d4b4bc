//! Image downloading
//!
//! This module fetches remote images and writes embedded ones, always
//! through a temp-file-then-rename step so an interrupted run never leaves
//! half an image behind under its final name. The extension allow list is
//! enforced here for remote images, before any request goes out.

mod client;
mod downloader;

pub use client::build_http_client;
pub use downloader::{DownloadOutcome, Downloader};

use thiserror::Error;

/// Errors that can occur while storing a single image
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
