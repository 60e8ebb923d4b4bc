//! Storage module for the on-disk archive
//!
//! This module decides where harvested images live on disk:
//! - Per-run folder naming from the site host and start time
//! - Per-section subfolders named after sanitized navigation labels
//! - File name sanitization for labels and URL-derived names

mod layout;
mod sanitize;

pub use layout::{section_folder_name, RunLayout};
pub use sanitize::sanitize_file_name;
