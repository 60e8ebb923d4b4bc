//! Configuration module for Bilderfang
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A configuration file is optional; every setting has a sensible default.
//!
//! # Example
//!
//! ```no_run
//! use bilderfang::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Images will be stored under: {}", config.output.root_dir.display());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, DedupIdentity, DownloadConfig, OutputConfig, RenderConfig};

// Re-export parser functions
pub use parser::load_config;
