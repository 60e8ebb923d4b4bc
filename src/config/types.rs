use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure for Bilderfang
///
/// Every section is optional in the TOML file; anything left out falls back
/// to the defaults below, so an empty file (or no file at all) is valid.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub download: DownloadConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Headless browser configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Maximum time to wait for a page to load (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig { timeout_secs: 30 }
    }
}

/// Image download configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Request timeout for a single image fetch (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every image request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        DownloadConfig {
            timeout_secs: 30,
            user_agent: "Mozilla/5.0".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory under which each run creates its own archive folder
    #[serde(rename = "root-dir")]
    pub root_dir: PathBuf,

    /// File name of the xlsx audit log inside the run folder
    #[serde(rename = "log-filename")]
    pub log_filename: String,

    /// How two downloads are recognized as the same image
    #[serde(rename = "dedup-identity")]
    pub dedup_identity: DedupIdentity,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            root_dir: PathBuf::from("Bilder"),
            log_filename: "bilder_log.xlsx".to_string(),
            dedup_identity: DedupIdentity::Path,
        }
    }
}

/// Identity used when deciding whether an image was already stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DedupIdentity {
    /// Two images are the same if they land on the same destination path
    Path,
    /// Two images are the same if their bytes hash to the same digest
    Digest,
}
