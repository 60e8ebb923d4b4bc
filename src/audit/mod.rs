//! Audit log for harvested images
//!
//! Every stored image gets one record tying it back to the page it was
//! found on. Records accumulate in memory during the run and are flushed
//! once, at the end, into a single xlsx workbook next to the images.

mod xlsx;

use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing the audit log
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Failed to write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One successfully stored image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRecord {
    /// URL of the page the image was found on
    pub page: String,

    /// The image locator as found on the page, URL or `data:` URI
    pub resource: String,

    /// The image's alt text, empty when the element had none
    pub alt_text: String,

    /// Path the image was stored under
    pub stored_path: String,

    /// How the image was referenced, `<img>` or `background`
    pub kind: &'static str,
}

/// In-memory audit log, appended to as images are stored
#[derive(Debug, Default)]
pub struct AuditLog {
    records: Vec<DownloadRecord>,
}

impl AuditLog {
    pub fn new() -> Self {
        AuditLog::default()
    }

    /// Appends a record for a stored image
    pub fn append(&mut self, record: DownloadRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[DownloadRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<DownloadRecord> {
        self.records
    }

    /// Writes the workbook to `path`, creating parent directories as needed
    ///
    /// An empty log still produces a valid workbook with the header row, so
    /// a run that stored nothing leaves a readable document behind.
    ///
    /// # Arguments
    ///
    /// * `path` - Destination of the xlsx file
    pub fn flush(&self, path: &Path) -> Result<(), AuditError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        xlsx::write_workbook(&self.records, path)?;
        Ok(())
    }
}
