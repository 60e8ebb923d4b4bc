use crate::audit::DownloadRecord;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use std::path::Path;

const SHEET_NAME: &str = "Bilder-Log";

const HEADERS: [&str; 5] = ["Seite", "Bild-URL", "ALT-Text", "Gespeichert als", "Typ"];

/// Longest locator written verbatim into a cell
const MAX_CELL_LOCATOR: usize = 255;

/// Writes all records into a single-sheet workbook
///
/// The Bild-URL column becomes a clickable hyperlink where the locator is
/// one, i.e. for http(s) URLs. Embedded `data:` locators are written as
/// plain text instead, truncated so a megabyte of base64 does not end up
/// in a cell.
pub fn write_workbook(records: &[DownloadRecord], path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let header_format = Format::new().set_bold();
    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;

        worksheet.write_string(row, 0, &record.page)?;

        if is_linkable(&record.resource) {
            worksheet.write_url(row, 1, record.resource.as_str())?;
        } else {
            worksheet.write_string(row, 1, cell_safe(&record.resource))?;
        }

        worksheet.write_string(row, 2, &record.alt_text)?;
        worksheet.write_string(row, 3, &record.stored_path)?;
        worksheet.write_string(row, 4, record.kind)?;
    }

    workbook.save(path)?;
    Ok(())
}

/// Whether a locator can be written as a hyperlink
///
/// Worksheet URLs only take web schemes and have a length cap, so `data:`
/// URIs and oversized URLs fall back to plain text.
fn is_linkable(resource: &str) -> bool {
    (resource.starts_with("http://") || resource.starts_with("https://"))
        && resource.len() <= 2000
}

/// Truncates an overlong locator for plain-text cells
fn cell_safe(resource: &str) -> String {
    if resource.chars().count() <= MAX_CELL_LOCATOR {
        return resource.to_string();
    }

    let truncated: String = resource.chars().take(MAX_CELL_LOCATOR).collect();
    format!("{}...", truncated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(resource: &str, kind: &'static str) -> DownloadRecord {
        DownloadRecord {
            page: "https://example.com/galerie".to_string(),
            resource: resource.to_string(),
            alt_text: String::new(),
            stored_path: "Bilder/run/Galerie/foto.jpg".to_string(),
            kind,
        }
    }

    /// Counts `<row>` elements in the saved workbook's worksheet XML
    fn sheet_row_count(path: &Path) -> usize {
        use std::io::Read;

        let file = std::fs::File::open(path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut sheet = String::new();
        archive
            .by_name("xl/worksheets/sheet1.xml")
            .unwrap()
            .read_to_string(&mut sheet)
            .unwrap();
        sheet.matches("<row ").count()
    }

    #[test]
    fn test_empty_log_writes_header_only_workbook() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bilder_log.xlsx");

        write_workbook(&[], &path).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
        assert_eq!(sheet_row_count(&path), 1);
    }

    #[test]
    fn test_one_row_per_record_plus_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bilder_log.xlsx");

        let records = vec![
            record("https://example.com/eins.jpg", "<img>"),
            record("https://example.com/zwei.png", "background"),
            record("data:image/png;base64,aGFsbG8=", "<img>"),
        ];

        write_workbook(&records, &path).unwrap();

        assert_eq!(sheet_row_count(&path), records.len() + 1);
    }

    #[test]
    fn test_records_with_remote_and_embedded_locators() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bilder_log.xlsx");

        let records = vec![
            record("https://example.com/foto.jpg", "<img>"),
            record(&format!("data:image/png;base64,{}", "A".repeat(500)), "background"),
        ];

        // The embedded locator must be written as text, not rejected as a
        // bad hyperlink
        write_workbook(&records, &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_is_linkable() {
        assert!(is_linkable("https://example.com/foto.jpg"));
        assert!(is_linkable("http://example.com/foto.jpg"));
        assert!(!is_linkable("data:image/png;base64,aGFsbG8="));
        assert!(!is_linkable(&format!("https://example.com/{}", "a".repeat(2100))));
    }

    #[test]
    fn test_cell_safe_truncates() {
        let long = "x".repeat(300);
        let safe = cell_safe(&long);
        assert_eq!(safe.chars().count(), 258);
        assert!(safe.ends_with("..."));

        assert_eq!(cell_safe("short"), "short");
    }
}
