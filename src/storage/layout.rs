use crate::storage::sanitize::sanitize_file_name;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use url::Url;

/// Directory layout for a single harvest run
///
/// Every run gets its own folder named after the site's host and the start
/// time, e.g. `Bilder/example.com_2024-05-17_14-32/`. Section folders and the
/// audit log live inside it. Directories are only created once something is
/// actually written into them, so a run that stores nothing leaves only the
/// folder holding the audit log behind.
#[derive(Debug, Clone)]
pub struct RunLayout {
    root: PathBuf,
}

impl RunLayout {
    /// Creates the layout for a run against `site` started at `started`
    ///
    /// # Arguments
    ///
    /// * `base_dir` - Directory under which run folders are collected
    /// * `site` - The site being harvested; its host names the run folder
    /// * `started` - Start time of the run, part of the folder name
    pub fn new(base_dir: &Path, site: &Url, started: DateTime<Local>) -> Self {
        let host = site.host_str().unwrap_or("site");
        let host = host.strip_prefix("www.").unwrap_or(host);
        let folder = format!("{}_{}", host, started.format("%Y-%m-%d_%H-%M"));

        RunLayout {
            root: base_dir.join(folder),
        }
    }

    /// The run's root folder
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Folder for one section's images
    pub fn section_dir(&self, section_label: &str) -> PathBuf {
        self.root.join(section_folder_name(section_label))
    }

    /// Full destination path for an image inside a section folder
    pub fn destination(&self, section_label: &str, file_name: &str) -> PathBuf {
        self.section_dir(section_label).join(file_name)
    }

    /// Path of the audit log inside the run folder
    pub fn log_path(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }
}

/// Turns a section label into a usable folder name
///
/// Labels that sanitize down to nothing still need a folder, so they map
/// to a single underscore.
pub fn section_folder_name(label: &str) -> String {
    let name = sanitize_file_name(label);
    if name.is_empty() {
        "_".to_string()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn layout_for(site: &str) -> RunLayout {
        let url = Url::parse(site).unwrap();
        let started = Local.with_ymd_and_hms(2024, 5, 17, 14, 32, 0).unwrap();
        RunLayout::new(Path::new("Bilder"), &url, started)
    }

    #[test]
    fn test_run_folder_names_host_and_time() {
        let layout = layout_for("https://example.com/start");
        assert_eq!(
            layout.root(),
            Path::new("Bilder/example.com_2024-05-17_14-32")
        );
    }

    #[test]
    fn test_www_prefix_is_dropped() {
        let layout = layout_for("https://www.example.com/");
        assert_eq!(
            layout.root(),
            Path::new("Bilder/example.com_2024-05-17_14-32")
        );
    }

    #[test]
    fn test_destination_under_section_folder() {
        let layout = layout_for("https://example.com/");
        let dest = layout.destination("Unsere Produkte", "foto.jpg");
        assert_eq!(
            dest,
            Path::new("Bilder/example.com_2024-05-17_14-32/Unsere_Produkte/foto.jpg")
        );
    }

    #[test]
    fn test_log_path_in_run_root() {
        let layout = layout_for("https://example.com/");
        assert_eq!(
            layout.log_path("bilder_log.xlsx"),
            Path::new("Bilder/example.com_2024-05-17_14-32/bilder_log.xlsx")
        );
    }

    #[test]
    fn test_section_folder_name_sanitized() {
        assert_eq!(section_folder_name("Über uns / Team"), "Über_uns_Team");
        assert_eq!(section_folder_name("   "), "_");
    }
}
