use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use bilderfang::config::load_config;
///
/// let config = load_config(Path::new("config.toml")).unwrap();
/// println!("Render timeout: {}s", config.render.timeout_secs);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let config: Config = toml::from_str(&content)?;

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::DedupIdentity;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[render]
timeout-secs = 45

[download]
timeout-secs = 20
user-agent = "TestAgent/1.0"

[output]
root-dir = "archive"
log-filename = "log.xlsx"
dedup-identity = "digest"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.render.timeout_secs, 45);
        assert_eq!(config.download.timeout_secs, 20);
        assert_eq!(config.download.user_agent, "TestAgent/1.0");
        assert_eq!(config.output.root_dir.to_str(), Some("archive"));
        assert_eq!(config.output.log_filename, "log.xlsx");
        assert_eq!(config.output.dedup_identity, DedupIdentity::Digest);
    }

    #[test]
    fn test_load_empty_config_uses_defaults() {
        let file = create_temp_config("");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.render.timeout_secs, 30);
        assert_eq!(config.download.user_agent, "Mozilla/5.0");
        assert_eq!(config.output.root_dir.to_str(), Some("Bilder"));
        assert_eq!(config.output.log_filename, "bilder_log.xlsx");
        assert_eq!(config.output.dedup_identity, DedupIdentity::Path);
    }

    #[test]
    fn test_load_partial_config_fills_remaining_defaults() {
        let config_content = r#"
[download]
user-agent = "CustomAgent"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.download.user_agent, "CustomAgent");
        assert_eq!(config.download.timeout_secs, 30);
        assert_eq!(config.render.timeout_secs, 30);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let config_content = "this is not valid TOML {{{";
        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[render]
timeout-secs = 0
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }
}
