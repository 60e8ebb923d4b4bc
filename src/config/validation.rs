use crate::config::types::{Config, DownloadConfig, OutputConfig, RenderConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_render_config(&config.render)?;
    validate_download_config(&config.download)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates render configuration
fn validate_render_config(config: &RenderConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 || config.timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "render timeout-secs must be between 1 and 300, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates download configuration
fn validate_download_config(config: &DownloadConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 || config.timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "download timeout-secs must be between 1 and 300, got {}",
            config.timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.root_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "root-dir cannot be empty".to_string(),
        ));
    }

    if config.log_filename.is_empty() {
        return Err(ConfigError::Validation(
            "log-filename cannot be empty".to_string(),
        ));
    }

    if config.log_filename.contains('/') || config.log_filename.contains('\\') {
        return Err(ConfigError::Validation(format!(
            "log-filename must be a plain file name, got '{}'",
            config.log_filename
        )));
    }

    if !config.log_filename.ends_with(".xlsx") {
        return Err(ConfigError::Validation(format!(
            "log-filename must end with .xlsx, got '{}'",
            config.log_filename
        )));
    }

    Ok(())
}
