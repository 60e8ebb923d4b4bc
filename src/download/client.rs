use crate::config::DownloadConfig;
use reqwest::Client;
use std::time::Duration;

/// Builds the HTTP client used for image downloads
///
/// Redirects are followed with reqwest's default policy since image URLs
/// frequently point at CDNs that redirect.
///
/// # Arguments
///
/// * `config` - The download configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use bilderfang::config::DownloadConfig;
/// use bilderfang::download::build_http_client;
///
/// let client = build_http_client(&DownloadConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &DownloadConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let config = DownloadConfig::default();
        let client = build_http_client(&config);
        assert!(client.is_ok());
    }

    #[test]
    fn test_build_http_client_with_custom_agent() {
        let config = DownloadConfig {
            timeout_secs: 5,
            user_agent: "TestAgent/1.0".to_string(),
        };
        assert!(build_http_client(&config).is_ok());
    }
}
