use crate::render::{PageRenderer, RenderError, RenderedPage};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use url::Url;

/// Collects the computed background-image of every div, in document order
const BACKGROUND_IMAGE_SCRIPT: &str =
    "Array.from(document.querySelectorAll('div')).map(e => window.getComputedStyle(e).backgroundImage)";

/// Chromium-backed renderer
///
/// Launches one headless browser for the whole run and opens a fresh tab per
/// page. Pages are closed as soon as their content has been read, so memory
/// stays flat no matter how many sections a site has.
pub struct ChromeRenderer {
    browser: Browser,
    handler_task: JoinHandle<()>,
    timeout: Duration,
}

impl ChromeRenderer {
    /// Launches a headless browser
    ///
    /// # Arguments
    ///
    /// * `timeout` - Longest wait for each navigation step of a page load
    ///
    /// # Returns
    ///
    /// * `Ok(ChromeRenderer)` - Browser is running and ready for pages
    /// * `Err(RenderError)` - No usable Chromium installation was found or
    ///   the browser failed to start
    pub async fn launch(timeout: Duration) -> Result<Self, RenderError> {
        let config = BrowserConfig::builder()
            .build()
            .map_err(RenderError::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| RenderError::Launch(e.to_string()))?;

        // The handler must be polled for the browser connection to make
        // progress; it runs until the browser closes.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(ChromeRenderer {
            browser,
            handler_task,
            timeout,
        })
    }

    async fn load_and_extract(&self, page: &Page, url: &Url) -> Result<RenderedPage, RenderError> {
        let seconds = self.timeout.as_secs();

        match tokio::time::timeout(self.timeout, page.goto(url.as_str())).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => {
                return Err(RenderError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })
            }
            Err(_) => {
                return Err(RenderError::Timeout {
                    url: url.to_string(),
                    seconds,
                })
            }
        }

        // Wait for the load to settle so script-inserted images exist in
        // the DOM before it is serialized
        match tokio::time::timeout(self.timeout, page.wait_for_navigation()).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => {
                return Err(RenderError::Navigation {
                    url: url.to_string(),
                    message: e.to_string(),
                })
            }
            Err(_) => {
                return Err(RenderError::Timeout {
                    url: url.to_string(),
                    seconds,
                })
            }
        }

        let html = page
            .content()
            .await
            .map_err(|e| RenderError::Protocol(e.to_string()))?;

        let background_images: Vec<String> = page
            .evaluate(BACKGROUND_IMAGE_SCRIPT)
            .await
            .map_err(|e| RenderError::Protocol(e.to_string()))?
            .into_value()
            .map_err(|e| RenderError::Protocol(e.to_string()))?;

        Ok(RenderedPage {
            url: url.clone(),
            html,
            background_images,
        })
    }
}

#[async_trait]
impl PageRenderer for ChromeRenderer {
    async fn render(&mut self, url: &Url) -> Result<RenderedPage, RenderError> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| RenderError::Protocol(e.to_string()))?;

        let result = self.load_and_extract(&page, url).await;

        // Close the tab regardless of the outcome; a page that failed to
        // load still holds a browser target
        if let Err(e) = page.close().await {
            tracing::debug!("Failed to close page for {}: {}", url, e);
        }

        result
    }

    async fn shutdown(&mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::debug!("Failed to close browser: {}", e);
        }
        let _ = self.browser.wait().await;
        self.handler_task.abort();
    }
}
