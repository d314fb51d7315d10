//! Chromium driver using chromiumoxide.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::element::Element;
use chromiumoxide::handler::viewport::Viewport;
use chromiumoxide::page::{Page, ScreenshotParams};
use futures::StreamExt;
use pricewatch_core::AppConfig;
use tokio::task::JoinHandle;

use super::{BrowserLauncher, BrowserSession, PageDriver};
use crate::error::ScraperError;

/// Mirrors the visibility rule of common automation tools: not
/// `visibility: hidden` and a non-empty bounding box.
const IS_VISIBLE_JS: &str = "function() {
    const style = window.getComputedStyle(this);
    const rect = this.getBoundingClientRect();
    return !!style && style.visibility !== 'hidden'
        && !!(rect.top || rect.bottom || rect.width || rect.height);
}";

const TEXT_CONTENT_JS: &str = "function() { return this.textContent; }";

const CLICK_JS: &str = "function() { this.click(); }";

/// Launch settings for a Chromium session.
#[derive(Debug, Clone)]
pub struct ChromiumLauncher {
    headless: bool,
    executable: Option<PathBuf>,
    viewport: pricewatch_core::Viewport,
}

impl ChromiumLauncher {
    #[must_use]
    pub fn new(
        headless: bool,
        executable: Option<PathBuf>,
        viewport: pricewatch_core::Viewport,
    ) -> Self {
        Self {
            headless,
            executable,
            viewport,
        }
    }

    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self::new(
            config.headless,
            config.chromium_path.clone(),
            config.viewport,
        )
    }

    fn browser_config(&self) -> Result<BrowserConfig, ScraperError> {
        let viewport = Viewport {
            width: self.viewport.width,
            height: self.viewport.height,
            ..Viewport::default()
        };

        let mut builder = BrowserConfig::builder()
            .window_size(self.viewport.width, self.viewport.height)
            .viewport(viewport)
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions");

        if !self.headless {
            builder = builder.with_head();
        }
        // Without an explicit path chromiumoxide searches the usual install locations.
        if let Some(executable) = &self.executable {
            builder = builder.chrome_executable(executable);
        }

        builder
            .build()
            .map_err(|e| ScraperError::Launch(format!("invalid browser config: {e}")))
    }
}

#[async_trait]
impl BrowserLauncher for ChromiumLauncher {
    type Session = ChromiumSession;

    async fn launch(&self) -> Result<ChromiumSession, ScraperError> {
        let config = self.browser_config()?;

        tracing::info!(
            headless = self.headless,
            viewport = %self.viewport,
            "launching Chromium"
        );

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ScraperError::Launch(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!(error = %e, "CDP handler event error");
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler_task.abort();
                return Err(ScraperError::Launch(format!("failed to open page: {e}")));
            }
        };

        Ok(ChromiumSession {
            browser,
            page: ChromiumPage { page },
            handler_task,
        })
    }
}

/// A running Chromium process with one page.
///
/// Dropping the session without [`BrowserSession::close`] aborts the CDP
/// handler task and chromiumoxide kills the browser process.
pub struct ChromiumSession {
    browser: Browser,
    page: ChromiumPage,
    handler_task: JoinHandle<()>,
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    type Page = ChromiumPage;

    fn page(&self) -> &ChromiumPage {
        &self.page
    }

    async fn close(mut self) -> Result<(), ScraperError> {
        if let Err(e) = self.page.page.clone().close().await {
            tracing::debug!(error = %e, "page close failed; closing browser anyway");
        }
        self.browser
            .close()
            .await
            .map_err(|e| ScraperError::driver("close", e))?;
        self.browser
            .wait()
            .await
            .map_err(|e| ScraperError::driver("close", e))?;
        tracing::debug!("browser closed");
        Ok(())
    }
}

impl Drop for ChromiumSession {
    fn drop(&mut self) {
        self.handler_task.abort();
    }
}

pub struct ChromiumPage {
    page: Page,
}

impl ChromiumPage {
    async fn eval_on(
        element: &Element,
        operation: &'static str,
        function: &str,
    ) -> Result<Option<serde_json::Value>, ScraperError> {
        let returns = element
            .call_js_fn(function, false)
            .await
            .map_err(|e| ScraperError::driver(operation, e))?;
        Ok(returns.result.value)
    }
}

#[async_trait]
impl PageDriver for ChromiumPage {
    type Element = Element;

    async fn goto(&self, url: &str) -> Result<(), ScraperError> {
        self.page
            .goto(url)
            .await
            .map_err(|e| ScraperError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    async fn wait_for_navigation(&self) -> Result<(), ScraperError> {
        self.page
            .wait_for_navigation()
            .await
            .map_err(|e| ScraperError::driver("wait_for_navigation", e))?;
        Ok(())
    }

    async fn find_visible(&self, selector: &str) -> Result<Option<Element>, ScraperError> {
        // `find_element` reports "no match" as an error; `find_elements` does not.
        let Some(element) = self.find_all(selector).await?.into_iter().next() else {
            return Ok(None);
        };

        match Self::eval_on(&element, "is_visible", IS_VISIBLE_JS).await {
            Ok(Some(serde_json::Value::Bool(true))) => Ok(Some(element)),
            Ok(_) => Ok(None),
            Err(e) => {
                // The node can detach between the query and the probe while the page re-renders.
                tracing::debug!(selector, error = %e, "visibility probe failed");
                Ok(None)
            }
        }
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<Element>, ScraperError> {
        self.page
            .find_elements(selector)
            .await
            .map_err(|e| ScraperError::driver("find_all", e))
    }

    async fn text_content(&self, element: &Element) -> Result<String, ScraperError> {
        let value = Self::eval_on(element, "text_content", TEXT_CONTENT_JS).await?;
        Ok(value
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_string())
    }

    async fn click(&self, element: &Element) -> Result<(), ScraperError> {
        Self::eval_on(element, "click", CLICK_JS).await?;
        Ok(())
    }

    async fn screenshot(&self, path: &Path) -> Result<(), ScraperError> {
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Jpeg)
            .full_page(true)
            .build();

        self.page
            .save_screenshot(params, path)
            .await
            .map_err(|e| ScraperError::driver("screenshot", e))?;
        Ok(())
    }
}
